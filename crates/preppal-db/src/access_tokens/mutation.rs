use base64::Engine;
use preppal_entity::access_tokens::{ActiveModel, Column, Entity, Model};
use ring::rand::{self, SecureRandom};
use sea_orm::ActiveValue::Set;
use sea_orm::prelude::*;
use sea_orm::{ActiveModelTrait, TransactionTrait};

use crate::util::FlattenTransactionResultExt;

pub struct Mutation;

fn generate_token() -> String {
    let rng = rand::SystemRandom::new();
    let mut bytes = [0u8; 64];
    // This should never fail because the only function that can fail here is
    // getentropy which should never fail on a modern system.
    rng.fill(&mut bytes).expect("Failed to generate random bytes");
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

impl Mutation {
    /// Issues a fresh token for the user, replacing any previous one.
    /// There is exactly one live session per user.
    pub async fn replace_access_token<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        user_id: Uuid,
    ) -> Result<Model, DbErr> {
        conn.transaction(|txn| {
            Box::pin(async move {
                Entity::delete_many()
                    .filter(Column::UserId.eq(user_id))
                    .exec(txn)
                    .await?;

                let token = ActiveModel {
                    user_id: Set(user_id),
                    access_token: Set(generate_token()),
                    ..Default::default()
                };
                token.insert(txn).await
            })
        })
        .await
        .flatten_res()
    }

    pub async fn delete_access_token<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<(), DbErr> {
        Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .exec(conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token() {
        let token = generate_token();
        let token = base64::engine::general_purpose::STANDARD.decode(&token).unwrap();
        assert_eq!(token.len(), 64);
        // If this does happen we probably forgot to fill the buffer with random bytes
        token
            .iter()
            .find(|&&b| b != 0)
            .expect("token is all zeros, this should never happen");
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }
}
