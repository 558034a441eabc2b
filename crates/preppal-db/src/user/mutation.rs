use chrono::Utc;
use preppal_entity::user::{self, ActiveModel, Column, Entity, Model as User};
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, TransactionTrait};
use thiserror::Error;
use uuid::Uuid;

use crate::util::FlattenTransactionResultExt;

#[derive(Debug, Error)]
pub enum DebitError {
    #[error(transparent)]
    Db(#[from] DbErr),

    #[error("user {0} not found")]
    UserNotFound(Uuid),

    #[error("insufficient tokens: {required} required, {available} available")]
    InsufficientTokens { required: i64, available: i64 },

    #[error("amount must be positive, got {0}")]
    InvalidAmount(i64),
}

/// Outcome of a balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debit {
    pub previous_balance: i64,
    pub new_balance: i64,
}

pub struct Mutation;

impl Mutation {
    pub async fn create_user<C: ConnectionTrait>(
        conn: &C,
        email: &str,
        password_hash: &str,
        username: Option<String>,
        starting_tokens: i64,
    ) -> Result<User, DbErr> {
        let user = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_owned()),
            password_hash: Set(password_hash.to_owned()),
            username: Set(username),
            available_tokens: Set(starting_tokens),
            created_at: Set(Utc::now().naive_utc()),
        };
        user.insert(conn).await
    }

    /// Charges `amount` tokens against the user's balance and appends a
    /// usage-log row. The check and the debit are one conditional UPDATE,
    /// so two concurrent debits can never overspend: the statement only
    /// matches while `available_tokens >= amount`.
    pub async fn debit_tokens<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        user_id: Uuid,
        amount: i64,
    ) -> Result<Debit, DebitError> {
        if amount <= 0 {
            return Err(DebitError::InvalidAmount(amount));
        }

        conn.transaction(|txn| {
            Box::pin(async move {
                let res = Entity::update_many()
                    .col_expr(Column::AvailableTokens, Expr::col(Column::AvailableTokens).sub(amount))
                    .filter(Column::Id.eq(user_id))
                    .filter(Column::AvailableTokens.gte(amount))
                    .exec(txn)
                    .await?;

                if res.rows_affected == 0 {
                    let user = user::Entity::find_by_id(user_id).one(txn).await?;
                    return match user {
                        None => Err(DebitError::UserNotFound(user_id)),
                        Some(user) => Err(DebitError::InsufficientTokens {
                            required: amount,
                            available: user.available_tokens,
                        }),
                    };
                }

                let user = user::Entity::find_by_id(user_id)
                    .one(txn)
                    .await?
                    .ok_or(DebitError::UserNotFound(user_id))?;

                crate::token_usage::Mutation::log_usage(txn, user_id, amount).await?;

                Ok(Debit {
                    previous_balance: user.available_tokens + amount,
                    new_balance: user.available_tokens,
                })
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| {
            tracing::warn!(
                error = error as &dyn std::error::Error,
                %user_id,
                amount,
                "token debit failed"
            );
        })
    }

    /// Unconditional top-up, the counterpart of [`Self::debit_tokens`].
    pub async fn credit_tokens<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        user_id: Uuid,
        amount: i64,
    ) -> Result<Debit, DebitError> {
        if amount <= 0 {
            return Err(DebitError::InvalidAmount(amount));
        }

        conn.transaction(|txn| {
            Box::pin(async move {
                let res = Entity::update_many()
                    .col_expr(Column::AvailableTokens, Expr::col(Column::AvailableTokens).add(amount))
                    .filter(Column::Id.eq(user_id))
                    .exec(txn)
                    .await?;

                if res.rows_affected == 0 {
                    return Err(DebitError::UserNotFound(user_id));
                }

                let user = user::Entity::find_by_id(user_id)
                    .one(txn)
                    .await?
                    .ok_or(DebitError::UserNotFound(user_id))?;

                Ok(Debit {
                    previous_balance: user.available_tokens - amount,
                    new_balance: user.available_tokens,
                })
            })
        })
        .await
        .flatten_res()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preppal_test_helpers::{SqliteDb, TestDb};
    use sea_orm::{Database, DatabaseConnection, EntityTrait, PaginatorTrait, Schema};
    use test_log::test;

    async fn setup() -> (SqliteDb, DatabaseConnection) {
        let db = SqliteDb::new().unwrap();
        let conn = Database::connect(db.db_uri().as_ref()).await.unwrap();
        let backend = conn.get_database_backend();
        let schema = Schema::new(backend);
        for stmt in [
            schema.create_table_from_entity(preppal_entity::user::Entity),
            schema.create_table_from_entity(preppal_entity::access_tokens::Entity),
            schema.create_table_from_entity(preppal_entity::token_usage::Entity),
        ] {
            conn.execute(backend.build(&stmt)).await.unwrap();
        }
        (db, conn)
    }

    async fn create_test_user(conn: &DatabaseConnection, tokens: i64) -> User {
        Mutation::create_user(conn, "student@example.org", "$2b$12$hash", None, tokens)
            .await
            .unwrap()
    }

    #[test(tokio::test)]
    async fn test_debit_succeeds_with_sufficient_balance() {
        let (_db, conn) = setup().await;
        let user = create_test_user(&conn, 1000).await;

        let debit = Mutation::debit_tokens(&conn, user.id, 300).await.unwrap();
        assert_eq!(debit.previous_balance, 1000);
        assert_eq!(debit.new_balance, 700);

        let reloaded = crate::user::Query::find_user_by_id(&conn, user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.available_tokens, 700);

        let logged = preppal_entity::token_usage::Entity::find().count(&conn).await.unwrap();
        assert_eq!(logged, 1);
    }

    #[test(tokio::test)]
    async fn test_debit_fails_with_insufficient_balance() {
        let (_db, conn) = setup().await;
        let user = create_test_user(&conn, 100).await;

        let err = Mutation::debit_tokens(&conn, user.id, 101).await.unwrap_err();
        assert!(matches!(
            err,
            DebitError::InsufficientTokens {
                required: 101,
                available: 100
            }
        ));

        // Balance untouched, nothing logged.
        let reloaded = crate::user::Query::find_user_by_id(&conn, user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.available_tokens, 100);
        let logged = preppal_entity::token_usage::Entity::find().count(&conn).await.unwrap();
        assert_eq!(logged, 0);
    }

    #[test(tokio::test)]
    async fn test_debit_exact_balance_drains_to_zero() {
        let (_db, conn) = setup().await;
        let user = create_test_user(&conn, 1800).await;

        let debit = Mutation::debit_tokens(&conn, user.id, 1800).await.unwrap();
        assert_eq!(debit.new_balance, 0);
    }

    #[test(tokio::test)]
    async fn test_debit_unknown_user() {
        let (_db, conn) = setup().await;
        let err = Mutation::debit_tokens(&conn, Uuid::new_v4(), 10).await.unwrap_err();
        assert!(matches!(err, DebitError::UserNotFound(_)));
    }

    #[test(tokio::test)]
    async fn test_debit_rejects_non_positive_amounts() {
        let (_db, conn) = setup().await;
        let user = create_test_user(&conn, 100).await;

        assert!(matches!(
            Mutation::debit_tokens(&conn, user.id, 0).await.unwrap_err(),
            DebitError::InvalidAmount(0)
        ));
        assert!(matches!(
            Mutation::debit_tokens(&conn, user.id, -5).await.unwrap_err(),
            DebitError::InvalidAmount(-5)
        ));
    }

    // Regression test for the read-then-write race: two duplicate debits
    // where the balance only covers one must result in exactly one charge.
    #[test(tokio::test)]
    async fn test_concurrent_duplicate_debits_charge_once() {
        let (_db, conn) = setup().await;
        let user = create_test_user(&conn, 1000).await;

        let (first, second) = tokio::join!(
            Mutation::debit_tokens(&conn, user.id, 800),
            Mutation::debit_tokens(&conn, user.id, 800),
        );

        let successes = [&first, &second].iter().filter(|res| res.is_ok()).count();
        assert_eq!(successes, 1, "exactly one of the duplicate debits may succeed");

        let reloaded = crate::user::Query::find_user_by_id(&conn, user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.available_tokens, 200);

        let logged = preppal_entity::token_usage::Entity::find().count(&conn).await.unwrap();
        assert_eq!(logged, 1);
    }

    #[test(tokio::test)]
    async fn test_credit_increases_balance() {
        let (_db, conn) = setup().await;
        let user = create_test_user(&conn, 50).await;

        let credit = Mutation::credit_tokens(&conn, user.id, 200).await.unwrap();
        assert_eq!(credit.previous_balance, 50);
        assert_eq!(credit.new_balance, 250);
    }
}
