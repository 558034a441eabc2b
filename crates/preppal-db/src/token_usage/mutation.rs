use chrono::Utc;
use preppal_entity::token_usage::{ActiveModel, Model};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr};
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn log_usage<C: ConnectionTrait>(conn: &C, user_id: Uuid, amount: i64) -> Result<Model, DbErr> {
        let now = Utc::now();
        let entry = ActiveModel {
            user_id: Set(user_id),
            amount: Set(amount),
            usage_day: Set(now.date_naive()),
            created_at: Set(now.naive_utc()),
            ..Default::default()
        };
        entry.insert(conn).await
    }
}
