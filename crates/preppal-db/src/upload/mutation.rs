use chrono::Utc;
use preppal_entity::upload::{ActiveModel, Kind, Model as Upload};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr};
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create_upload<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        kind: Kind,
        source: String,
    ) -> Result<Upload, DbErr> {
        let upload = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            kind: Set(kind),
            source: Set(source),
            uploaded_at: Set(Utc::now().naive_utc()),
        };
        upload.insert(conn).await
    }
}
