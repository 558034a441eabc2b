use chrono::Utc;
use preppal_entity::artifact::{ActiveModel, Entity, Kind, Model as Artifact};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel};
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn create_artifact<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        upload_id: Uuid,
        kind: Kind,
        tokens_charged: i64,
    ) -> Result<Artifact, DbErr> {
        let artifact = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            upload_id: Set(upload_id),
            kind: Set(kind),
            tokens_charged: Set(tokens_charged),
            storage_key: Set(None),
            created_at: Set(Utc::now().naive_utc()),
        };
        artifact.insert(conn).await
    }

    /// The only update an artifact ever sees: attaching the storage key
    /// once the gzipped content is persisted.
    pub async fn attach_storage_key<C: ConnectionTrait>(
        conn: &C,
        artifact_id: Uuid,
        storage_key: String,
    ) -> Result<Artifact, DbErr> {
        let artifact = Entity::find_by_id(artifact_id)
            .one(conn)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Artifact with id {artifact_id} not found")))?;

        let mut artifact = artifact.into_active_model();
        artifact.storage_key = Set(Some(storage_key));
        artifact.update(conn).await
    }
}
