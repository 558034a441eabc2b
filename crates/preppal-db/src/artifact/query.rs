use preppal_entity::artifact::{Column, Entity, Kind, Model as Artifact};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn get_artifacts<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        kind: Option<Kind>,
    ) -> Result<Vec<Artifact>, DbErr> {
        let mut query = Entity::find().filter(Column::UserId.eq(user_id));
        if let Some(kind) = kind {
            query = query.filter(Column::Kind.eq(kind));
        }
        query.order_by_desc(Column::CreatedAt).all(conn).await
    }

    pub async fn find_owned<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        artifact_id: Uuid,
    ) -> Result<Option<Artifact>, DbErr> {
        Entity::find_by_id(artifact_id)
            .filter(Column::UserId.eq(user_id))
            .one(conn)
            .await
    }
}
