use preppal_entity::upload::{Column, Entity, Model as Upload};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn get_uploads<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<Vec<Upload>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::UploadedAt)
            .all(conn)
            .await
    }

    /// Ownership check is part of the lookup: records of other users are
    /// indistinguishable from missing ones.
    pub async fn find_owned<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        upload_id: Uuid,
    ) -> Result<Option<Upload>, DbErr> {
        Entity::find_by_id(upload_id)
            .filter(Column::UserId.eq(user_id))
            .one(conn)
            .await
    }
}
