use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250801_000001_create_initial_tables::Migration)]
    }
}

pub mod m20250801_000001_create_initial_tables;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Database;

    #[test_log::test(tokio::test)]
    async fn test_migrations_are_idempotent() {
        let conn = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&conn, None).await.unwrap();
        // Applied migrations are recorded, the second run is a no-op.
        Migrator::up(&conn, None).await.unwrap();
    }
}
