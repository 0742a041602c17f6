pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_account_table;

pub struct AccountMigrator;

#[async_trait::async_trait]
impl MigratorTrait for AccountMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_account_table::Migration),
        ]
    }
}
