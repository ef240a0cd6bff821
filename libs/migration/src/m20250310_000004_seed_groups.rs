use sea_orm_migration::prelude::*;

use crate::seed::GROUPS;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let rows = GROUPS
            .iter()
            .map(|g| format!("('{}', '{}', NOW())", g.id, g.name))
            .collect::<Vec<_>>()
            .join(",\n    ");

        manager
            .get_connection()
            .execute_unprepared(&format!(
                "INSERT INTO groups (id, name, created_at)\nVALUES\n    {rows}\nON CONFLICT DO NOTHING"
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let ids = GROUPS
            .iter()
            .map(|g| format!("'{}'", g.id))
            .collect::<Vec<_>>()
            .join(", ");

        manager
            .get_connection()
            .execute_unprepared(&format!("DELETE FROM groups WHERE id IN ({ids})"))
            .await?;

        Ok(())
    }
}
