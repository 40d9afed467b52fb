use async_trait::async_trait;
use derive_new::new;
use kernel::model::{resource::Resource, time_slot::TimeSlot};
use kernel::repository::catalog::CatalogRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::catalog::{ResourceRow, TimeSlotRow},
    ConnectionPool,
};

#[derive(new)]
pub struct CatalogRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl CatalogRepository for CatalogRepositoryImpl {
    async fn find_all_resources(&self) -> AppResult<Vec<Resource>> {
        let rows: Vec<ResourceRow> = sqlx::query_as(
            r#"
                SELECT resource_id, name
                FROM resources
                ORDER BY resource_id ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Resource::from).collect())
    }

    async fn find_all_time_slots(&self) -> AppResult<Vec<TimeSlot>> {
        let rows: Vec<TimeSlotRow> = sqlx::query_as(
            r#"
                SELECT time_slot_id, start_time, end_time
                FROM time_slots
                ORDER BY start_time ASC, time_slot_id ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(TimeSlot::from).collect())
    }

    async fn ensure_seeded(
        &self,
        resources: &[Resource],
        time_slots: &[TimeSlot],
    ) -> AppResult<u64> {
        let mut tx = self.db.begin().await?;
        let mut inserted = 0;

        // 既存の ID は ON CONFLICT DO NOTHING で読み飛ばし、名前などを上書きしない
        for resource in resources {
            let res = sqlx::query(
                r#"
                    INSERT INTO resources (resource_id, name)
                    VALUES ($1, $2)
                    ON CONFLICT (resource_id) DO NOTHING
                "#,
            )
            .bind(resource.resource_id.as_str())
            .bind(&resource.name)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
            inserted += res.rows_affected();
        }

        for slot in time_slots {
            let res = sqlx::query(
                r#"
                    INSERT INTO time_slots (time_slot_id, start_time, end_time)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (time_slot_id) DO NOTHING
                "#,
            )
            .bind(slot.time_slot_id.as_str())
            .bind(slot.start_time)
            .bind(slot.end_time)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
            inserted += res.rows_affected();
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::catalog::Catalog;

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn seeding_twice_keeps_original_rows(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = CatalogRepositoryImpl::new(ConnectionPool::new(pool));
        let catalog = Catalog::studio();

        let first = repo
            .ensure_seeded(&catalog.resources, &catalog.time_slots)
            .await?;
        assert_eq!(first, 9);

        let renamed = vec![Resource::new("c1".into(), "Renamed".into())];
        let second = repo.ensure_seeded(&renamed, &catalog.time_slots).await?;
        assert_eq!(second, 0);

        let resources = repo.find_all_resources().await?;
        assert_eq!(resources, catalog.resources);
        assert_eq!(repo.find_all_time_slots().await?, catalog.time_slots);
        Ok(())
    }
}
