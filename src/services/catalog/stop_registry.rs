use sqlx::SqlitePool;

use super::types::catalog_error::CatalogError;
use super::types::models::{NewStop, Stop};

/// Owns the stop identity space. Stops are shared across directions by
/// reference and live independently of any route.
#[derive(Clone)]
pub struct StopRegistry {
    pool: SqlitePool,
}

impl StopRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts each submitted stop as a fresh identity. Repeated names are
    /// distinct stops, not duplicates.
    pub async fn create(&self, stops: Vec<NewStop>) -> Result<Vec<Stop>, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(stops.len());

        for stop in stops {
            let id = sqlx::query("INSERT INTO stops (name, lat, lng) VALUES (?, ?, ?)")
                .bind(&stop.name)
                .bind(stop.lat)
                .bind(stop.lng)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();

            created.push(Stop {
                id,
                name: stop.name,
                lat: stop.lat,
                lng: stop.lng,
            });
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn update(&self, id: i64, stop: NewStop) -> Result<Stop, CatalogError> {
        let result = sqlx::query("UPDATE stops SET name = ?, lat = ?, lng = ? WHERE id = ?")
            .bind(&stop.name)
            .bind(stop.lat)
            .bind(stop.lng)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound("Stop not found".to_string()));
        }

        Ok(Stop {
            id,
            name: stop.name,
            lat: stop.lat,
            lng: stop.lng,
        })
    }

    /// Deletes a stop unless it still appears in any direction's itinerary.
    pub async fn delete(&self, id: i64) -> Result<(), CatalogError> {
        let references: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM route_stops WHERE stop_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if references > 0 {
            return Err(CatalogError::Conflict(
                "Stop is still used by one or more directions".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM stops WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound("Stop not found".to_string()));
        }

        Ok(())
    }

    /// An empty registry is a reportable condition for callers, not a
    /// silent empty list.
    pub async fn list(&self) -> Result<Vec<Stop>, CatalogError> {
        let stops = sqlx::query_as::<_, Stop>("SELECT id, name, lat, lng FROM stops ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        if stops.is_empty() {
            return Err(CatalogError::NotFound("No stops found".to_string()));
        }

        Ok(stops)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    use crate::services::catalog::ordering;

    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::init_schema(&pool).await.unwrap();
        pool
    }

    fn new_stop(name: &str) -> NewStop {
        NewStop {
            name: name.to_string(),
            lat: 31.95,
            lng: 35.91,
        }
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids_without_dedup() {
        let registry = StopRegistry::new(test_pool().await);

        let created = registry
            .create(vec![new_stop("Main St"), new_stop("Main St")])
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert_ne!(created[0].id, created[1].id);
        assert_eq!(created[0].name, created[1].name);
    }

    #[tokio::test]
    async fn list_reports_empty_registry_as_not_found() {
        let registry = StopRegistry::new(test_pool().await);

        match registry.list().await {
            Err(CatalogError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }

        registry.create(vec![new_stop("Main St")]).await.unwrap();
        assert_eq!(registry.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_missing_stop_is_not_found() {
        let registry = StopRegistry::new(test_pool().await);

        match registry.update(99, new_stop("Main St")).await {
            Err(CatalogError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn delete_is_blocked_while_referenced() {
        let pool = test_pool().await;
        let registry = StopRegistry::new(pool.clone());
        let stop = registry
            .create(vec![new_stop("Main St")])
            .await
            .unwrap()
            .remove(0);

        sqlx::query("INSERT INTO routes (name) VALUES ('Line 1')")
            .execute(&pool)
            .await
            .unwrap();
        let direction_id = sqlx::query("INSERT INTO directions (route_id, direction) VALUES (1, 'North')")
            .execute(&pool)
            .await
            .unwrap()
            .last_insert_rowid();

        let mut tx = pool.begin().await.unwrap();
        ordering::replace_associations(&mut tx, direction_id, &[stop.id])
            .await
            .unwrap();
        tx.commit().await.unwrap();

        match registry.delete(stop.id).await {
            Err(CatalogError::Conflict(_)) => {}
            other => panic!("expected Conflict, got {:?}", other),
        }

        // Dropping the reference lifts the guard.
        let mut tx = pool.begin().await.unwrap();
        ordering::replace_associations(&mut tx, direction_id, &[])
            .await
            .unwrap();
        tx.commit().await.unwrap();

        registry.delete(stop.id).await.unwrap();
    }
}
