use sqlx::{Sqlite, SqlitePool, Transaction};

use super::attachment_store::AttachmentStore;
use super::ordering;
use super::types::catalog_error::CatalogError;
use super::types::models::{
    DeletedRoute, DirectionDeleteOutcome, DirectionInput, DirectionOut, DirectionRow,
    DirectionUpdateInput, RouteOut, RouteRow, RouteUpsertInput, Stop,
};

/// Owns route and direction lifecycle. Every mutating call runs as one
/// transaction against the primary store; the ordering replace happens
/// inside that same transaction so a mid-flight failure never leaves a
/// direction with a partial or duplicate itinerary.
#[derive(Clone)]
pub struct CatalogService {
    pool: SqlitePool,
    attachments: AttachmentStore,
}

impl CatalogService {
    pub fn new(pool: SqlitePool, attachments: AttachmentStore) -> Self {
        Self { pool, attachments }
    }

    /// Legacy flattened path (POST /routes): find-or-create the route by
    /// name, then upsert its single submitted direction. An existing
    /// route's bus_type is left untouched here; only the explicit
    /// direction-level endpoints overwrite it.
    pub async fn upsert_route(&self, input: RouteUpsertInput) -> Result<RouteOut, CatalogError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<RouteRow> =
            sqlx::query_as("SELECT id, name, bus_type FROM routes WHERE name = ?")
                .bind(&input.name)
                .fetch_optional(&mut *tx)
                .await?;

        let route_id = match existing {
            Some(route) => route.id,
            None => sqlx::query("INSERT INTO routes (name, bus_type) VALUES (?, ?)")
                .bind(&input.name)
                .bind(&input.bus_type)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid(),
        };

        let dir = &input.direction;
        let gpx_path = self
            .attachments
            .save(&input.name, &dir.direction, dir.sub_name.as_deref(), dir.gpx.as_deref())?;

        let direction_id = match find_direction_id(&mut tx, route_id, dir).await? {
            Some(id) => {
                sqlx::query(
                    "UPDATE directions SET tik_price = ?, distance = ?, gpx = ?, gpx_path = ? WHERE id = ?",
                )
                .bind(&dir.tik_price)
                .bind(&dir.distance)
                .bind(&dir.gpx)
                .bind(&gpx_path)
                .bind(id)
                .execute(&mut *tx)
                .await?;
                id
            }
            None => insert_direction(&mut tx, route_id, dir, gpx_path.as_deref()).await?,
        };

        assert_stops_exist(&mut tx, &dir.stops).await?;
        ordering::replace_associations(&mut tx, direction_id, &dir.stops).await?;

        tx.commit().await?;
        self.get_route(route_id).await
    }

    /// POST /route: explicit-intent creation of one direction. Fails with
    /// Conflict when the (route, direction, sub_name) key already exists,
    /// and overwrites an existing route's bus_type.
    pub async fn create_direction(&self, input: RouteUpsertInput) -> Result<RouteOut, CatalogError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<RouteRow> =
            sqlx::query_as("SELECT id, name, bus_type FROM routes WHERE name = ?")
                .bind(&input.name)
                .fetch_optional(&mut *tx)
                .await?;

        let route_id = match existing {
            Some(route) => {
                sqlx::query("UPDATE routes SET bus_type = ? WHERE id = ?")
                    .bind(&input.bus_type)
                    .bind(route.id)
                    .execute(&mut *tx)
                    .await?;
                route.id
            }
            None => sqlx::query("INSERT INTO routes (name, bus_type) VALUES (?, ?)")
                .bind(&input.name)
                .bind(&input.bus_type)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid(),
        };

        let dir = &input.direction;
        if find_direction_id(&mut tx, route_id, dir).await?.is_some() {
            return Err(CatalogError::Conflict(
                "direction already exists".to_string(),
            ));
        }

        let gpx_path = self
            .attachments
            .save(&input.name, &dir.direction, dir.sub_name.as_deref(), dir.gpx.as_deref())?;
        let direction_id = insert_direction(&mut tx, route_id, dir, gpx_path.as_deref()).await?;

        assert_stops_exist(&mut tx, &dir.stops).await?;
        ordering::replace_associations(&mut tx, direction_id, &dir.stops).await?;

        tx.commit().await?;
        self.get_route(route_id).await
    }

    /// PUT /route/{route_id}/{direction_id}: mutates the direction in
    /// place, re-deriving the attachment path from the new labels.
    pub async fn update_direction(
        &self,
        route_id: i64,
        direction_id: i64,
        input: DirectionUpdateInput,
    ) -> Result<RouteOut, CatalogError> {
        let mut tx = self.pool.begin().await?;

        let route: RouteRow =
            sqlx::query_as("SELECT id, name, bus_type FROM routes WHERE id = ?")
                .bind(route_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| CatalogError::NotFound("Route not found".to_string()))?;

        let current: DirectionRow = sqlx::query_as(
            "SELECT id, direction, sub_name, tik_price, distance, gpx, gpx_path \
             FROM directions WHERE id = ? AND route_id = ?",
        )
        .bind(direction_id)
        .bind(route_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| CatalogError::NotFound("Direction not found".to_string()))?;

        let dir = &input.direction;

        // Relabeling must not collide with a sibling's natural key.
        let collision: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM directions WHERE route_id = ? AND direction = ? AND sub_name IS ? AND id != ?",
        )
        .bind(route_id)
        .bind(&dir.direction)
        .bind(&dir.sub_name)
        .bind(direction_id)
        .fetch_optional(&mut *tx)
        .await?;
        if collision.is_some() {
            return Err(CatalogError::Conflict(
                "direction already exists".to_string(),
            ));
        }

        sqlx::query("UPDATE routes SET bus_type = ? WHERE id = ?")
            .bind(&input.bus_type)
            .bind(route_id)
            .execute(&mut *tx)
            .await?;

        let gpx_path = self
            .attachments
            .save(&route.name, &dir.direction, dir.sub_name.as_deref(), dir.gpx.as_deref())?;

        sqlx::query(
            "UPDATE directions SET direction = ?, sub_name = ?, tik_price = ?, distance = ?, gpx = ?, gpx_path = ? WHERE id = ?",
        )
        .bind(&dir.direction)
        .bind(&dir.sub_name)
        .bind(&dir.tik_price)
        .bind(&dir.distance)
        .bind(&dir.gpx)
        .bind(&gpx_path)
        .bind(direction_id)
        .execute(&mut *tx)
        .await?;

        assert_stops_exist(&mut tx, &dir.stops).await?;
        ordering::replace_associations(&mut tx, direction_id, &dir.stops).await?;

        tx.commit().await?;

        // The old track file is stale once the path moved or the content
        // went away; cleanup is best-effort and happens after commit.
        if let Some(old_path) = &current.gpx_path {
            if gpx_path.as_deref() != Some(old_path.as_str()) {
                self.attachments.delete(old_path);
            }
        }

        self.get_route(route_id).await
    }

    /// Removes one direction, and the owning route too when it was the
    /// last one. Reports which of the two outcomes occurred.
    pub async fn delete_direction(
        &self,
        route_id: i64,
        direction_id: i64,
    ) -> Result<DirectionDeleteOutcome, CatalogError> {
        let mut tx = self.pool.begin().await?;

        let direction: DirectionRow = sqlx::query_as(
            "SELECT id, direction, sub_name, tik_price, distance, gpx, gpx_path \
             FROM directions WHERE id = ? AND route_id = ?",
        )
        .bind(direction_id)
        .bind(route_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| CatalogError::NotFound("Direction not found".to_string()))?;

        sqlx::query("DELETE FROM route_stops WHERE direction_id = ?")
            .bind(direction_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM directions WHERE id = ?")
            .bind(direction_id)
            .execute(&mut *tx)
            .await?;

        let remaining: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM directions WHERE route_id = ?")
                .bind(route_id)
                .fetch_one(&mut *tx)
                .await?;

        let outcome = if remaining == 0 {
            sqlx::query("DELETE FROM routes WHERE id = ?")
                .bind(route_id)
                .execute(&mut *tx)
                .await?;
            DirectionDeleteOutcome::DirectionAndRouteDeleted
        } else {
            DirectionDeleteOutcome::DirectionDeleted
        };

        tx.commit().await?;

        if let Some(path) = &direction.gpx_path {
            self.attachments.delete(path);
        }

        Ok(outcome)
    }

    /// Deletes the route with all its directions and their association
    /// rows. The referenced stops survive.
    pub async fn delete_route(&self, route_id: i64) -> Result<DeletedRoute, CatalogError> {
        let mut tx = self.pool.begin().await?;

        let route: RouteRow =
            sqlx::query_as("SELECT id, name, bus_type FROM routes WHERE id = ?")
                .bind(route_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| CatalogError::NotFound("Route not found".to_string()))?;

        let directions: Vec<(i64, Option<String>)> =
            sqlx::query_as("SELECT id, gpx_path FROM directions WHERE route_id = ?")
                .bind(route_id)
                .fetch_all(&mut *tx)
                .await?;

        sqlx::query(
            "DELETE FROM route_stops WHERE direction_id IN (SELECT id FROM directions WHERE route_id = ?)",
        )
        .bind(route_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM directions WHERE route_id = ?")
            .bind(route_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM routes WHERE id = ?")
            .bind(route_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let mut direction_ids = Vec::with_capacity(directions.len());
        for (id, path) in directions {
            direction_ids.push(id);
            if let Some(path) = path {
                self.attachments.delete(&path);
            }
        }

        Ok(DeletedRoute {
            name: route.name,
            direction_ids,
        })
    }

    pub async fn get_routes(&self) -> Result<Vec<RouteOut>, CatalogError> {
        let routes: Vec<RouteRow> =
            sqlx::query_as("SELECT id, name, bus_type FROM routes ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        let mut out = Vec::with_capacity(routes.len());
        for route in routes {
            out.push(self.materialize(route).await?);
        }
        Ok(out)
    }

    pub async fn get_route(&self, route_id: i64) -> Result<RouteOut, CatalogError> {
        let route: RouteRow =
            sqlx::query_as("SELECT id, name, bus_type FROM routes WHERE id = ?")
                .bind(route_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| CatalogError::NotFound("Route not found".to_string()))?;

        self.materialize(route).await
    }

    /// Explicit eager load: one query per level, stops joined through the
    /// association table and sorted by their assigned position.
    async fn materialize(&self, route: RouteRow) -> Result<RouteOut, CatalogError> {
        let direction_rows: Vec<DirectionRow> = sqlx::query_as(
            "SELECT id, direction, sub_name, tik_price, distance, gpx, gpx_path \
             FROM directions WHERE route_id = ? ORDER BY id",
        )
        .bind(route.id)
        .fetch_all(&self.pool)
        .await?;

        let mut directions = Vec::with_capacity(direction_rows.len());
        for row in direction_rows {
            let stops: Vec<Stop> = sqlx::query_as(
                "SELECT s.id, s.name, s.lat, s.lng FROM stops s \
                 JOIN route_stops rs ON rs.stop_id = s.id \
                 WHERE rs.direction_id = ? ORDER BY rs.position",
            )
            .bind(row.id)
            .fetch_all(&self.pool)
            .await?;

            directions.push(DirectionOut {
                id: row.id,
                direction: row.direction,
                sub_name: row.sub_name,
                tik_price: row.tik_price,
                distance: row.distance,
                gpx: row.gpx,
                gpx_path: row.gpx_path,
                stops,
            });
        }

        Ok(RouteOut {
            id: route.id,
            name: route.name,
            bus_type: route.bus_type,
            directions,
        })
    }
}

async fn find_direction_id(
    tx: &mut Transaction<'_, Sqlite>,
    route_id: i64,
    dir: &DirectionInput,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT id FROM directions WHERE route_id = ? AND direction = ? AND sub_name IS ?",
    )
    .bind(route_id)
    .bind(&dir.direction)
    .bind(&dir.sub_name)
    .fetch_optional(&mut **tx)
    .await
}

async fn insert_direction(
    tx: &mut Transaction<'_, Sqlite>,
    route_id: i64,
    dir: &DirectionInput,
    gpx_path: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO directions (route_id, direction, sub_name, tik_price, distance, gpx, gpx_path) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(route_id)
    .bind(&dir.direction)
    .bind(&dir.sub_name)
    .bind(&dir.tik_price)
    .bind(&dir.distance)
    .bind(&dir.gpx)
    .bind(gpx_path)
    .execute(&mut **tx)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Guards the Ordering Engine against dangling references: every submitted
/// stop id must already exist in the registry.
async fn assert_stops_exist(
    tx: &mut Transaction<'_, Sqlite>,
    stop_ids: &[i64],
) -> Result<(), CatalogError> {
    if stop_ids.is_empty() {
        return Ok(());
    }

    let mut distinct = stop_ids.to_vec();
    distinct.sort_unstable();
    distinct.dedup();

    let placeholders = vec!["?"; distinct.len()].join(", ");
    let sql = format!(
        "SELECT COUNT(*) FROM stops WHERE id IN ({})",
        placeholders
    );
    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for id in &distinct {
        query = query.bind(id);
    }

    let found = query.fetch_one(&mut **tx).await?;
    if found != distinct.len() as i64 {
        return Err(CatalogError::NotFound(
            "One or more stop ids do not exist".to_string(),
        ));
    }

    Ok(())
}
