use sqlx::{Sqlite, Transaction};

/// Replaces a direction's stop associations with the submitted ordering.
///
/// Full replace: every existing row for the direction is dropped, then one
/// row per submitted stop id is inserted with `position = index + 1`, so
/// positions always come out as a dense 1-based sequence. Runs inside the
/// caller's transaction; a failed insert rolls the whole replace back.
///
/// Stop ids are not checked for existence here — callers validate before
/// delegating.
pub async fn replace_associations(
    tx: &mut Transaction<'_, Sqlite>,
    direction_id: i64,
    stop_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM route_stops WHERE direction_id = ?")
        .bind(direction_id)
        .execute(&mut **tx)
        .await?;

    for (index, stop_id) in stop_ids.iter().enumerate() {
        sqlx::query("INSERT INTO route_stops (direction_id, stop_id, position) VALUES (?, ?, ?)")
            .bind(direction_id)
            .bind(stop_id)
            .bind((index + 1) as i64)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}
