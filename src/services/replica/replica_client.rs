use serde_json::json;

use crate::services::catalog::types::models::{RouteOut, Stop};

#[derive(Clone)]
pub struct ReplicaConfig {
    pub host: String,
    pub api_key: String,
}

/// Best-effort mirror of the catalog into an external REST store. Callers
/// invoke it after the local transaction has committed and log-and-drop
/// any error; nothing here ever rolls back or blocks the primary path.
#[derive(Clone)]
pub struct ReplicaClient {
    config: ReplicaConfig,
    client: reqwest::Client,
}

impl ReplicaClient {
    pub fn new(config: ReplicaConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn table(&self, name: &str) -> String {
        format!("{}/rest/v1/{}", self.config.host, name)
    }

    async fn upsert(&self, table: &str, rows: serde_json::Value) -> Result<(), reqwest::Error> {
        self.client
            .post(self.table(table))
            .header("apikey", &self.config.api_key)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&rows)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_where(&self, table: &str, filter: &str) -> Result<(), reqwest::Error> {
        self.client
            .delete(format!("{}?{}", self.table(table), filter))
            .header("apikey", &self.config.api_key)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Mirrors a route aggregate in route -> directions -> associations
    /// order so the mirror never sees a dangling foreign key.
    pub async fn sync_route_upsert(&self, route: &RouteOut) -> Result<(), reqwest::Error> {
        self.upsert(
            "routes",
            json!([{
                "id": route.id,
                "name": route.name,
                "bus_type": route.bus_type,
            }]),
        )
        .await?;

        for direction in &route.directions {
            self.upsert(
                "directions",
                json!([{
                    "id": direction.id,
                    "route_id": route.id,
                    "direction": direction.direction,
                    "sub_name": direction.sub_name,
                    "tik_price": direction.tik_price,
                    "distance": direction.distance,
                    "gpx": direction.gpx,
                }]),
            )
            .await?;
        }

        for direction in &route.directions {
            self.delete_where("route_stops", &format!("direction_id=eq.{}", direction.id))
                .await?;
            if direction.stops.is_empty() {
                continue;
            }
            let rows: Vec<serde_json::Value> = direction
                .stops
                .iter()
                .enumerate()
                .map(|(index, stop)| {
                    json!({
                        "direction_id": direction.id,
                        "stop_id": stop.id,
                        "position": index + 1,
                    })
                })
                .collect();
            self.upsert("route_stops", serde_json::Value::Array(rows))
                .await?;
        }

        Ok(())
    }

    pub async fn sync_stop_upsert(&self, stop: &Stop) -> Result<(), reqwest::Error> {
        self.upsert(
            "stops",
            json!([{
                "id": stop.id,
                "name": stop.name,
                "lat": stop.lat,
                "lng": stop.lng,
            }]),
        )
        .await
    }

    pub async fn sync_stop_delete(&self, stop_id: i64) -> Result<(), reqwest::Error> {
        self.delete_where("stops", &format!("id=eq.{}", stop_id))
            .await
    }

    pub async fn sync_direction_delete(&self, direction_id: i64) -> Result<(), reqwest::Error> {
        self.delete_where("route_stops", &format!("direction_id=eq.{}", direction_id))
            .await?;
        self.delete_where("directions", &format!("id=eq.{}", direction_id))
            .await
    }

    /// Reverse order of the upsert: associations, then directions, then
    /// the route row itself.
    pub async fn sync_route_delete(
        &self,
        route_id: i64,
        direction_ids: &[i64],
    ) -> Result<(), reqwest::Error> {
        for direction_id in direction_ids {
            self.delete_where("route_stops", &format!("direction_id=eq.{}", direction_id))
                .await?;
        }
        self.delete_where("directions", &format!("route_id=eq.{}", route_id))
            .await?;
        self.delete_where("routes", &format!("id=eq.{}", route_id))
            .await
    }
}
