use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Stop {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

pub struct NewStop {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, FromRow)]
pub struct RouteRow {
    pub id: i64,
    pub name: String,
    pub bus_type: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DirectionRow {
    pub id: i64,
    pub direction: String,
    pub sub_name: Option<String>,
    pub tik_price: Option<String>,
    pub distance: Option<String>,
    pub gpx: Option<String>,
    pub gpx_path: Option<String>,
}

/// A fully materialized route aggregate: directions in creation order,
/// each direction's stops in itinerary order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteOut {
    pub id: i64,
    pub name: String,
    pub bus_type: Option<String>,
    pub directions: Vec<DirectionOut>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionOut {
    pub id: i64,
    pub direction: String,
    pub sub_name: Option<String>,
    pub tik_price: Option<String>,
    pub distance: Option<String>,
    pub gpx: Option<String>,
    pub gpx_path: Option<String>,
    pub stops: Vec<Stop>,
}

/// One direction submitted alongside a route, stops referenced by id in
/// itinerary order.
pub struct DirectionInput {
    pub direction: String,
    pub sub_name: Option<String>,
    pub gpx: Option<String>,
    pub tik_price: Option<String>,
    pub distance: Option<String>,
    pub stops: Vec<i64>,
}

pub struct RouteUpsertInput {
    pub name: String,
    pub bus_type: String,
    pub direction: DirectionInput,
}

pub struct DirectionUpdateInput {
    pub bus_type: String,
    pub direction: DirectionInput,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DirectionDeleteOutcome {
    DirectionDeleted,
    DirectionAndRouteDeleted,
}

/// What a route delete removed; the direction ids let the replica mirror
/// drop its copies without a lookup round-trip.
pub struct DeletedRoute {
    pub name: String,
    pub direction_ids: Vec<i64>,
}
