//! In-memory stand-in for the dweet service.
//!
//! Serves the three endpoints the client uses with the same envelope
//! shapes as the public service. History is kept per thing, newest first,
//! and capped at `HISTORY_LIMIT` records.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// Number of dweets the service remembers per thing.
pub const HISTORY_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dweet {
    pub thing: String,
    pub created: String,
    pub content: Map<String, Value>,
    pub transaction: Uuid,
}

pub type Db = Arc<RwLock<HashMap<String, VecDeque<Dweet>>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/dweet/for/{thing}", post(dweet_for))
        .route("/get/latest/dweet/for/{thing}", get(get_latest_dweet_for))
        .route("/get/dweets/for/{thing}", get(get_dweets_for))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("dweet mock server listening on {addr}");
    }
    axum::serve(listener, app()).await
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

fn succeeded(by: &str, the: &str, with: Value) -> Json<Value> {
    Json(json!({ "this": "succeeded", "by": by, "the": the, "with": with }))
}

fn not_found() -> Json<Value> {
    Json(json!({ "this": "failed", "with": 404, "because": "we couldn't find this" }))
}

async fn dweet_for(
    State(db): State<Db>,
    Path(thing): Path<String>,
    Json(content): Json<Map<String, Value>>,
) -> Json<Value> {
    let dweet = Dweet {
        thing: thing.clone(),
        created: now_rfc3339(),
        content,
        transaction: Uuid::new_v4(),
    };
    debug!("storing dweet {} for {thing}", dweet.transaction);

    let mut db = db.write().await;
    let history = db.entry(thing).or_default();
    history.push_front(dweet.clone());
    history.truncate(HISTORY_LIMIT);

    succeeded("dweeting", "dweet", json!(dweet))
}

async fn get_latest_dweet_for(State(db): State<Db>, Path(thing): Path<String>) -> Json<Value> {
    let db = db.read().await;
    match db.get(&thing).and_then(|history| history.front()) {
        Some(latest) => succeeded("getting", "dweets", json!([latest])),
        None => not_found(),
    }
}

async fn get_dweets_for(State(db): State<Db>, Path(thing): Path<String>) -> Json<Value> {
    let db = db.read().await;
    match db.get(&thing) {
        Some(history) if !history.is_empty() => succeeded("getting", "dweets", json!(history)),
        _ => not_found(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dweet_serializes_with_service_field_names() {
        let mut content = Map::new();
        content.insert("temp".to_string(), json!(21));
        let dweet = Dweet {
            thing: "sensor".to_string(),
            created: "2024-05-01T10:00:00Z".to_string(),
            content,
            transaction: Uuid::nil(),
        };
        let json = serde_json::to_value(&dweet).unwrap();
        assert_eq!(json["thing"], "sensor");
        assert_eq!(json["created"], "2024-05-01T10:00:00Z");
        assert_eq!(json["content"]["temp"], 21);
        assert_eq!(json["transaction"], "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn created_is_rfc3339() {
        let created = now_rfc3339();
        assert!(OffsetDateTime::parse(&created, &Rfc3339).is_ok());
    }

    #[test]
    fn not_found_uses_failed_envelope() {
        let Json(body) = not_found();
        assert_eq!(body["this"], "failed");
        assert_eq!(body["because"], "we couldn't find this");
    }
}
