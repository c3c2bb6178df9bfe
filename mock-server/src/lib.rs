use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// A feed item in wire shape.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub image: String,
}

/// The document served at `/feed`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Feed {
    pub items: Vec<Item>,
}

pub type Db = Arc<RwLock<Vec<Item>>>;

pub fn app() -> Router {
    app_with_items(Vec::new())
}

pub fn app_with_items(items: Vec<Item>) -> Router {
    let db: Db = Arc::new(RwLock::new(items));
    Router::new()
        .route("/feed", get(get_feed))
        .route("/status/{code}", get(status_only))
        .route("/malformed", get(malformed))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_items(listener, Vec::new()).await
}

pub async fn run_with_items(listener: TcpListener, items: Vec<Item>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_items(items)).await
}

/// Items used when the server binary starts.
pub fn sample_items() -> Vec<Item> {
    vec![
        Item {
            id: Uuid::new_v4(),
            description: None,
            location: None,
            image: "https://picsum.photos/id/10/600/400".to_string(),
        },
        Item {
            id: Uuid::new_v4(),
            description: Some("Harbour at dawn".to_string()),
            location: Some("Porto".to_string()),
            image: "https://picsum.photos/id/20/600/400".to_string(),
        },
    ]
}

async fn get_feed(State(db): State<Db>) -> Json<Feed> {
    let items = db.read().await;
    Json(Feed {
        items: items.clone(),
    })
}

/// Respond with `code` and an empty but well-formed feed.
async fn status_only(Path(code): Path<u16>) -> Result<(StatusCode, Json<Feed>), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    if status.is_informational() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok((status, Json(Feed::default())))
}

async fn malformed() -> &'static str {
    "this is not json"
}
