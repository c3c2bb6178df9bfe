//! Maps a raw HTTP response into feed items.
//!
//! # Design
//! The wire types (`Root`, `RemoteItem`) are private to this module and are
//! converted into `FeedItem` at the boundary. The only accepted status is 200;
//! every other status is `InvalidData` without looking at the body.

use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::error::LoadError;
use crate::types::FeedItem;

#[derive(Deserialize)]
struct Root {
    items: Vec<RemoteItem>,
}

#[derive(Deserialize)]
struct RemoteItem {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    image: Url,
}

impl From<RemoteItem> for FeedItem {
    fn from(item: RemoteItem) -> Self {
        FeedItem {
            id: item.id,
            description: item.description,
            location: item.location,
            image_url: item.image,
        }
    }
}

/// Stateless translation from `(body, status)` to domain items.
pub struct FeedItemMapper;

impl FeedItemMapper {
    const OK_200: u16 = 200;

    pub fn map(body: &[u8], status: u16) -> Result<Vec<FeedItem>, LoadError> {
        if status != Self::OK_200 {
            tracing::warn!(status, "unexpected feed response status");
            return Err(LoadError::InvalidData);
        }
        let root: Root = serde_json::from_slice(body).map_err(|e| {
            tracing::warn!(error = %e, "feed body did not decode");
            LoadError::InvalidData
        })?;
        Ok(root.items.into_iter().map(FeedItem::from).collect())
    }
}
