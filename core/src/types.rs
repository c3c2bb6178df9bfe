//! Domain types for the feed.
//!
//! # Design
//! `FeedItem` is the value handed to callers. It deliberately carries no
//! serde attributes: the wire shape (`image` instead of `image_url`, the
//! `items` envelope) lives in the mapper, so renaming a JSON key never
//! touches the domain type.

use url::Url;
use uuid::Uuid;

/// A single piece of content in the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: Url,
}

impl FeedItem {
    pub fn new(id: Uuid, image_url: Url) -> Self {
        Self {
            id,
            description: None,
            location: None,
            image_url,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}
