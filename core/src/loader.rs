//! `RemoteFeedLoader`: one GET through an `HttpClient`, one mapped result.
//!
//! # Design
//! The loader shares a liveness flag (`Arc<Mutex<bool>>`) with every
//! completion it hands out. Delivery happens while holding the lock and
//! `Drop` clears the flag under the same lock, so a callback either finishes
//! before the loader is gone or never runs. A completion must therefore not
//! drop the last handle to its own loader.
//!
//! The client owns the completion until it fires; the loader keeps no
//! per-request state, so concurrent `load` calls are independent.

use std::sync::{Arc, Mutex, PoisonError};

use url::Url;

use crate::error::LoadError;
use crate::http::{Completion, HttpClient, HttpClientResult, HttpRequest};
use crate::mapper::FeedItemMapper;
use crate::types::FeedItem;

/// Result delivered to `load` callers.
pub type LoadFeedResult = Result<Vec<FeedItem>, LoadError>;

/// Anything that can produce the feed asynchronously.
pub trait FeedLoader {
    fn load(&self, completion: Completion<LoadFeedResult>);
}

/// Loads the feed from a fixed URL through an injected `HttpClient`.
pub struct RemoteFeedLoader<C> {
    url: Url,
    client: C,
    alive: Arc<Mutex<bool>>,
}

impl<C: HttpClient> RemoteFeedLoader<C> {
    /// Creating a loader does not touch the network.
    pub fn new(url: Url, client: C) -> Self {
        Self {
            url,
            client,
            alive: Arc::new(Mutex::new(true)),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The request every `load` issues.
    pub fn request(&self) -> HttpRequest {
        HttpRequest::get(self.url.clone())
    }

    /// Issue one GET and report the mapped outcome through `completion`.
    ///
    /// `completion` is never called from inside `load` itself unless the
    /// client completes synchronously, is called at most once, and is not
    /// called at all if the loader is dropped before the client completes.
    pub fn load<F>(&self, completion: F)
    where
        F: FnOnce(LoadFeedResult) + Send + 'static,
    {
        let alive = Arc::clone(&self.alive);
        tracing::debug!(url = %self.url, "loading feed");
        self.client.get(
            self.request(),
            Box::new(move |result| {
                let result = map_client_result(result);
                let alive = alive.lock().unwrap_or_else(PoisonError::into_inner);
                if !*alive {
                    tracing::debug!("feed loader dropped before completion, discarding result");
                    return;
                }
                completion(result);
            }),
        );
    }
}

impl<C> Drop for RemoteFeedLoader<C> {
    /// Blocks until any in-flight delivery has returned.
    fn drop(&mut self) {
        *self.alive.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }
}

impl<C: HttpClient> FeedLoader for RemoteFeedLoader<C> {
    fn load(&self, completion: Completion<LoadFeedResult>) {
        RemoteFeedLoader::load(self, completion)
    }
}

/// Translate a transport outcome into what `load` delivers.
pub fn map_client_result(result: HttpClientResult) -> LoadFeedResult {
    match result {
        Ok(response) => FeedItemMapper::map(&response.body, response.status),
        Err(e) => {
            tracing::warn!(error = %e, "feed request failed");
            Err(LoadError::Connectivity)
        }
    }
}
