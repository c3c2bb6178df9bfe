//! HTTP transport types and the `HttpClient` capability.
//!
//! # Design
//! Requests and responses are plain data. The loader never talks to the
//! network itself: it hands an `HttpRequest` to an `HttpClient` together with
//! a completion, and the client calls the completion exactly once with either
//! an `HttpResponse` or a `TransportError`.
//!
//! Any HTTP status counts as a response here. Deciding whether a status is
//! acceptable is the mapper's job, not the transport's.

use std::sync::Arc;

use url::Url;

use crate::error::TransportError;

/// One-shot callback used for every asynchronous completion in this crate.
pub type Completion<T> = Box<dyn FnOnce(T) + Send + 'static>;

/// Outcome of a single `HttpClient::get`.
pub type HttpClientResult = Result<HttpResponse, TransportError>;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self {
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport (or a test double) after the round-trip and
/// passed back through the completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Capability for performing a single network GET.
///
/// Implementations must call `completion` exactly once. They may call it on
/// any thread, and may call it before `get` returns.
pub trait HttpClient: Send + Sync {
    fn get(&self, request: HttpRequest, completion: Completion<HttpClientResult>);
}

impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    fn get(&self, request: HttpRequest, completion: Completion<HttpClientResult>) {
        (**self).get(request, completion)
    }
}

impl<T: HttpClient + ?Sized> HttpClient for Box<T> {
    fn get(&self, request: HttpRequest, completion: Completion<HttpClientResult>) {
        (**self).get(request, completion)
    }
}
