//! Blocking `HttpClient` backed by ureq.
//!
//! Each `get` runs on its own thread and completes from that thread. ureq is
//! configured with `http_status_as_error(false)` so 4xx/5xx responses come
//! back as data and the mapper decides what they mean.
//!
//! Bodies are read up to `max_body_size` (64 MiB by default, well above
//! ureq's own 10 MB default). A body larger than that is never fully received
//! and is reported as a `TransportError`.

use std::thread;
use std::time::Duration;

use crate::error::TransportError;
use crate::http::{Completion, HttpClient, HttpClientResult, HttpRequest, HttpResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_BODY_SIZE: u64 = 64 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct UreqHttpClient {
    agent: ureq::Agent,
    max_body_size: u64,
}

impl UreqHttpClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self {
            agent,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    pub fn with_max_body_size(mut self, bytes: u64) -> Self {
        self.max_body_size = bytes;
        self
    }
}

impl Default for UreqHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for UreqHttpClient {
    fn get(&self, request: HttpRequest, completion: Completion<HttpClientResult>) {
        let agent = self.agent.clone();
        let max_body_size = self.max_body_size;
        thread::spawn(move || completion(execute(&agent, &request, max_body_size)));
    }
}

fn execute(agent: &ureq::Agent, request: &HttpRequest, max_body_size: u64) -> HttpClientResult {
    let mut builder = agent.get(request.url.as_str());
    for (key, value) in &request.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    let mut response = builder.call().map_err(TransportError::from)?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();
    let body = response
        .body_mut()
        .with_config()
        .limit(max_body_size)
        .read_to_vec()?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
