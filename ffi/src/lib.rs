//! C-ABI wrapper around `feed-core`.
//!
//! # Overview
//! Lets a host with a C FFI (an iOS app, for example) load the feed with its
//! own networking stack: the library builds the GET request, the host
//! executes it, and the library maps the response into feed items with the
//! same rules `RemoteFeedLoader::load` uses.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A single `FfiFeedResult` envelope carries either the items or an error
//!   code with a message.
//! - The C caller owns all returned pointers and must call the matching
//!   `feed_*_free` / `feed_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use feed_core::{map_client_result, HttpRequest, HttpResponse, TransportError, Url};

use types::*;

// ---------------------------------------------------------------------------
// Loader lifecycle
// ---------------------------------------------------------------------------

/// Create a feed loader bound to `url`.
///
/// Returns null if `url` is null, not UTF-8, not an absolute URL, or if an
/// internal panic occurs. The caller must free the returned pointer with
/// `feed_loader_free`.
#[unsafe(no_mangle)]
pub extern "C" fn feed_loader_new(url: *const c_char) -> *mut FfiFeedLoader {
    catch_unwind(|| {
        if url.is_null() {
            return std::ptr::null_mut();
        }
        let Ok(url) = unsafe { CStr::from_ptr(url) }.to_str() else {
            return std::ptr::null_mut();
        };
        match Url::parse(url) {
            Ok(url) => Box::into_raw(Box::new(FfiFeedLoader { url })),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a loader created by `feed_loader_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn feed_loader_free(loader: *mut FfiFeedLoader) {
    if !loader.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(loader) });
        });
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Build the GET request for the loader's URL.
///
/// Returns null if `loader` is null.
/// The caller must free the returned pointer with `feed_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn feed_build_request(loader: *const FfiFeedLoader) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if loader.is_null() {
            return std::ptr::null_mut();
        }
        let loader = unsafe { &*loader };
        FfiHttpRequest::from_core(HttpRequest::get(loader.url.clone()))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() || resp.body_len == 0 {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(resp.body, resp.body_len) }.to_vec()
    };
    HttpResponse::new(resp.status, body)
}

/// Map the response the host received for `feed_build_request`.
///
/// Status 200 with a well-formed feed yields `Ok` and the items; anything
/// else yields `InvalidData`. `loader` identifies which request this answers
/// and tags the emitted `tracing` event with its URL.
#[unsafe(no_mangle)]
pub extern "C" fn feed_parse_response(
    loader: *const FfiFeedLoader,
    response: *const FfiHttpResponse,
) -> *mut FfiFeedResult {
    catch_unwind(|| {
        if loader.is_null() {
            return FfiFeedResult::null_arg("loader");
        }
        if response.is_null() {
            return FfiFeedResult::null_arg("response");
        }
        let loader = unsafe { &*loader };
        let resp = unsafe { &*response };
        tracing::debug!(url = %loader.url, status = resp.status, "mapping host response");
        FfiFeedResult::from_core(map_client_result(Ok(ffi_response_to_core(resp))))
    })
    .unwrap_or_else(|_| FfiFeedResult::panic("panic in feed_parse_response"))
}

/// Report that the host could not complete the request.
///
/// Always yields `Connectivity`. `message` is optional and only used for
/// logging.
#[unsafe(no_mangle)]
pub extern "C" fn feed_transport_failed(
    loader: *const FfiFeedLoader,
    message: *const c_char,
) -> *mut FfiFeedResult {
    catch_unwind(|| {
        if loader.is_null() {
            return FfiFeedResult::null_arg("loader");
        }
        let loader = unsafe { &*loader };
        let message = if message.is_null() {
            "host transport failure".to_string()
        } else {
            unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned()
        };
        let message = format!("{} ({})", message, loader.url);
        FfiFeedResult::from_core(map_client_result(Err(TransportError::new(message))))
    })
    .unwrap_or_else(|_| FfiFeedResult::panic("panic in feed_transport_failed"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `feed_build_request`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn feed_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        unsafe { free_c_string(req.url) };
        for header in unsafe { from_raw_slice(req.headers, req.headers_len) } {
            unsafe {
                free_c_string(header.key);
                free_c_string(header.value);
            }
        }
    });
}

/// Free a result returned by `feed_parse_response` or
/// `feed_transport_failed`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn feed_free_result(result: *mut FfiFeedResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        unsafe { free_c_string(result.error_message) };
        for item in unsafe { from_raw_slice(result.items, result.items_len) } {
            unsafe { item.free_fields() };
        }
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
