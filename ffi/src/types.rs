//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible fields: `*mut c_char`
//! for strings, pointer + length for arrays, explicit discriminants for
//! enums. Arrays are handed out as boxed slices and reclaimed the same way in
//! the `feed_free_*` functions.

use std::ffi::CString;
use std::os::raw::c_char;

use feed_core::{FeedItem, HttpRequest, LoadError, LoadFeedResult, Url};

/// Opaque handle to a feed loader. C callers receive a pointer to this and
/// pass it back into every FFI function.
pub struct FfiFeedLoader {
    pub(crate) url: Url,
}

/// Copy `s` into a heap C string owned by the caller. Interior NULs are
/// dropped rather than failing the whole conversion.
pub(crate) fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s.replace('\0', ""))
        .unwrap_or_default()
        .into_raw()
}

fn to_c_string_opt(s: Option<&str>) -> *mut c_char {
    s.map_or(std::ptr::null_mut(), to_c_string)
}

/// Reclaim a C string produced by `to_c_string`. Null is ignored.
///
/// # Safety
/// `s` must be null or a pointer returned by `to_c_string` that has not been
/// freed yet.
pub(crate) unsafe fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Move `items` to the heap and return pointer + length (null when empty).
pub(crate) fn into_raw_slice<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let ptr = Box::into_raw(items.into_boxed_slice()) as *mut T;
    (ptr, len)
}

/// Reclaim a slice produced by `into_raw_slice`.
///
/// # Safety
/// `ptr`/`len` must come from a single `into_raw_slice` call and must not
/// have been reclaimed already.
pub(crate) unsafe fn from_raw_slice<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// The GET request the host must execute, as C-compatible plain data.
#[repr(C)]
pub struct FfiHttpRequest {
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .iter()
            .map(|(k, v)| FfiHeader {
                key: to_c_string(k),
                value: to_c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_slice(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            url: to_c_string(req.url.as_str()),
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response as C-compatible plain data.
///
/// The C caller builds this after executing the request and passes a pointer
/// to `feed_parse_response`. The FFI layer copies the body and frees nothing.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const u8,
    pub body_len: usize,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiFeedResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Connectivity = 1,
    InvalidData = 2,
    Panic = 3,
    NullArg = 4,
}

impl From<LoadError> for FfiErrorCode {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Connectivity => FfiErrorCode::Connectivity,
            LoadError::InvalidData => FfiErrorCode::InvalidData,
        }
    }
}

/// A single feed item exposed to C. `description` and `location` are null
/// when absent.
#[repr(C)]
pub struct FfiFeedItem {
    pub id: *mut c_char,
    pub description: *mut c_char,
    pub location: *mut c_char,
    pub image_url: *mut c_char,
}

impl From<FeedItem> for FfiFeedItem {
    fn from(item: FeedItem) -> Self {
        FfiFeedItem {
            id: to_c_string(&item.id.to_string()),
            description: to_c_string_opt(item.description.as_deref()),
            location: to_c_string_opt(item.location.as_deref()),
            image_url: to_c_string(item.image_url.as_str()),
        }
    }
}

impl FfiFeedItem {
    /// Free the C-string fields (but not the struct itself).
    ///
    /// # Safety
    /// Every non-null field must have been produced by `to_c_string`.
    pub(crate) unsafe fn free_fields(&self) {
        unsafe {
            free_c_string(self.id);
            free_c_string(self.description);
            free_c_string(self.location);
            free_c_string(self.image_url);
        }
    }
}

/// Result envelope for a load.
///
/// On success `error_code` is `Ok`, `error_message` is null and `items`
/// points to `items_len` items (null when the feed is empty). On failure
/// `error_message` is a human-readable C string and `items` is null.
#[repr(C)]
pub struct FfiFeedResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub items: *mut FfiFeedItem,
    pub items_len: u32,
}

impl FfiFeedResult {
    pub(crate) fn from_core(result: LoadFeedResult) -> *mut Self {
        match result {
            Ok(items) => {
                let items: Vec<FfiFeedItem> = items.into_iter().map(FfiFeedItem::from).collect();
                let (items, items_len) = into_raw_slice(items);
                Box::into_raw(Box::new(FfiFeedResult {
                    error_code: FfiErrorCode::Ok,
                    error_message: std::ptr::null_mut(),
                    items,
                    items_len,
                }))
            }
            Err(err) => Self::error(err.into(), &err.to_string()),
        }
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg)
    }

    fn error(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiFeedResult {
            error_code,
            error_message: to_c_string(msg),
            items: std::ptr::null_mut(),
            items_len: 0,
        }))
    }
}
