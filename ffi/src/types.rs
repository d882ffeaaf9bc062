//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Dweet records are opaque JSON
//! objects in the core, so they cross the boundary as JSON text rather than
//! as a fixed struct.

use std::ffi::CString;
use std::os::raw::c_char;

use dweet_core::{DweetError, HttpMethod};
use serde::Serialize;

/// Opaque handle to a `DweetClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiDweetClient {
    pub(crate) inner: dweet_core::DweetClient,
}

/// Copy `s` into a heap C string. Interior NULs yield an empty string.
pub(crate) fn into_c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `dweet_build_*` functions. The C caller executes the request
/// and passes the response back through `dweet_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: dweet_core::HttpRequest) -> *mut Self {
        let url = into_c_string(req.url);
        let body = match req.body {
            Some(b) => into_c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: into_c_string(k),
                    value: into_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `dweet_parse_*` function. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiDweetResult`.
#[repr(C)]
pub enum FfiErrorCode {
    Ok = 0,
    TransportFailure = 1,
    ApplicationFailure = 2,
    Encode = 3,
    Decode = 4,
    Network = 5,
    Panic = 6,
    NullArg = 7,
    InvalidBaseUrl = 8,
}

/// Tells the caller what `FfiDweetResult::data_json` holds.
#[repr(C)]
pub enum FfiDataTag {
    None = 0,
    /// A single JSON object.
    Record = 1,
    /// A JSON array of objects.
    RecordList = 2,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and
/// `data_json` holds the service's `with` payload as JSON text.
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, `http_status` is set for `TransportFailure`,
/// and `data_json` is null.
#[repr(C)]
pub struct FfiDweetResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data_json: *mut c_char,
}

impl FfiDweetResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        data_tag: FfiDataTag,
        data_json: *mut c_char,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiDweetResult {
            error_code,
            error_message,
            http_status,
            data_tag,
            data_json,
        }))
    }

    /// Build a success result carrying `data` re-encoded as JSON.
    pub(crate) fn ok<T: Serialize>(tag: FfiDataTag, data: &T) -> *mut Self {
        match serde_json::to_string(data) {
            Ok(json) => Self::boxed(
                FfiErrorCode::Ok,
                std::ptr::null_mut(),
                0,
                tag,
                into_c_string(json),
            ),
            Err(source) => Self::from_error(DweetError::Encode { source }),
        }
    }

    /// Build an error result from a `DweetError`.
    pub(crate) fn from_error(err: DweetError) -> *mut Self {
        let (error_code, http_status) = match &err {
            DweetError::TransportFailure { status } => (FfiErrorCode::TransportFailure, *status),
            DweetError::ApplicationFailure { .. } => (FfiErrorCode::ApplicationFailure, 0),
            DweetError::InvalidBaseUrl { .. } => (FfiErrorCode::InvalidBaseUrl, 0),
            DweetError::Encode { .. } => (FfiErrorCode::Encode, 0),
            DweetError::Decode { .. } => (FfiErrorCode::Decode, 0),
            DweetError::Network { .. } => (FfiErrorCode::Network, 0),
        };
        Self::boxed(
            error_code,
            into_c_string(err.to_string()),
            http_status,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::NullArg,
            into_c_string(format!("null argument: {name}")),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::Panic,
            into_c_string(msg),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }
}
