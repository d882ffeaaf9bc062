//! C-ABI wrapper around `dweet-core`.
//!
//! # Overview
//! Exposes the three dweet operations through `extern "C"` functions so a
//! host with only a C FFI (and its own HTTP stack) can build requests and
//! parse responses without linking an async runtime.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiDweetResult` envelope conveys success payloads (as JSON
//!   text) and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `dweet_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use dweet_core::{DweetClient, HttpResponse, RequestOptions};

use types::*;

/// Borrow a C string as `&str`, or `None` if it is not valid UTF-8.
///
/// # Safety
/// `s` must be non-null and point to a NUL-terminated string that outlives
/// the returned reference.
unsafe fn borrow_str<'a>(s: *const c_char) -> Option<&'a str> {
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `DweetClient`. A null `base_url` selects the public
/// service at `https://dweet.io`.
///
/// Returns null if `base_url` is not valid UTF-8 or if an internal panic
/// occurs. The caller must free the returned pointer with
/// `dweet_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn dweet_client_new(base_url: *const c_char) -> *mut FfiDweetClient {
    catch_unwind(|| {
        let inner = if base_url.is_null() {
            DweetClient::default()
        } else {
            match unsafe { borrow_str(base_url) } {
                Some(url) => DweetClient::new(url),
                None => return std::ptr::null_mut(),
            }
        };
        Box::into_raw(Box::new(FfiDweetClient { inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `dweet_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn dweet_client_free(client: *mut FfiDweetClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
//
// The C surface takes no per-call options: caller headers, timeout, proxy
// and base URL overrides are not supported here. The host applies its own
// transport settings when it executes the returned request, and the base
// URL is the one given to `dweet_client_new`.
// ---------------------------------------------------------------------------

/// Build the POST request publishing `payload_json` for `thing`.
///
/// The only header set is `Content-Type: application/json`; caller headers
/// are not supported. Returns null if any argument is null or not valid
/// UTF-8, if `payload_json` is not valid JSON, or if the client's base URL
/// is malformed. The caller must free the returned pointer with
/// `dweet_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn dweet_build_dweet_for(
    client: *const FfiDweetClient,
    thing: *const c_char,
    payload_json: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || thing.is_null() || payload_json.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let (Some(thing), Some(payload_json)) =
            (unsafe { borrow_str(thing) }, unsafe { borrow_str(payload_json) })
        else {
            return std::ptr::null_mut();
        };
        let payload: serde_json::Value = match serde_json::from_str(payload_json) {
            Ok(v) => v,
            Err(_) => return std::ptr::null_mut(),
        };
        match client
            .inner
            .build_dweet_for(thing, &payload, &RequestOptions::default())
        {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the GET request for the latest dweet of `thing`.
///
/// No headers are set and caller headers are not supported. Returns null
/// if `client` or `thing` is null, if `thing` is not valid UTF-8, or if the
/// client's base URL is malformed.
#[unsafe(no_mangle)]
pub extern "C" fn dweet_build_get_latest_dweet_for(
    client: *const FfiDweetClient,
    thing: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || thing.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(thing) = (unsafe { borrow_str(thing) }) else {
            return std::ptr::null_mut();
        };
        match client
            .inner
            .build_get_latest_dweet_for(thing, &RequestOptions::default())
        {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the GET request for the recent dweets of `thing`.
///
/// No headers are set and caller headers are not supported. Returns null
/// if `client` or `thing` is null, if `thing` is not valid UTF-8, or if the
/// client's base URL is malformed.
#[unsafe(no_mangle)]
pub extern "C" fn dweet_build_get_dweets_for(
    client: *const FfiDweetClient,
    thing: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || thing.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(thing) = (unsafe { borrow_str(thing) }) else {
            return std::ptr::null_mut();
        };
        match client
            .inner
            .build_get_dweets_for(thing, &RequestOptions::default())
        {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// read as the empty string; invalid UTF-8 is replaced, and then fails to
/// decode as an envelope.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }.to_string_lossy().into_owned()
    };
    HttpResponse::new(resp.status, body)
}

/// Shared null checks and conversion for the `dweet_parse_*` functions.
fn parse_with(
    client: *const FfiDweetClient,
    response: *const FfiHttpResponse,
    parse: impl FnOnce(&DweetClient, HttpResponse) -> *mut FfiDweetResult,
) -> *mut FfiDweetResult {
    if client.is_null() {
        return FfiDweetResult::null_arg("client");
    }
    if response.is_null() {
        return FfiDweetResult::null_arg("response");
    }
    let client = unsafe { &*client };
    let resp = unsafe { &*response };
    parse(&client.inner, ffi_response_to_core(resp))
}

/// Parse the response to a publish request.
///
/// Returns a result with `data_tag = Record` on success.
#[unsafe(no_mangle)]
pub extern "C" fn dweet_parse_dweet_for(
    client: *const FfiDweetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiDweetResult {
    catch_unwind(|| {
        parse_with(client, response, |c, resp| match c.parse_dweet_for(resp) {
            Ok(record) => FfiDweetResult::ok(FfiDataTag::Record, &record),
            Err(e) => FfiDweetResult::from_error(e),
        })
    })
    .unwrap_or_else(|_| FfiDweetResult::panic("panic in dweet_parse_dweet_for"))
}

/// Parse the response to a latest-dweet request.
///
/// Returns a result with `data_tag = RecordList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn dweet_parse_get_latest_dweet_for(
    client: *const FfiDweetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiDweetResult {
    catch_unwind(|| {
        parse_with(client, response, |c, resp| {
            match c.parse_get_latest_dweet_for(resp) {
                Ok(records) => FfiDweetResult::ok(FfiDataTag::RecordList, &records),
                Err(e) => FfiDweetResult::from_error(e),
            }
        })
    })
    .unwrap_or_else(|_| FfiDweetResult::panic("panic in dweet_parse_get_latest_dweet_for"))
}

/// Parse the response to a history request.
///
/// Returns a result with `data_tag = RecordList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn dweet_parse_get_dweets_for(
    client: *const FfiDweetClient,
    response: *const FfiHttpResponse,
) -> *mut FfiDweetResult {
    catch_unwind(|| {
        parse_with(client, response, |c, resp| match c.parse_get_dweets_for(resp) {
            Ok(records) => FfiDweetResult::ok(FfiDataTag::RecordList, &records),
            Err(e) => FfiDweetResult::from_error(e),
        })
    })
    .unwrap_or_else(|_| FfiDweetResult::panic("panic in dweet_parse_get_dweets_for"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `dweet_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn dweet_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        dweet_free_string(req.url);
        dweet_free_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                dweet_free_string(h.key);
                dweet_free_string(h.value);
            }
        }
    });
}

/// Free an `FfiDweetResult` returned by any `dweet_parse_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn dweet_free_result(result: *mut FfiDweetResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        dweet_free_string(result.error_message);
        dweet_free_string(result.data_json);
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn dweet_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
