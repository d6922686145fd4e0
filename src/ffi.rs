//! FFI bindings for Poise Lens
//!
//! This module provides C-compatible functions for calling the analyzer from the
//! mobile shells. All functions use C strings (null-terminated) and return allocated
//! memory that must be freed by the caller using `poise_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use chrono::{TimeZone, Utc};

use crate::pipeline::ConfidenceAnalyzer;
use crate::thresholds::Thresholds;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// Analyze a JSON array of frames and return the report JSON.
///
/// An empty frame array is not an error: it returns `{"error":"No frames to analyze"}`.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - `analyzed_at_ms` is the analysis time in Unix milliseconds.
/// - Returns a newly allocated string that must be freed with `poise_free_string`.
/// - Returns NULL on error; call `poise_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn poise_analyze_json(json: *const c_char, analyzed_at_ms: i64) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let analyzed_at = match Utc.timestamp_millis_opt(analyzed_at_ms).single() {
        Some(t) => t,
        None => {
            set_last_error("analyzed_at_ms is out of range");
            return ptr::null_mut();
        }
    };

    match ConfidenceAnalyzer::new().analyze_json(&json_str, analyzed_at) {
        Ok(result) => string_to_cstr(&result),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Return the default threshold table as JSON.
///
/// # Safety
/// - Returns a newly allocated string that must be freed with `poise_free_string`.
/// - Returns NULL on error; call `poise_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn poise_default_thresholds() -> *mut c_char {
    clear_last_error();

    match Thresholds::default().to_json() {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Poise functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a Poise function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn poise_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next Poise function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn poise_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the Poise Lens library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn poise_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
