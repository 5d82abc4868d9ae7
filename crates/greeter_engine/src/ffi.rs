/* 📖 # How does ownership cross the C boundary?

C callers cannot hold a Message, so the boundary uses an explicit pair:
`greeter_generate_message` hands out a pointer it no longer tracks, and
`greeter_free_message` takes it back and drops it. Every pointer returned by the first
must be passed to the second exactly once. Failures return null instead of a pointer.

Names from C are arbitrary bytes, so the greeting is assembled byte-wise in one buffer
that already has room for the terminator.
*/

use std::ffi::{CStr, CString, c_char};
use std::ptr;

use greeter_base::{GreeterError, GreeterResult, Heap, ResultExt, SystemHeap};
use tracing::{instrument, trace, warn};

use crate::message::GREETING_PREFIX;

/// Greet a NUL-terminated `name`.
///
/// Returns a newly allocated NUL-terminated string owned by the caller, or null if
/// `name` is null or the allocation failed. The bytes of `name` are copied as they
/// are; no encoding is assumed.
///
/// # Safety
///
/// `name` must be null or point to a NUL-terminated string that stays valid for
/// the duration of the call. The result must be released with
/// [`greeter_free_message`] and not with the C allocator.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn greeter_generate_message(name: *const c_char) -> *mut c_char {
    if name.is_null() {
        warn!("greeter_generate_message called with a null name");
        return ptr::null_mut();
    }
    let name = unsafe { CStr::from_ptr(name) };
    match generate_c_message_in(&SystemHeap, name) {
        Ok(message) => message.into_raw(),
        Err(e) => {
            warn!(error = %e, "greeter_generate_message failed");
            ptr::null_mut()
        }
    }
}

/// Release a string returned by [`greeter_generate_message`]. Null is ignored.
///
/// # Safety
///
/// `message` must be null or a pointer returned by [`greeter_generate_message`]
/// that has not been released yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn greeter_free_message(message: *mut c_char) {
    if message.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(message) });
}

/// Greet `name` as a C string, allocating through `heap`.
///
/// One allocation of `prefix + name + 1` bytes; the terminator never forces a reallocation.
#[instrument(level = "debug", skip(heap, name), fields(name_len = name.count_bytes()))]
pub fn generate_c_message_in(heap: &dyn Heap, name: &CStr) -> GreeterResult<CString> {
    let name = name.to_bytes();
    let capacity = GREETING_PREFIX
        .len()
        .checked_add(name.len())
        .and_then(|len| len.checked_add(1))
        .ok_or_else(|| Box::new(GreeterError::invalid_input("name is too long to greet")))?;
    let mut bytes = heap
        .allocate_bytes(capacity)
        .context("formatting greeting")?;
    bytes.extend_from_slice(GREETING_PREFIX.as_bytes());
    bytes.extend_from_slice(name);
    trace!(len = bytes.len(), "C message generated");
    CString::new(bytes).map_err(|e| {
        Box::new(GreeterError::invalid_input(format!(
            "name contains a NUL byte at offset {}",
            e.nul_position()
        )))
    })
}
