//! C ABI over the py-squared variable table.
//!
//! Generated C programs link against this crate: they declare variables
//! with [`pysq_create_variable`], reach the storage through
//! [`pysq_variable_ptr`], print with [`pysq_print`] and finish with
//! [`pysq_cleanup`]. The table behind these calls is a single
//! process-wide `Mutex<VariableTable>`, since C code has no way to thread
//! an owned table through its statements.
//!
//! Every entry point catches panics (returning
//! [`PysqStatus::Panicked`]) and maps a poisoned lock to
//! [`PysqStatus::InternalError`]. The header `include/pysq.h` is
//! generated by `build.rs`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::any::Any;
use std::cell::RefCell;
use std::ffi::c_char;

/// Run an FFI body, converting a panic into `PysqStatus::Panicked`.
///
/// The panic message is kept for `pysq_last_panic_message`.
macro_rules! ffi_guard {
    ($body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(status) => status,
            Err(payload) => {
                $crate::record_panic(payload.as_ref());
                $crate::status::PysqStatus::Panicked as i32
            }
        }
    };
}

/// Lock a mutex inside `ffi_guard!`, returning
/// `PysqStatus::InternalError` from the body if it is poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::PysqStatus::InternalError as i32,
        }
    };
}

pub mod status;
pub mod table;

pub use status::PysqStatus;
pub use table::{
    pysq_cleanup, pysq_create_variable, pysq_free_variable, pysq_is_initialized, pysq_print,
    pysq_variable_ptr, pysq_variable_size,
};

thread_local! {
    static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

pub(crate) fn record_panic(payload: &(dyn Any + Send)) {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    log::error!("panic caught at FFI boundary: {msg}");
    LAST_PANIC.with(|cell| *cell.borrow_mut() = msg);
}

/// Copy the message of the last panic caught on this thread into `buf`.
///
/// Returns the full message length in bytes, not counting the NUL. When
/// `buf` is non-null and `buf_len > 0`, at most `buf_len - 1` bytes are
/// copied and the result is NUL-terminated. Pass a null `buf` to query
/// the length. Returns 0 if no panic has been caught.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn pysq_last_panic_message(buf: *mut c_char, buf_len: usize) -> i32 {
    LAST_PANIC.with(|cell| {
        let msg = cell.borrow();
        let bytes = msg.as_bytes();
        if !buf.is_null() && buf_len > 0 {
            let n = bytes.len().min(buf_len - 1);
            // SAFETY: buf points to at least buf_len writable bytes per caller contract.
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), n);
                *buf.add(n) = 0;
            }
        }
        i32::try_from(bytes.len()).unwrap_or(i32::MAX)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear() {
        LAST_PANIC.with(|cell| cell.borrow_mut().clear());
    }

    #[test]
    fn no_panic_reports_zero_length() {
        clear();
        assert_eq!(pysq_last_panic_message(std::ptr::null_mut(), 0), 0);
    }

    #[test]
    fn ffi_guard_catches_panic_and_stores_message() {
        clear();
        let status = ffi_guard!({
            panic!("deliberate test panic");
        });
        assert_eq!(status, PysqStatus::Panicked as i32);

        let len = pysq_last_panic_message(std::ptr::null_mut(), 0);
        assert!(len > 0);
        let mut buf = vec![0u8; len as usize + 1];
        let len2 = pysq_last_panic_message(buf.as_mut_ptr() as *mut c_char, buf.len());
        assert_eq!(len, len2);
        let msg = std::str::from_utf8(&buf[..len as usize]).unwrap();
        assert!(msg.contains("deliberate test panic"), "got: {msg:?}");
        assert_eq!(buf[len as usize], 0);
    }

    #[test]
    fn short_buffer_truncates_and_terminates() {
        clear();
        let _ = ffi_guard!({
            panic!("{}", "abcdefgh");
        });
        let mut buf = [0xffu8; 4];
        let len = pysq_last_panic_message(buf.as_mut_ptr() as *mut c_char, buf.len());
        assert_eq!(len, 8);
        assert_eq!(&buf, b"abc\0");
    }

    #[test]
    fn ffi_guard_passes_status_through() {
        let status = ffi_guard!({ PysqStatus::Ok as i32 });
        assert_eq!(status, 0);
    }
}
