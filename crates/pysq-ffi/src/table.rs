//! The process-wide variable table and its extern "C" operations.

use std::ffi::c_void;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;
use std::sync::{LazyLock, Mutex};

use pysq_runtime::VariableTable;

use crate::status::PysqStatus;

static TABLE: LazyLock<Mutex<VariableTable>> =
    LazyLock::new(|| Mutex::new(VariableTable::default()));

pub(crate) fn table() -> &'static Mutex<VariableTable> {
    &TABLE
}

fn status_of<T>(result: Result<T, pysq_core::TableError>) -> i32 {
    match result {
        Ok(_) => PysqStatus::Ok as i32,
        Err(e) => PysqStatus::from(&e) as i32,
    }
}

/// Allocate a zeroed `size`-byte buffer into slot `index`.
///
/// Fails with `PYSQ_STATUS_ALREADY_INITIALIZED` if the slot is live.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn pysq_create_variable(index: usize, size: usize) -> i32 {
    ffi_guard!({ status_of(ffi_lock!(table()).create_variable(index, size)) })
}

/// Release slot `index`. Freeing an uninitialized slot is a no-op.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn pysq_free_variable(index: usize) -> i32 {
    ffi_guard!({ status_of(ffi_lock!(table()).free_variable(index)) })
}

/// Pointer to the buffer of slot `index`, or null if the slot is out of
/// range or uninitialized.
///
/// The pointer stays valid until the slot is freed or cleaned up. For a
/// zero-sized buffer it is non-null but must not be dereferenced.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn pysq_variable_ptr(index: usize) -> *mut c_void {
    let result = catch_unwind(AssertUnwindSafe(|| {
        let mut table = table().lock().ok()?;
        let bytes = table.bytes_mut(index).ok()?;
        Some(bytes.as_mut_ptr().cast::<c_void>())
    }));
    match result {
        Ok(Some(p)) => p,
        Ok(None) => ptr::null_mut(),
        Err(payload) => {
            crate::record_panic(payload.as_ref());
            ptr::null_mut()
        }
    }
}

/// Write 1 to `initialized_out` if slot `index` is live, 0 otherwise.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn pysq_is_initialized(index: usize, initialized_out: *mut u8) -> i32 {
    ffi_guard!({
        if initialized_out.is_null() {
            return PysqStatus::InvalidArgument as i32;
        }
        let table = ffi_lock!(table());
        if index >= table.capacity() {
            return PysqStatus::IndexOutOfRange as i32;
        }
        let live = u8::from(table.is_initialized(index));
        // SAFETY: initialized_out is valid per caller contract.
        unsafe { *initialized_out = live };
        PysqStatus::Ok as i32
    })
}

/// Write the buffer size of live slot `index` to `size_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn pysq_variable_size(index: usize, size_out: *mut usize) -> i32 {
    ffi_guard!({
        if size_out.is_null() {
            return PysqStatus::InvalidArgument as i32;
        }
        match ffi_lock!(table()).size_of(index) {
            Ok(size) => {
                // SAFETY: size_out is valid per caller contract.
                unsafe { *size_out = size };
                PysqStatus::Ok as i32
            }
            Err(e) => PysqStatus::from(&e) as i32,
        }
    })
}

/// Print `value` in decimal followed by a newline to standard output.
///
/// Output failures are logged, not reported.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn pysq_print(value: i32) -> i32 {
    ffi_guard!({
        pysq_runtime::print(value);
        PysqStatus::Ok as i32
    })
}

/// Release every live slot.
///
/// If `released_out` is non-null it receives the number of slots released.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn pysq_cleanup(released_out: *mut usize) -> i32 {
    ffi_guard!({
        let released = ffi_lock!(table()).cleanup();
        if !released_out.is_null() {
            // SAFETY: released_out is valid per caller contract.
            unsafe { *released_out = released };
        }
        PysqStatus::Ok as i32
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // The table is process-wide; tests touching it run one at a time.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn serial() -> std::sync::MutexGuard<'static, ()> {
        let guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        pysq_cleanup(ptr::null_mut());
        guard
    }

    fn is_initialized(index: usize) -> bool {
        let mut out = 0xffu8;
        assert_eq!(pysq_is_initialized(index, &mut out), PysqStatus::Ok as i32);
        out == 1
    }

    #[test]
    #[allow(unsafe_code)]
    fn create_write_read_free() {
        let _s = serial();
        assert_eq!(pysq_create_variable(0, 8), PysqStatus::Ok as i32);
        assert!(is_initialized(0));

        let p = pysq_variable_ptr(0);
        assert!(!p.is_null());
        // SAFETY: slot 0 owns 8 bytes and nothing else touches it.
        unsafe {
            assert_eq!(*(p as *const i32), 0, "fresh buffers are zeroed");
            *(p as *mut i32) = 5;
        }
        assert_eq!(table().lock().unwrap().read_int(0), Ok(5));

        let mut size = 0usize;
        assert_eq!(pysq_variable_size(0, &mut size), PysqStatus::Ok as i32);
        assert_eq!(size, 8);

        assert_eq!(pysq_free_variable(0), PysqStatus::Ok as i32);
        assert!(!is_initialized(0));
        assert!(pysq_variable_ptr(0).is_null());
    }

    #[test]
    fn free_of_empty_slot_is_ok() {
        let _s = serial();
        assert_eq!(pysq_free_variable(7), PysqStatus::Ok as i32);
        assert_eq!(pysq_free_variable(7), PysqStatus::Ok as i32);
    }

    #[test]
    fn out_of_range_index() {
        let _s = serial();
        assert_eq!(
            pysq_create_variable(256, 8),
            PysqStatus::IndexOutOfRange as i32
        );
        assert_eq!(pysq_free_variable(256), PysqStatus::IndexOutOfRange as i32);
        assert!(pysq_variable_ptr(usize::MAX).is_null());
        let mut out = 0u8;
        assert_eq!(
            pysq_is_initialized(1000, &mut out),
            PysqStatus::IndexOutOfRange as i32
        );
    }

    #[test]
    fn double_create_is_rejected() {
        let _s = serial();
        assert_eq!(pysq_create_variable(3, 16), PysqStatus::Ok as i32);
        assert_eq!(
            pysq_create_variable(3, 4),
            PysqStatus::AlreadyInitialized as i32
        );
        let mut size = 0usize;
        pysq_variable_size(3, &mut size);
        assert_eq!(size, 16, "original allocation kept");
    }

    #[test]
    fn size_of_empty_slot_is_use_after_free() {
        let _s = serial();
        let mut size = 99usize;
        assert_eq!(
            pysq_variable_size(5, &mut size),
            PysqStatus::UseAfterFree as i32
        );
        assert_eq!(size, 99, "out must not be written on error");
    }

    #[test]
    fn null_out_pointers_are_invalid() {
        let _s = serial();
        assert_eq!(
            pysq_is_initialized(0, ptr::null_mut()),
            PysqStatus::InvalidArgument as i32
        );
        assert_eq!(
            pysq_variable_size(0, ptr::null_mut()),
            PysqStatus::InvalidArgument as i32
        );
    }

    #[test]
    fn cleanup_releases_everything_and_counts() {
        let _s = serial();
        assert_eq!(pysq_create_variable(3, 16), PysqStatus::Ok as i32);
        assert_eq!(pysq_create_variable(10, 4), PysqStatus::Ok as i32);
        assert_eq!(pysq_free_variable(3), PysqStatus::Ok as i32);

        let mut released = 0usize;
        assert_eq!(pysq_cleanup(&mut released), PysqStatus::Ok as i32);
        assert_eq!(released, 1);
        assert!(!is_initialized(3));
        assert!(!is_initialized(10));

        assert_eq!(pysq_cleanup(&mut released), PysqStatus::Ok as i32);
        assert_eq!(released, 0);
    }

    #[test]
    fn print_reports_ok() {
        let _s = serial();
        assert_eq!(pysq_print(42), PysqStatus::Ok as i32);
    }
}
