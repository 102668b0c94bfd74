use crate::error::{with_last_error_mut, DefaultRfError, RfError, RfErrorCode};
use crate::session::RfSession;
use reacting_flow_core::StepDiagnostics;
use std::ffi::CString;
use std::sync::MutexGuard;

/// Set the thread-local error message and code.
/// Accepts any type implementing the `RfError` trait.
pub(crate) fn set_last_error(error: &impl RfError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl RfError) -> RfErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = RfErrorCode::Ok;
    });
}

/// Run `f`, recording its error or clearing the last error, and return the FFI code.
pub(crate) fn handle_ffi_result<F>(f: F) -> RfErrorCode
where
    F: FnOnce() -> Result<(), DefaultRfError>,
{
    match f() {
        Ok(()) => {
            clear_last_error();
            RfErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Borrow a session from a raw pointer.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `rf_session_create`.
pub(crate) unsafe fn session_from_ptr<'a>(
    ptr: *const RfSession,
) -> Result<&'a RfSession, DefaultRfError> {
    // SAFETY: caller guarantees the pointer is null or valid
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultRfError::null_pointer("session"))
}

/// Read a value through a raw pointer.
///
/// # Safety
/// `ptr` must be null or point to a valid, initialised `T`.
pub(crate) unsafe fn read_ptr<'a, T>(ptr: *const T, name: &str) -> Result<&'a T, DefaultRfError> {
    // SAFETY: caller guarantees the pointer is null or valid
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultRfError::null_pointer(name))
}

/// Mutable access through a raw pointer.
///
/// # Safety
/// `ptr` must be null or point to a valid, initialised `T` not aliased elsewhere.
pub(crate) unsafe fn write_ptr<'a, T>(
    ptr: *mut T,
    name: &str,
) -> Result<&'a mut T, DefaultRfError> {
    // SAFETY: caller guarantees the pointer is null or valid and unaliased
    unsafe { ptr.as_mut() }.ok_or_else(|| DefaultRfError::null_pointer(name))
}

/// Acquire the session's diagnostic totals
pub(crate) fn lock_totals(
    session: &RfSession,
) -> Result<MutexGuard<'_, StepDiagnostics>, DefaultRfError> {
    session
        .totals
        .lock()
        .map_err(|_| DefaultRfError::lock_poisoned("Mutex<StepDiagnostics>"))
}
