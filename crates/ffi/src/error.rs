use reacting_flow_core::KineticsError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for errors crossing the FFI boundary.
///
/// - `code()` - the code returned to the caller
/// - `msg()` - the message stored for `rf_get_last_error`
pub(crate) trait RfError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> RfErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Error code plus message, with constructors for the common failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultRfError {
    code: RfErrorCode,
    msg: String,
}

impl DefaultRfError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_session"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: RfErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: RfErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for an argument outside its valid range.
    ///
    /// # Arguments
    /// * `param_name` - Name of the offending field
    /// * `value` - The rejected value
    pub fn invalid_parameter(param_name: &str, value: f64) -> Self {
        Self {
            code: RfErrorCode::InvalidParameter,
            msg: format!("Parameter '{param_name}' has invalid value {value}"),
        }
    }

    /// Create error for an unknown source equation discriminant.
    pub fn invalid_equation(value: u8) -> Self {
        Self {
            code: RfErrorCode::InvalidParameter,
            msg: format!("Unknown source equation {value} (expected 0-3)"),
        }
    }
}

impl From<KineticsError> for DefaultRfError {
    fn from(error: KineticsError) -> Self {
        let code = match error {
            KineticsError::InvalidParameter { .. } => RfErrorCode::InvalidParameter,
            KineticsError::InvalidCellVolume { .. } | KineticsError::CellOutOfRange { .. } => {
                RfErrorCode::InvalidCell
            }
            KineticsError::InvalidTimeStep(_) => RfErrorCode::InvalidTimeStep,
            KineticsError::InvalidParticle { .. } => RfErrorCode::InvalidParticle,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl RfError for DefaultRfError {
    fn code(&self) -> RfErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by kinetics functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid parameter passed to function (non-finite or out of range).
    InvalidParameter = 3,

    /// Cell has a non-positive volume or does not exist.
    InvalidCell = 4,

    /// Particle has non-physical properties (density, specific heat, mass).
    InvalidParticle = 5,

    /// Integration step is zero, negative or non-finite.
    InvalidTimeStep = 6,
}

impl From<DefaultRfError> for RfErrorCode {
    fn from(error: DefaultRfError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error (C string, error code) of this thread.
    /// The CString is kept here so the pointer handed out stays valid until the next call.
    static LAST_ERROR: RefCell<(Option<CString>, RfErrorCode)> =
        const { RefCell::new((None, RfErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, RfErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, RfErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// RfSession* session = nullptr;
/// if (rf_session_create(&session) != RfErrorCode::Ok) {
///     const char* error = rf_get_last_error();
///     if (error) {
///         printf("Session creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn rf_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code of this thread.
///
/// Returns `RfErrorCode::Ok` (0) if the last call succeeded.
#[no_mangle]
pub extern "C" fn rf_get_last_error_code() -> RfErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinetics_error_codes() {
        let err = DefaultRfError::from(KineticsError::InvalidTimeStep(0.0));
        assert_eq!(err.code(), RfErrorCode::InvalidTimeStep);
        assert!(err.msg().contains("time step"));

        let err = DefaultRfError::from(KineticsError::CellOutOfRange { cell: 2, count: 1 });
        assert_eq!(RfErrorCode::from(err), RfErrorCode::InvalidCell);
    }

    #[test]
    fn test_null_pointer_message() {
        let err = DefaultRfError::null_pointer("gas");
        assert_eq!(err.code(), RfErrorCode::NullPointer);
        assert_eq!(err.msg(), "Parameter 'gas' cannot be null");
    }
}
