use crate::error::{DefaultRfError, RfErrorCode};
use crate::helpers::{handle_ffi_result, lock_totals, session_from_ptr, track_error, write_ptr};
use crate::types::RfDiagnostics;
use reacting_flow_core::{KineticsConfig, StepDiagnostics};
use std::ptr;
use std::sync::Mutex;
use tracing::info;

/// Kinetics session handle.
///
/// # Thread Safety
/// The parameter set is fixed when the session is created, so kernel evaluations read it
/// without locking. Only the running diagnostic totals sit behind a `Mutex`, held just
/// long enough to fold one particle's or one cell's contribution. Particle and cell calls
/// may be issued from several host threads at once.
pub struct RfSession {
    pub(crate) config: KineticsConfig,
    pub(crate) totals: Mutex<StepDiagnostics>,
}

impl RfSession {
    /// Session with the built-in parameter set
    pub(crate) fn new() -> Result<Self, DefaultRfError> {
        let config = KineticsConfig::default();
        config.validate()?;
        Ok(Self {
            config,
            totals: Mutex::new(StepDiagnostics::default()),
        })
    }

    /// Fold one evaluation's diagnostics into the running totals
    pub(crate) fn record(&self, diagnostics: StepDiagnostics) -> Result<(), DefaultRfError> {
        let mut totals = lock_totals(self)?;
        *totals = totals.merge(diagnostics);
        Ok(())
    }
}

/// Create a kinetics session with the built-in parameters.
///
/// Returns
/// - `RfErrorCode::Ok` (0): success, `out_session` holds a valid pointer
/// - `RfErrorCode::NullPointer`: `out_session` is null
///
/// # Safety
///
/// - `out_session` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned session and MUST call `rf_session_destroy` exactly once.
///
/// Example (C++)
/// ```cpp
/// RfSession* session = nullptr;
/// if (rf_session_create(&session) != RfErrorCode::Ok) {
///     fprintf(stderr, "%s\n", rf_get_last_error());
///     return;
/// }
/// // ... per-step rf_particle_update / rf_source_term calls ...
/// rf_session_destroy(session);
/// ```
#[no_mangle]
pub unsafe extern "C" fn rf_session_create(out_session: *mut *mut RfSession) -> RfErrorCode {
    if out_session.is_null() {
        return track_error(&DefaultRfError::null_pointer("out_session"));
    }

    let mut created = ptr::null_mut();
    let code = handle_ffi_result(|| {
        created = Box::into_raw(Box::new(RfSession::new()?));
        Ok(())
    });

    // SAFETY: checked non-null above; caller guarantees it is writable
    unsafe {
        *out_session = created;
    }
    if code == RfErrorCode::Ok {
        info!("FFI kinetics session created");
    }
    code
}

/// Destroy a session created by `rf_session_create`. Null is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `rf_session_create` and not freed already.
/// - The caller must not use the pointer afterwards.
#[no_mangle]
pub unsafe extern "C" fn rf_session_destroy(session: *mut RfSession) {
    if session.is_null() {
        return;
    }
    // SAFETY: created by `Box::into_raw` in `rf_session_create` and not yet freed
    unsafe {
        drop(Box::from_raw(session));
    }
}

/// Zero the session's running diagnostic totals.
///
/// # Safety
/// `session` must be null or a live pointer returned by `rf_session_create`.
#[no_mangle]
pub unsafe extern "C" fn rf_session_reset(session: *const RfSession) -> RfErrorCode {
    handle_ffi_result(|| {
        // SAFETY: forwarded caller contract
        let session = unsafe { session_from_ptr(session) }?;
        let mut totals = lock_totals(session)?;
        info!(
            "FFI session reset (combustion {:.3e} J, decomposition {:.3e} J)",
            totals.combustion_energy, totals.decomposition_energy
        );
        *totals = StepDiagnostics::default();
        Ok(())
    })
}

/// Copy the running diagnostic totals into `out`.
///
/// # Safety
/// - `session` must be null or a live pointer returned by `rf_session_create`.
/// - `out` must be null or point to writable `RfDiagnostics` storage.
#[no_mangle]
pub unsafe extern "C" fn rf_session_diagnostics(
    session: *const RfSession,
    out: *mut RfDiagnostics,
) -> RfErrorCode {
    handle_ffi_result(|| {
        // SAFETY: forwarded caller contract
        let session = unsafe { session_from_ptr(session) }?;
        // SAFETY: forwarded caller contract
        let out = unsafe { write_ptr(out, "out") }?;
        *out = (*lock_totals(session)?).into();
        Ok(())
    })
}
