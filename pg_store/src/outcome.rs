//! Outcome classification
//!
//! Maps raw engine failures onto the [`StoreError`] taxonomy. Zero-row
//! results are not engine failures; each operation synthesizes those itself.

use crate::errors::{DbFailure, StoreError};

/// SQLSTATE for unique constraint violations
pub const UNIQUE_VIOLATION: &str = "23505";

/// Classify an engine failure.
///
/// A unique violation becomes `Conflict` only when the call site supplies a
/// conflict code; everything else is `Internal` carrying the engine detail.
pub fn classify(failure: DbFailure, conflict_code: Option<u32>, internal_code: u32) -> StoreError {
    match conflict_code {
        Some(code) if failure.is_unique_violation() => {
            tracing::warn!(code, detail = %failure.detail, "unique constraint violation");
            StoreError::conflict(code, format!("conflict: {}", failure.detail))
        }
        _ => {
            tracing::error!(
                code = internal_code,
                sqlstate = ?failure.code,
                detail = %failure.detail,
                "query failed"
            );
            StoreError::internal(internal_code, failure.detail)
        }
    }
}
