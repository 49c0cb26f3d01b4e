//! Service layer API: participant registration and the letter of credit lifecycle.
//!
//! Each operation takes primitive arguments (ids, role names, JSON payload
//! strings), validates its payloads before touching the store, and either
//! writes exactly once at the end or not at all.
use crate::error::{LocError, LocResult};
use serde::de::DeserializeOwned;

pub mod letters;
pub mod participants;

pub use letters::LetterService;
pub use participants::ParticipantService;

fn require_id(id: &str, what: &str) -> LocResult<()> {
    if id.trim().is_empty() {
        return Err(LocError::malformed(id, what));
    }
    Ok(())
}

fn parse_payload<T: DeserializeOwned>(json: &str, target: &str) -> LocResult<T> {
    serde_json::from_str(json).map_err(|_| LocError::malformed(json, target))
}

// Log a refused precondition and hand the error back.
fn refuse(err: LocError) -> LocError {
    tracing::warn!(kind = ?err.kind(), error = %err, "operation refused");
    err
}
