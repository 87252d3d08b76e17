//! Idempotency keys for the submission sequence.
//!
//! A key is the hex SHA-256 of `"{submission_id}:{call}"`. It is stable for
//! the lifetime of a wizard, so a retried create lands on the record the
//! first attempt made.

use sha2::{Digest, Sha256};

use glp_contracts::ids::SubmissionId;

/// Derive the key for `call` within `submission`.
pub fn idempotency_key(submission: &SubmissionId, call: &str) -> String {
    let digest = Sha256::digest(format!("{}:{}", submission, call).as_bytes());
    hex::encode(digest)
}
