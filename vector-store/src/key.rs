//! Deterministic point key derivation.

use sha2::{Digest, Sha256};

/// Derive the stable point key for a ticket id.
///
/// Takes the first 8 bytes of the SHA-256 digest of the id and masks the sign
/// bit, folding the id into the store's non-negative 63-bit key space. The
/// same ticket id always maps to the same key, across calls and across
/// process restarts, which is what makes upsert idempotent.
///
/// Distinct ticket ids can collide; this layer does not deduplicate them.
/// Reads guard against serving another ticket's record by checking the
/// payload's own `ticket_id` field (see [`crate::VectorStore::get`]).
pub fn derive_key(ticket_id: &str) -> u64 {
    let digest = Sha256::digest(ticket_id.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix) & (u64::MAX >> 1)
}
