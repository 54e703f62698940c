//! Hashing primitive for chain records.
//!
//! FNV-1a 64-bit, rendered as a fixed-width hex string. Fast and
//! deterministic, NOT cryptographically secure: distinct inputs can
//! collide. Suitable only for simulating tamper evidence.

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Digest a string into a 16-character lowercase hex hash.
pub fn hash(input: &str) -> String {
    let mut value = FNV_OFFSET_BASIS;
    for byte in input.as_bytes() {
        value ^= u64::from(*byte);
        value = value.wrapping_mul(FNV_PRIME);
    }
    hex::encode(value.to_be_bytes())
}
