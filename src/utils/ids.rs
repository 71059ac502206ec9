//! Fabricated identifiers used by the scripted narrative.
//!
//! None of these are secrets. They only need to look like opaque system
//! tokens and stay stable where the script re-displays them.

use sha2::{Digest, Sha256};
use uuid::Uuid;

const NODE_ID_PREFIX: &str = "USR";
const INTEGRITY_MIN: f64 = 24.5;
const INTEGRITY_MAX: f64 = 49.5;

fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}

/// Deterministic per-user node id, e.g. `USR-9F3A7C2B`.
///
/// Salted so the raw Telegram user id is not directly recoverable from the
/// displayed token.
pub fn node_id(user_id: u64, salt: &str) -> String {
    let digest = Sha256::digest(format!("{salt}:{user_id}").as_bytes());
    format!("{NODE_ID_PREFIX}-{}", hex_upper(&digest[..4]))
}

/// Fresh opaque script id, e.g. `SLT-7B2D9E1F` or `AKY-3C5E8D9A`.
pub fn script_id(prefix: &str) -> String {
    let digest = Sha256::digest(Uuid::new_v4().as_bytes());
    format!("{}-{}", prefix.to_uppercase(), hex_upper(&digest[..4]))
}

/// Fresh 4-hex-char "sync seed", e.g. `3F0A`.
pub fn sync_seed() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    format!("{:04X}", u16::from_be_bytes([bytes[0], bytes[1]]))
}

/// Fresh "node integrity" percentage in [24.5, 49.5], one decimal place.
pub fn integrity_percent() -> f64 {
    let bytes = Uuid::new_v4().into_bytes();
    let raw = f64::from(u16::from_be_bytes([bytes[0], bytes[1]])) / f64::from(u16::MAX);
    let value = INTEGRITY_MIN + raw * (INTEGRITY_MAX - INTEGRITY_MIN);
    (value * 10.0).round() / 10.0
}
