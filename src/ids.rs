//! Identifier generation.
//!
//! Ids are a millisecond timestamp plus a random base-36 suffix. Not
//! cryptographically strong; callers that need uniqueness across a store
//! check for collisions themselves.

use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random part of a smartlink id.
pub const SMARTLINK_SUFFIX_LEN: usize = 9;

/// Random lowercase base-36 string of `len` characters.
pub fn random_base36(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// `<millis>-<random>` where the random part has `len` characters.
pub fn timestamped_suffix(len: usize) -> String {
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), random_base36(len))
}

/// A candidate smartlink id, e.g. `smartlink-1718000000000-k3j9x0a1b`.
pub fn new_smartlink_id() -> String {
    format!("smartlink-{}", timestamped_suffix(SMARTLINK_SUFFIX_LEN))
}
