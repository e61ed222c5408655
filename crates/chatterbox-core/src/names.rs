//! Display names handed out to new connections.
//!
//! Names are `{Adjective}{Noun}{0..1000}` with no separator, e.g.
//! `BraveTiger482`. Uniqueness is not enforced; collisions are accepted.

use rand::Rng;

pub const ADJECTIVES: [&str; 10] = [
    "Happy", "Clever", "Brave", "Swift", "Bright", "Wise", "Calm", "Eager", "Fierce", "Gentle",
];

pub const NOUNS: [&str; 10] = [
    "Panda", "Tiger", "Eagle", "Dolphin", "Wolf", "Lion", "Fox", "Bear", "Hawk", "Dragon",
];

/// Exclusive upper bound of the numeric suffix.
pub const SUFFIX_BOUND: u32 = 1000;

/// Generate a name from the thread-local RNG.
pub fn random_name() -> String {
    random_name_with(&mut rand::rng())
}

/// Generate a name from a caller-supplied RNG.
pub fn random_name_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let number = rng.random_range(0..SUFFIX_BOUND);
    format!("{adjective}{noun}{number}")
}
