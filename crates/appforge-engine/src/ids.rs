//! Block id allocation
//!
//! Ids are short unpredictable tokens that become a block's permanent
//! identity: generated file paths and in-page component identifiers derive
//! from them, so an id must never change once persisted. The source is
//! injectable so tests get reproducible ids while production stays
//! unpredictable.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of randomly allocated id tokens
pub const ID_LEN: usize = 8;

/// Source of stable block ids
pub trait IdSource: Send + Sync {
    /// Allocate the next id token
    fn next_id(&self) -> String;
}

/// Production id source: random alphanumeric tokens
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> String {
        rand::rng()
            .sample_iter(Alphanumeric)
            .take(ID_LEN)
            .map(char::from)
            .collect()
    }
}

/// Deterministic id source for tests: `b1`, `b2`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    /// Create a source counting from `b1`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("b{n}")
    }
}
