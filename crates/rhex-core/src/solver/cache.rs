//! Proven-position cache
//!
//! Shared by reference between solver invocations, within one decision
//! and across moves. Entries are monotonic: the first proof for a key
//! wins and later writes of the same key are dropped, so concurrent
//! readers can never observe a verdict regressing.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::types::Color;

/// Map from position key to proven winner.
#[derive(Debug, Default)]
pub struct PositionCache {
    map: Mutex<HashMap<u64, Color>>,
}

impl PositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Proven winner for `key`, if recorded.
    pub fn lookup(&self, key: u64) -> Option<Color> {
        self.map.lock().expect("cache poisoned").get(&key).copied()
    }

    /// Records a proof. First write wins; duplicates are idempotent.
    pub fn insert(&self, key: u64, winner: Color) {
        self.map.lock().expect("cache poisoned").entry(key).or_insert(winner);
    }

    /// Number of proven positions.
    pub fn len(&self) -> usize {
        self.map.lock().expect("cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
