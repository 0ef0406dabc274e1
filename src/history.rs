//! Bounded in-memory log of recent consensus computations, feeding the
//! `/debug` endpoints. Diagnostic only; results are never persisted.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::ratings::ConsensusResult;
use crate::sources::RatingSource;

#[derive(Debug, Clone, Serialize)]
pub struct ConsensusRecord {
    pub ts_unix: u64,
    pub consensus: Option<u8>,
    pub confidence: u8,
    /// Sources that were present in the input, canonical order.
    pub sources: Vec<RatingSource>,
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<Vec<ConsensusRecord>>,
    cap: usize,
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap: cap.min(10_000),
        }
    }

    pub fn push(&self, result: &ConsensusResult) {
        let entry = ConsensusRecord {
            ts_unix: now_unix(),
            consensus: result.consensus,
            confidence: result.confidence,
            sources: result.normalized.keys().copied().collect(),
        };

        let mut v = self.inner.lock().expect("history mutex poisoned");
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<ConsensusRecord> {
        let v = self.inner.lock().expect("history mutex poisoned");
        let start = v.len().saturating_sub(n);
        v[start..].to_vec()
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
