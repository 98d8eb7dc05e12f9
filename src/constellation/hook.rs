use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Receives a notification each time the registry is asked about a network
/// code it does not know.
pub trait UnknownNetworkHook: Send + Sync {
    fn unknown_network(&self, code: &str);
}

/// Distinct codes remembered for warn-once; later newcomers log at debug.
const MAX_REMEMBERED_CODES: usize = 64;

/// Warns through `log` the first time each unknown code is seen.
#[derive(Debug, Default)]
pub struct LogUnknownNetwork {
    seen: Mutex<HashSet<String>>,
}

impl LogUnknownNetwork {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UnknownNetworkHook for LogUnknownNetwork {
    fn unknown_network(&self, code: &str) {
        let mut seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
        if seen.len() < MAX_REMEMBERED_CODES && seen.insert(code.to_string()) {
            log::warn!("Unknown satellite network code {:?}, using default altitude", code);
        } else {
            log::debug!("Unknown satellite network code {:?}", code);
        }
    }
}

/// Counts unknown-code lookups, for hosts that export the number as a metric.
#[derive(Debug, Default)]
pub struct UnknownNetworkCounter {
    count: AtomicU64,
}

impl UnknownNetworkCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

impl UnknownNetworkHook for UnknownNetworkCounter {
    fn unknown_network(&self, code: &str) {
        self.count.fetch_add(1, Ordering::Relaxed);
        log::debug!("Unknown satellite network code {:?}", code);
    }
}
