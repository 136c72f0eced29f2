//! Process and system runtime metric observers.
//!
//! Six observer sets, each registering observable instruments whose
//! callbacks sample a shared [`ProcessSampler`] at every collection
//! interval:
//!
//! - [`cpu`]: process and system CPU usage
//! - [`memory`]: process RSS/virtual and system memory pools
//! - [`disk`]: cumulative process disk I/O
//! - [`network`]: per-interface network I/O
//! - [`threads`]: thread and process counts
//! - [`system`]: load averages and uptimes

pub mod cpu;
pub mod disk;
pub mod memory;
pub mod network;
pub mod system;
pub mod threads;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use opentelemetry::metrics::Meter;
use sysinfo::{Networks, Pid, System};

/// Minimum age before cached samples are refreshed again.
///
/// The export interval is 5 seconds and every observer callback in a
/// collection cycle fires back-to-back; the throttle lets the first
/// callback of a cycle pay for the refresh and the rest reuse it. It also
/// keeps CPU usage deltas meaningful, which need spaced refreshes.
const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Mutable sampling state guarded by the sampler mutex.
pub(crate) struct SamplerState {
    pub system: System,
    pub networks: Networks,
    last_refresh: Option<Instant>,
}

/// Shared sampler over the current process and its host.
///
/// Observer callbacks run on the SDK's collection cycle and borrow the
/// state briefly; the callbacks never panic, a process that cannot be
/// resolved simply observes nothing.
pub struct ProcessSampler {
    pid: Option<Pid>,
    state: Mutex<SamplerState>,
}

impl ProcessSampler {
    /// Create a sampler with a fully-populated initial snapshot.
    pub fn new() -> Self {
        let state = SamplerState {
            system: System::new_all(),
            networks: Networks::new_with_refreshed_list(),
            last_refresh: None,
        };
        Self {
            pid: sysinfo::get_current_pid().ok(),
            state: Mutex::new(state),
        }
    }

    /// PID of the current process, if it could be resolved.
    pub(crate) fn pid(&self) -> Option<Pid> {
        self.pid
    }

    /// Lock the sampling state, refreshing it first when stale.
    pub(crate) fn refreshed(&self) -> MutexGuard<'_, SamplerState> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let stale = state
            .last_refresh
            .map_or(true, |at| at.elapsed() >= REFRESH_INTERVAL);
        if stale {
            state.system.refresh_all();
            state.networks.refresh();
            state.last_refresh = Some(Instant::now());
        }
        state
    }
}

impl Default for ProcessSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Register all six observer sets on the meter.
pub fn register_all(meter: &Meter, sampler: Arc<ProcessSampler>) {
    cpu::register_observers(meter, Arc::clone(&sampler));
    disk::register_observers(meter, Arc::clone(&sampler));
    memory::register_observers(meter, Arc::clone(&sampler));
    network::register_observers(meter, Arc::clone(&sampler));
    system::register_observers(meter, Arc::clone(&sampler));
    threads::register_observers(meter, sampler);
}
