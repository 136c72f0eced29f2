//! Memory observer set.
//!
//! Key metrics:
//! - process.memory.usage: resident set size
//! - process.memory.virtual: virtual memory size
//! - system.memory.usage{state}: host memory pools (used, free, available)
//! - system.swap.usage{state}: swap pools (used, free)

use std::sync::Arc;

use opentelemetry::metrics::Meter;
use opentelemetry::KeyValue;

use super::ProcessSampler;

/// Register the memory observers.
pub fn register_observers(meter: &Meter, sampler: Arc<ProcessSampler>) {
    let s = Arc::clone(&sampler);
    meter
        .u64_observable_gauge("process.memory.usage")
        .with_description("Resident set size of the process")
        .with_unit("By")
        .with_callback(move |observer| {
            if let Some(pid) = s.pid() {
                let state = s.refreshed();
                if let Some(process) = state.system.process(pid) {
                    observer.observe(process.memory(), &[]);
                }
            }
        })
        .init();

    let s = Arc::clone(&sampler);
    meter
        .u64_observable_gauge("process.memory.virtual")
        .with_description("Virtual memory size of the process")
        .with_unit("By")
        .with_callback(move |observer| {
            if let Some(pid) = s.pid() {
                let state = s.refreshed();
                if let Some(process) = state.system.process(pid) {
                    observer.observe(process.virtual_memory(), &[]);
                }
            }
        })
        .init();

    let s = Arc::clone(&sampler);
    meter
        .u64_observable_gauge("system.memory.usage")
        .with_description("Host memory by state")
        .with_unit("By")
        .with_callback(move |observer| {
            let state = s.refreshed();
            observer.observe(state.system.used_memory(), &[KeyValue::new("state", "used")]);
            observer.observe(state.system.free_memory(), &[KeyValue::new("state", "free")]);
            observer.observe(
                state.system.available_memory(),
                &[KeyValue::new("state", "available")],
            );
        })
        .init();

    meter
        .u64_observable_gauge("system.swap.usage")
        .with_description("Host swap by state")
        .with_unit("By")
        .with_callback(move |observer| {
            let state = sampler.refreshed();
            observer.observe(state.system.used_swap(), &[KeyValue::new("state", "used")]);
            observer.observe(state.system.free_swap(), &[KeyValue::new("state", "free")]);
        })
        .init();
}
