//! CPU observer set.
//!
//! Key metrics:
//! - process.cpu.usage: process CPU, percent of a single core
//! - system.cpu.utilization: host CPU as a 0..1 fraction
//! - system.cpu.logical.count: logical CPU count

use std::sync::Arc;

use opentelemetry::metrics::Meter;

use super::ProcessSampler;

/// Register the CPU observers.
///
/// Usage values are deltas between refreshes, so the first collection after
/// startup reports zero.
pub fn register_observers(meter: &Meter, sampler: Arc<ProcessSampler>) {
    let s = Arc::clone(&sampler);
    meter
        .f64_observable_gauge("process.cpu.usage")
        .with_description("CPU usage of the process as a percentage of a single core")
        .with_unit("%")
        .with_callback(move |observer| {
            if let Some(pid) = s.pid() {
                let state = s.refreshed();
                if let Some(process) = state.system.process(pid) {
                    observer.observe(f64::from(process.cpu_usage()), &[]);
                }
            }
        })
        .init();

    let s = Arc::clone(&sampler);
    meter
        .f64_observable_gauge("system.cpu.utilization")
        .with_description("Fraction of total host CPU capacity in use")
        .with_unit("1")
        .with_callback(move |observer| {
            let state = s.refreshed();
            observer.observe(f64::from(state.system.global_cpu_usage()) / 100.0, &[]);
        })
        .init();

    meter
        .u64_observable_gauge("system.cpu.logical.count")
        .with_description("Number of logical CPUs")
        .with_unit("{cpu}")
        .with_callback(move |observer| {
            let state = sampler.refreshed();
            observer.observe(state.system.cpus().len() as u64, &[]);
        })
        .init();
}
