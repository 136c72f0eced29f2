//! Thread and process count observer set.
//!
//! Key metrics:
//! - process.threads: task count of the process (Linux)
//! - system.processes.count: number of processes on the host

use std::sync::Arc;

use opentelemetry::metrics::Meter;

use super::ProcessSampler;

/// Register the thread/process count observers.
pub fn register_observers(meter: &Meter, sampler: Arc<ProcessSampler>) {
    // Thread counts come from the kernel task list, which sysinfo only
    // exposes on Linux.
    #[cfg(target_os = "linux")]
    {
        let s = Arc::clone(&sampler);
        meter
            .u64_observable_gauge("process.threads")
            .with_description("Number of threads in the process")
            .with_unit("{thread}")
            .with_callback(move |observer| {
                if let Some(pid) = s.pid() {
                    let state = s.refreshed();
                    if let Some(tasks) = state.system.process(pid).and_then(|p| p.tasks()) {
                        observer.observe(tasks.len() as u64, &[]);
                    }
                }
            })
            .init();
    }

    meter
        .u64_observable_gauge("system.processes.count")
        .with_description("Number of processes on the host")
        .with_unit("{process}")
        .with_callback(move |observer| {
            let state = sampler.refreshed();
            observer.observe(state.system.processes().len() as u64, &[]);
        })
        .init();
}
