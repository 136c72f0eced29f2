//! Disk I/O observer set.
//!
//! Key metrics:
//! - process.disk.io{direction}: cumulative bytes read/written by the
//!   process

use std::sync::Arc;

use opentelemetry::metrics::Meter;
use opentelemetry::KeyValue;

use super::ProcessSampler;

/// Register the disk observers.
///
/// Totals are cumulative since process start, reported through an
/// observable counter so the backend derives the rates.
pub fn register_observers(meter: &Meter, sampler: Arc<ProcessSampler>) {
    meter
        .u64_observable_counter("process.disk.io")
        .with_description("Cumulative bytes transferred to and from disk by the process")
        .with_unit("By")
        .with_callback(move |observer| {
            if let Some(pid) = sampler.pid() {
                let state = sampler.refreshed();
                if let Some(process) = state.system.process(pid) {
                    let io = process.disk_usage();
                    observer.observe(io.total_read_bytes, &[KeyValue::new("direction", "read")]);
                    observer.observe(
                        io.total_written_bytes,
                        &[KeyValue::new("direction", "write")],
                    );
                }
            }
        })
        .init();
}
