//! System-wide observer set.
//!
//! Key metrics:
//! - system.cpu.load_average.{1m,5m,15m}: host load averages
//! - system.uptime: host uptime
//! - process.uptime: run time of this process

use std::sync::Arc;

use opentelemetry::metrics::Meter;
use sysinfo::System;

use super::ProcessSampler;

/// Register the system observers.
pub fn register_observers(meter: &Meter, sampler: Arc<ProcessSampler>) {
    meter
        .f64_observable_gauge("system.cpu.load_average.1m")
        .with_description("Host load average over the last minute")
        .with_unit("1")
        .with_callback(|observer| {
            observer.observe(System::load_average().one, &[]);
        })
        .init();

    meter
        .f64_observable_gauge("system.cpu.load_average.5m")
        .with_description("Host load average over the last five minutes")
        .with_unit("1")
        .with_callback(|observer| {
            observer.observe(System::load_average().five, &[]);
        })
        .init();

    meter
        .f64_observable_gauge("system.cpu.load_average.15m")
        .with_description("Host load average over the last fifteen minutes")
        .with_unit("1")
        .with_callback(|observer| {
            observer.observe(System::load_average().fifteen, &[]);
        })
        .init();

    meter
        .u64_observable_gauge("system.uptime")
        .with_description("Host uptime")
        .with_unit("s")
        .with_callback(|observer| {
            observer.observe(System::uptime(), &[]);
        })
        .init();

    meter
        .u64_observable_gauge("process.uptime")
        .with_description("Run time of this process")
        .with_unit("s")
        .with_callback(move |observer| {
            if let Some(pid) = sampler.pid() {
                let state = sampler.refreshed();
                if let Some(process) = state.system.process(pid) {
                    observer.observe(process.run_time(), &[]);
                }
            }
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::metrics::test_meter_provider;
    use opentelemetry::metrics::MeterProvider as _;

    #[test]
    fn test_register_system_observers() {
        let provider = test_meter_provider();
        let meter = provider.meter("test");
        register_observers(&meter, Arc::new(ProcessSampler::new()));
    }

    #[test]
    fn test_load_average_is_non_negative() {
        let load = System::load_average();
        assert!(load.one >= 0.0);
        assert!(load.five >= 0.0);
        assert!(load.fifteen >= 0.0);
    }
}
