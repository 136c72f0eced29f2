//! Network I/O observer set.
//!
//! Key metrics:
//! - system.network.io{direction, device}: cumulative bytes received and
//!   transmitted per interface

use std::sync::Arc;

use opentelemetry::metrics::Meter;
use opentelemetry::KeyValue;

use super::ProcessSampler;

/// Register the network observers.
pub fn register_observers(meter: &Meter, sampler: Arc<ProcessSampler>) {
    meter
        .u64_observable_counter("system.network.io")
        .with_description("Cumulative network bytes per interface")
        .with_unit("By")
        .with_callback(move |observer| {
            let state = sampler.refreshed();
            for (name, data) in &state.networks {
                observer.observe(
                    data.total_received(),
                    &[
                        KeyValue::new("device", name.to_string()),
                        KeyValue::new("direction", "receive"),
                    ],
                );
                observer.observe(
                    data.total_transmitted(),
                    &[
                        KeyValue::new("device", name.to_string()),
                        KeyValue::new("direction", "transmit"),
                    ],
                );
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
    fn test_register_network_observers() {
        let provider = test_meter_provider();
        let meter = provider.meter("test");
        register_observers(&meter, Arc::new(ProcessSampler::new()));
    }

    #[test]
    fn test_interface_list_is_enumerable() {
        let sampler = ProcessSampler::new();
        let state = sampler.refreshed();
        for (name, _data) in &state.networks {
            assert!(!name.is_empty());
        }
    }
}
