//! Greptime quickstart: export process runtime metrics over OTLP/HTTP.
//!
//! Wires an OpenTelemetry metrics pipeline against a GreptimeDB HTTP
//! endpoint and registers observer sets for the current process and host:
//!
//! - **OTLP/HTTP export**: binary protobuf, periodic reader, Basic auth
//! - **Runtime observers**: cpu, memory, disk, network, threads, system
//! - **Observable**: structured tracing for the program's own lifecycle
//!
//! # Modules
//!
//! - [`config`]: CLI and environment configuration
//! - [`observability`]: tracing setup and the OTLP metrics pipeline
//! - [`runtime`]: process/system observer sets

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions, // runtime::ProcessSampler is fine
    clippy::must_use_candidate,      // Not all functions need #[must_use]
    clippy::missing_errors_doc,      // Error docs can be verbose
    clippy::missing_panics_doc       // Panic docs can be verbose
)]

pub mod config;
pub mod observability;
pub mod runtime;
