// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! orgpulse library
//!
//! This module exports the collection pipeline of orgpulse (configuration,
//! cross-branch deduplication and organization traversal) for use in
//! integration tests, benchmarks and the `orgpulse` binary.

pub mod aggregate;
pub mod collect;
pub mod config;

pub use aggregate::{DedupAggregator, Observation};
pub use collect::{CollectError, CollectOptions, CollectStats, Collection, Collector};
pub use config::{Config, ConfigError};
