//! Library side of the `iso3166` binary: configuration, logging and the batch driver.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
