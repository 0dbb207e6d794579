//! Embedded reference data.
//!
//! The ISO-3166 country list is compiled into the binary with `include_str!()`
//! so the standardizer works without any files next to it.

/// Label used for the embedded resource in logs and errors.
pub const ISO3166_SOURCE: &str = "embedded:iso3166/countries.csv";

/// ISO-3166 countries: `name,official,alpha-2,alpha-3`.
pub const ISO3166_COUNTRIES: &str = include_str!("../data/iso3166/countries.csv");
