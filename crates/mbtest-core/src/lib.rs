//! Regression-test support for the MusicBox box model.
//!
//! Two independent tools share this crate:
//! - [`compare`]: tolerance-based comparison of MusicBox result tables
//! - [`fixture`]: generation of the synthetic photolysis-rate NetCDF input
//!
//! [`parameters`] holds the TOML-configurable settings of the fixture.

pub mod compare;
pub mod errors;
pub mod fixture;
pub mod parameters;
