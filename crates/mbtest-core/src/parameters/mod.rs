//! Tool parameters
//!
//! Parameter structures with defaults that reproduce the canonical fixtures.
//! Every struct can be loaded from a partial TOML document.

mod photo_rates;

pub use photo_rates::PhotoRateParameters;
