//! provider — the price-data collaborator contract.
//!
//! - [`PriceProvider`]: yields a preprocessed [`PriceSeries`] for an
//!   [`Instrument`] given a credential. Every failure to deliver data is
//!   reported as `DataUnavailable`.
//! - [`Instrument`]: WTI crude and Henry Hub natural gas with their series
//!   ids.
//! - [`InMemoryProvider`]: serves preloaded raw rows or JSON payloads.
//!
//! Network transport is left to implementors of the trait.

pub mod instrument;
pub mod memory;
pub mod observations;

use crate::{errors::RiskResult, series::PriceSeries};

/// Source of daily price history.
pub trait PriceProvider {
    /// Fetch and preprocess the full history of `instrument`.
    ///
    /// # Errors
    /// - `DataUnavailable` when the provider cannot deliver data.
    /// - `InvalidInput` when delivered rows fail preprocessing.
    fn fetch(&self, instrument: Instrument, credential: &str) -> RiskResult<PriceSeries>;
}

// ---- Re-exports ----

pub use self::instrument::Instrument;
pub use self::memory::InMemoryProvider;
pub use self::observations::{RawObservation, parse_observations};
