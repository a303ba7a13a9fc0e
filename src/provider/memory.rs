//! Provider backed by preloaded observations.
use std::collections::HashMap;

use tracing::debug;

use crate::{
    errors::{RiskError, RiskResult},
    provider::{
        PriceProvider,
        instrument::Instrument,
        observations::{RawObservation, parse_observations},
    },
    series::PriceSeries,
};

/// Serves raw rows held in memory, applying the same preprocessing a
/// remote provider's rows would receive.
///
/// The credential is checked for presence only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryProvider {
    observations: HashMap<Instrument, Vec<RawObservation>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`InMemoryProvider::insert`].
    pub fn with_observations(mut self, instrument: Instrument, rows: Vec<RawObservation>) -> Self {
        self.insert(instrument, rows);
        self
    }

    /// Replace the rows held for `instrument`.
    pub fn insert(&mut self, instrument: Instrument, rows: Vec<RawObservation>) {
        self.observations.insert(instrument, rows);
    }

    /// Load rows for `instrument` from an observations JSON payload.
    ///
    /// # Errors
    /// - `InvalidInput` for a malformed payload.
    pub fn insert_json(&mut self, instrument: Instrument, json: &str) -> RiskResult<()> {
        let rows = parse_observations(json)?;
        self.insert(instrument, rows);
        Ok(())
    }

    pub fn instruments(&self) -> impl Iterator<Item = Instrument> + '_ {
        self.observations.keys().copied()
    }
}

impl PriceProvider for InMemoryProvider {
    fn fetch(&self, instrument: Instrument, credential: &str) -> RiskResult<PriceSeries> {
        if credential.trim().is_empty() {
            return Err(RiskError::DataUnavailable {
                instrument: instrument.to_string(),
                reason: "missing credential".to_string(),
            });
        }
        let rows = self.observations.get(&instrument).ok_or_else(|| RiskError::DataUnavailable {
            instrument: instrument.to_string(),
            reason: format!("no observations loaded for series {}", instrument.series_id()),
        })?;
        debug!(%instrument, rows = rows.len(), "serving preloaded observations");
        PriceSeries::from_observations(rows.clone())
    }
}
