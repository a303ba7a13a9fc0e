//! Instrument catalogue.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RiskError;

/// Commodity price series the pipeline knows how to request.
///
/// Each instrument maps to the identifier of its daily spot series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instrument {
    /// West Texas Intermediate crude oil spot price.
    #[serde(alias = "WTI", alias = "wti", alias = "DCOILWTICO")]
    Wti,
    /// Henry Hub natural gas spot price.
    #[serde(alias = "Henry Hub", alias = "henry_hub", alias = "DHHNGSP")]
    HenryHub,
}

impl Instrument {
    pub const ALL: [Instrument; 2] = [Instrument::Wti, Instrument::HenryHub];

    pub fn series_id(&self) -> &'static str {
        match self {
            Instrument::Wti => "DCOILWTICO",
            Instrument::HenryHub => "DHHNGSP",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Wti => "WTI",
            Instrument::HenryHub => "Henry Hub",
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Instrument {
    type Err = RiskError;

    /// Accepts display names and series ids, ignoring case, spaces,
    /// underscores and hyphens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "wti" | "dcoilwtico" => Ok(Instrument::Wti),
            "henryhub" | "dhhngsp" => Ok(Instrument::HenryHub),
            _ => Err(RiskError::DataUnavailable {
                instrument: s.to_string(),
                reason: "unknown instrument".to_string(),
            }),
        }
    }
}
