use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the avocados were grown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvocadoType {
    Conventional,
    Organic,
}

impl AvocadoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvocadoType::Conventional => "conventional",
            AvocadoType::Organic => "organic",
        }
    }
}

impl fmt::Display for AvocadoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvocadoType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conventional" => Ok(AvocadoType::Conventional),
            "organic" => Ok(AvocadoType::Organic),
            other => Err(format!("unknown avocado type '{}'", other)),
        }
    }
}

/// One row of weekly sales data
///
/// Records are immutable once loaded; the dataset hands out shared
/// references and every filter produces a new view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Week the observation belongs to
    pub date: NaiveDate,

    /// Market or metro area, e.g. "Albany" or "TotalUS"
    pub region: String,

    #[serde(rename = "type")]
    pub kind: AvocadoType,

    /// Average price of a single avocado, in dollars
    pub average_price: f64,

    /// Number of avocados sold
    pub total_volume: f64,
}

impl Record {
    pub fn new(
        date: NaiveDate,
        region: impl Into<String>,
        kind: AvocadoType,
        average_price: f64,
        total_volume: f64,
    ) -> Self {
        Record {
            date,
            region: region.into(),
            kind,
            average_price,
            total_volume,
        }
    }
}
