use crate::dataset::Catalog;
use crate::error::{DashboardError, Result};
use crate::record::{AvocadoType, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The filter values currently chosen in the controls
///
/// A selection is always complete; partial changes arrive as a
/// [`SelectionPatch`] and are merged with the retained values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub region: String,

    #[serde(rename = "type")]
    pub kind: AvocadoType,

    /// First day included, inclusive
    pub start_date: NaiveDate,

    /// Last day included, inclusive
    pub end_date: NaiveDate,
}

impl Selection {
    /// Checks the selection against the values the dataset actually holds
    ///
    /// # Errors
    /// * `InvalidSelection` if `start_date` is after `end_date`
    /// * `InvalidSelection` if the region or type never occurs in the data
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(DashboardError::InvalidSelection(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        if !catalog.has_region(&self.region) {
            return Err(DashboardError::InvalidSelection(format!(
                "unknown region '{}'",
                self.region
            )));
        }
        if !catalog.has_type(self.kind) {
            return Err(DashboardError::InvalidSelection(format!(
                "type '{}' does not occur in the dataset",
                self.kind
            )));
        }
        Ok(())
    }

    /// True when the record satisfies all four filter clauses
    pub fn matches(&self, record: &Record) -> bool {
        record.region == self.region
            && record.kind == self.kind
            && self.start_date <= record.date
            && record.date <= self.end_date
    }

    /// Combines changed fields with the retained ones
    ///
    /// The result is not validated; callers run [`Selection::validate`].
    pub fn apply(&self, patch: &SelectionPatch) -> Result<Selection> {
        let kind = match &patch.kind {
            Some(raw) => raw
                .parse::<AvocadoType>()
                .map_err(DashboardError::InvalidSelection)?,
            None => self.kind,
        };

        Ok(Selection {
            region: patch.region.clone().unwrap_or_else(|| self.region.clone()),
            kind,
            start_date: patch.start_date.unwrap_or(self.start_date),
            end_date: patch.end_date.unwrap_or(self.end_date),
        })
    }
}

/// Callback payload: any subset of the selection fields
///
/// The type is carried as a raw string so an unknown value surfaces as an
/// `InvalidSelection` rather than a body rejection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionPatch {
    #[serde(default)]
    pub region: Option<String>,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}
