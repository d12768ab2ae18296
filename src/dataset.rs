use crate::record::{AvocadoType, Record};
use crate::selection::Selection;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::Deref;
use std::sync::Arc;

/// The full, immutable, date-sorted collection of records
///
/// `Dataset` is a cheap-to-clone handle around shared storage. It is built
/// once (by the loader or from an explicit record list), sorted ascending by
/// date with ties kept in input order, and never mutated afterwards, so any
/// number of sessions can read it without locking.
///
/// # Examples
/// ```
/// use avocado_dashboard::dataset::Dataset;
/// use avocado_dashboard::record::{AvocadoType, Record};
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2015, 1, day).unwrap();
/// let dataset = Dataset::from_records(vec![
///     Record::new(d(2), "Albany", AvocadoType::Organic, 1.5, 100.0),
///     Record::new(d(1), "Albany", AvocadoType::Organic, 1.4, 90.0),
/// ]);
/// assert_eq!(dataset[0].date, d(1));
/// assert_eq!(dataset.catalog().regions, vec!["Albany".to_string()]);
/// ```
#[derive(Clone, Debug)]
pub struct Dataset {
    records: Arc<[Record]>,
    catalog: Arc<Catalog>,
}

impl Dataset {
    pub fn from_records(mut records: Vec<Record>) -> Self {
        // sort_by_key is stable, rows sharing a date keep file order
        records.sort_by_key(|record| record.date);
        let catalog = Arc::new(Catalog::from_records(&records));
        Dataset {
            records: records.into(),
            catalog,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct regions/types and the date span, computed at construction
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Deref for Dataset {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

/// Distinct control values present in a dataset
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Catalog {
    /// Distinct regions, sorted
    pub regions: Vec<String>,

    /// Distinct types in first-seen order
    pub types: Vec<AvocadoType>,

    /// Earliest and latest dates; `None` for an empty dataset
    pub date_span: Option<(NaiveDate, NaiveDate)>,
}

impl Catalog {
    fn from_records(records: &[Record]) -> Self {
        let regions: BTreeSet<&str> = records.iter().map(|r| r.region.as_str()).collect();

        let mut types = Vec::new();
        for record in records {
            if !types.contains(&record.kind) {
                types.push(record.kind);
            }
        }

        // records arrive sorted, first and last carry the span
        let date_span = match (records.first(), records.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        };

        Catalog {
            regions: regions.into_iter().map(str::to_string).collect(),
            types,
            date_span,
        }
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.regions.binary_search_by(|r| r.as_str().cmp(region)).is_ok()
    }

    pub fn has_type(&self, kind: AvocadoType) -> bool {
        self.types.contains(&kind)
    }

    /// Startup selection: first region, organic, whole date span
    ///
    /// Falls back to the first type seen when the data has no organic rows.
    /// Returns `None` when there is nothing to select.
    pub fn default_selection(&self) -> Option<Selection> {
        let region = self.regions.first()?.clone();
        let kind = if self.has_type(AvocadoType::Organic) {
            AvocadoType::Organic
        } else {
            *self.types.first()?
        };
        let (start_date, end_date) = self.date_span?;

        Some(Selection {
            region,
            kind,
            start_date,
            end_date,
        })
    }
}
