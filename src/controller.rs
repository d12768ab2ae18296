use crate::chart::{self, ChartSpec};
use crate::dataset::Dataset;
use crate::error::{DashboardError, Result};
use crate::filter::filter;
use crate::selection::{Selection, SelectionPatch};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;

/// A control value change delivered to the controller
#[derive(Clone, Debug, PartialEq)]
pub enum ControlEvent {
    Region(String),
    /// Raw type value as sent by the control
    Type(String),
    DateRange { start: NaiveDate, end: NaiveDate },
    /// Any subset of fields, as posted to the callback endpoint
    Patch(SelectionPatch),
}

impl ControlEvent {
    fn into_patch(self) -> SelectionPatch {
        match self {
            ControlEvent::Region(region) => SelectionPatch {
                region: Some(region),
                ..SelectionPatch::default()
            },
            ControlEvent::Type(kind) => SelectionPatch {
                kind: Some(kind),
                ..SelectionPatch::default()
            },
            ControlEvent::DateRange { start, end } => SelectionPatch {
                start_date: Some(start),
                end_date: Some(end),
                ..SelectionPatch::default()
            },
            ControlEvent::Patch(patch) => patch,
        }
    }
}

/// What the chart placeholders show after a publish
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Update {
    pub selection: Selection,
    pub price_chart: ChartSpec,
    pub volume_chart: ChartSpec,
    /// Number of successful publishes since the controller started
    pub revision: u64,
}

/// Reactive controller for one user session
///
/// Holds the session's selection and the chart specs last published for it.
/// The controller is idle between calls; recomputing spans exactly one
/// `dispatch`, which turns the event into a complete selection, validates,
/// filters and rebuilds before returning. `&mut self` keeps events of one
/// session strictly sequential, so no caller can observe a recompute in
/// progress. A rejected event leaves everything, including the revision,
/// untouched.
pub struct Controller {
    dataset: Dataset,
    current: Update,
}

impl Controller {
    /// Start a controller and publish the charts for `initial`
    ///
    /// # Errors
    /// * `InvalidSelection` if `initial` does not fit the dataset
    pub fn new(dataset: Dataset, initial: Selection) -> Result<Self> {
        initial.validate(dataset.catalog())?;
        let (price_chart, volume_chart) = chart::build(filter(&dataset, &initial));

        Ok(Controller {
            dataset,
            current: Update {
                selection: initial,
                price_chart,
                volume_chart,
                revision: 0,
            },
        })
    }

    /// Start at the dataset's default selection
    pub fn with_defaults(dataset: Dataset) -> Result<Self> {
        let initial = dataset
            .catalog()
            .default_selection()
            .ok_or(DashboardError::EmptyDataset)?;
        Self::new(dataset, initial)
    }

    pub fn selection(&self) -> &Selection {
        &self.current.selection
    }

    /// The last published selection and charts
    pub fn current(&self) -> &Update {
        &self.current
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Process one control event and publish the recomputed charts
    ///
    /// # Returns
    /// * `Result<Update>` - The newly published state
    ///
    /// # Errors
    /// * `InvalidSelection` if the merged selection is rejected; the prior
    ///   selection and charts stay published
    pub fn dispatch(&mut self, event: ControlEvent) -> Result<Update> {
        let patch = event.into_patch();
        let candidate = self
            .current
            .selection
            .apply(&patch)
            .and_then(|selection| selection.validate(self.dataset.catalog()).map(|_| selection));

        let selection = match candidate {
            Ok(selection) => selection,
            Err(e) => {
                warn!("Rejected selection update {:?}: {}", patch, e);
                return Err(e);
            }
        };

        let records = filter(&self.dataset, &selection);
        debug!(
            "Recomputing charts for {} / {} {}..={} ({} records)",
            selection.region,
            selection.kind,
            selection.start_date,
            selection.end_date,
            records.len()
        );
        let (price_chart, volume_chart) = chart::build(records);

        self.current = Update {
            selection,
            price_chart,
            volume_chart,
            revision: self.current.revision + 1,
        };

        Ok(self.current.clone())
    }
}
