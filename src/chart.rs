use crate::record::Record;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const PRICE_CHART_ID: &str = "price-chart";
pub const VOLUME_CHART_ID: &str = "volume-chart";

pub const PRICE_CHART_TITLE: &str = "Average Price of Avocados";
pub const VOLUME_CHART_TITLE: &str = "Avocados Sold";

const PRICE_COLOR: &str = "#E12D39";
const VOLUME_COLOR: &str = "#17B897";

/// Which of the two dashboard charts a spec describes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// `average_price` over time, currency formatted
    Price,

    /// `total_volume` over time
    Volume,
}

impl ChartKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "price" => Some(ChartKind::Price),
            "volume" => Some(ChartKind::Volume),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ChartKind::Price => PRICE_CHART_ID,
            ChartKind::Volume => VOLUME_CHART_ID,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Price => PRICE_CHART_TITLE,
            ChartKind::Volume => VOLUME_CHART_TITLE,
        }
    }

    fn value(&self, record: &Record) -> f64 {
        match self {
            ChartKind::Price => record.average_price,
            ChartKind::Volume => record.total_volume,
        }
    }
}

/// How points are joined when drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Lines,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: NaiveDate,
    pub y: f64,
}

/// Formatting hints for one axis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisFormat {
    /// Prepended to tick and hover labels, e.g. "$"
    pub tick_prefix: Option<String>,

    /// When set the axis cannot be zoomed or panned
    pub fixed_range: bool,
}

impl AxisFormat {
    fn fixed() -> Self {
        AxisFormat {
            tick_prefix: None,
            fixed_range: true,
        }
    }
}

/// Framework-independent description of one chart
///
/// Derived from a filtered record set on every selection change and never
/// persisted. An empty `points` list is a valid, renderable chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub id: String,
    pub kind: ChartKind,
    pub title: String,
    pub series: SeriesKind,
    pub points: Vec<ChartPoint>,
    pub x_axis: AxisFormat,
    pub y_axis: AxisFormat,
    pub hover_template: String,
    pub color: String,
}

impl ChartSpec {
    /// Spec with the static metadata for `kind` and no points
    pub fn empty(kind: ChartKind) -> Self {
        let (y_axis, hover_template, color) = match kind {
            ChartKind::Price => (
                AxisFormat {
                    tick_prefix: Some("$".to_string()),
                    fixed_range: true,
                },
                "$%{y:.2f}<extra></extra>",
                PRICE_COLOR,
            ),
            ChartKind::Volume => (AxisFormat::fixed(), "%{y:,.0f}<extra></extra>", VOLUME_COLOR),
        };

        ChartSpec {
            id: kind.id().to_string(),
            kind,
            title: kind.title().to_string(),
            series: SeriesKind::Lines,
            points: Vec::new(),
            x_axis: AxisFormat::fixed(),
            y_axis,
            hover_template: hover_template.to_string(),
            color: color.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest y value, `None` when there are no points
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let mut ys = self.points.iter().map(|p| p.y);
        let first = ys.next()?;
        Some(ys.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }
}

/// Build the price and volume charts for a record sequence
///
/// Pure: the same records always give the same specs. Point order is record
/// order, so passing a filter result keeps dates ascending.
///
/// # Arguments
/// * `records` - Records to plot, typically the output of [`crate::filter::filter`]
///
/// # Returns
/// * `(ChartSpec, ChartSpec)` - The price chart and the volume chart
///
/// # Examples
/// ```
/// use avocado_dashboard::chart::build;
/// use avocado_dashboard::record::Record;
///
/// let (price, volume) = build(std::iter::empty::<&Record>());
/// assert!(price.is_empty() && volume.is_empty());
/// assert_eq!(price.title, "Average Price of Avocados");
/// ```
pub fn build<'a, I>(records: I) -> (ChartSpec, ChartSpec)
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut price = ChartSpec::empty(ChartKind::Price);
    let mut volume = ChartSpec::empty(ChartKind::Volume);

    for record in records {
        price.points.push(ChartPoint {
            x: record.date,
            y: ChartKind::Price.value(record),
        });
        volume.points.push(ChartPoint {
            x: record.date,
            y: ChartKind::Volume.value(record),
        });
    }

    (price, volume)
}
