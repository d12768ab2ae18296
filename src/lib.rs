/*!
# Avocado Analytics Dashboard

An interactive dashboard over weekly avocado sales data, served over HTTP.

## Overview

The dashboard loads a CSV of avocado prices and volumes once at startup and
shows two line charts, average price and number sold, for one region and
avocado type over a date range. Changing a control sends the new selection
to the server, which filters the data, rebuilds both charts and sends them
back.

## Architecture

### Data Layer
- **loader**: reads the CSV, parses `YYYY-MM-DD` dates, sorts rows by date
- **dataset**: read-only, cheaply cloned handle over the sorted records plus
  the distinct regions/types and the date span
- **selection**: the user's current filter values and their validation

### Pipeline
- **filter**: region/type/date-range predicate over the dataset
- **chart**: turns a filtered record set into price and volume chart specs
- **controller**: per-session reactive controller; control events in,
  freshly published chart specs out

### Presentation
- **layout**: declarative page tree (header, dropdowns, date range, chart
  placeholders) and its HTML rendering
- **render**: PNG rasterisation of a chart spec (feature `web`)
- **export**: CSV download of the current selection

### Web Layer (feature `web`)
- **session**: one controller per browser session, keyed by cookie
- **app**: axum routing and handlers

## REST API Endpoints

- `GET /` - Dashboard page
- `GET /api/layout` - Page tree and initial selection as JSON
- `POST /api/update` - Apply `{region, type, start_date, end_date}` (any subset)
  and return `{price_chart, volume_chart, selection, revision}`
- `GET /api/chart/{price|volume}` - Current chart as PNG
- `GET /api/export` - Current filtered rows as CSV
*/

pub mod chart;
pub mod config;
pub mod controller;
pub mod dataset;
pub mod error;
pub mod export;
pub mod filter;
pub mod layout;
pub mod loader;
pub mod record;
pub mod selection;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod render;
#[cfg(feature = "web")]
pub mod session;

/// Re-export the core types to make them easier to use
pub use chart::{ChartKind, ChartSpec, build};
pub use controller::{ControlEvent, Controller, Update};
pub use dataset::{Catalog, Dataset};
pub use error::{DashboardError, Result};
pub use filter::filter;
pub use layout::{Layout, UiNode, build_layout};
pub use loader::load;
pub use record::{AvocadoType, Record};
pub use selection::{Selection, SelectionPatch};
