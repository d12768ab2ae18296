use crate::chart::{ChartKind, PRICE_CHART_ID, VOLUME_CHART_ID};
use crate::dataset::{Catalog, Dataset};
use crate::error::{DashboardError, Result};
use crate::selection::Selection;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

pub const PAGE_TITLE: &str = "Avocado Analytics: Understand Your Avocados!";
pub const HEADER_TITLE: &str = "Avocado Analytics";
pub const HEADER_DESCRIPTION: &str = "Analyze the behavior of avocado prices and the number \
     of avocados sold in the US between 2015 and 2018";

pub const REGION_FILTER_ID: &str = "region-filter";
pub const TYPE_FILTER_ID: &str = "type-filter";
pub const DATE_RANGE_ID: &str = "date-range";

/// Text element flavours used by the header
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTag {
    H1,
    P,
    Label,
}

impl TextTag {
    fn as_str(&self) -> &'static str {
        match self {
            TextTag::H1 => "h1",
            TextTag::P => "p",
            TextTag::Label => "div",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// One node of the declarative page tree
///
/// The tree is plain data: it is built once at startup and can be serialised
/// or rendered to markup by any front end.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum UiNode {
    Container {
        id: Option<String>,
        class: String,
        children: Vec<UiNode>,
    },
    Text {
        tag: TextTag,
        class: String,
        content: String,
    },
    Dropdown {
        id: String,
        options: Vec<DropdownOption>,
        value: String,
        clearable: bool,
    },
    DateRange {
        id: String,
        min_date: NaiveDate,
        max_date: NaiveDate,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    Chart {
        id: String,
        kind: ChartKind,
        title: String,
    },
}

impl UiNode {
    pub fn container(class: &str) -> ContainerBuilder {
        ContainerBuilder {
            id: None,
            class: class.to_string(),
            children: Vec::new(),
        }
    }

    pub fn text(tag: TextTag, class: &str, content: &str) -> Self {
        UiNode::Text {
            tag,
            class: class.to_string(),
            content: content.to_string(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            UiNode::Container { id, .. } => id.as_deref(),
            UiNode::Text { .. } => None,
            UiNode::Dropdown { id, .. } | UiNode::DateRange { id, .. } | UiNode::Chart { id, .. } => Some(id.as_str()),
        }
    }

    /// Depth-first search for the node carrying `id`
    pub fn find(&self, target: &str) -> Option<&UiNode> {
        if self.id() == Some(target) {
            return Some(self);
        }
        match self {
            UiNode::Container { children, .. } => children.iter().find_map(|child| child.find(target)),
            _ => None,
        }
    }
}

/// Builder for [`UiNode::Container`]
pub struct ContainerBuilder {
    id: Option<String>,
    class: String,
    children: Vec<UiNode>,
}

impl ContainerBuilder {
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn child(mut self, child: UiNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn build(self) -> UiNode {
        UiNode::Container {
            id: self.id,
            class: self.class,
            children: self.children,
        }
    }
}

/// Static page layout plus the selection its controls start at
#[derive(Clone, Debug, Serialize)]
pub struct Layout {
    pub title: String,
    pub root: UiNode,
    pub initial: Selection,
    pub catalog: Catalog,
}

impl Layout {
    pub fn find(&self, id: &str) -> Option<&UiNode> {
        self.root.find(id)
    }
}

/// Build the page layout for a dataset
///
/// Dropdown options come from the distinct values of the whole dataset:
/// regions sorted, types in first-seen order. The date range spans the
/// earliest to the latest date. Called once at startup; later updates only
/// replace chart contents.
///
/// # Errors
/// * `EmptyDataset` if there are no records to derive controls from
pub fn build_layout(dataset: &Dataset) -> Result<Layout> {
    let catalog = dataset.catalog().clone();
    let initial = catalog.default_selection().ok_or(DashboardError::EmptyDataset)?;
    let (min_date, max_date) = catalog.date_span.ok_or(DashboardError::EmptyDataset)?;

    let region_options = catalog
        .regions
        .iter()
        .map(|region| DropdownOption {
            label: region.clone(),
            value: region.clone(),
        })
        .collect();

    let type_options = catalog
        .types
        .iter()
        .map(|kind| DropdownOption {
            label: capitalize(kind.as_str()),
            value: kind.to_string(),
        })
        .collect();

    let header = UiNode::container("header")
        .child(UiNode::text(TextTag::P, "header-emoji", "\u{1F951}"))
        .child(UiNode::text(TextTag::H1, "header-title", HEADER_TITLE))
        .child(UiNode::text(TextTag::P, "header-description", HEADER_DESCRIPTION))
        .build();

    let menu = UiNode::container("menu")
        .child(
            UiNode::container("menu-item")
                .child(UiNode::text(TextTag::Label, "menu-title", "Region"))
                .child(UiNode::Dropdown {
                    id: REGION_FILTER_ID.to_string(),
                    options: region_options,
                    value: initial.region.clone(),
                    clearable: false,
                })
                .build(),
        )
        .child(
            UiNode::container("menu-item")
                .child(UiNode::text(TextTag::Label, "menu-title", "Type"))
                .child(UiNode::Dropdown {
                    id: TYPE_FILTER_ID.to_string(),
                    options: type_options,
                    value: initial.kind.to_string(),
                    clearable: false,
                })
                .build(),
        )
        .child(
            UiNode::container("menu-item")
                .child(UiNode::text(TextTag::Label, "menu-title", "Date Range"))
                .child(UiNode::DateRange {
                    id: DATE_RANGE_ID.to_string(),
                    min_date,
                    max_date,
                    start_date: initial.start_date,
                    end_date: initial.end_date,
                })
                .build(),
        )
        .build();

    let charts = UiNode::container("wrapper")
        .child(chart_card(ChartKind::Price))
        .child(chart_card(ChartKind::Volume))
        .build();

    let root = UiNode::container("dashboard")
        .child(header)
        .child(menu)
        .child(charts)
        .build();

    Ok(Layout {
        title: PAGE_TITLE.to_string(),
        root,
        initial,
        catalog,
    })
}

fn chart_card(kind: ChartKind) -> UiNode {
    UiNode::container("card")
        .child(UiNode::Chart {
            id: kind.id().to_string(),
            kind,
            title: kind.title().to_string(),
        })
        .build()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render the layout as a complete HTML document
///
/// Chart placeholders become `<img>` elements pointing at the PNG endpoint;
/// the bundled script posts control changes to `/api/update` and refreshes
/// them.
pub fn render_html(layout: &Layout) -> String {
    let mut body = String::new();
    render_node(&layout.root, &mut body);

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\
         <div id=\"status\" class=\"status\" role=\"alert\"></div>\n\
         <script data-price=\"{}\" data-volume=\"{}\">{}</script>\n</body>\n</html>\n",
        escape(&layout.title),
        include_str!("./static/dashboard.css"),
        body,
        PRICE_CHART_ID,
        VOLUME_CHART_ID,
        include_str!("./static/dashboard.js"),
    )
}

fn render_node(node: &UiNode, out: &mut String) {
    // write! into a String cannot fail
    match node {
        UiNode::Container { id, class, children } => {
            let _ = write!(out, "<div class=\"{}\"", escape(class));
            if let Some(id) = id {
                let _ = write!(out, " id=\"{}\"", escape(id));
            }
            out.push_str(">\n");
            for child in children {
                render_node(child, out);
            }
            out.push_str("</div>\n");
        }
        UiNode::Text { tag, class, content } => {
            let _ = writeln!(
                out,
                "<{tag} class=\"{}\">{}</{tag}>",
                escape(class),
                escape(content),
                tag = tag.as_str()
            );
        }
        UiNode::Dropdown { id, options, value, .. } => {
            let _ = writeln!(out, "<select id=\"{}\" class=\"dropdown\" name=\"{}\">", escape(id), escape(id));
            for option in options {
                let selected = if &option.value == value { " selected" } else { "" };
                let _ = writeln!(
                    out,
                    "<option value=\"{}\"{}>{}</option>",
                    escape(&option.value),
                    selected,
                    escape(&option.label)
                );
            }
            out.push_str("</select>\n");
        }
        UiNode::DateRange {
            id,
            min_date,
            max_date,
            start_date,
            end_date,
        } => {
            let _ = writeln!(out, "<div id=\"{}\" class=\"date-range\">", escape(id));
            for (name, value) in [("start_date", start_date), ("end_date", end_date)] {
                let _ = writeln!(
                    out,
                    "<input type=\"date\" name=\"{}\" min=\"{}\" max=\"{}\" value=\"{}\">",
                    name, min_date, max_date, value
                );
            }
            out.push_str("</div>\n");
        }
        UiNode::Chart { id, kind, title } => {
            let _ = writeln!(
                out,
                "<figure class=\"chart\"><figcaption>{}</figcaption>\
                 <img id=\"{}\" src=\"/api/chart/{}\" alt=\"{}\"></figure>",
                escape(title),
                escape(id),
                match kind {
                    ChartKind::Price => "price",
                    ChartKind::Volume => "volume",
                },
                escape(title)
            );
        }
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
