//! Rule Tables
//!
//! Immutable value sets recognised by the OpenBB Workspace widget schema.
//! Everything here is built once and only ever read.

use lazy_static::lazy_static;
use regex::Regex;

/// Width of the dashboard grid in grid units.
pub const GRID_COLUMNS: i64 = 40;

/// Bounds for `gridData.w` (inclusive).
pub const WIDGET_WIDTH_RANGE: (i64, i64) = (10, 40);

/// Bounds for `gridData.h` (inclusive).
pub const WIDGET_HEIGHT_RANGE: (i64, i64) = (4, 100);

pub const WIDGET_TYPES: &[&str] = &[
    "table",
    "chart",
    "metric",
    "markdown",
    "newsfeed",
    "html",
    "pdf",
    "advanced_charting",
    "live_grid",
    "omni",
];

pub const PARAM_TYPES: &[&str] = &["text", "number", "boolean", "date", "endpoint"];

pub const CELL_DATA_TYPES: &[&str] = &["text", "number", "boolean", "date", "dateString", "object"];

pub const CHART_DATA_TYPES: &[&str] = &["category", "series", "time", "excluded"];

pub const SPARKLINE_TYPES: &[&str] = &["line", "area", "bar"];

pub const FORMATTER_FNS: &[&str] = &[
    "int",
    "none",
    "percent",
    "normalized",
    "normalizedPercent",
    "dateToYear",
];

pub const RENDER_FNS: &[&str] = &[
    "greenRed",
    "titleCase",
    "hoverCard",
    "cellOnClick",
    "columnColor",
    "showCellChange",
];

pub const GROUP_TYPES: &[&str] = &["param", "endpointParam"];

/// Fields every app entry must carry, in the order they are reported.
pub const APP_REQUIRED_FIELDS: &[&str] = &[
    "name",
    "description",
    "allowCustomization",
    "tabs",
    "groups",
    "prompts",
];

pub const GROUP_NAME_PATTERN: &str = r"^Group [1-9][0-9]*$";

lazy_static! {
    static ref GROUP_NAME: Regex = Regex::new(GROUP_NAME_PATTERN).unwrap();
}

/// The Workspace silently ignores groups whose name is not `Group <n>`.
pub fn is_valid_group_name(name: &str) -> bool {
    GROUP_NAME.is_match(name)
}

/// Render a value set the way issue messages quote it: `a, b, c`.
pub fn describe(values: &[&str]) -> String {
    values.join(", ")
}
