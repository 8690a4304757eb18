//! apps.json Validation
//!
//! The apps document is an array of dashboard apps. Each app lays widgets out
//! on tabs and wires parameter groups between them, so most of the checks
//! here cross-reference the widget catalogue built from widgets.json.

use super::DocumentValidator;
use super::extract::{FieldReader, index, join};
use super::layout::{Rect, overlapping_pairs};
use super::widgets::WidgetIndex;
use crate::document::type_name;
use crate::issue::{IssueKind, Issues, Source};
use crate::rules::{
    APP_REQUIRED_FIELDS, GRID_COLUMNS, GROUP_NAME_PATTERN, GROUP_TYPES, is_valid_group_name,
};

use serde_json::Value;
use std::collections::BTreeSet;

/// Checker for the apps document.
///
/// Cross-document references are resolved against the [`WidgetIndex`] given
/// at construction. Without one (widgets.json unusable) those checks are
/// skipped rather than reported as dangling.
#[derive(Debug, Default)]
pub struct AppsValidator<'a> {
    widgets: Option<&'a WidgetIndex>,
}

impl<'a> AppsValidator<'a> {
    pub fn new(widgets: &'a WidgetIndex) -> Self {
        Self {
            widgets: Some(widgets),
        }
    }

    pub fn without_references() -> Self {
        Self { widgets: None }
    }

    fn check_app(&self, id: &str, app: &Value, issues: &mut Issues) {
        let Some(obj) = app.as_object() else {
            issues.push(
                id,
                "",
                IssueKind::ShapeError,
                format!("app must be an object, got {}", type_name(app)),
            );
            return;
        };
        let reader = FieldReader::new(obj, id, "");

        for key in APP_REQUIRED_FIELDS {
            if !reader.has(key) {
                reader.missing(issues, key);
            }
        }
        if reader.has("name") {
            reader.required_non_empty_str(issues, "name");
        }
        reader.optional_str(issues, "description");
        if reader.has("allowCustomization") {
            reader.required_bool(issues, "allowCustomization");
        }
        for key in ["img", "img_dark", "img_light"] {
            reader.optional_str(issues, key);
        }

        let mut scope = AppScope {
            id,
            groups: defined_groups(&reader),
            reported_names: BTreeSet::new(),
        };

        self.check_tabs(&reader, &mut scope, issues);
        self.check_groups(&reader, &mut scope, issues);
        check_prompts(&reader, issues);
    }

    fn check_tabs(&self, app: &FieldReader, scope: &mut AppScope, issues: &mut Issues) {
        let Some(tabs) = app.get("tabs") else {
            return;
        };

        let entries: Vec<(String, &Value)> = match tabs {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, tab)| (index("tabs", i), tab))
                .collect(),
            Value::Object(map) => map
                .iter()
                .map(|(key, tab)| (join("tabs", key), tab))
                .collect(),
            other => {
                issues.push(
                    scope.id,
                    "tabs",
                    IssueKind::ShapeError,
                    format!("'tabs' must be an array, got {}", type_name(other)),
                );
                return;
            }
        };

        if entries.is_empty() {
            issues.push(
                scope.id,
                "tabs",
                IssueKind::MissingFieldError,
                "'tabs' must contain at least one tab",
            );
            return;
        }

        for (path, tab) in entries {
            self.check_tab(&path, tab, scope, issues);
        }
    }

    fn check_tab(&self, path: &str, tab: &Value, scope: &mut AppScope, issues: &mut Issues) {
        let Some(obj) = tab.as_object() else {
            issues.push(
                scope.id,
                path,
                IssueKind::ShapeError,
                format!("tab must be an object, got {}", type_name(tab)),
            );
            return;
        };
        let reader = FieldReader::new(obj, scope.id, path);

        let tab_id = reader.required_str(issues, "id").unwrap_or(path);
        reader.required_str(issues, "name");
        let Some(layout) = reader.required_array(issues, "layout") else {
            return;
        };

        let layout_path = reader.field("layout");
        let mut placed: Vec<(&str, Rect)> = Vec::with_capacity(layout.len());
        for (i, item) in layout.iter().enumerate() {
            let item_path = index(&layout_path, i);
            if let Some(rect) = self.check_layout_item(&item_path, item, scope, issues) {
                placed.push(rect);
            }
        }

        let rects: Vec<Rect> = placed.iter().map(|(_, rect)| *rect).collect();
        for (a, b) in overlapping_pairs(&rects) {
            let (widget_a, widget_b) = (placed[a].0, placed[b].0);
            issues.push(
                scope.id,
                layout_path.as_str(),
                IssueKind::LayoutOverlapError,
                format!("widgets '{widget_a}' and '{widget_b}' overlap in tab '{tab_id}'"),
            );
        }
    }

    /// Returns the placed rectangle when the item has a widget ID and four
    /// integer coordinates.
    fn check_layout_item<'v>(
        &self,
        path: &str,
        item: &'v Value,
        scope: &mut AppScope,
        issues: &mut Issues,
    ) -> Option<(&'v str, Rect)> {
        let Some(obj) = item.as_object() else {
            issues.push(
                scope.id,
                path,
                IssueKind::ShapeError,
                format!("layout item must be an object, got {}", type_name(item)),
            );
            return None;
        };
        let reader = FieldReader::new(obj, scope.id, path);

        let widget_id = obj
            .get("i")
            .and_then(Value::as_str)
            .filter(|id| !id.trim().is_empty());
        match widget_id {
            Some(widget_id) => {
                self.check_widget_reference(&reader.field("i"), widget_id, scope, issues)
            }
            None => {
                reader.required_non_empty_str(issues, "i");
            }
        }

        let x = reader.required_integer(issues, "x");
        let y = reader.required_integer(issues, "y");
        let w = reader.required_integer(issues, "w");
        let h = reader.required_integer(issues, "h");
        check_placement(&reader, x, y, w, h, issues);

        if let Some(state) = reader.optional_object(issues, "state") {
            let state_path = reader.field("state");
            let state = FieldReader::new(state, scope.id, &state_path);
            for key in ["params", "chartView", "columnState"] {
                state.optional_object(issues, key);
            }
        }

        if let Some(groups) = reader.optional_array(issues, "groups") {
            let groups_path = reader.field("groups");
            for (i, group) in groups.iter().enumerate() {
                let group_path = index(&groups_path, i);
                let Some(name) = group.as_str() else {
                    issues.push(
                        scope.id,
                        group_path,
                        IssueKind::ShapeError,
                        format!("group reference must be a string, got {}", type_name(group)),
                    );
                    continue;
                };
                if !scope.check_group_name(&group_path, name, issues) {
                    continue;
                }
                if !scope.groups.contains(name) {
                    issues.push(
                        scope.id,
                        group_path,
                        IssueKind::GroupReferenceError,
                        format!("layout item references group '{name}' which the app does not define"),
                    );
                }
            }
        }

        Some((widget_id?, Rect::new(x?, y?, w?, h?)))
    }

    fn check_widget_reference(&self, field: &str, widget_id: &str, scope: &AppScope, issues: &mut Issues) {
        let Some(widgets) = self.widgets else {
            return;
        };
        if !widgets.contains(widget_id) {
            issues.push(
                scope.id,
                field,
                IssueKind::ReferenceError,
                format!("widget '{widget_id}' not found in widgets.json"),
            );
        }
    }

    fn check_groups(&self, app: &FieldReader, scope: &mut AppScope, issues: &mut Issues) {
        let Some(groups) = app.get("groups") else {
            return;
        };

        let entries: Vec<(String, Option<&str>, &Value)> = match groups {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, group)| (index("groups", i), None, group))
                .collect(),
            Value::Object(map) => map
                .iter()
                .map(|(name, group)| (join("groups", name), Some(name.as_str()), group))
                .collect(),
            other => {
                issues.push(
                    scope.id,
                    "groups",
                    IssueKind::ShapeError,
                    format!("'groups' must be an array, got {}", type_name(other)),
                );
                return;
            }
        };

        let mut seen = BTreeSet::new();
        for (path, key, group) in entries {
            let Some(obj) = group.as_object() else {
                issues.push(
                    scope.id,
                    path,
                    IssueKind::ShapeError,
                    format!("group must be an object, got {}", type_name(group)),
                );
                continue;
            };
            let reader = FieldReader::new(obj, scope.id, &path);

            let name = match key {
                Some(name) => Some(name),
                None => reader.required_non_empty_str(issues, "name"),
            };
            if let Some(name) = name {
                let name_field = if key.is_some() { path.clone() } else { reader.field("name") };
                if scope.check_group_name(&name_field, name, issues)
                    && !seen.insert(name.to_string())
                {
                    issues.push(
                        scope.id,
                        name_field,
                        IssueKind::DuplicateError,
                        format!("group '{name}' is defined more than once"),
                    );
                }
            }

            let group_type = match reader.get("type") {
                None => {
                    reader.missing(issues, "type");
                    None
                }
                Some(_) => reader.enum_member(issues, "type", GROUP_TYPES, "group type"),
            };
            let param_name = reader.required_str(issues, "paramName");
            let default = reader.get("defaultValue");
            if default.is_none() {
                reader.missing(issues, "defaultValue");
            }

            if group_type == Some("param") {
                self.check_param_group(&reader, param_name, default, issues);
            }
        }
    }

    /// `param` groups list their members in `widgetIds`; the shared default
    /// must be a valid option on every member that declares static options.
    fn check_param_group(
        &self,
        group: &FieldReader,
        param_name: Option<&str>,
        default: Option<&Value>,
        issues: &mut Issues,
    ) {
        let Some(widget_ids) = group.required_array(issues, "widgetIds") else {
            return;
        };
        if widget_ids.is_empty() {
            issues.push(
                group.id(),
                group.field("widgetIds"),
                IssueKind::MissingFieldError,
                "'param' groups require at least one entry in 'widgetIds'",
            );
            return;
        }

        let ids_path = group.field("widgetIds");
        for (i, widget_id) in widget_ids.iter().enumerate() {
            let field = index(&ids_path, i);
            let Some(widget_id) = widget_id.as_str() else {
                issues.push(
                    group.id(),
                    field,
                    IssueKind::ShapeError,
                    format!("widget ID must be a string, got {}", type_name(widget_id)),
                );
                continue;
            };
            let Some(widgets) = self.widgets else {
                continue;
            };
            if !widgets.contains(widget_id) {
                issues.push(
                    group.id(),
                    field,
                    IssueKind::ReferenceError,
                    format!("widget '{widget_id}' not found in widgets.json"),
                );
                continue;
            }

            let (Some(param_name), Some(default)) = (param_name, default) else {
                continue;
            };
            if let Some(options) = widgets.param_options(widget_id, param_name) {
                if !options.is_empty() && !options.contains(default) {
                    issues.push(
                        group.id(),
                        group.field("defaultValue"),
                        IssueKind::EnumError,
                        format!(
                            "default {default} is not an option of '{param_name}' on widget '{widget_id}'"
                        ),
                    );
                }
            }
        }
    }
}

impl DocumentValidator for AppsValidator<'_> {
    fn source(&self) -> Source {
        Source::Apps
    }

    fn check(&self, document: &Value, issues: &mut Issues) {
        let apps = match document {
            Value::Array(apps) => apps,
            Value::Object(_) => {
                issues.push(
                    "",
                    "",
                    IssueKind::ShapeError,
                    "apps document must be an array of app objects, not an object",
                );
                return;
            }
            other => {
                issues.push(
                    "",
                    "",
                    IssueKind::ShapeError,
                    format!(
                        "apps document must be an array of app objects, got {}",
                        type_name(other)
                    ),
                );
                return;
            }
        };

        if apps.is_empty() {
            tracing::warn!("apps document defines no apps");
        }
        if self.widgets.is_none() {
            tracing::warn!("no widget catalogue available, skipping widget reference checks");
        }

        for (i, app) in apps.iter().enumerate() {
            self.check_app(&format!("app[{i}]"), app, issues);
        }
    }
}

/// Per-app state shared by the tab and group checks.
struct AppScope<'a> {
    id: &'a str,
    groups: BTreeSet<&'a str>,
    reported_names: BTreeSet<String>,
}

impl AppScope<'_> {
    /// Report a badly named group once per app. Returns whether the name is valid.
    fn check_group_name(&mut self, field: &str, name: &str, issues: &mut Issues) -> bool {
        if is_valid_group_name(name) {
            return true;
        }
        if self.reported_names.insert(name.to_string()) {
            issues.push(
                self.id,
                field,
                IssueKind::GroupNameError,
                format!(
                    "group name '{name}' must match '{GROUP_NAME_PATTERN}' (e.g. 'Group 1'); the Workspace ignores other names"
                ),
            );
        }
        false
    }
}

/// Names of the groups an app defines, in either representation.
fn defined_groups<'a>(app: &FieldReader<'a>) -> BTreeSet<&'a str> {
    match app.get("groups") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|group| group.get("name").and_then(Value::as_str))
            .collect(),
        Some(Value::Object(map)) => map.keys().map(String::as_str).collect(),
        _ => BTreeSet::new(),
    }
}

fn check_placement(
    item: &FieldReader,
    x: Option<i64>,
    y: Option<i64>,
    w: Option<i64>,
    h: Option<i64>,
    issues: &mut Issues,
) {
    let mut out_of_range = |key: &str, message: String| {
        issues.push(item.id(), item.field(key), IssueKind::RangeError, message);
    };

    if let Some(x) = x.filter(|x| *x < 0) {
        out_of_range("x", format!("x cannot be negative (got {x})"));
    }
    if let Some(y) = y.filter(|y| *y < 0) {
        out_of_range("y", format!("y cannot be negative (got {y})"));
    }
    if let Some(w) = w.filter(|w| *w <= 0) {
        out_of_range("w", format!("w must be positive (got {w})"));
    }
    if let Some(h) = h.filter(|h| *h <= 0) {
        out_of_range("h", format!("h must be positive (got {h})"));
    }
    if let (Some(x), Some(w)) = (x, w) {
        let right = x.saturating_add(w);
        if right > GRID_COLUMNS {
            out_of_range(
                "w",
                format!("widget extends beyond the grid (x={x} + w={w} = {right} > {GRID_COLUMNS})"),
            );
        }
    }
}

fn check_prompts(app: &FieldReader, issues: &mut Issues) {
    let Some(prompts) = app.get("prompts") else {
        return;
    };
    let Some(prompts) = prompts.as_array() else {
        issues.push(
            app.id(),
            "prompts",
            IssueKind::ShapeError,
            format!("'prompts' must be an array, got {}", type_name(prompts)),
        );
        return;
    };

    for (i, prompt) in prompts.iter().enumerate() {
        if !prompt.is_string() {
            issues.push(
                app.id(),
                index("prompts", i),
                IssueKind::ShapeError,
                format!("prompt must be a string, got {}", type_name(prompt)),
            );
        }
    }
}

/// Number of tab layouts in an apps document, for the report header.
pub fn layout_count(document: &Value) -> usize {
    let Some(apps) = document.as_array() else {
        return 0;
    };
    apps.iter()
        .filter_map(|app| app.get("tabs"))
        .map(|tabs| match tabs {
            Value::Array(items) => items.iter().filter(|t| t.get("layout").is_some()).count(),
            Value::Object(map) => map.values().filter(|t| t.get("layout").is_some()).count(),
            _ => 0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::ValidationIssue;
    use serde_json::json;

    fn catalogue() -> WidgetIndex {
        WidgetIndex::from_document(&json!({
            "w1": {},
            "w2": {},
            "chart": {
                "params": [{"paramName": "symbol", "type": "text", "value": "AAPL",
                            "options": [{"value": "AAPL"}, {"value": "MSFT"}]}]
            }
        }))
        .unwrap()
    }

    fn app_with(layout: Value, groups: Value) -> Value {
        json!([{
            "name": "A",
            "description": "d",
            "allowCustomization": true,
            "tabs": [{"id": "t1", "name": "Tab1", "layout": layout}],
            "groups": groups,
            "prompts": []
        }])
    }

    fn validate(document: Value) -> Vec<ValidationIssue> {
        let widgets = catalogue();
        AppsValidator::new(&widgets).validate(&document)
    }

    fn kinds(issues: &[ValidationIssue]) -> Vec<IssueKind> {
        issues.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn minimal_app_passes() {
        let issues = validate(app_with(json!([{"i": "w1", "x": 0, "y": 0, "w": 40, "h": 4}]), json!([])));
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn object_document_is_a_single_shape_error() {
        let issues = validate(json!({"name": "A", "tabs": {}}));
        assert_eq!(kinds(&issues), vec![IssueKind::ShapeError]);
        assert!(issues[0].message.contains("not an object"));
    }

    #[test]
    fn each_missing_app_field_is_reported() {
        let issues = validate(json!([{"tabs": [{"id": "t", "name": "T", "layout": []}]}]));
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["name", "description", "allowCustomization", "groups", "prompts"]
        );
        assert!(issues.iter().all(|i| i.kind == IssueKind::MissingFieldError && i.id == "app[0]"));
    }

    #[test]
    fn tabs_need_id_name_and_layout() {
        let mut doc = app_with(json!([]), json!([]));
        doc[0]["tabs"] = json!([{}]);
        let issues = validate(doc);
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["tabs[0].id", "tabs[0].name", "tabs[0].layout"]);
    }

    #[test]
    fn empty_tabs_are_reported() {
        let mut doc = app_with(json!([]), json!([]));
        doc[0]["tabs"] = json!([]);
        let issues = validate(doc);
        assert_eq!(kinds(&issues), vec![IssueKind::MissingFieldError]);
        assert_eq!(issues[0].field, "tabs");
    }

    #[test]
    fn keyed_tabs_are_accepted() {
        let mut doc = app_with(json!([]), json!([]));
        doc[0]["tabs"] = json!({
            "overview": {"id": "overview", "name": "Overview",
                         "layout": [{"i": "w1", "x": 0, "y": 0, "w": 20, "h": 10}]}
        });
        assert!(validate(doc).is_empty());
    }

    #[test]
    fn dangling_widget_reference_is_reported_once() {
        let issues = validate(app_with(
            json!([{"i": "nonexistent_widget", "x": 0, "y": 0, "w": 20, "h": 10}]),
            json!([]),
        ));
        assert_eq!(kinds(&issues), vec![IssueKind::ReferenceError]);
        assert!(issues[0].message.contains("'nonexistent_widget'"));
        assert_eq!(issues[0].field, "tabs[0].layout[0].i");
    }

    #[test]
    fn references_are_skipped_without_a_catalogue() {
        let doc = app_with(
            json!([{"i": "nonexistent_widget", "x": 0, "y": 0, "w": 20, "h": 10}]),
            json!([]),
        );
        assert!(AppsValidator::without_references().validate(&doc).is_empty());
    }

    #[test]
    fn overlapping_widgets_are_reported() {
        let issues = validate(app_with(
            json!([
                {"i": "w1", "x": 0, "y": 0, "w": 40, "h": 4},
                {"i": "w2", "x": 0, "y": 0, "w": 20, "h": 15}
            ]),
            json!([]),
        ));
        assert_eq!(kinds(&issues), vec![IssueKind::LayoutOverlapError]);
        assert_eq!(
            issues[0].message,
            "widgets 'w1' and 'w2' overlap in tab 't1'"
        );
    }

    #[test]
    fn adjacent_widgets_do_not_overlap() {
        let issues = validate(app_with(
            json!([
                {"i": "w1", "x": 0, "y": 4, "w": 20, "h": 15},
                {"i": "w2", "x": 20, "y": 4, "w": 20, "h": 15}
            ]),
            json!([]),
        ));
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn placement_bounds_are_enforced() {
        let issues = validate(app_with(
            json!([
                {"i": "w1", "x": 30, "y": -1, "w": 20, "h": 4},
                {"i": "w2", "x": 0, "y": 10, "w": 0, "h": 4.5}
            ]),
            json!([]),
        ));
        let found: Vec<(IssueKind, &str)> = issues.iter().map(|i| (i.kind, i.field.as_str())).collect();
        assert_eq!(
            found,
            vec![
                (IssueKind::RangeError, "tabs[0].layout[0].y"),
                (IssueKind::RangeError, "tabs[0].layout[0].w"),
                (IssueKind::ShapeError, "tabs[0].layout[1].h"),
                (IssueKind::RangeError, "tabs[0].layout[1].w"),
            ]
        );
    }

    #[test]
    fn badly_named_groups_are_reported_once_each() {
        for bad in ["symbol-group", "Group", "group 1"] {
            let issues = validate(app_with(
                json!([{"i": "chart", "x": 0, "y": 0, "w": 20, "h": 10, "groups": [bad]}]),
                json!([{"name": bad, "type": "endpointParam", "paramName": "symbol", "defaultValue": "AAPL"}]),
            ));
            assert_eq!(kinds(&issues), vec![IssueKind::GroupNameError], "{bad}");
            assert!(issues[0].message.contains(bad));
        }
    }

    #[test]
    fn numbered_groups_pass() {
        let issues = validate(app_with(
            json!([
                {"i": "chart", "x": 0, "y": 0, "w": 20, "h": 10, "groups": ["Group 1"]},
                {"i": "w1", "x": 20, "y": 0, "w": 20, "h": 10, "groups": ["Group 12"]}
            ]),
            json!([
                {"name": "Group 1", "type": "endpointParam", "paramName": "symbol", "defaultValue": "AAPL"},
                {"name": "Group 12", "type": "endpointParam", "paramName": "period", "defaultValue": "1y"}
            ]),
        ));
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn layout_groups_must_be_defined() {
        let issues = validate(app_with(
            json!([{"i": "w1", "x": 0, "y": 0, "w": 20, "h": 10, "groups": ["Group 2"]}]),
            json!([]),
        ));
        assert_eq!(kinds(&issues), vec![IssueKind::GroupReferenceError]);
        assert!(issues[0].message.contains("'Group 2'"));
    }

    #[test]
    fn keyed_groups_are_named_by_key() {
        let issues = validate(app_with(
            json!([{"i": "w1", "x": 0, "y": 0, "w": 20, "h": 10, "groups": ["Group 1"]}]),
            json!({
                "Group 1": {"type": "endpointParam", "paramName": "symbol", "defaultValue": "AAPL"},
                "tickers": {"type": "endpointParam", "paramName": "symbol", "defaultValue": "AAPL"}
            }),
        ));
        assert_eq!(kinds(&issues), vec![IssueKind::GroupNameError]);
        assert_eq!(issues[0].field, "groups.tickers");
    }

    #[test]
    fn param_groups_check_members_and_default() {
        let issues = validate(app_with(
            json!([{"i": "chart", "x": 0, "y": 0, "w": 20, "h": 10}]),
            json!([
                {"name": "Group 1", "type": "param", "paramName": "symbol", "defaultValue": "AAPL",
                 "widgetIds": ["chart", "w1"]},
                {"name": "Group 2", "type": "param", "paramName": "symbol", "defaultValue": "TSLA",
                 "widgetIds": ["chart", "ghost"]},
                {"name": "Group 3", "type": "param", "paramName": "symbol", "defaultValue": "AAPL",
                 "widgetIds": []},
                {"name": "Group 4", "type": "sync", "paramName": "symbol"}
            ]),
        ));
        let found: Vec<(IssueKind, &str)> = issues.iter().map(|i| (i.kind, i.field.as_str())).collect();
        assert_eq!(
            found,
            vec![
                (IssueKind::EnumError, "groups[1].defaultValue"),
                (IssueKind::ReferenceError, "groups[1].widgetIds[1]"),
                (IssueKind::MissingFieldError, "groups[2].widgetIds"),
                (IssueKind::EnumError, "groups[3].type"),
                (IssueKind::MissingFieldError, "groups[3].defaultValue"),
            ]
        );
    }

    #[test]
    fn duplicate_group_definitions_are_reported() {
        let group = json!({"name": "Group 1", "type": "endpointParam", "paramName": "s", "defaultValue": "x"});
        let issues = validate(app_with(json!([]), json!([group.clone(), group])));
        assert_eq!(kinds(&issues), vec![IssueKind::DuplicateError]);
    }

    #[test]
    fn prompts_and_state_are_shape_checked() {
        let mut doc = app_with(
            json!([{"i": "w1", "x": 0, "y": 0, "w": 20, "h": 10, "state": {"params": []}}]),
            json!([]),
        );
        doc[0]["prompts"] = json!(["What moved today?", 42]);
        let issues = validate(doc);
        let found: Vec<(IssueKind, &str)> = issues.iter().map(|i| (i.kind, i.field.as_str())).collect();
        assert_eq!(
            found,
            vec![
                (IssueKind::ShapeError, "tabs[0].layout[0].state.params"),
                (IssueKind::ShapeError, "prompts[1]"),
            ]
        );
    }

    #[test]
    fn layouts_are_counted_across_apps() {
        let mut doc = app_with(json!([]), json!([]));
        doc.as_array_mut().unwrap().push(json!({
            "tabs": {"a": {"layout": []}, "b": {"layout": []}, "c": {}}
        }));
        assert_eq!(layout_count(&doc), 3);
        assert_eq!(layout_count(&json!({})), 0);
    }
}
