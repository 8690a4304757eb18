//! widgets.json Validation
//!
//! The widgets document is an object keyed by widget ID. Every widget is
//! checked independently and every finding is collected; nothing here stops
//! at the first problem.

use super::DocumentValidator;
use super::extract::{FieldReader, flatten_params, index, join};
use crate::document::type_name;
use crate::issue::{IssueKind, Issues, Source};
use crate::rules::{
    CELL_DATA_TYPES, CHART_DATA_TYPES, FORMATTER_FNS, PARAM_TYPES, RENDER_FNS, SPARKLINE_TYPES,
    WIDGET_HEIGHT_RANGE, WIDGET_TYPES, WIDGET_WIDTH_RANGE, describe,
};

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Catalogue of the widgets defined by a widgets document.
///
/// This is what the apps checker cross-references: the set of widget IDs,
/// plus the static option values of each widget's parameters so that group
/// defaults can be checked against them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WidgetIndex {
    widgets: BTreeMap<String, BTreeMap<String, Vec<Value>>>,
}

impl WidgetIndex {
    /// Build the catalogue from a parsed widgets document. Returns `None`
    /// when the document is not an object keyed by widget ID.
    pub fn from_document(document: &Value) -> Option<Self> {
        let widgets = document.as_object()?;
        let mut index = Self::default();

        for (id, widget) in widgets {
            let mut params = BTreeMap::new();
            let declared = widget
                .get("params")
                .and_then(Value::as_array)
                .map(|p| flatten_params(p))
                .unwrap_or_default();

            for param in declared {
                let (Some(name), Some(options)) = (
                    param.get("paramName").and_then(Value::as_str),
                    param.get("options").and_then(Value::as_array),
                ) else {
                    continue;
                };
                let values = options
                    .iter()
                    .filter_map(|opt| opt.get("value").cloned())
                    .collect();
                params.insert(name.to_string(), values);
            }

            index.widgets.insert(id.clone(), params);
        }

        Some(index)
    }

    /// Catalogue from bare IDs, with no parameter options.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            widgets: ids
                .into_iter()
                .map(|id| (id.into(), BTreeMap::new()))
                .collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.widgets.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Static option values of `param` on `widget`, if it declares any.
    pub fn param_options(&self, widget: &str, param: &str) -> Option<&[Value]> {
        self.widgets
            .get(widget)
            .and_then(|params| params.get(param))
            .map(Vec::as_slice)
    }
}

/// Checker for the widgets document.
#[derive(Debug, Default)]
pub struct WidgetsValidator;

impl WidgetsValidator {
    pub fn new() -> Self {
        Self
    }

    fn check_widget(&self, id: &str, widget: &Value, issues: &mut Issues) {
        let Some(obj) = widget.as_object() else {
            issues.push(
                id,
                "",
                IssueKind::ShapeError,
                format!("widget definition must be an object, got {}", type_name(widget)),
            );
            return;
        };
        let reader = FieldReader::new(obj, id, "");

        reader.required_non_empty_str(issues, "name");
        let widget_type = match reader.get("type") {
            None => {
                reader.missing(issues, "type");
                None
            }
            Some(_) => reader.enum_member(issues, "type", WIDGET_TYPES, "widget type"),
        };
        reader.required_str(issues, "endpoint");

        if let Some(grid) = reader.optional_object(issues, "gridData") {
            check_grid_data(&FieldReader::new(grid, id, "gridData"), issues);
        }

        if let Some(params) = reader.optional_array(issues, "params") {
            check_params(id, params, issues);
        }

        check_columns(&reader, widget_type == Some("table"), issues);

        if let Some(refetch) = reader.get("refetchInterval") {
            if !matches!(refetch, Value::Number(_) | Value::Bool(false)) {
                issues.push(
                    id,
                    "refetchInterval",
                    IssueKind::ShapeError,
                    format!(
                        "'refetchInterval' must be a number or false, got {}",
                        type_name(refetch)
                    ),
                );
            }
        }

        if let Some(tool) = reader.optional_object(issues, "mcp_tool") {
            let tool = FieldReader::new(tool, id, "mcp_tool");
            for key in ["mcp_server", "tool_id"] {
                if !tool.has(key) {
                    tool.missing(issues, key);
                }
            }
        }
    }
}

impl DocumentValidator for WidgetsValidator {
    fn source(&self) -> Source {
        Source::Widgets
    }

    fn check(&self, document: &Value, issues: &mut Issues) {
        let widgets = match document {
            Value::Object(widgets) => widgets,
            Value::Array(_) => {
                issues.push(
                    "",
                    "",
                    IssueKind::ShapeError,
                    "widgets document must be an object keyed by widget ID, not an array",
                );
                return;
            }
            other => {
                issues.push(
                    "",
                    "",
                    IssueKind::ShapeError,
                    format!(
                        "widgets document must be an object keyed by widget ID, got {}",
                        type_name(other)
                    ),
                );
                return;
            }
        };

        if widgets.is_empty() {
            tracing::warn!("widgets document defines no widgets");
        }

        for (id, widget) in widgets {
            self.check_widget(id, widget, issues);
        }
    }
}

fn check_grid_data(grid: &FieldReader, issues: &mut Issues) {
    for (key, (min, max)) in [("w", WIDGET_WIDTH_RANGE), ("h", WIDGET_HEIGHT_RANGE)] {
        let Some(value) = grid.optional_integer(issues, key) else {
            continue;
        };
        if value < min || value > max {
            issues.push(
                grid.id(),
                grid.field(key),
                IssueKind::RangeError,
                format!("{}={value} is outside {min}..={max}", grid.field(key)),
            );
        }
    }

    for key in ["minW", "maxW", "minH", "maxH"] {
        grid.optional_integer(issues, key);
    }
}

fn check_params(id: &str, params: &[Value], issues: &mut Issues) {
    let mut seen = BTreeSet::new();

    for (i, param) in flatten_params(params).into_iter().enumerate() {
        let path = index("params", i);
        let Some(obj) = param.as_object() else {
            issues.push(
                id,
                path,
                IssueKind::ShapeError,
                format!("parameter must be an object, got {}", type_name(param)),
            );
            continue;
        };
        let reader = FieldReader::new(obj, id, &path);

        if let Some(name) = reader.required_str(issues, "paramName") {
            if !seen.insert(name.to_string()) {
                issues.push(
                    id,
                    reader.field("paramName"),
                    IssueKind::DuplicateError,
                    format!("duplicate paramName '{name}'"),
                );
            }
        }

        let param_type = match reader.get("type") {
            None => {
                reader.missing(issues, "type");
                None
            }
            Some(_) => reader.enum_member(issues, "type", PARAM_TYPES, "parameter type"),
        };

        if param_type == Some("endpoint") && !reader.has("optionsEndpoint") {
            reader.missing(issues, "optionsEndpoint");
        }

        if let Some(options) = reader.optional_array(issues, "options") {
            check_static_options(&reader, options, issues);
        }
    }
}

/// A static option list must be objects carrying `value`, and the parameter's
/// default has to be one of those values.
fn check_static_options(param: &FieldReader, options: &[Value], issues: &mut Issues) {
    let options_path = param.field("options");
    let mut values = Vec::with_capacity(options.len());

    for (i, option) in options.iter().enumerate() {
        let path = index(&options_path, i);
        match option.as_object() {
            Some(obj) => match obj.get("value") {
                Some(value) => values.push(value),
                None => issues.push(
                    param.id(),
                    join(&path, "value"),
                    IssueKind::MissingFieldError,
                    format!("missing required field '{}'", join(&path, "value")),
                ),
            },
            None => issues.push(
                param.id(),
                path,
                IssueKind::ShapeError,
                format!("option must be an object, got {}", type_name(option)),
            ),
        }
    }

    let (key, default) = match (param.get("value"), param.get("defaultValue")) {
        (Some(value), _) => ("value", value),
        (None, Some(value)) => ("defaultValue", value),
        (None, None) => {
            issues.push(
                param.id(),
                param.field("value"),
                IssueKind::MissingFieldError,
                "parameter with static options needs a default 'value'",
            );
            return;
        }
    };

    if !values.is_empty() && !values.contains(&default) {
        issues.push(
            param.id(),
            param.field(key),
            IssueKind::EnumError,
            format!("default {default} is not one of the parameter's option values"),
        );
    }
}

/// Columns live in `columns`, or in `data.columnsDefs` in the wire format.
fn locate_columns<'a>(
    widget: &FieldReader<'a>,
    issues: &mut Issues,
) -> Option<(String, &'a Value)> {
    if let Some(columns) = widget.get("columns") {
        return Some(("columns".to_string(), columns));
    }
    let data = widget.optional_object(issues, "data")?;
    data.get("columnsDefs")
        .map(|columns| ("data.columnsDefs".to_string(), columns))
}

fn check_columns(widget: &FieldReader, is_table: bool, issues: &mut Issues) {
    let id = widget.id();
    let located = locate_columns(widget, issues);

    let columns = match &located {
        None => None,
        Some((path, Value::Array(columns))) => Some((path.as_str(), columns)),
        Some((path, other)) => {
            issues.push(
                id,
                path.as_str(),
                IssueKind::ShapeError,
                format!("'{path}' must be an array, got {}", type_name(other)),
            );
            return;
        }
    };

    let Some((path, columns)) = columns.filter(|(_, c)| !c.is_empty()) else {
        if is_table {
            issues.push(
                id,
                "columns",
                IssueKind::MissingFieldError,
                "table widgets require a non-empty 'columns' list",
            );
        }
        return;
    };

    let mut fields = BTreeSet::new();
    for (i, column) in columns.iter().enumerate() {
        let column_path = index(path, i);
        match column.as_object() {
            Some(obj) => check_column(
                &FieldReader::new(obj, id, &column_path),
                &mut fields,
                issues,
            ),
            None => issues.push(
                id,
                column_path,
                IssueKind::ShapeError,
                format!("column must be an object, got {}", type_name(column)),
            ),
        }
    }
}

fn check_column(column: &FieldReader, fields: &mut BTreeSet<String>, issues: &mut Issues) {
    if let Some(field) = column.required_str(issues, "field") {
        if !fields.insert(field.to_string()) {
            issues.push(
                column.id(),
                column.field("field"),
                IssueKind::DuplicateError,
                format!("duplicate column field '{field}'"),
            );
        }
    }

    column.enum_member(issues, "cellDataType", CELL_DATA_TYPES, "cellDataType");
    column.enum_member(issues, "chartDataType", CHART_DATA_TYPES, "chartDataType");
    check_formatter(column, issues);
    check_render_fn(column, issues);
    check_sparkline(column, issues);
}

fn check_sparkline(column: &FieldReader, issues: &mut Issues) {
    let Some(sparkline) = column.optional_object(issues, "sparkline") else {
        return;
    };
    let path = column.field("sparkline");
    let reader = FieldReader::new(sparkline, column.id(), &path);
    reader.enum_member(issues, "type", SPARKLINE_TYPES, "sparkline type");
    reader.required_non_empty_str(issues, "dataField");
}

fn check_formatter(column: &FieldReader, issues: &mut Issues) {
    match column.optional_str(issues, "formatterFn") {
        Some("currency") => issues.push(
            column.id(),
            column.field("formatterFn"),
            IssueKind::EnumError,
            "formatterFn 'currency' is not supported; use 'none' and format the value in the endpoint",
        ),
        Some(_) => {
            column.enum_member(issues, "formatterFn", FORMATTER_FNS, "formatterFn");
        }
        None => {}
    }
}

fn check_render_fn(column: &FieldReader, issues: &mut Issues) {
    let Some(render) = column.get("renderFn") else {
        return;
    };

    let names: Vec<&Value> = match render {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };

    let mut click = false;
    for name in names {
        match name.as_str() {
            Some(fn_name) if RENDER_FNS.contains(&fn_name) => {
                click |= fn_name == "cellOnClick";
            }
            Some(fn_name) => issues.push(
                column.id(),
                column.field("renderFn"),
                IssueKind::EnumError,
                format!(
                    "invalid renderFn '{fn_name}'; valid: {}",
                    describe(RENDER_FNS)
                ),
            ),
            None => issues.push(
                column.id(),
                column.field("renderFn"),
                IssueKind::ShapeError,
                format!("'renderFn' must be a string, got {}", type_name(name)),
            ),
        }
    }

    if click {
        check_click_params(column, issues);
    }
}

fn check_click_params(column: &FieldReader, issues: &mut Issues) {
    if !column.has("renderFnParams") {
        column.missing(issues, "renderFnParams");
        return;
    }
    let Some(params) = column.optional_object(issues, "renderFnParams") else {
        return;
    };

    let path = column.field("renderFnParams");
    let reader = FieldReader::new(params, column.id(), &path);
    if reader.required_str(issues, "actionType") == Some("groupBy") {
        reader.required_str(issues, "groupByParamName");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::ValidationIssue;
    use serde_json::json;

    fn validate(document: Value) -> Vec<ValidationIssue> {
        WidgetsValidator::new().validate(&document)
    }

    fn kinds(issues: &[ValidationIssue]) -> Vec<IssueKind> {
        issues.iter().map(|i| i.kind).collect()
    }

    fn table(columns: Value) -> Value {
        json!({
            "w1": {
                "name": "W1",
                "type": "table",
                "endpoint": "/w1",
                "gridData": {"w": 40, "h": 4},
                "columns": columns
            }
        })
    }

    #[test]
    fn well_formed_table_passes() {
        let issues = validate(table(json!([{"field": "x", "cellDataType": "text"}])));
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn array_document_is_a_single_shape_error() {
        let issues = validate(json!([{"name": "W1", "type": "bogus"}]));
        assert_eq!(kinds(&issues), vec![IssueKind::ShapeError]);
        assert!(issues[0].message.contains("not an array"));
    }

    #[test]
    fn empty_document_is_valid() {
        assert!(validate(json!({})).is_empty());
    }

    #[test]
    fn required_fields_are_each_reported() {
        let issues = validate(json!({"w1": {}}));
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "type", "endpoint"]);
        assert!(
            issues
                .iter()
                .all(|i| i.kind == IssueKind::MissingFieldError && i.id == "w1")
        );
    }

    #[test]
    fn unknown_widget_type_is_an_enum_error() {
        let issues = validate(json!({"w1": {"name": "W1", "type": "grid", "endpoint": "/w1"}}));
        assert_eq!(kinds(&issues), vec![IssueKind::EnumError]);
        assert!(issues[0].message.contains("'grid'"));
    }

    #[test]
    fn grid_bounds_are_inclusive() {
        let mut doc = json!({});
        for (id, w, h) in [("lo", 10, 4), ("hi", 40, 100), ("narrow", 9, 4), ("tall", 20, 101)] {
            doc[id] = json!({
                "name": id, "type": "chart", "endpoint": "/c",
                "gridData": {"w": w, "h": h}
            });
        }

        let issues = validate(doc);
        assert_eq!(kinds(&issues), vec![IssueKind::RangeError, IssueKind::RangeError]);
        assert_eq!((issues[0].id.as_str(), issues[0].field.as_str()), ("narrow", "gridData.w"));
        assert_eq!((issues[1].id.as_str(), issues[1].field.as_str()), ("tall", "gridData.h"));
    }

    #[test]
    fn currency_formatter_is_flagged_once_with_a_hint() {
        let issues = validate(table(json!([
            {"field": "price", "cellDataType": "number", "formatterFn": "currency"}
        ])));
        assert_eq!(kinds(&issues), vec![IssueKind::EnumError]);
        assert!(issues[0].message.contains("'currency'"));
        assert!(issues[0].message.contains("'none'"));
        assert_eq!(issues[0].field, "columns[0].formatterFn");
    }

    #[test]
    fn chart_data_type_and_sparkline_are_checked() {
        let issues = validate(table(json!([
            {"field": "x", "cellDataType": "number", "chartDataType": "bogus",
             "sparkline": {"type": "pie"}},
            {"field": "y", "chartDataType": "series", "sparkline": {"type": "area", "dataField": "y"}},
            {"field": "z", "sparkline": "line"}
        ])));
        assert_eq!(
            kinds(&issues),
            vec![
                IssueKind::EnumError,
                IssueKind::EnumError,
                IssueKind::MissingFieldError,
                IssueKind::ShapeError,
            ]
        );
        assert_eq!(issues[0].field, "columns[0].chartDataType");
        assert!(issues[0].message.contains("excluded"));
        assert_eq!(issues[1].field, "columns[0].sparkline.type");
        assert_eq!(issues[2].field, "columns[0].sparkline.dataField");
        assert_eq!(issues[3].field, "columns[2].sparkline");
    }

    #[test]
    fn other_unknown_formatters_list_the_valid_set() {
        let issues = validate(table(json!([{"field": "x", "formatterFn": "money"}])));
        assert_eq!(kinds(&issues), vec![IssueKind::EnumError]);
        assert!(issues[0].message.contains("normalizedPercent"));
    }

    #[test]
    fn cell_on_click_group_by_needs_param_name() {
        let issues = validate(table(json!([
            {"field": "a", "renderFn": "cellOnClick"},
            {"field": "b", "renderFn": "cellOnClick", "renderFnParams": {}},
            {"field": "c", "renderFn": "cellOnClick", "renderFnParams": {"actionType": "groupBy"}},
            {"field": "d", "renderFn": "cellOnClick",
             "renderFnParams": {"actionType": "groupBy", "groupByParamName": "symbol"}},
            {"field": "e", "renderFn": ["greenRed", "sparkle"]}
        ])));

        let found: Vec<(IssueKind, &str)> = issues
            .iter()
            .map(|i| (i.kind, i.field.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                (IssueKind::MissingFieldError, "columns[0].renderFnParams"),
                (IssueKind::MissingFieldError, "columns[1].renderFnParams.actionType"),
                (IssueKind::MissingFieldError, "columns[2].renderFnParams.groupByParamName"),
                (IssueKind::EnumError, "columns[4].renderFn"),
            ]
        );
    }

    #[test]
    fn table_without_columns_is_reported() {
        let issues = validate(json!({
            "t1": {"name": "T", "type": "table", "endpoint": "/t"},
            "t2": {"name": "T", "type": "table", "endpoint": "/t", "columns": []},
            "c1": {"name": "C", "type": "chart", "endpoint": "/c"}
        }));
        let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
        assert!(issues.iter().all(|i| i.kind == IssueKind::MissingFieldError));
    }

    #[test]
    fn wire_format_column_defs_are_checked() {
        let issues = validate(json!({
            "t1": {
                "name": "T", "type": "table", "endpoint": "/t",
                "data": {"columnsDefs": [{"field": "x", "cellDataType": "money"}]}
            }
        }));
        assert_eq!(kinds(&issues), vec![IssueKind::EnumError]);
        assert_eq!(issues[0].field, "data.columnsDefs[0].cellDataType");
    }

    #[test]
    fn duplicate_column_fields_are_reported() {
        let issues = validate(table(json!([{"field": "x"}, {"field": "x"}])));
        assert_eq!(kinds(&issues), vec![IssueKind::DuplicateError]);
        assert_eq!(issues[0].field, "columns[1].field");
    }

    #[test]
    fn params_are_checked_including_rows() {
        let issues = validate(json!({
            "w1": {
                "name": "W", "type": "chart", "endpoint": "/w",
                "params": [
                    {"paramName": "symbol", "type": "text", "value": "AAPL"},
                    [
                        {"paramName": "symbol", "type": "text"},
                        {"paramName": "source", "type": "endpoint"},
                        {"paramName": "when", "type": "datetime"}
                    ]
                ]
            }
        }));

        let found: Vec<(IssueKind, &str)> = issues
            .iter()
            .map(|i| (i.kind, i.field.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                (IssueKind::DuplicateError, "params[1].paramName"),
                (IssueKind::MissingFieldError, "params[2].optionsEndpoint"),
                (IssueKind::EnumError, "params[3].type"),
            ]
        );
    }

    #[test]
    fn static_option_default_must_be_listed() {
        let options = json!([{"label": "Daily", "value": "1d"}, {"label": "Weekly", "value": "1w"}]);
        let issues = validate(json!({
            "ok": {"name": "W", "type": "chart", "endpoint": "/w",
                   "params": [{"paramName": "interval", "type": "text", "value": "1w", "options": options}]},
            "legacy": {"name": "W", "type": "chart", "endpoint": "/w",
                   "params": [{"paramName": "interval", "type": "text", "defaultValue": "1d", "options": options}]},
            "bad": {"name": "W", "type": "chart", "endpoint": "/w",
                   "params": [{"paramName": "interval", "type": "text", "value": "1m", "options": options}]},
            "none": {"name": "W", "type": "chart", "endpoint": "/w",
                   "params": [{"paramName": "interval", "type": "text", "options": options}]}
        }));

        let found: Vec<(&str, IssueKind)> = issues.iter().map(|i| (i.id.as_str(), i.kind)).collect();
        assert_eq!(
            found,
            vec![("bad", IssueKind::EnumError), ("none", IssueKind::MissingFieldError)]
        );
    }

    #[test]
    fn malformed_options_are_reported() {
        let issues = validate(json!({
            "w1": {"name": "W", "type": "chart", "endpoint": "/w",
                   "params": [{"paramName": "p", "type": "text", "value": "a",
                               "options": ["a", {"label": "B"}, {"value": "a"}]}]}
        }));
        assert_eq!(
            kinds(&issues),
            vec![IssueKind::ShapeError, IssueKind::MissingFieldError]
        );
        assert_eq!(issues[1].field, "params[0].options[1].value");
    }

    #[test]
    fn every_broken_widget_is_reported_in_document_order() {
        let issues = validate(json!({
            "zeta": {"name": "Z", "type": "nope", "endpoint": "/z"},
            "alpha": "not a widget",
            "mid": {"name": "M", "type": "metric", "endpoint": "/m", "refetchInterval": "often",
                    "mcp_tool": {"mcp_server": "s"}}
        }));
        let found: Vec<(&str, IssueKind)> = issues.iter().map(|i| (i.id.as_str(), i.kind)).collect();
        assert_eq!(
            found,
            vec![
                ("zeta", IssueKind::EnumError),
                ("alpha", IssueKind::ShapeError),
                ("mid", IssueKind::ShapeError),
                ("mid", IssueKind::MissingFieldError),
            ]
        );
    }

    #[test]
    fn index_records_ids_and_option_values() {
        let doc = json!({
            "w1": {"params": [{"paramName": "symbol", "options": [{"value": "AAPL"}, {"value": "MSFT"}]}]},
            "w2": {}
        });
        let index = WidgetIndex::from_document(&doc).unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.contains("w2"));
        assert_eq!(
            index.param_options("w1", "symbol"),
            Some(&[json!("AAPL"), json!("MSFT")][..])
        );
        assert_eq!(index.param_options("w2", "symbol"), None);
        assert!(WidgetIndex::from_document(&json!([])).is_none());
    }
}
