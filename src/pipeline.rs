//! Validation Pipeline
//!
//! Loads widgets.json and apps.json, runs both checkers and folds their
//! findings into one [`Report`]. A document that cannot be parsed is reported
//! as a `ParseError` and the other document is still checked.

use crate::config::DocumentsConfig;
use crate::document::{DocumentError, load_document};
use crate::issue::{IssueKind, Issues, Source, ValidationIssue};
use crate::report::{DocumentStatus, Report};
use crate::validators::apps::layout_count;
use crate::validators::{AppsValidator, DocumentValidator, WidgetIndex, WidgetsValidator};

use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A document as it came off disk.
#[derive(Debug)]
pub enum Loaded {
    Document(Value),
    Unreadable(String),
    Missing,
}

impl Loaded {
    fn from_result(result: Result<Value, DocumentError>, required: bool) -> Self {
        match result {
            Ok(value) => Self::Document(value),
            Err(DocumentError::Io { source, .. })
                if !required && source.kind() == ErrorKind::NotFound =>
            {
                Self::Missing
            }
            Err(err) => {
                tracing::error!("{err}");
                Self::Unreadable(err.to_string())
            }
        }
    }
}

pub struct ValidationPipeline {
    widgets_path: PathBuf,
    apps_path: PathBuf,
    require_apps: bool,
}

impl ValidationPipeline {
    pub fn new(widgets_path: impl Into<PathBuf>, apps_path: impl Into<PathBuf>) -> Self {
        Self {
            widgets_path: widgets_path.into(),
            apps_path: apps_path.into(),
            require_apps: false,
        }
    }

    /// Resolve the document locations of `config` against an app directory.
    pub fn for_app_dir(app_dir: &Path, config: &DocumentsConfig) -> Self {
        Self::new(app_dir.join(&config.widgets), app_dir.join(&config.apps))
            .require_apps(config.require_apps)
    }

    pub fn require_apps(mut self, require: bool) -> Self {
        self.require_apps = require;
        self
    }

    pub fn widgets_path(&self) -> &Path {
        &self.widgets_path
    }

    pub fn apps_path(&self) -> &Path {
        &self.apps_path
    }

    pub fn run(&self) -> Report {
        tracing::info!("Validating {}", self.widgets_path.display());
        let widgets = Loaded::from_result(load_document(&self.widgets_path), true);

        tracing::info!("Validating {}", self.apps_path.display());
        let apps = Loaded::from_result(load_document(&self.apps_path), self.require_apps);
        if matches!(apps, Loaded::Missing) {
            tracing::info!(
                "{} not found, skipping apps validation",
                self.apps_path.display()
            );
        }

        assemble(
            &self.widgets_path.display().to_string(),
            widgets,
            &self.apps_path.display().to_string(),
            apps,
        )
    }
}

/// Validate two already-parsed documents.
pub fn validate_documents(widgets: &Value, apps: &Value) -> Report {
    assemble(
        Source::Widgets.file_name(),
        Loaded::Document(widgets.clone()),
        Source::Apps.file_name(),
        Loaded::Document(apps.clone()),
    )
}

/// Run the checkers over whatever was loaded and build the report.
pub fn assemble(widgets_path: &str, widgets: Loaded, apps_path: &str, apps: Loaded) -> Report {
    let (widget_status, widget_issues, index) = match &widgets {
        Loaded::Document(document) => (
            DocumentStatus::Checked,
            WidgetsValidator::new().validate(document),
            WidgetIndex::from_document(document),
        ),
        Loaded::Unreadable(message) => (
            DocumentStatus::Unreadable,
            parse_error(Source::Widgets, message),
            None,
        ),
        Loaded::Missing => (
            DocumentStatus::Unreadable,
            parse_error(Source::Widgets, &format!("{widgets_path} not found")),
            None,
        ),
    };

    let (apps_status, apps_issues, layouts) = match &apps {
        Loaded::Document(document) => {
            let validator = match &index {
                Some(index) => AppsValidator::new(index),
                None => AppsValidator::without_references(),
            };
            (
                DocumentStatus::Checked,
                validator.validate(document),
                layout_count(document),
            )
        }
        Loaded::Unreadable(message) => (
            DocumentStatus::Unreadable,
            parse_error(Source::Apps, message),
            0,
        ),
        Loaded::Missing => (DocumentStatus::Skipped, Vec::new(), 0),
    };

    let report = Report::builder()
        .document(Source::Widgets, widgets_path, widget_status, widget_issues)
        .document(Source::Apps, apps_path, apps_status, apps_issues)
        .widgets_found(index.as_ref().map_or(0, WidgetIndex::len))
        .layouts_validated(layouts)
        .build();

    tracing::info!(
        "Validation finished: {} widget(s), {} layout(s), {} error(s)",
        report.widgets_found,
        report.layouts_validated,
        report.errors
    );
    report
}

fn parse_error(source: Source, message: &str) -> Vec<ValidationIssue> {
    let mut issues = Issues::new(source);
    issues.push("", "", IssueKind::ParseError, message);
    issues.into_vec()
}
