//! Validation Report
//!
//! Combines the findings of both documents into one ordered report and
//! renders it as text for people or JSON for CI. Rendering is a pure function
//! of the report, so unchanged inputs give byte-identical output.

use crate::issue::{IssueKind, Source, ValidationIssue};

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

const RULE: &str = "============================================================";

/// What happened to one input document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Parsed and run through its checker.
    Checked,
    /// Could not be read or parsed; see its `ParseError`.
    Unreadable,
    /// Optional document that was not present.
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub source: Source,
    pub path: String,
    pub status: DocumentStatus,
    pub issues: usize,
}

/// The combined result of one validation pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    pub success: bool,
    pub documents: Vec<DocumentSummary>,
    pub widgets_found: usize,
    pub layouts_validated: usize,
    /// Every issue is an error; there is no warning tier.
    pub errors: usize,
    pub by_kind: BTreeMap<IssueKind, usize>,
    pub issues: Vec<ValidationIssue>,
}

impl Report {
    pub fn builder() -> ReportBuilder {
        ReportBuilder::default()
    }

    pub fn issues_from(&self, source: Source) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |issue| issue.source == source)
    }

    /// Process exit status for a CLI wrapper.
    pub fn exit_code(&self) -> i32 {
        if self.success { 0 } else { 1 }
    }
}

/// Collects per-document results. Sections are emitted widgets first, then
/// apps, whatever order they were added in; issues keep their order within a
/// section.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    sections: Vec<(DocumentSummary, Vec<ValidationIssue>)>,
    widgets_found: usize,
    layouts_validated: usize,
}

impl ReportBuilder {
    pub fn document(
        mut self,
        source: Source,
        path: impl Into<String>,
        status: DocumentStatus,
        issues: Vec<ValidationIssue>,
    ) -> Self {
        let summary = DocumentSummary {
            source,
            path: path.into(),
            status,
            issues: issues.len(),
        };
        self.sections.push((summary, issues));
        self
    }

    pub fn widgets_found(mut self, count: usize) -> Self {
        self.widgets_found = count;
        self
    }

    pub fn layouts_validated(mut self, count: usize) -> Self {
        self.layouts_validated = count;
        self
    }

    pub fn build(mut self) -> Report {
        self.sections.sort_by_key(|(summary, _)| summary.source);

        let mut documents = Vec::with_capacity(self.sections.len());
        let mut issues = Vec::new();
        for (summary, section) in self.sections {
            documents.push(summary);
            issues.extend(section);
        }

        let mut by_kind = BTreeMap::new();
        for issue in &issues {
            *by_kind.entry(issue.kind).or_insert(0) += 1;
        }

        Report {
            success: issues.is_empty(),
            documents,
            widgets_found: self.widgets_found,
            layouts_validated: self.layouts_validated,
            errors: issues.len(),
            by_kind,
            issues,
        }
    }
}

/// Human-readable rendering: banner, document summary, itemised errors.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "OPENBB APP VALIDATION")?;
        writeln!(f, "{RULE}")?;

        for doc in &self.documents {
            let detail = match (doc.status, doc.source) {
                (DocumentStatus::Checked, Source::Widgets) => {
                    format!("{} widget(s) found", self.widgets_found)
                }
                (DocumentStatus::Checked, Source::Apps) => {
                    format!("{} tab layout(s) validated", self.layouts_validated)
                }
                (DocumentStatus::Unreadable, _) => "unreadable".to_string(),
                (DocumentStatus::Skipped, _) => "not present, skipped".to_string(),
            };
            writeln!(f, "{:<8} {} ({detail})", format!("{}:", doc.source), doc.path)?;
        }

        writeln!(f)?;
        if self.success {
            writeln!(f, "✅ All validations passed!")?;
        } else {
            writeln!(f, "❌ ERRORS ({}):", self.errors)?;
            for issue in &self.issues {
                writeln!(f, "   • {issue}")?;
            }
            writeln!(f)?;
            let summary: Vec<String> = self
                .by_kind
                .iter()
                .map(|(kind, count)| format!("{kind}: {count}"))
                .collect();
            writeln!(f, "{}", summary.join(", "))?;
            writeln!(f, "❌ Validation failed. Fix the errors above.")?;
        }

        writeln!(f, "{RULE}")
    }
}

pub fn render_text(report: &Report) -> String {
    report.to_string()
}

/// Machine-readable rendering for CI.
pub fn render_json(report: &Report) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(report)?;
    out.push('\n');
    Ok(out)
}
