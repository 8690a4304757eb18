//! Validation Issues
//!
//! Every finding produced by the validators is a [`ValidationIssue`]. Issues
//! are plain data: the validators never fail, they collect.

use serde::Serialize;
use std::fmt;

/// Which document an issue was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Widgets,
    Apps,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Widgets => "widgets",
            Self::Apps => "apps",
        }
    }

    /// Conventional file name of the document.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Widgets => "widgets.json",
            Self::Apps => "apps.json",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue taxonomy. There is no warning tier: every kind is a hard error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum IssueKind {
    /// The document could not be read or is not valid JSON.
    ParseError,
    /// A document or field has the wrong JSON type.
    ShapeError,
    MissingFieldError,
    /// A value outside its allowed set.
    EnumError,
    /// A numeric bound was violated.
    RangeError,
    /// An ID that must be unique appears twice.
    DuplicateError,
    /// A widget ID that does not exist in widgets.json.
    ReferenceError,
    LayoutOverlapError,
    GroupNameError,
    /// A layout item names a group that the app does not define.
    GroupReferenceError,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParseError => "ParseError",
            Self::ShapeError => "ShapeError",
            Self::MissingFieldError => "MissingFieldError",
            Self::EnumError => "EnumError",
            Self::RangeError => "RangeError",
            Self::DuplicateError => "DuplicateError",
            Self::ReferenceError => "ReferenceError",
            Self::LayoutOverlapError => "LayoutOverlapError",
            Self::GroupNameError => "GroupNameError",
            Self::GroupReferenceError => "GroupReferenceError",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding.
///
/// `id` is the widget ID for widgets.json findings and an app/tab locator
/// (`app[0]`, `app[0].tabs.t1`) for apps.json findings. It is empty for
/// findings about the document as a whole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub source: Source,
    pub id: String,
    pub field: String,
    pub kind: IssueKind,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.id.is_empty(), self.field.is_empty()) {
            (true, true) => write!(f, "[{}] {}: {}", self.source, self.kind, self.message),
            (true, false) => write!(
                f,
                "[{}] {} {}: {}",
                self.source, self.field, self.kind, self.message
            ),
            (false, true) => write!(
                f,
                "[{}:{}] {}: {}",
                self.source, self.id, self.kind, self.message
            ),
            (false, false) => write!(
                f,
                "[{}:{}] {} {}: {}",
                self.source, self.id, self.field, self.kind, self.message
            ),
        }
    }
}

/// Ordered collector for the issues of one document.
///
/// Issues keep the order they were pushed in, which is document order
/// followed by check order.
#[derive(Debug)]
pub struct Issues {
    source: Source,
    items: Vec<ValidationIssue>,
}

impl Issues {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            items: Vec::new(),
        }
    }

    pub fn push(
        &mut self,
        id: impl Into<String>,
        field: impl Into<String>,
        kind: IssueKind,
        message: impl Into<String>,
    ) {
        let issue = ValidationIssue {
            source: self.source,
            id: id.into(),
            field: field.into(),
            kind,
            message: message.into(),
        };
        tracing::debug!("{issue}");
        self.items.push(issue);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<ValidationIssue> {
        self.items
    }
}
