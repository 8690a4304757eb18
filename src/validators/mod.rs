pub mod apps;
pub mod extract;
pub mod layout;
pub mod widgets;

pub use apps::AppsValidator;
pub use widgets::{WidgetIndex, WidgetsValidator};

use crate::issue::{Issues, Source, ValidationIssue};
use serde_json::Value;

/// This trait defines the interface for a checker of one parsed document.
///
/// Checkers are pure: they read the document, push every finding into the
/// collector and never stop early. A malformed entry is reported, not thrown.
pub trait DocumentValidator {
    /// The document this checker understands.
    fn source(&self) -> Source;

    /// Run every check over `document`, appending findings to `issues`.
    fn check(&self, document: &Value, issues: &mut Issues);

    /// Run every check and return the findings in document order.
    fn validate(&self, document: &Value) -> Vec<ValidationIssue> {
        let mut issues = Issues::new(self.source());
        self.check(document, &mut issues);
        tracing::debug!(
            "{} checks produced {} issue(s)",
            self.source().file_name(),
            issues.len()
        );
        issues.into_vec()
    }
}
