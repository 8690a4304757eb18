//! gridcheck validates the `widgets.json` and `apps.json` documents that
//! describe an OpenBB Workspace backend: widget metadata, dashboard layouts
//! and parameter groups.
//!
//! ```no_run
//! use gridcheck::config::DocumentsConfig;
//! use gridcheck::pipeline::ValidationPipeline;
//!
//! let report = ValidationPipeline::for_app_dir("apps/my-app".as_ref(), &DocumentsConfig::default()).run();
//! print!("{}", gridcheck::report::render_text(&report));
//! std::process::exit(report.exit_code());
//! ```

pub mod config;
pub mod document;
pub mod issue;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod validators;

pub use issue::{IssueKind, Source, ValidationIssue};
pub use pipeline::{ValidationPipeline, validate_documents};
pub use report::Report;
