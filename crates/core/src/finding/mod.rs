mod display;
mod types;

pub use types::{Confidence, Finding, Severity, SourceLocation};
