//! Plan summary module
//!
//! This module classifies the changes in a parsed plan, aggregates them once,
//! and renders the result in several presentations.
//!
//! # Features
//!
//! - **Classification**: Map each resource change onto a fixed set of categories
//! - **Aggregation**: Category counts, type histogram and change flags in one pass
//! - **Rendering**: Basic, short, detail and no-op views in plain text or Markdown
//! - **Limit check**: Advisory size check for comment-length-limited targets
//!
//! # Example
//!
//! ```ignore
//! use crate::summary::{aggregate, RenderMode, SummaryRenderer, TextFormat};
//!
//! let summary = aggregate(&plan);
//! let renderer = SummaryRenderer::new(TextFormat::Markdown);
//! println!("{}", renderer.render(&summary, RenderMode::Detail));
//! ```

mod aggregate;
mod budget;
mod classifier;
mod renderer;

pub use aggregate::aggregate;
pub use budget::{DEFAULT_CHAR_LIMIT, check_limit};
pub use renderer::{RenderMode, SummaryRenderer, TextFormat};

#[cfg(test)]
pub use renderer::NO_CHANGES_MESSAGE;
