//! Terraform plan document model
//!
//! This module holds the read-only representation of a `terraform show -json`
//! plan document and the parser that builds it.
//!
//! # Example
//!
//! ```ignore
//! use crate::plan::PlanParser;
//!
//! let parser = PlanParser::new();
//! let plan = parser.parse(&json)?;
//!
//! println!("{} resource changes", plan.resource_changes.len());
//! ```

mod parser;
mod types;

pub use parser::PlanParser;
pub use types::{Action, OutputChange, PlanDocument, ResourceChange};
