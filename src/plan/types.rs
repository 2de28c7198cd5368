//! Data types for Terraform plan documents
//!
//! These are the immutable domain types the classifier, aggregator and
//! renderer work on. They are built once by [`super::PlanParser`] and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

/// A single verb in a change's action list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Create,
    Update,
    Delete,
    /// Present in the plan with nothing to do
    NoOp,
    /// Removed from state without destroying the real object
    Forget,
    /// Data source read
    Read,
    /// Any verb this tool does not know about
    #[serde(other)]
    Unknown,
}

/// Proposed change to one managed resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceChange {
    /// Full resource address (e.g., "module.vpc.aws_subnet.main[0]")
    pub address: String,

    /// Resource type (e.g., "aws_subnet"), used for the type histogram
    pub resource_type: String,

    /// Verbs in the order the plan lists them
    pub actions: Vec<Action>,

    /// Whether the change also imports an existing object
    pub importing: bool,

    /// Reason code Terraform attaches to replacements
    pub action_reason: Option<String>,
}

impl ResourceChange {
    /// Check whether the action list contains a verb
    pub fn has_action(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    /// Check whether the actions, taken as a set, equal exactly `expected`
    pub fn actions_are(&self, expected: &[Action]) -> bool {
        !self.actions.is_empty()
            && self.actions.iter().all(|a| expected.contains(a))
            && expected.iter().all(|e| self.actions.contains(e))
    }

    /// Position of a verb in the listed order, if present
    pub fn position_of(&self, action: Action) -> Option<usize> {
        self.actions.iter().position(|a| *a == action)
    }
}

/// Proposed change to a root module output value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputChange {
    /// Output name
    pub name: String,

    /// Verbs in the order the plan lists them
    pub actions: Vec<Action>,
}

impl OutputChange {
    /// Create a new output change
    pub fn new(name: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            name: name.into(),
            actions,
        }
    }

    /// Check whether the actions, taken as a set, equal exactly `expected`
    pub fn actions_are(&self, expected: &[Action]) -> bool {
        !self.actions.is_empty()
            && self.actions.iter().all(|a| expected.contains(a))
            && expected.iter().all(|e| self.actions.contains(e))
    }
}

/// A parsed plan document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanDocument {
    /// Version of Terraform that produced the plan (empty when absent)
    pub terraform_version: String,

    /// Whether Terraform considers the plan applyable
    pub applyable: bool,

    /// Resource changes in document order
    pub resource_changes: Vec<ResourceChange>,

    /// Output changes sorted by name
    pub output_changes: Vec<OutputChange>,
}

impl PlanDocument {
    /// Version string for display
    pub fn version_label(&self) -> &str {
        if self.terraform_version.is_empty() {
            "unknown"
        } else {
            &self.terraform_version
        }
    }
}
