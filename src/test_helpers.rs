//! Test helpers for building plan documents
//!
//! Builders here produce the same [`PlanDocument`] shape the parser does, so
//! classifier, aggregator and renderer tests do not need JSON fixtures.

#![cfg(test)]

use crate::plan::{Action, OutputChange, PlanDocument, ResourceChange};

/// Builder for a single resource change
pub struct ResourceChangeBuilder {
    address: String,
    actions: Vec<Action>,
    importing: bool,
    action_reason: Option<String>,
}

impl ResourceChangeBuilder {
    /// Create a builder for an address; the type is taken from the address
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            actions: Vec::new(),
            importing: false,
            action_reason: None,
        }
    }

    /// Set the actions in listed order
    pub fn actions(mut self, actions: &[Action]) -> Self {
        self.actions = actions.to_vec();
        self
    }

    /// Mark the change as importing
    pub fn importing(mut self) -> Self {
        self.importing = true;
        self
    }

    /// Set the action reason
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.action_reason = Some(reason.into());
        self
    }

    pub fn build(self) -> ResourceChange {
        let resource_type = type_from_address(&self.address);

        ResourceChange {
            address: self.address,
            resource_type,
            actions: self.actions,
            importing: self.importing,
            action_reason: self.action_reason,
        }
    }
}

/// "module.vpc.aws_subnet.main[0]" -> "aws_subnet"
fn type_from_address(address: &str) -> String {
    let parts: Vec<&str> = address.split('.').collect();
    let mut index = 0;

    while index + 1 < parts.len() && parts[index] == "module" {
        index += 2;
    }

    parts.get(index).copied().unwrap_or(address).to_string()
}

/// Builder for a whole plan document
pub struct PlanBuilder {
    terraform_version: String,
    applyable: bool,
    resources: Vec<ResourceChangeBuilder>,
    outputs: Vec<OutputChange>,
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self {
            terraform_version: "1.7.5".to_string(),
            applyable: true,
            resources: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Set the Terraform version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.terraform_version = version.into();
        self
    }

    /// Set the applyable flag
    pub fn applyable(mut self, applyable: bool) -> Self {
        self.applyable = applyable;
        self
    }

    /// Add a resource change
    pub fn resource(mut self, resource: ResourceChangeBuilder) -> Self {
        self.resources.push(resource);
        self
    }

    /// Add an output change
    pub fn output(mut self, name: &str, actions: &[Action]) -> Self {
        self.outputs.push(OutputChange::new(name, actions.to_vec()));
        self
    }

    pub fn build(self) -> PlanDocument {
        let mut output_changes = self.outputs;
        output_changes.sort_by(|a, b| a.name.cmp(&b.name));

        PlanDocument {
            terraform_version: self.terraform_version,
            applyable: self.applyable,
            resource_changes: self.resources.into_iter().map(|r| r.build()).collect(),
            output_changes,
        }
    }
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_type_from_address() {
    assert_eq!(type_from_address("aws_instance.web"), "aws_instance");
    assert_eq!(type_from_address("module.vpc.aws_subnet.main[0]"), "aws_subnet");
    assert_eq!(
        type_from_address("module.a.module.b.aws_iam_role.ci"),
        "aws_iam_role"
    );
}
