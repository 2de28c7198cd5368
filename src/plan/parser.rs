//! Plan document parser for Terraform/OpenTofu
//!
//! This module parses the JSON produced by `terraform show -json <planfile>`
//! into a [`PlanDocument`]. Only the fields the summary needs are read; the
//! rest of the document is ignored.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::types::{Action, OutputChange, PlanDocument, ResourceChange};
use crate::traits::FileSystem;

#[derive(Debug, Deserialize)]
struct RawPlan {
    #[serde(default)]
    terraform_version: Option<String>,

    #[serde(default)]
    applyable: bool,

    #[serde(default)]
    resource_changes: Option<Vec<RawResourceChange>>,

    #[serde(default)]
    output_changes: Option<BTreeMap<String, RawOutputChange>>,
}

#[derive(Debug, Deserialize)]
struct RawResourceChange {
    address: String,

    #[serde(rename = "type")]
    resource_type: String,

    #[serde(default)]
    action_reason: Option<String>,

    change: RawChange,
}

#[derive(Debug, Deserialize)]
struct RawChange {
    actions: Vec<Action>,

    #[serde(default, deserialize_with = "deserialize_importing")]
    importing: bool,
}

#[derive(Debug, Deserialize)]
struct RawOutputChange {
    actions: Vec<Action>,
}

/// `importing` is a boolean in hand-written plans but an object such as
/// `{"id": "i-123"}` in real Terraform output. Anything other than null or
/// `false` means the change imports.
fn deserialize_importing<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(!matches!(value, None | Some(Value::Null) | Some(Value::Bool(false))))
}

/// Parser for Terraform/OpenTofu JSON plan documents
pub struct PlanParser;

impl Default for PlanParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a JSON plan document
    pub fn parse(&self, json: &str) -> Result<PlanDocument> {
        let raw: RawPlan =
            serde_json::from_str(json).context("Failed to parse plan document as JSON")?;

        let resource_changes: Vec<ResourceChange> = raw
            .resource_changes
            .unwrap_or_default()
            .into_iter()
            .map(|rc| ResourceChange {
                address: rc.address,
                resource_type: rc.resource_type,
                actions: rc.change.actions,
                importing: rc.change.importing,
                action_reason: rc.action_reason,
            })
            .collect();

        let output_changes: Vec<OutputChange> = raw
            .output_changes
            .unwrap_or_default()
            .into_iter()
            .map(|(name, oc)| OutputChange::new(name, oc.actions))
            .collect();

        debug!(
            resources = resource_changes.len(),
            outputs = output_changes.len(),
            "parsed plan document"
        );

        Ok(PlanDocument {
            terraform_version: raw.terraform_version.unwrap_or_default(),
            applyable: raw.applyable,
            resource_changes,
            output_changes,
        })
    }

    /// Read and parse a plan document from disk
    pub fn parse_file(&self, fs: &dyn FileSystem, path: &Path) -> Result<PlanDocument> {
        let content = fs.read_to_string(path)?;
        self.parse(&content)
            .with_context(|| format!("Invalid plan document: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockFileSystem;

    const SAMPLE_PLAN: &str = r#"{
        "format_version": "1.2",
        "terraform_version": "1.7.5",
        "applyable": true,
        "resource_changes": [
            {
                "address": "aws_instance.web",
                "mode": "managed",
                "type": "aws_instance",
                "name": "web",
                "change": { "actions": ["create"], "before": null, "after": {} }
            },
            {
                "address": "aws_s3_bucket.logs",
                "type": "aws_s3_bucket",
                "action_reason": "replace_because_cannot_update",
                "change": { "actions": ["delete", "create"] }
            },
            {
                "address": "aws_vpc.main",
                "type": "aws_vpc",
                "change": { "actions": ["no-op"], "importing": { "id": "vpc-123" } }
            }
        ],
        "output_changes": {
            "zone": { "actions": ["update"] },
            "bucket_arn": { "actions": ["create"] }
        }
    }"#;

    #[test]
    fn test_parse_sample_plan() {
        let plan = PlanParser::new().parse(SAMPLE_PLAN).unwrap();

        assert_eq!(plan.terraform_version, "1.7.5");
        assert!(plan.applyable);
        assert_eq!(plan.resource_changes.len(), 3);

        let web = &plan.resource_changes[0];
        assert_eq!(web.address, "aws_instance.web");
        assert_eq!(web.resource_type, "aws_instance");
        assert_eq!(web.actions, vec![Action::Create]);
        assert!(!web.importing);
        assert!(web.action_reason.is_none());

        let logs = &plan.resource_changes[1];
        assert_eq!(logs.actions, vec![Action::Delete, Action::Create]);
        assert_eq!(
            logs.action_reason.as_deref(),
            Some("replace_because_cannot_update")
        );

        assert!(plan.resource_changes[2].importing);
    }

    #[test]
    fn test_output_changes_sorted_by_name() {
        let plan = PlanParser::new().parse(SAMPLE_PLAN).unwrap();
        let names: Vec<&str> = plan.output_changes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["bucket_arn", "zone"]);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let plan = PlanParser::new()
            .parse(r#"{"terraform_version": "1.6.0"}"#)
            .unwrap();

        assert!(!plan.applyable);
        assert!(plan.resource_changes.is_empty());
        assert!(plan.output_changes.is_empty());
    }

    #[test]
    fn test_importing_boolean_and_null_forms() {
        let json = r#"{
            "resource_changes": [
                { "address": "a.one", "type": "a", "change": { "actions": ["update"], "importing": true } },
                { "address": "a.two", "type": "a", "change": { "actions": ["update"], "importing": false } },
                { "address": "a.three", "type": "a", "change": { "actions": ["update"], "importing": null } }
            ]
        }"#;
        let plan = PlanParser::new().parse(json).unwrap();
        let flags: Vec<bool> = plan.resource_changes.iter().map(|r| r.importing).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn test_null_resource_changes_defaults_to_empty() {
        let plan = PlanParser::new()
            .parse(r#"{"resource_changes": null, "output_changes": null}"#)
            .unwrap();
        assert!(plan.resource_changes.is_empty());
        assert!(plan.output_changes.is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(PlanParser::new().parse("{ not json").is_err());
        assert!(PlanParser::new().parse(r#"{"resource_changes": {}}"#).is_err());
    }

    #[test]
    fn test_parse_file_reads_through_filesystem() {
        let fs = MockFileSystem::new();
        let path = Path::new("/plans/plan.json");
        fs.add_file(path, SAMPLE_PLAN);

        let plan = PlanParser::new().parse_file(&fs, path).unwrap();
        assert_eq!(plan.resource_changes.len(), 3);
    }

    #[test]
    fn test_parse_file_missing_file_is_an_error() {
        let fs = MockFileSystem::new();
        let result = PlanParser::new().parse_file(&fs, Path::new("/plans/missing.json"));
        assert!(result.is_err());
    }
}
