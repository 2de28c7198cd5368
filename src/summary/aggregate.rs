//! Whole-plan aggregation
//!
//! [`aggregate`] walks the resource changes once and the output changes once,
//! classifying each record and collecting counts, per-category listings and
//! the resource type histogram. Every presentation renders from the same
//! [`PlanSummary`].

use std::collections::BTreeMap;
use tracing::debug;

use super::classifier::{ChangeCategory, OutputCategory, classify, classify_output};
use crate::plan::{OutputChange, PlanDocument, ResourceChange};

/// Aggregated view of a plan document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary<'a> {
    /// The document this summary was built from
    pub plan: &'a PlanDocument,

    /// Count per resource category (every category present)
    resource_counts: BTreeMap<ChangeCategory, usize>,

    /// Resource changes that matched no classification rule
    pub unclassified: usize,

    /// Count per output category (every category present)
    output_counts: BTreeMap<OutputCategory, usize>,

    /// Resource changes that import, whatever their category
    pub importing_total: usize,

    /// Resource changes per resource type, sorted by type name
    pub type_histogram: BTreeMap<&'a str, usize>,

    resources_by_category: BTreeMap<ChangeCategory, Vec<&'a ResourceChange>>,

    /// Classified resource changes in document order
    classified: Vec<&'a ResourceChange>,

    outputs_by_category: BTreeMap<OutputCategory, Vec<&'a OutputChange>>,

    /// Whether any resource has something to apply
    pub has_resource_changes: bool,

    /// Whether any output is created, updated or deleted
    pub has_output_changes: bool,

    /// Whether the plan has anything to apply at all
    pub has_any_changes: bool,
}

/// Build the summary for a plan document
pub fn aggregate(plan: &PlanDocument) -> PlanSummary<'_> {
    let mut resource_counts: BTreeMap<ChangeCategory, usize> =
        ChangeCategory::ALL.iter().map(|c| (*c, 0)).collect();
    let mut resources_by_category: BTreeMap<ChangeCategory, Vec<&ResourceChange>> =
        BTreeMap::new();
    let mut classified = Vec::new();
    let mut type_histogram: BTreeMap<&str, usize> = BTreeMap::new();
    let mut unclassified = 0;
    let mut importing_total = 0;

    for change in &plan.resource_changes {
        *type_histogram.entry(change.resource_type.as_str()).or_insert(0) += 1;

        if change.importing {
            importing_total += 1;
        }

        match classify(change) {
            Some(category) => {
                *resource_counts.entry(category).or_insert(0) += 1;
                resources_by_category.entry(category).or_default().push(change);
                classified.push(change);
            }
            None => {
                debug!(address = %change.address, actions = ?change.actions, "unclassified resource change");
                unclassified += 1;
            }
        }
    }

    let mut output_counts: BTreeMap<OutputCategory, usize> =
        OutputCategory::ALL.iter().map(|c| (*c, 0)).collect();
    let mut outputs_by_category: BTreeMap<OutputCategory, Vec<&OutputChange>> = BTreeMap::new();

    for change in &plan.output_changes {
        let category = classify_output(change);
        *output_counts.entry(category).or_insert(0) += 1;
        outputs_by_category.entry(category).or_default().push(change);
    }

    let has_resource_changes = resource_counts
        .iter()
        .any(|(category, count)| category.is_change() && *count > 0);
    let has_output_changes = OutputCategory::CHANGES
        .iter()
        .any(|category| output_counts.get(category).copied().unwrap_or(0) > 0);

    debug!(
        resources = plan.resource_changes.len(),
        unclassified,
        importing = importing_total,
        has_resource_changes,
        has_output_changes,
        "aggregated plan"
    );

    PlanSummary {
        plan,
        resource_counts,
        unclassified,
        output_counts,
        importing_total,
        type_histogram,
        resources_by_category,
        classified,
        outputs_by_category,
        has_resource_changes,
        has_output_changes,
        has_any_changes: has_resource_changes || has_output_changes,
    }
}

/// Rank used by the basic action summary
fn basic_rank(category: ChangeCategory) -> u8 {
    match category {
        ChangeCategory::Create => 1,
        ChangeCategory::Update => 2,
        ChangeCategory::Delete => 3,
        ChangeCategory::NoOp => 4,
        _ => 5,
    }
}

/// Rank used by the detail summary
fn detail_rank(category: ChangeCategory) -> u8 {
    match category {
        ChangeCategory::Create => 1,
        ChangeCategory::Update => 2,
        ChangeCategory::Delete => 3,
        ChangeCategory::RemoveForget => 4,
        _ => 5,
    }
}

impl<'a> PlanSummary<'a> {
    /// Number of resource changes in a category
    pub fn count(&self, category: ChangeCategory) -> usize {
        self.resource_counts.get(&category).copied().unwrap_or(0)
    }

    /// Number of output changes in a category
    pub fn output_count(&self, category: OutputCategory) -> usize {
        self.output_counts.get(&category).copied().unwrap_or(0)
    }

    /// Resource changes in a category, in document order
    pub fn resources_in(&self, category: ChangeCategory) -> &[&'a ResourceChange] {
        self.resources_by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resource changes that matched a classification rule, in document order
    pub fn classified_resources(&self) -> &[&'a ResourceChange] {
        &self.classified
    }

    /// Output changes in a category, sorted by name
    pub fn outputs_in(&self, category: OutputCategory) -> &[&'a OutputChange] {
        self.outputs_by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Non-zero categories for the basic action summary
    pub fn basic_action_counts(&self) -> Vec<(ChangeCategory, usize)> {
        self.ranked_counts(basic_rank, |_| true)
    }

    /// Non-zero categories for the detail summary (no-op excluded)
    pub fn detail_action_counts(&self) -> Vec<(ChangeCategory, usize)> {
        self.ranked_counts(detail_rank, |c| c != ChangeCategory::NoOp)
    }

    /// Non-zero output categories that count as changes
    pub fn output_action_counts(&self) -> Vec<(OutputCategory, usize)> {
        OutputCategory::CHANGES
            .iter()
            .map(|c| (*c, self.output_count(*c)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    fn ranked_counts(
        &self,
        rank: fn(ChangeCategory) -> u8,
        include: impl Fn(ChangeCategory) -> bool,
    ) -> Vec<(ChangeCategory, usize)> {
        let mut counts: Vec<(ChangeCategory, usize)> = ChangeCategory::ALL
            .into_iter()
            .filter(|category| include(*category))
            .map(|category| (category, self.count(category)))
            .filter(|(_, count)| *count > 0)
            .collect();

        counts.sort_by(|(a, _), (b, _)| rank(*a).cmp(&rank(*b)).then(a.label().cmp(b.label())));
        counts
    }
}
