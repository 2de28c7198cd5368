//! Renderers for plan summaries
//!
//! A [`SummaryRenderer`] turns a [`PlanSummary`] into text for one of the four
//! [`RenderMode`]s. The layout is shared; a [`TextStyle`] supplies the
//! format-specific pieces (headings, list items, the diff block) for plain
//! text or Markdown.

use serde::Serialize;

use super::aggregate::PlanSummary;
use super::classifier::{ChangeCategory, OutputCategory, classify_output_symbol, classify_symbol};
use crate::plan::ResourceChange;

/// Message shown when the plan has nothing to apply
pub const NO_CHANGES_MESSAGE: &str = "No changes detected, nothing to apply.";

const DIFF_LEGEND: &str = "+ create, ~ update, - delete, -/+ replace (delete then create), \
+/- replace (create then delete), . forget, <= import";

/// Which presentation to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RenderMode {
    /// Action counts, type histogram and plan facts
    #[default]
    Basic,
    /// One diff-style line per change
    Short,
    /// Addresses grouped per category
    Detail,
    /// Only the resources with nothing to do
    NoOp,
}

/// Output text format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TextFormat {
    #[default]
    Plain,
    Markdown,
}

/// Format-specific building blocks used by [`SummaryRenderer`]
pub trait TextStyle {
    /// Render a heading; level 1 is the document title
    fn heading(&self, level: usize, text: &str) -> String;

    /// Render one list entry
    fn item(&self, text: &str) -> String;

    /// Render an identifier such as a resource address
    fn code(&self, text: &str) -> String;

    /// Render a standalone notice
    fn notice(&self, text: &str) -> String;

    /// Wrap the compact diff lines
    fn diff_block(&self, lines: &[String]) -> String;
}

/// Plain text with underlined headings
pub struct PlainText;

impl TextStyle for PlainText {
    fn heading(&self, level: usize, text: &str) -> String {
        let rule_char = if level <= 1 { "=" } else { "-" };
        format!("{}\n{}\n", text, rule_char.repeat(text.chars().count()))
    }

    fn item(&self, text: &str) -> String {
        format!("{}\n", text)
    }

    fn code(&self, text: &str) -> String {
        text.to_string()
    }

    fn notice(&self, text: &str) -> String {
        format!("{}\n", text)
    }

    fn diff_block(&self, lines: &[String]) -> String {
        lines.iter().map(|line| format!("{}\n", line)).collect()
    }
}

/// GitHub flavored Markdown
pub struct Markdown;

impl TextStyle for Markdown {
    fn heading(&self, level: usize, text: &str) -> String {
        format!("{} {}\n", "#".repeat(level.clamp(1, 6)), text)
    }

    fn item(&self, text: &str) -> String {
        format!("- {}\n", text)
    }

    fn code(&self, text: &str) -> String {
        format!("`{}`", text)
    }

    fn notice(&self, text: &str) -> String {
        format!("**{}**\n", text)
    }

    fn diff_block(&self, lines: &[String]) -> String {
        let mut output = String::new();
        output.push_str("<details>\n<summary>Terraform plan diff</summary>\n\n");
        output.push_str(&format!("Legend: `{}`\n\n", DIFF_LEGEND));
        output.push_str("```diff\n");
        for line in lines {
            output.push_str(line);
            output.push('\n');
        }
        output.push_str("```\n\n</details>\n");
        output
    }
}

/// Renders plan summaries in a given text format
pub struct SummaryRenderer {
    style: Box<dyn TextStyle>,
}

impl SummaryRenderer {
    pub fn new(format: TextFormat) -> Self {
        let style: Box<dyn TextStyle> = match format {
            TextFormat::Plain => Box::new(PlainText),
            TextFormat::Markdown => Box::new(Markdown),
        };
        Self { style }
    }

    /// Render the summary in the requested mode
    pub fn render(&self, summary: &PlanSummary<'_>, mode: RenderMode) -> String {
        let blocks = match mode {
            RenderMode::NoOp => self.render_noop(summary),
            _ if !summary.has_any_changes => vec![self.style.notice(NO_CHANGES_MESSAGE)],
            RenderMode::Basic => self.render_basic(summary),
            RenderMode::Short => vec![self.render_short(summary)],
            RenderMode::Detail => self.render_detail(summary),
        };

        blocks.join("\n")
    }

    fn render_basic(&self, summary: &PlanSummary<'_>) -> Vec<String> {
        let style = &self.style;
        let mut blocks = vec![style.heading(1, "Terraform Plan Summary")];

        let mut actions = style.heading(2, "Summary of Actions");
        for (category, count) in summary.basic_action_counts() {
            actions.push_str(&style.item(&format!("{}: {}", category.label(), count)));
        }
        if summary.importing_total > 0 {
            actions.push_str(&style.item(&format!("importing: {}", summary.importing_total)));
        }
        blocks.push(actions);

        let mut types = style.heading(2, "Resource Types");
        for (resource_type, count) in &summary.type_histogram {
            types.push_str(&style.item(&format!("{}: {}", resource_type, count)));
        }
        blocks.push(types);

        let plan = summary.plan;
        let mut facts = style.heading(2, "Plan Information");
        facts.push_str(&style.item(&format!("Terraform version: {}", plan.version_label())));
        facts.push_str(&style.item(&format!(
            "Resource changes: {}",
            plan.resource_changes.len()
        )));
        facts.push_str(&style.item(&format!("Applyable: {}", plan.applyable)));
        blocks.push(facts);

        blocks
    }

    fn render_short(&self, summary: &PlanSummary<'_>) -> String {
        let mut lines = Vec::new();

        for change in summary.classified_resources() {
            if let Some(symbol) = classify_symbol(change).symbol() {
                lines.push(format!("{} {}{}", symbol, change.address, import_suffix(change)));
            }
        }

        for output in &summary.plan.output_changes {
            if let Some(symbol) = classify_output_symbol(output).symbol() {
                lines.push(format!("{} output.{}", symbol, output.name));
            }
        }

        self.style.diff_block(&lines)
    }

    fn render_detail(&self, summary: &PlanSummary<'_>) -> Vec<String> {
        let style = &self.style;
        let mut blocks = vec![style.heading(1, "Terraform Plan Details")];

        for category in ChangeCategory::DETAIL_ORDER {
            let resources = summary.resources_in(category);
            if resources.is_empty() {
                continue;
            }

            let mut block = style.heading(3, &category.label().to_uppercase());
            for change in resources {
                block.push_str(&self.resource_item(change));
            }
            blocks.push(block);
        }

        if summary.has_output_changes {
            for category in OutputCategory::CHANGES {
                let outputs = summary.outputs_in(category);
                if outputs.is_empty() {
                    continue;
                }

                let title = format!("OUTPUT {}", category.label().to_uppercase());
                let mut block = style.heading(3, &title);
                for output in outputs {
                    block.push_str(&style.item(&style.code(&output.name)));
                }
                blocks.push(block);
            }
        }

        let mut totals = style.heading(2, "Summary");
        for (category, count) in summary.detail_action_counts() {
            totals.push_str(&style.item(&format!("{}: {}", category.label(), count)));
        }
        if summary.importing_total > 0 {
            totals.push_str(&style.item(&format!("importing: {}", summary.importing_total)));
        }
        blocks.push(totals);

        let output_counts = summary.output_action_counts();
        if !output_counts.is_empty() {
            let mut block = style.heading(2, "Output Summary");
            for (category, count) in output_counts {
                block.push_str(&style.item(&format!("{}: {}", category.label(), count)));
            }
            blocks.push(block);
        }

        blocks
    }

    fn render_noop(&self, summary: &PlanSummary<'_>) -> Vec<String> {
        let style = &self.style;
        let mut block = style.heading(1, "No-op Resources");

        let resources = summary.resources_in(ChangeCategory::NoOp);
        if resources.is_empty() {
            block.push_str(&style.notice("No no-op resources."));
        }
        for change in resources {
            block.push_str(&self.resource_item(change));
        }

        vec![block]
    }

    fn resource_item(&self, change: &ResourceChange) -> String {
        let text = format!("{}{}", self.style.code(&change.address), import_suffix(change));
        self.style.item(&text)
    }
}

fn import_suffix(change: &ResourceChange) -> &'static str {
    if change.importing { " Import" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Action, PlanDocument};
    use crate::summary::aggregate::aggregate;
    use crate::summary::classifier::REPLACE_REASON;
    use crate::test_helpers::{PlanBuilder, ResourceChangeBuilder};

    fn render(plan: &PlanDocument, format: TextFormat, mode: RenderMode) -> String {
        SummaryRenderer::new(format).render(&aggregate(plan), mode)
    }

    fn noop_only_plan() -> PlanDocument {
        PlanBuilder::new()
            .resource(ResourceChangeBuilder::new("aws_vpc.main").actions(&[Action::NoOp]))
            .resource(ResourceChangeBuilder::new("aws_subnet.a").actions(&[Action::NoOp]))
            .build()
    }

    #[test]
    fn test_plain_heading_rule_matches_text_length() {
        let heading = PlainText.heading(2, "Resource Types");
        assert_eq!(heading, "Resource Types\n--------------\n");

        let title = PlainText.heading(1, "Terraform Plan Summary");
        let lines: Vec<&str> = title.lines().collect();
        assert_eq!(lines[0].len(), lines[1].len());
        assert!(lines[1].chars().all(|c| c == '='));
    }

    #[test]
    fn test_markdown_heading_levels() {
        assert_eq!(Markdown.heading(1, "Title"), "# Title\n");
        assert_eq!(Markdown.heading(3, "CREATE"), "### CREATE\n");
    }

    #[test]
    fn test_basic_create() {
        let plan = PlanBuilder::new()
            .version("1.7.5")
            .applyable(true)
            .resource(ResourceChangeBuilder::new("aws_instance.web").actions(&[Action::Create]))
            .build();

        let output = render(&plan, TextFormat::Plain, RenderMode::Basic);
        assert!(output.contains("Summary of Actions\n------------------\ncreate: 1\n"));
        assert!(output.contains("aws_instance: 1\n"));
        assert!(output.contains("Terraform version: 1.7.5\n"));
        assert!(output.contains("Resource changes: 1\n"));
        assert!(output.contains("Applyable: true\n"));
        assert!(!output.contains("importing"));
    }

    #[test]
    fn test_basic_sections_in_order() {
        let plan = PlanBuilder::new()
            .resource(ResourceChangeBuilder::new("aws_instance.web").actions(&[Action::Create]))
            .build();
        let output = render(&plan, TextFormat::Plain, RenderMode::Basic);

        let actions = output.find("Summary of Actions").unwrap();
        let types = output.find("Resource Types").unwrap();
        let facts = output.find("Plan Information").unwrap();
        assert!(actions < types && types < facts);
    }

    #[test]
    fn test_basic_markdown_uses_bullets() {
        let plan = PlanBuilder::new()
            .resource(ResourceChangeBuilder::new("aws_instance.web").actions(&[Action::Create]))
            .build();
        let output = render(&plan, TextFormat::Markdown, RenderMode::Basic);

        assert!(output.starts_with("# Terraform Plan Summary\n"));
        assert!(output.contains("## Summary of Actions\n- create: 1\n"));
        assert!(!output.contains("---"));
    }

    #[test]
    fn test_short_create() {
        let plan = PlanBuilder::new()
            .resource(ResourceChangeBuilder::new("aws_instance.web").actions(&[Action::Create]))
            .build();

        let output = render(&plan, TextFormat::Plain, RenderMode::Short);
        assert_eq!(output, "+ aws_instance.web\n");
    }

    #[test]
    fn test_short_replace_and_outputs() {
        let plan = PlanBuilder::new()
            .resource(
                ResourceChangeBuilder::new("aws_instance.web")
                    .actions(&[Action::Delete, Action::Create])
                    .reason(REPLACE_REASON),
            )
            .resource(
                ResourceChangeBuilder::new("aws_s3_bucket.logs")
                    .actions(&[Action::Update])
                    .importing(),
            )
            .resource(ResourceChangeBuilder::new("aws_vpc.main").actions(&[Action::NoOp]))
            .output("endpoint", &[Action::Update])
            .output("region", &[Action::NoOp])
            .build();

        let output = render(&plan, TextFormat::Plain, RenderMode::Short);
        assert_eq!(
            output,
            "-/+ aws_instance.web\n~ aws_s3_bucket.logs Import\n~ output.endpoint\n"
        );
    }

    #[test]
    fn test_short_markdown_is_collapsible_diff() {
        let plan = PlanBuilder::new()
            .resource(ResourceChangeBuilder::new("aws_instance.web").actions(&[Action::Delete]))
            .build();

        let output = render(&plan, TextFormat::Markdown, RenderMode::Short);
        assert!(output.starts_with("<details>"));
        assert!(output.contains("Legend:"));
        assert!(output.contains("```diff\n- aws_instance.web\n```"));
        assert!(output.trim_end().ends_with("</details>"));
    }

    #[test]
    fn test_detail_update_import() {
        let plan = PlanBuilder::new()
            .resource(
                ResourceChangeBuilder::new("aws_s3_bucket.logs")
                    .actions(&[Action::Update])
                    .importing(),
            )
            .build();

        let output = render(&plan, TextFormat::Plain, RenderMode::Detail);
        assert!(output.contains("UPDATE-IMPORT\n-------------\naws_s3_bucket.logs Import\n"));
        assert!(output.contains("update-import: 1\n"));
        assert!(output.contains("importing: 1\n"));

        let basic = render(&plan, TextFormat::Plain, RenderMode::Basic);
        assert!(basic.contains("importing: 1\n"));
    }

    #[test]
    fn test_detail_category_order() {
        let plan = PlanBuilder::new()
            .resource(
                ResourceChangeBuilder::new("aws_vpc.r")
                    .actions(&[Action::Delete, Action::Create])
                    .reason(REPLACE_REASON),
            )
            .resource(ResourceChangeBuilder::new("aws_vpc.f").actions(&[Action::Forget]))
            .resource(ResourceChangeBuilder::new("aws_vpc.d").actions(&[Action::Delete]))
            .resource(ResourceChangeBuilder::new("aws_vpc.c").actions(&[Action::Create]))
            .build();

        let output = render(&plan, TextFormat::Plain, RenderMode::Detail);
        let create = output.find("CREATE\n").unwrap();
        let delete = output.find("DELETE\n").unwrap();
        let forget = output.find("REMOVE-FORGET\n").unwrap();
        let replace = output.find("REPLACE\n").unwrap();
        assert!(create < delete && delete < forget && forget < replace);
        assert!(!output.contains("UPDATE"));
    }

    #[test]
    fn test_detail_outputs_and_summary() {
        let plan = PlanBuilder::new()
            .resource(ResourceChangeBuilder::new("aws_vpc.main").actions(&[Action::NoOp]))
            .output("endpoint", &[Action::Create])
            .output("old_name", &[Action::Delete])
            .build();

        let output = render(&plan, TextFormat::Markdown, RenderMode::Detail);
        assert!(output.contains("### OUTPUT CREATE\n- `endpoint`\n"));
        assert!(output.contains("### OUTPUT DELETE\n- `old_name`\n"));
        assert!(output.contains("## Output Summary\n- create: 1\n- delete: 1\n"));
        assert!(!output.contains("no-op"));
        assert!(!output.contains("aws_vpc.main"));
    }

    #[test]
    fn test_unclassified_never_listed() {
        let plan = PlanBuilder::new()
            .resource(
                ResourceChangeBuilder::new("aws_instance.web").actions(&[Action::Create, Action::Delete]),
            )
            .resource(ResourceChangeBuilder::new("aws_vpc.main").actions(&[Action::Create]))
            .build();

        let detail = render(&plan, TextFormat::Plain, RenderMode::Detail);
        assert!(!detail.contains("aws_instance.web"));

        let noop = render(&plan, TextFormat::Plain, RenderMode::NoOp);
        assert!(!noop.contains("aws_instance.web"));

        let short = render(&plan, TextFormat::Plain, RenderMode::Short);
        assert_eq!(short, "+ aws_vpc.main\n");

        let short_markdown = render(&plan, TextFormat::Markdown, RenderMode::Short);
        assert!(short_markdown.contains("+ aws_vpc.main\n"));
        assert!(!short_markdown.contains("aws_instance.web"));
    }

    #[test]
    fn test_short_keeps_tagged_create_first_replacement() {
        let plan = PlanBuilder::new()
            .resource(
                ResourceChangeBuilder::new("aws_instance.worker")
                    .actions(&[Action::Create, Action::Delete])
                    .reason(REPLACE_REASON),
            )
            .build();

        let output = render(&plan, TextFormat::Plain, RenderMode::Short);
        assert_eq!(output, "+/- aws_instance.worker\n");
    }

    #[test]
    fn test_no_changes_notice_in_every_change_mode() {
        let plan = noop_only_plan();

        for mode in [RenderMode::Basic, RenderMode::Short, RenderMode::Detail] {
            let output = render(&plan, TextFormat::Plain, mode);
            assert_eq!(output, format!("{}\n", NO_CHANGES_MESSAGE));
        }

        let markdown = render(&plan, TextFormat::Markdown, RenderMode::Basic);
        assert_eq!(markdown, format!("**{}**\n", NO_CHANGES_MESSAGE));
    }

    #[test]
    fn test_noop_mode_lists_records_unconditionally() {
        let plan = noop_only_plan();

        let output = render(&plan, TextFormat::Plain, RenderMode::NoOp);
        assert_eq!(
            output,
            "No-op Resources\n===============\naws_vpc.main\naws_subnet.a\n"
        );

        let markdown = render(&plan, TextFormat::Markdown, RenderMode::NoOp);
        assert_eq!(
            markdown,
            "# No-op Resources\n- `aws_vpc.main`\n- `aws_subnet.a`\n"
        );
    }

    #[test]
    fn test_noop_mode_excludes_importing_noop() {
        let plan = PlanBuilder::new()
            .resource(
                ResourceChangeBuilder::new("aws_vpc.main")
                    .actions(&[Action::NoOp])
                    .importing(),
            )
            .build();

        let output = render(&plan, TextFormat::Plain, RenderMode::NoOp);
        assert!(output.contains("No no-op resources."));
        assert!(!output.contains("aws_vpc.main"));
    }
}
