use crate::config::Settings;
use crate::context::Context;
use crate::plan::PlanParser;
use crate::summary::{SummaryRenderer, aggregate, check_limit};
use anyhow::Result;
use tracing::{debug, info};

/// Handles the default command - summarizes a JSON plan document
pub struct SummarizeCommand;

impl SummarizeCommand {
    /// Execute the summarize command
    pub fn execute(ctx: &Context, settings: &Settings) -> Result<()> {
        let plan = PlanParser::new().parse_file(&*ctx.fs, &settings.plan_path)?;
        info!(
            path = %settings.plan_path.display(),
            version = %plan.version_label(),
            "loaded plan"
        );

        let summary = aggregate(&plan);
        if summary.unclassified > 0 {
            info!(
                count = summary.unclassified,
                "resource changes matched no category and are not listed"
            );
        }

        let rendered = SummaryRenderer::new(settings.format).render(&summary, settings.mode);
        debug!(mode = ?settings.mode, format = ?settings.format, length = rendered.len(), "rendered summary");

        ctx.output.body(&rendered);

        if settings.check_limit {
            let check = check_limit(&rendered, settings.char_limit);
            if check.exceeded {
                info!(length = check.length, limit = check.limit, "output exceeds character limit");
                for line in check.warning_lines() {
                    ctx.output.warning(&line);
                }
            }
        }

        Ok(())
    }
}
