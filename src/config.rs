//! Resolved runtime configuration
//!
//! Command-line flags and the `TFSUMMARY_*` environment overrides are folded
//! into one immutable [`Settings`] value before any work starts.

use clap::ValueEnum;
use std::path::PathBuf;

use crate::summary::{RenderMode, TextFormat};

/// Environment variable overriding the default presentation
pub const MODE_ENV: &str = "TFSUMMARY_MODE";

/// Environment variable overriding the comment character limit
pub const CHAR_LIMIT_ENV: &str = "TFSUMMARY_CHAR_LIMIT";

/// Presentation selectable with `--mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeArg {
    #[default]
    Basic,
    Short,
    Detail,
    NoOp,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Basic => RenderMode::Basic,
            ModeArg::Short => RenderMode::Short,
            ModeArg::Detail => RenderMode::Detail,
            ModeArg::NoOp => RenderMode::NoOp,
        }
    }
}

/// The `--short`, `--detail` and `--no-op` switches
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeFlags {
    pub short: bool,
    pub detail: bool,
    pub no_op: bool,
}

impl ModeFlags {
    /// Mode picked by an explicit switch, if any
    pub fn selected(&self) -> Option<RenderMode> {
        if self.short {
            Some(RenderMode::Short)
        } else if self.detail {
            Some(RenderMode::Detail)
        } else if self.no_op {
            Some(RenderMode::NoOp)
        } else {
            None
        }
    }
}

/// Output target options
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetFlags {
    pub markdown: bool,
    pub github_comment: bool,
}

/// Everything a summarize run needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path to the JSON plan document
    pub plan_path: PathBuf,

    /// Presentation to render
    pub mode: RenderMode,

    /// Plain text or Markdown
    pub format: TextFormat,

    /// Whether to measure the output against `char_limit`
    pub check_limit: bool,

    /// Maximum comment length in characters
    pub char_limit: usize,
}

impl Settings {
    /// Fold flags and defaults into settings. An explicit mode switch wins over
    /// the default mode; `--github-comment` implies Markdown and enables the
    /// limit check.
    pub fn resolve(
        plan_path: PathBuf,
        flags: ModeFlags,
        default_mode: ModeArg,
        target: TargetFlags,
        char_limit: usize,
    ) -> Self {
        let mode = flags.selected().unwrap_or_else(|| default_mode.into());
        let format = if target.markdown || target.github_comment {
            TextFormat::Markdown
        } else {
            TextFormat::Plain
        };

        Self {
            plan_path,
            mode,
            format,
            check_limit: target.github_comment,
            char_limit,
        }
    }
}
