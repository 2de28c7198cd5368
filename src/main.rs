mod commands;
mod config;
mod context;
mod output;
mod plan;
mod summary;
mod test_helpers;
mod traits;

use clap::Parser;
use clap::error::ErrorKind;
use commands::SummarizeCommand;
use config::{CHAR_LIMIT_ENV, MODE_ENV, ModeArg, ModeFlags, Settings, TargetFlags};
use context::Context;
use std::path::PathBuf;
use std::process::ExitCode;
use summary::DEFAULT_CHAR_LIMIT;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tfsummary")]
#[command(about = "Summarize a Terraform JSON plan as plain text or Markdown", long_about = None)]
#[command(version)]
struct Cli {
    /// Plan in JSON form (terraform show -json plan.out > plan.json)
    plan: PathBuf,

    /// One line per change, diff style
    #[arg(long, group = "view")]
    short: bool,

    /// Addresses grouped by change category
    #[arg(long, group = "view")]
    detail: bool,

    /// Only resources with no changes
    #[arg(long, group = "view")]
    no_op: bool,

    /// Render Markdown instead of plain text
    #[arg(long)]
    markdown: bool,

    /// Render Markdown for a pull request comment and check its length
    #[arg(long)]
    github_comment: bool,

    /// Presentation used when no mode switch is given
    #[arg(long, value_enum, env = MODE_ENV, default_value_t = ModeArg::Basic)]
    mode: ModeArg,

    /// Maximum comment length in characters
    #[arg(long, env = CHAR_LIMIT_ENV, default_value_t = DEFAULT_CHAR_LIMIT)]
    char_limit: usize,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings::resolve(
            self.plan.clone(),
            ModeFlags {
                short: self.short,
                detail: self.detail,
                no_op: self.no_op,
            },
            self.mode,
            TargetFlags {
                markdown: self.markdown,
                github_comment: self.github_comment,
            },
            self.char_limit,
        )
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Best effort: the exit code still reports the failure if stderr is closed.
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_logging(cli.verbose);

    let ctx = Context::new();
    match SummarizeCommand::execute(&ctx, &cli.settings()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ctx.output.error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

/// Initializes logging on stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
