use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use media_tidy::media::{Config, MediaTidy, MediaTidyConfig, ScanSummary};

/// Exit code when the root contains folders but none of them look like media releases.
const NO_MEDIA_EXIT_CODE: u8 = 3;

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Organize downloaded show and movie release folders"
)]
struct Args {
    /// Optional root directory containing release folders
    #[arg(value_hint = clap::ValueHint::DirPath)]
    path: Option<PathBuf>,

    /// Print debug information
    #[arg(short = 'D', long)]
    debug: bool,

    /// Overwrite existing files
    #[arg(short, long)]
    force: bool,

    /// Only print changes without moving files
    #[arg(short, long)]
    print: bool,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Combine CLI flags with the user config file.
    fn into_config(self, user_config: MediaTidyConfig) -> Config {
        let mut config = Config::from_user_config(user_config);
        config.debug |= self.debug;
        config.dryrun |= self.print;
        config.overwrite |= self.force;
        config.verbose |= self.verbose;
        config
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    if let Some(ref shell) = args.completion {
        media_tidy::generate_shell_completion(*shell, Args::command(), true, env!("CARGO_BIN_NAME"))?;
        return Ok(ExitCode::SUCCESS);
    }

    let root = media_tidy::resolve_input_path(args.path.as_deref())?;
    let config = args.into_config(MediaTidyConfig::get_user_config());
    let summary = MediaTidy::new(root, config).run()?;

    let status = exit_status(&summary);
    if status == NO_MEDIA_EXIT_CODE {
        media_tidy::print_warning!("No media folders found");
    }
    Ok(ExitCode::from(status))
}

/// Process exit status for a finished scan.
const fn exit_status(summary: &ScanSummary) -> u8 {
    if summary.folders > 0 && summary.media == 0 {
        NO_MEDIA_EXIT_CODE
    } else {
        0
    }
}
