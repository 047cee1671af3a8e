use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use serde::Deserialize;

use media_tidy::print_error;

const DEFAULT_OUTPUT: &str = "movies.txt";

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Write the sorted folder names of a directory to a text file"
)]
struct Args {
    /// Optional input directory
    #[arg(value_hint = clap::ValueHint::DirPath)]
    path: Option<PathBuf>,

    /// Output file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Only print folder names without writing the output file
    #[arg(short, long)]
    print: bool,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,
}

/// Config from the user config file
#[derive(Debug, Default, Deserialize)]
struct DirListConfig {
    #[serde(default)]
    output: Option<PathBuf>,
}

/// Wrapper needed for parsing the user config file section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    dirlist: DirListConfig,
}

impl DirListConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    fn get_user_config() -> Self {
        media_tidy::config::CONFIG_PATH
            .as_deref()
            .filter(|path| path.exists())
            .and_then(|path| {
                fs::read_to_string(path)
                    .map_err(|e| {
                        print_error!("Error reading config file {}: {e}", path.display());
                    })
                    .ok()
            })
            .and_then(|config_string| {
                Self::from_toml_str(&config_string)
                    .map_err(|e| print_error!("{e:#}"))
                    .ok()
            })
            .unwrap_or_default()
    }

    /// Parse configuration from a TOML string.
    fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.dirlist)
            .context("Failed to parse dirlist config TOML")
    }
}

/// Output file from CLI argument, user config or the default name.
fn output_path(args_output: Option<PathBuf>, user_config: DirListConfig) -> PathBuf {
    args_output
        .or(user_config.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
}

/// One folder name per line.
fn format_listing(folders: &[String]) -> String {
    folders.iter().map(|name| format!("{name}\n")).collect()
}

fn write_listing(root: &Path, output: &Path, print: bool) -> Result<usize> {
    let folders = media_tidy::media::list_folders(root)?;
    if folders.is_empty() {
        println!("No folders found");
        return Ok(0);
    }
    if print {
        print!("{}", format_listing(&folders));
    } else {
        fs::write(output, format_listing(&folders))
            .with_context(|| format!("Failed to write output file: {}", output.display()))?;
        println!(
            "{}",
            format!("Wrote {} folder names to {}", folders.len(), output.display()).green()
        );
    }
    Ok(folders.len())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(ref shell) = args.completion {
        return media_tidy::generate_shell_completion(*shell, Args::command(), true, env!("CARGO_BIN_NAME"));
    }
    let root = media_tidy::resolve_input_path(args.path.as_deref())?;
    let output = output_path(args.output, DirListConfig::get_user_config());
    write_listing(&root, &output, args.print)?;
    Ok(())
}
