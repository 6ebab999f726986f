//! Command-line interface implementation for onboard.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for onboard.
#[derive(Parser, Debug)]
#[command(version, about = "Onboard: generate project structures from template folders", long_about = None)]
pub struct Args {
    /// Path to the template directory
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Directory where the generated project will be created
    #[arg(value_name = "TARGET_DIR")]
    pub target: PathBuf,

    /// Overwrite existing files without prompting
    #[arg(short, long, conflicts_with_all = ["dry_run", "skip_existing"])]
    pub force: bool,

    /// Show what would be created without making any changes
    #[arg(short, long, conflicts_with = "skip_existing")]
    pub dry_run: bool,

    /// Keep existing files instead of prompting to overwrite them
    #[arg(long)]
    pub skip_existing: bool,

    /// Exclude paths matching the glob pattern; can be repeated
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Include paths matching the glob pattern even if they are excluded;
    /// can be repeated and wins over every exclusion
    #[arg(long, value_name = "GLOB")]
    pub include: Vec<String>,

    /// Set a template variable; can be repeated
    #[arg(long, value_name = "NAME=VALUE")]
    pub var: Vec<String>,

    /// Read template variables from a JSON or YAML file
    #[arg(long, value_name = "PATH")]
    pub variables_file: Option<PathBuf>,

    /// Project name, replaces {{ project_name }} in template files
    #[arg(long)]
    pub project_name: Option<String>,

    /// Package name, replaces {{ package_name }} in template files
    #[arg(long)]
    pub package_name: Option<String>,

    /// Project description, replaces {{ project_description }}
    #[arg(long)]
    pub project_description: Option<String>,

    /// Author of the project, replaces {{ author }}
    #[arg(long)]
    pub author: Option<String>,

    /// Email of the author, replaces {{ author_email }}
    #[arg(long)]
    pub author_email: Option<String>,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
