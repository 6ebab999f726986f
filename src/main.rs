//! Onboard's main application entry point and orchestration logic.
//! Parses command-line arguments, resolves the conflict policy, runs the
//! scan, generate, populate and validate stages and renders the outcome.

use std::path::Path;

use onboard::{
    cli::{get_args, Args},
    config::build_variables,
    error::{default_error_handler, Result},
    generator::{generate_structure, ConflictPolicy, GenerationResult},
    manifest::{EntryKind, Manifest},
    patterns::PathMatcher,
    populator::populate_documents,
    prompt::{DialoguerPrompter, Prompter},
    scanner::scan_template,
    validator::{validate_target, MismatchKind, ValidationReport},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    match run(args) {
        Err(err) => default_error_handler(err),
        Ok(result) => {
            if !result.is_success() {
                std::process::exit(1);
            }
        }
    }
}

/// Maps the CLI flags to the per-run conflict policy.
///
/// Without `--force`, `--skip-existing` or `--dry-run` the policy is
/// `Prompt`, resolved to a concrete answer here, before the pipeline runs.
/// The question is only asked when the target already has content.
fn resolve_conflict_policy(args: &Args, prompt: &dyn Prompter) -> Result<ConflictPolicy> {
    if args.dry_run {
        return Ok(ConflictPolicy::DryRun);
    }
    if args.force {
        return Ok(ConflictPolicy::Force);
    }
    if args.skip_existing {
        return Ok(ConflictPolicy::Skip);
    }

    let approved = if target_has_content(&args.target) {
        prompt.confirm(
            false,
            format!(
                "Target directory '{}' already has content. Overwrite existing files?",
                args.target.display()
            ),
        )?
    } else {
        false
    };
    Ok(ConflictPolicy::Prompt { approved })
}

fn target_has_content(target: &Path) -> bool {
    std::fs::read_dir(target).map(|mut entries| entries.next().is_some()).unwrap_or(false)
}

/// Prints the planned action for every manifest entry, in manifest order.
fn print_plan(manifest: &Manifest, target_root: &Path) {
    for entry in manifest.entries() {
        let action = match (entry.kind, entry.included) {
            (EntryKind::Directory, true) => "create",
            (EntryKind::File, true) => "write",
            (_, false) => "exclude",
        };
        println!("{:<8} {}", action, target_root.join(&entry.relative_path).display());
    }
}

fn render_summary(
    args: &Args,
    policy: ConflictPolicy,
    result: &GenerationResult,
    report: Option<&ValidationReport>,
) {
    if policy.is_dry_run() {
        println!(
            "Dry run: {} directories and {} files would be created in '{}'.",
            result.directories_created,
            result.files_written,
            args.target.display()
        );
        return;
    }

    for failure in &result.errors {
        eprintln!("failed: '{}': {}", failure.relative_path, failure.reason);
    }
    if let Some(report) = report {
        for mismatch in &report.mismatches {
            match mismatch.kind {
                MismatchKind::Missing => {
                    eprintln!("validation: expected entry is missing: '{}'", mismatch.relative_path)
                }
                MismatchKind::Unexpected => {
                    eprintln!("validation: excluded entry is present: '{}'", mismatch.relative_path)
                }
            }
        }
    }

    let counts = format!(
        "{} directories created, {} files written, {} skipped, {} excluded",
        result.directories_created,
        result.files_written,
        result.files_skipped,
        result.files_excluded
    );
    if result.is_success() {
        println!("Project generated successfully in '{}' ({}).", args.target.display(), counts);
    } else {
        println!(
            "Project generated with {} failed file(s) in '{}' ({}).",
            result.errors.len(),
            args.target.display(),
            counts
        );
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Compiles the exclude and include patterns
/// 2. Scans the template tree into a manifest
/// 3. Builds the variable map
/// 4. Resolves the conflict policy, prompting if needed
/// 5. Generates directories, populates files, validates the result
fn run(args: Args) -> Result<GenerationResult> {
    let prompt = DialoguerPrompter::new();

    let matcher = PathMatcher::new(&args.exclude, &args.include)?;
    let manifest = scan_template(&args.template, &matcher)?;
    let variables = build_variables(&args)?;
    let policy = resolve_conflict_policy(&args, &prompt)?;

    let mut result = GenerationResult::default();
    generate_structure(&manifest, &args.target, policy, &mut result)?;
    populate_documents(&manifest, &args.template, &args.target, &variables, policy, &mut result);

    let report = if policy.is_dry_run() { None } else { Some(validate_target(&manifest, &args.target)) };

    if args.json {
        let summary = serde_json::json!({ "result": &result, "validation": &report });
        println!(
            "{}",
            serde_json::to_string_pretty(&summary)
                .map_err(|e| onboard::error::Error::ConfigError(e.to_string()))?
        );
    } else {
        if policy.is_dry_run() {
            print_plan(&manifest, &args.target);
        }
        render_summary(&args, policy, &result, report.as_ref());
    }

    Ok(result)
}
