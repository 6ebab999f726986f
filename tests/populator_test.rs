use onboard::generator::{generate_structure, ConflictPolicy, GenerationResult};
use onboard::patterns::PathMatcher;
use onboard::populator::populate_documents;
use onboard::scanner::scan_template;
use onboard::substitute::VariableMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn vars(pairs: &[(&str, &str)]) -> VariableMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn materialize(
    template: &Path,
    target: &Path,
    variables: &VariableMap,
    policy: ConflictPolicy,
    matcher: &PathMatcher,
) -> GenerationResult {
    let manifest = scan_template(template, matcher).unwrap();
    let mut result = GenerationResult::default();
    generate_structure(&manifest, target, policy, &mut result).unwrap();
    populate_documents(&manifest, template, target, variables, policy, &mut result);
    result
}

/// Template used by most tests: one substituted file, one guide file and one
/// empty file in a subdirectory.
fn scenario_template() -> TempDir {
    let template = TempDir::new().unwrap();
    fs::create_dir(template.path().join("src")).unwrap();
    fs::write(template.path().join("README.md"), "Hi {{ author }}").unwrap();
    fs::write(template.path().join("README_guide.md"), "ignored").unwrap();
    fs::write(template.path().join("src/main.py"), "").unwrap();
    template
}

fn entry_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_scenario_with_default_patterns() {
    let template = scenario_template();
    let target = TempDir::new().unwrap();
    let out = target.path().join("out");
    let variables = vars(&[("author", "Ada")]);

    let result = materialize(
        template.path(),
        &out,
        &variables,
        ConflictPolicy::Force,
        &PathMatcher::default(),
    );

    assert_eq!(fs::read_to_string(out.join("README.md")).unwrap(), "Hi Ada");
    assert_eq!(fs::read_to_string(out.join("src/main.py")).unwrap(), "");
    assert!(!out.join("README_guide.md").exists());
    assert_eq!(result.files_written, 2);
    assert_eq!(result.files_excluded, 1);
    assert_eq!(result.files_skipped, 0);
    assert!(result.is_success());
    // No stray temporary siblings are left behind.
    assert_eq!(entry_names(&out), vec!["README.md", "src"]);
}

#[test]
fn test_include_pattern_resurrects_guide_file() {
    let template = scenario_template();
    let target = TempDir::new().unwrap();
    let out = target.path().join("out");
    let matcher = PathMatcher::new(&[], &["README_guide.md".to_string()]).unwrap();
    let variables = vars(&[("author", "Ada")]);

    let result =
        materialize(template.path(), &out, &variables, ConflictPolicy::Force, &matcher);

    assert_eq!(fs::read_to_string(out.join("README_guide.md")).unwrap(), "ignored");
    assert_eq!(result.files_written, 3);
    assert_eq!(result.files_excluded, 0);
}

#[test]
fn test_skip_preserves_existing_file() {
    let template = scenario_template();
    let target = TempDir::new().unwrap();
    let out = target.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("README.md"), "original").unwrap();
    let variables = vars(&[("author", "Ada")]);

    let result = materialize(
        template.path(),
        &out,
        &variables,
        ConflictPolicy::Skip,
        &PathMatcher::default(),
    );

    assert_eq!(fs::read_to_string(out.join("README.md")).unwrap(), "original");
    assert_eq!(result.files_skipped, 1);
    assert_eq!(result.files_written, 1);
}

#[test]
fn test_prompt_approved_overwrites() {
    let template = scenario_template();
    let target = TempDir::new().unwrap();
    let out = target.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("README.md"), "original").unwrap();
    let variables = vars(&[("author", "Ada")]);

    let result = materialize(
        template.path(),
        &out,
        &variables,
        ConflictPolicy::Prompt { approved: true },
        &PathMatcher::default(),
    );

    assert_eq!(fs::read_to_string(out.join("README.md")).unwrap(), "Hi Ada");
    assert_eq!(result.files_written, 2);
    assert_eq!(result.files_skipped, 0);
}

#[test]
fn test_prompt_denied_skips() {
    let template = scenario_template();
    let target = TempDir::new().unwrap();
    let out = target.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("README.md"), "original").unwrap();
    let variables = vars(&[("author", "Ada")]);

    let result = materialize(
        template.path(),
        &out,
        &variables,
        ConflictPolicy::Prompt { approved: false },
        &PathMatcher::default(),
    );

    assert_eq!(fs::read_to_string(out.join("README.md")).unwrap(), "original");
    assert_eq!(result.files_skipped, 1);
}

#[test]
fn test_dry_run_writes_nothing() {
    let template = scenario_template();
    let target = TempDir::new().unwrap();
    let out = target.path().join("out");
    let variables = vars(&[("author", "Ada")]);

    let result = materialize(
        template.path(),
        &out,
        &variables,
        ConflictPolicy::DryRun,
        &PathMatcher::default(),
    );

    assert!(!out.exists());
    assert_eq!(result.files_written, 2);
    assert_eq!(result.files_excluded, 1);
}

#[test]
fn test_dry_run_leaves_existing_target_untouched() {
    let template = scenario_template();
    let target = TempDir::new().unwrap();
    let out = target.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("keep.txt"), "keep").unwrap();
    let variables = vars(&[("author", "Ada")]);

    materialize(
        template.path(),
        &out,
        &variables,
        ConflictPolicy::DryRun,
        &PathMatcher::default(),
    );

    assert_eq!(entry_names(&out), vec!["keep.txt"]);
}

#[test]
fn test_second_run_with_skip_is_idempotent() {
    let template = scenario_template();
    let target = TempDir::new().unwrap();
    let out = target.path().join("out");
    let variables = vars(&[("author", "Ada")]);

    let first = materialize(
        template.path(),
        &out,
        &variables,
        ConflictPolicy::Skip,
        &PathMatcher::default(),
    );
    let second = materialize(
        template.path(),
        &out,
        &variables,
        ConflictPolicy::Skip,
        &PathMatcher::default(),
    );

    assert_eq!(first.files_written, 2);
    assert_eq!(second.files_written, 0);
    assert_eq!(second.files_skipped, 2);
    assert_eq!(fs::read_to_string(out.join("README.md")).unwrap(), "Hi Ada");
}

#[test]
fn test_same_inputs_produce_identical_trees() {
    let template = scenario_template();
    let target = TempDir::new().unwrap();
    let out_a = target.path().join("a");
    let out_b = target.path().join("b");
    let variables = vars(&[("author", "Ada")]);

    materialize(template.path(), &out_a, &variables, ConflictPolicy::Force, &PathMatcher::default());
    materialize(template.path(), &out_b, &variables, ConflictPolicy::Force, &PathMatcher::default());

    assert!(!dir_diff::is_different(&out_a, &out_b).unwrap());
}

#[test]
fn test_binary_file_copied_verbatim() {
    let template = TempDir::new().unwrap();
    let raw: &[u8] = b"\xff\xfe{{ author }}\x00";
    fs::write(template.path().join("logo.bin"), raw).unwrap();
    let target = TempDir::new().unwrap();
    let out = target.path().join("out");
    let variables = vars(&[("author", "Ada")]);

    let result = materialize(
        template.path(),
        &out,
        &variables,
        ConflictPolicy::Force,
        &PathMatcher::default(),
    );

    assert_eq!(fs::read(out.join("logo.bin")).unwrap(), raw);
    assert!(result.is_success());
}

#[test]
fn test_failed_file_does_not_abort_the_run() {
    let template = scenario_template();
    let target = TempDir::new().unwrap();
    let out = target.path().join("out");
    let variables = vars(&[("author", "Ada")]);

    let manifest = scan_template(template.path(), &PathMatcher::default()).unwrap();
    // Source disappears between scan and population.
    fs::remove_file(template.path().join("README.md")).unwrap();

    let mut result = GenerationResult::default();
    generate_structure(&manifest, &out, ConflictPolicy::Force, &mut result).unwrap();
    populate_documents(
        &manifest,
        template.path(),
        &out,
        &variables,
        ConflictPolicy::Force,
        &mut result,
    );

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].relative_path, "README.md");
    assert_eq!(result.files_written, 1);
    assert!(out.join("src/main.py").is_file());
    assert!(!result.is_success());
}
