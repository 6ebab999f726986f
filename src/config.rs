//! Variable map construction for a run.
//! Merges an optional variables file (JSON or YAML), generic `--var` pairs
//! and the dedicated project flags, then fills in derived defaults for the
//! reserved variable names. The pipeline itself treats every entry as an
//! ordinary mapping with no special behavior.

use crate::cli::Args;
use crate::error::{Error, Result};
use crate::substitute::VariableMap;
use cruet::Inflector;
use indexmap::IndexMap;
use log::debug;
use std::path::Path;

/// Reserved variable names with conventional meaning.
pub const RESERVED_VARIABLES: [&str; 5] =
    ["project_name", "package_name", "project_description", "author", "author_email"];

/// Loads a variables file, trying JSON first and falling back to YAML.
///
/// Non-string values are kept in their JSON rendering, so `version: 2`
/// substitutes as `2`.
///
/// # Errors
/// * `Error::ConfigError` if the file cannot be read or parsed
pub fn load_variables_file(path: &Path) -> Result<VariableMap> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::ConfigError(format!("cannot read variables file '{}': {}", path.display(), e))
    })?;
    debug!("Loading variables from {}", path.display());

    let raw: IndexMap<String, serde_json::Value> = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(_) => serde_yaml::from_str(&content).map_err(|e| {
            Error::ConfigError(format!("invalid variables file '{}': {}", path.display(), e))
        })?,
    };

    Ok(raw
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (name, value)
        })
        .collect())
}

/// Parses one `--var` pair of the form `name=value`.
pub fn parse_variable(pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(Error::ConfigError(format!("invalid --var '{}': expected name=value", pair))),
    }
}

/// Builds the variable map for a run.
///
/// Precedence, lowest to highest: variables file, `--var` pairs, dedicated
/// flags. Reserved names left unset afterwards receive derived defaults.
pub fn build_variables(args: &Args) -> Result<VariableMap> {
    let mut variables = VariableMap::new();

    if let Some(path) = &args.variables_file {
        variables.extend(load_variables_file(path)?);
    }

    for pair in &args.var {
        let (name, value) = parse_variable(pair)?;
        variables.insert(name, value);
    }

    let flag_values = [
        ("project_name", &args.project_name),
        ("package_name", &args.package_name),
        ("project_description", &args.project_description),
        ("author", &args.author),
        ("author_email", &args.author_email),
    ];
    for (name, value) in flag_values {
        if let Some(value) = value {
            variables.insert(name.to_string(), value.clone());
        }
    }

    apply_derived_defaults(&mut variables, &args.target);
    debug!("Template variables: {:?}", variables);
    Ok(variables)
}

fn apply_derived_defaults(variables: &mut VariableMap, target: &Path) {
    if !variables.contains_key("project_name") {
        let name =
            target.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        variables.insert("project_name".to_string(), name);
    }
    if !variables.contains_key("package_name") {
        let package_name = variables["project_name"].to_snake_case();
        variables.insert("package_name".to_string(), package_name);
    }
    if !variables.contains_key("project_description") {
        let description = format!("A project named {}", variables["project_name"]);
        variables.insert("project_description".to_string(), description);
    }
    if !variables.contains_key("author") {
        let author = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_default();
        variables.insert("author".to_string(), author);
    }
    if !variables.contains_key("author_email") {
        let author = &variables["author"];
        let email = if author.is_empty() {
            String::new()
        } else {
            format!("{}@example.com", author.to_lowercase().replace(' ', "."))
        };
        variables.insert("author_email".to_string(), email);
    }
}
