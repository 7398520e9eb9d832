use crate::config::Config;
use crate::documents::{find_metadata_files, load_namespace};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use sqlts_codegen::{collect_diagnostics, supported_types, Diagnostic, GeneratorOptions};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Metadata document or directory (defaults to the configured source directory)
    pub input: Option<PathBuf>,

    /// Also check undeclared parameter types
    #[arg(long)]
    pub parameters: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// List the SQL types that can be mapped and exit
    #[arg(long)]
    pub list_types: bool,
}

/// One problem in `--format json` output, tagged with its document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiagnostic {
    pub file: String,
    pub method_name: Option<String>,
    pub property: Option<String>,
    pub error: String,
}

impl FileDiagnostic {
    fn from_diagnostic(file: &Path, diagnostic: &Diagnostic) -> Self {
        Self {
            file: file.display().to_string(),
            method_name: diagnostic.method_name.clone(),
            property: diagnostic.property.clone(),
            error: diagnostic.error.to_string(),
        }
    }

    fn load_failure(file: &Path, error: &anyhow::Error) -> Self {
        Self {
            file: file.display().to_string(),
            method_name: None,
            property: None,
            error: format!("{:#}", error),
        }
    }
}

/// Status lines go to stderr in JSON mode so stdout stays a single document
macro_rules! status {
    ($json:expr, $($arg:tt)*) => {
        if $json {
            eprintln!($($arg)*);
        } else {
            println!($($arg)*);
        }
    };
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    if args.list_types {
        for name in supported_types() {
            println!("{}", name);
        }
        return Ok(());
    }

    let root = PathBuf::from(cwd);
    let config = Config::load(&root)?;
    let input = match &args.input {
        Some(input) => root.join(input),
        None => config.get_src_dir(&root),
    };

    if !input.exists() {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    }

    let json = args.format == "json";
    let mut options = config.generator.clone();
    options.emit_parameters |= args.parameters;

    status!(json, "🔍 {} metadata documents", "Checking".green().bold());
    status!(json, "   Input: {}", input.display());
    status!(json, "");

    let files = find_metadata_files(&input, Some(&config.get_out_dir(&root)))?;
    let mut reported = Vec::new();

    for file in &files {
        reported.extend(check_file(file, &options, json));
    }

    if json {
        println!("{}", render_json(&reported)?);
    }

    let total_problems = reported.len();
    status!(
        json,
        "✨ {} Check complete!",
        if total_problems > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    status!(json, "   Files checked: {}", files.len());

    if total_problems > 0 {
        return Err(anyhow!("{} problems found", total_problems));
    }

    status!(json, "   {} No issues found!", "✓".green());
    Ok(())
}

/// Problems in one document. Text mode prints them as it goes.
fn check_file(file_path: &Path, options: &GeneratorOptions, json: bool) -> Vec<FileDiagnostic> {
    let namespace = match load_namespace(file_path) {
        Ok(namespace) => namespace,
        Err(err) => {
            if !json {
                eprintln!("{} {}: {:#}", "✗".red(), file_path.display(), err);
            }
            return vec![FileDiagnostic::load_failure(file_path, &err)];
        }
    };

    let diagnostics = collect_diagnostics(&namespace, options);
    if !json && !diagnostics.is_empty() {
        print_diagnostics(file_path, &diagnostics);
    }

    diagnostics
        .iter()
        .map(|d| FileDiagnostic::from_diagnostic(file_path, d))
        .collect()
}

fn render_json(reported: &[FileDiagnostic]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reported)?)
}

fn print_diagnostics(file_path: &Path, diagnostics: &[Diagnostic]) {
    println!("{}", file_path.display());

    for diagnostic in diagnostics {
        println!("  {} {}", "error".red().bold(), diagnostic);
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const BAD_TYPE: &str = r#"{
        "name": "Films",
        "dmls": [{
            "methodName": "GetFilms",
            "firstResultSet": [
                { "columnName": "Id", "columnOrdinal": 1, "systemTypeName": "int", "isNullable": false },
                { "columnName": "Shape", "columnOrdinal": 2, "systemTypeName": "geography", "isNullable": true }
            ]
        }]
    }"#;

    #[test]
    fn test_json_output_is_one_array_across_files() {
        let root = std::env::temp_dir().join("sqlts_check_json_test");
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("a.json"), BAD_TYPE).unwrap();
        fs::write(root.join("b.json"), "not json").unwrap();

        let options = GeneratorOptions::default();
        let mut reported = Vec::new();
        for file in find_metadata_files(&root, None).unwrap() {
            reported.extend(check_file(&file, &options, true));
        }

        let rendered = render_json(&reported).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 2);

        assert!(entries[0]["file"].as_str().unwrap().ends_with("a.json"));
        assert_eq!(entries[0]["methodName"], "GetFilms");
        assert_eq!(entries[0]["property"], "Shape");
        assert!(entries[0]["error"].as_str().unwrap().contains("geography"));

        assert!(entries[1]["file"].as_str().unwrap().ends_with("b.json"));
        assert!(entries[1]["methodName"].is_null());

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_clean_run_renders_empty_array() {
        assert_eq!(render_json(&[]).unwrap(), "[]");
    }
}
