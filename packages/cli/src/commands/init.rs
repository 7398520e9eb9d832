use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sqlts_codegen::GeneratorOptions;
use std::fs;
use std::path::PathBuf;

const EXAMPLE_DOCUMENT: &str = r#"{
  "name": "Films",
  "dmls": [
    {
      "methodName": "GetMyFilm",
      "queryText": "SELECT film_id, description, length FROM film WHERE film_id = @id",
      "firstResultSet": [
        { "columnOrdinal": 1, "columnName": "film_id", "isNullable": false, "systemTypeName": "int" },
        { "columnOrdinal": 2, "columnName": "description", "isNullable": true, "systemTypeName": "text" },
        { "columnOrdinal": 3, "columnName": "length", "isNullable": true, "systemTypeName": "smallint" }
      ],
      "parameters": [
        { "name": "@id", "dbType": "int", "length": 4 }
      ]
    }
  ]
}
"#;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Metadata directory
    #[arg(short, long, default_value = "queries")]
    pub src_dir: String,

    /// Output directory for generated declarations
    #[arg(short, long, default_value = "types")]
    pub out_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing sqlts project...".bright_blue().bold());

    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join("films.json");
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_DOCUMENT)?;
        println!("  {} Created films.json", "✓".green());
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        out_dir: args.out_dir.clone(),
        generator: GeneratorOptions::default(),
    };

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Describe your queries in {}/", args.src_dir);
    println!("  2. Run: sqlts generate");
    println!("  3. Check output in {}/", args.out_dir);

    Ok(())
}
