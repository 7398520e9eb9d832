use crate::config::Config;
use crate::documents::{find_metadata_files, load_namespace};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use sqlts_codegen::{CodeGenerator, GeneratorOptions, TypeScriptGenerator};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Project directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Emit ambient `.d.ts` declaration files
    #[arg(long)]
    pub declaration: bool,

    /// Also declare each query's undeclared parameters
    #[arg(long)]
    pub parameters: bool,
}

impl GenerateArgs {
    fn generator_options(&self, config: &Config) -> GeneratorOptions {
        let mut options = config.generator.clone();
        if self.declaration {
            options.declare_namespace = true;
            options.export_interfaces = true;
        }
        if self.parameters {
            options.emit_parameters = true;
        }
        options
    }
}

pub fn generate(args: GenerateArgs, cwd: &str) -> Result<()> {
    let root = PathBuf::from(cwd).join(&args.path);
    let config = Config::load(&root)?;
    let src_dir = config.get_src_dir(&root);

    if !src_dir.exists() {
        return Err(anyhow!("Source directory does not exist: {:?}", src_dir));
    }

    let out_dir = match &args.out_dir {
        Some(out) => root.join(out),
        None => config.get_out_dir(&root),
    };

    let generator = TypeScriptGenerator::with_options(args.generator_options(&config));
    debug!(options = ?generator.options(), "Generator configured");

    println!("{}", "🔨 Generating TypeScript declarations...".bright_blue().bold());

    let files = find_metadata_files(&src_dir, Some(&out_dir))?;

    if files.is_empty() {
        println!("{}", "⚠️  No metadata documents found".yellow());
        return Ok(());
    }

    println!("Found {} files", files.len());

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let relative_path = file.strip_prefix(&src_dir).unwrap_or(file);

        match generate_file(file, relative_path, &generator, &out_dir, args.stdout) {
            Ok(output_path) => {
                success_count += 1;
                println!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    output_path
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    info!(generated = success_count, failed = error_count, "Generation finished");

    println!();
    if error_count == 0 {
        println!(
            "{} Generated {} files successfully",
            "✅".green(),
            success_count
        );
        Ok(())
    } else {
        Err(anyhow!(
            "Generated {} files, {} failed",
            success_count,
            error_count
        ))
    }
}

fn generate_file(
    file_path: &Path,
    relative_path: &Path,
    generator: &TypeScriptGenerator,
    out_dir: &Path,
    stdout: bool,
) -> Result<String> {
    let namespace = load_namespace(file_path)?;
    let mut output = generator.generate_namespace(&namespace)?;
    output.push_str(generator.options().newline());

    if stdout {
        print!("{}", output);
        return Ok("stdout".to_string());
    }

    let extension = if generator.options().declare_namespace {
        "d.ts"
    } else {
        "ts"
    };
    let output_file = out_dir.join(relative_path).with_extension(extension);

    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&output_file, output)?;
    debug!(namespace = namespace.name(), path = %output_file.display(), "Wrote declarations");

    Ok(output_file.display().to_string())
}
