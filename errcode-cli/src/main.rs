use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use errcode_codegen::{CodeGenerator, EmitterRegistry};
use errcode_spec::loader::DEFAULT_CONTRACT_FILE;
use errcode_spec::ValidationReport;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "errcode", about = "Generate error-code modules from a contract file")]
#[command(version)]
struct Cli {
    /// Contract file (YAML or JSON)
    #[arg(short, long, default_value = DEFAULT_CONTRACT_FILE)]
    contract: PathBuf,
    /// Target language: go, python or rust
    #[arg(short, long)]
    language: String,
    /// Directory the generated file is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> ExitCode {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cmd_generate(&cli.contract, &cli.language, &cli.output_dir) {
        Ok(path) => {
            println!("{} Generated {}", "✓".green().bold(), path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(1)
        }
    }
}

fn cmd_generate(contract_path: &Path, language: &str, output_dir: &Path) -> Result<PathBuf> {
    let (contract, report) = errcode_spec::load_file(contract_path)?;
    print_warnings(&report);

    let registry = EmitterRegistry::new();
    let file = CodeGenerator::new(&registry)
        .generate(&contract, language)
        .with_context(|| {
            format!(
                "Failed to generate {language} module for '{}'",
                contract_path.display()
            )
        })?;

    let path = file.write_to_dir(output_dir)?;
    Ok(path)
}

fn print_warnings(report: &ValidationReport) {
    for entry in report.warnings() {
        eprintln!(
            "  {} [{}] {} ({}:{})",
            "warning".yellow().bold(),
            entry.code.dimmed(),
            entry.message,
            entry.file.dimmed(),
            entry.path.dimmed(),
        );
        if let Some(suggestion) = &entry.suggestion {
            eprintln!("    {} {}", "hint:".cyan(), suggestion);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("fixtures")
            .join(name)
            .join("contract_error.yml")
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["errcode", "--language", "go"]).unwrap();
        assert_eq!(cli.contract, PathBuf::from("contract_error.yml"));
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert_eq!(cli.language, "go");
    }

    #[test]
    fn cli_requires_language() {
        let err = Cli::try_parse_from(["errcode"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn generate_writes_each_language() {
        let tmp = TempDir::new().unwrap();
        for (language, file_name) in [
            ("go", "error_code.go"),
            ("python", "error_code.py"),
            ("rust", "error_code.rs"),
        ] {
            let path = cmd_generate(&fixture("users"), language, tmp.path()).unwrap();
            assert_eq!(path, tmp.path().join(file_name));
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(content.contains("USR_NOT_FOUND"));
        }
    }

    #[test]
    fn generate_overwrites_existing_output() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("error_code.go"), "stale").unwrap();

        cmd_generate(&fixture("flat"), "go", tmp.path()).unwrap();
        let content = std::fs::read_to_string(tmp.path().join("error_code.go")).unwrap();
        assert!(content.contains("PAY_DECLINED"));
    }

    #[test]
    fn duplicate_contract_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let err = cmd_generate(&fixture("duplicate"), "go", tmp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("E_DUPLICATE_CODE"));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn unsupported_language_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let err = cmd_generate(&fixture("users"), "cobol", tmp.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("cobol"));
        assert!(message.contains("go, python, rust"));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_contract_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = cmd_generate(&tmp.path().join("absent.yml"), "go", tmp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("absent.yml"));
    }
}
