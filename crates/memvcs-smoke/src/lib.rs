//! memvcs smoke test: exercise the VFS and the status query end to end.
//!
//! The sequence is fixed:
//!
//! 1. check whether `test.txt` exists
//! 2. write `Hello WASM!` to it if it doesn't
//! 3. read it back as text
//! 4. print the status report
//!
//! Output goes to any `Write` so tests can capture it.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use memvcs_core::{Repository, StatusOptions, StatusReport};

/// How the status report is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<label> <path>` per line.
    #[default]
    Human,
    /// `git status --porcelain` style.
    Porcelain,
    /// JSON array of `{path, classification}`.
    Json,
}

/// Smoke run configuration.
#[derive(Debug, Clone)]
pub struct SmokeConfig {
    /// File the run writes and reads back.
    pub path: String,
    /// Content written when the file is missing.
    pub content: String,
    pub format: OutputFormat,
    pub status: StatusOptions,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            path: "test.txt".to_string(),
            content: "Hello WASM!".to_string(),
            format: OutputFormat::Human,
            status: StatusOptions::default(),
        }
    }
}

/// Command-line flags for the smoke binary.
#[derive(Debug, Parser)]
#[command(name = "memvcs-smoke")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print status in `git status --porcelain` style
    #[arg(long, conflicts_with = "json")]
    pub porcelain: bool,

    /// Print status as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Also list unmodified entries
    #[arg(long)]
    pub all: bool,

    /// File to write and read back
    #[arg(long, default_value = "test.txt")]
    pub path: String,

    /// Content written when the file is missing
    #[arg(long, default_value = "Hello WASM!")]
    pub content: String,
}

impl From<Cli> for SmokeConfig {
    fn from(cli: Cli) -> Self {
        let format = if cli.porcelain {
            OutputFormat::Porcelain
        } else if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };
        let status = if cli.all {
            StatusOptions::full()
        } else {
            StatusOptions::default()
        };
        Self {
            path: cli.path,
            content: cli.content,
            format,
            status,
        }
    }
}

/// Run the smoke sequence against a fresh repository.
pub fn run(config: &SmokeConfig, out: &mut impl Write) -> Result<StatusReport> {
    let mut repo = Repository::new().with_status_options(config.status);
    run_with(&mut repo, config, out)
}

/// Run the smoke sequence against an existing repository.
pub fn run_with(
    repo: &mut Repository,
    config: &SmokeConfig,
    out: &mut impl Write,
) -> Result<StatusReport> {
    writeln!(out, "Checking if file exists...")?;
    let exists = repo.exists(&config.path);
    writeln!(out, "Exists: {exists}")?;

    if !exists {
        writeln!(out, "Writing file...")?;
        repo.write(&config.path, config.content.as_bytes());
    }

    writeln!(out, "Reading file...")?;
    let content = repo
        .read_to_string(&config.path)
        .with_context(|| format!("reading {}", config.path))?;
    writeln!(out, "Content: {content}")?;

    writeln!(out, "Status:")?;
    let report = repo.status().context("computing status")?;
    tracing::info!(entries = report.len(), "status computed");
    match config.format {
        OutputFormat::Human => write!(out, "{report}")?,
        OutputFormat::Porcelain => write!(out, "{}", report.porcelain())?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &report).context("serializing status")?;
            writeln!(out)?;
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use memvcs_core::Classification;
    use rstest::rstest;

    fn capture(config: &SmokeConfig) -> (String, StatusReport) {
        let mut buf = Vec::new();
        let report = run(config, &mut buf).unwrap();
        (String::from_utf8(buf).unwrap(), report)
    }

    #[test]
    fn default_run() {
        let (out, report) = capture(&SmokeConfig::default());
        assert_eq!(
            out,
            "Checking if file exists...\n\
             Exists: false\n\
             Writing file...\n\
             Reading file...\n\
             Content: Hello WASM!\n\
             Status:\n\
             untracked test.txt\n"
        );
        assert_eq!(report.get("test.txt"), Some(Classification::Untracked));
    }

    #[rstest]
    #[case::porcelain(OutputFormat::Porcelain, "?? test.txt\n")]
    #[case::json(OutputFormat::Json, "[{\"path\":\"test.txt\",\"classification\":\"untracked\"}]\n")]
    fn formats(#[case] format: OutputFormat, #[case] tail: &str) {
        let config = SmokeConfig {
            format,
            ..SmokeConfig::default()
        };
        let (out, _) = capture(&config);
        assert!(out.ends_with(tail), "{out}");
    }

    #[test]
    fn existing_file_is_not_rewritten() {
        let mut repo = Repository::new();
        repo.write("test.txt", b"already here");
        repo.commit().unwrap();

        let mut buf = Vec::new();
        let report = run_with(&mut repo, &SmokeConfig::default(), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Exists: true"));
        assert!(!out.contains("Writing file..."));
        assert!(out.contains("Content: already here"));
        assert!(out.ends_with("nothing to commit, working tree clean\n"));
        assert!(report.is_empty());
    }

    #[test]
    fn non_utf8_file_fails() {
        let mut repo = Repository::new();
        repo.write("test.txt", &[0xff, 0xfe]);
        let err = run_with(&mut repo, &SmokeConfig::default(), &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("reading test.txt"), "{err:#}");
    }

    fn parse(args: &[&str]) -> Result<SmokeConfig, clap::Error> {
        Cli::try_parse_from(std::iter::once("memvcs-smoke").chain(args.iter().copied()))
            .map(SmokeConfig::from)
    }

    #[test]
    fn parse_args() {
        let config = parse(&["--porcelain", "--path", "a.md", "--all"]).unwrap();
        assert_eq!(config.format, OutputFormat::Porcelain);
        assert_eq!(config.path, "a.md");
        assert!(config.status.include_unmodified);

        let config = parse(&["--json", "--content", "hi"]).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.content, "hi");
    }

    #[test]
    fn parse_defaults_match_config_default() {
        let config = parse(&[]).unwrap();
        let default = SmokeConfig::default();
        assert_eq!(config.format, OutputFormat::Human);
        assert_eq!(config.path, default.path);
        assert_eq!(config.content, default.content);
        assert!(!config.status.include_unmodified);
    }

    #[rstest]
    #[case::missing_value(&["--path"])]
    #[case::unknown_flag(&["--bogus"])]
    #[case::conflicting_formats(&["--porcelain", "--json"])]
    fn parse_rejects(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }
}
