//! slidemerge CLI - slide deck template merge tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use slidemerge::{json, merge, JsonFormat, MergeJob, MergeReport, SlideMerge};

#[derive(Parser)]
#[command(name = "slidemerge")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Fill slide deck templates from a merge job", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the placeholder tokens in a document
    Scan {
        /// Input document (JSON)
        #[arg(value_name = "DOC")]
        input: PathBuf,

        /// Merge job; tokens it does not cover are listed as missing
        #[arg(short, long, value_name = "JOB")]
        job: Option<PathBuf>,

        /// Print token locations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Merge a document with a job and field overrides
    Merge {
        /// Input document (JSON)
        #[arg(value_name = "DOC")]
        input: PathBuf,

        /// Merge job file
        #[arg(short, long, value_name = "JOB", env = "SLIDEMERGE_JOB")]
        job: Option<PathBuf>,

        /// Image for the sentinel placeholder (overrides the job's image)
        #[arg(short, long, value_name = "FILE")]
        image: Option<PathBuf>,

        /// Field value, e.g. --set CUSTOMER_NAME=Acme (repeatable, overrides the job)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Print the merge report as JSON
        #[arg(long)]
        report: bool,
    },

    /// Show document information
    Info {
        /// Input document (JSON)
        #[arg(value_name = "DOC")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan { input, job, json } => cmd_scan(&input, job.as_deref(), json),
        Commands::Merge {
            input,
            job,
            image,
            fields,
            output,
            compact,
            report,
        } => cmd_merge(
            &input,
            job.as_deref(),
            image.as_deref(),
            fields,
            output.as_deref(),
            compact,
            report,
        ),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in {:?}", s));
    }
    Ok((key.to_string(), value.to_string()))
}

fn cmd_scan(
    input: &Path,
    job: Option<&Path>,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = json::load_document(input)?;
    let locations = merge::scan_locations(&doc);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&locations)?);
        return Ok(());
    }

    let tokens = merge::scan(&doc);
    println!("{}", "Tokens".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for token in &tokens {
        let places: Vec<String> = locations
            .iter()
            .filter(|l| &l.token == token)
            .map(|l| match l.cell {
                Some((row, column)) => {
                    format!("p{}#{}[{},{}]", l.page, l.shape_id, row, column)
                }
                None => format!("p{}#{}", l.page, l.shape_id),
            })
            .collect();
        println!("  {} {}", token.bold(), places.join(" ").dimmed());
    }
    println!("\n{} {} distinct token(s)", "Found".green(), tokens.len());

    if let Some(path) = job {
        let job = MergeJob::load(path)?;
        log::debug!("Loaded job from {}", path.display());
        let missing = job.mapping().missing(&tokens);
        if missing.is_empty() {
            println!("{}", "All tokens are mapped".green());
        } else {
            println!("\n{}", "Missing".yellow().bold());
            for token in &missing {
                println!("  {}", token.yellow());
            }
        }
    }

    Ok(())
}

fn cmd_merge(
    input: &Path,
    job: Option<&Path>,
    image: Option<&Path>,
    fields: Vec<(String, String)>,
    output: Option<&Path>,
    compact: bool,
    print_report: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut job = match job {
        Some(path) => {
            log::debug!("Loaded job from {}", path.display());
            MergeJob::load(path)?
        }
        None => MergeJob::default(),
    };
    if let Some(path) = image {
        job.image = Some(path.to_path_buf());
    }

    let mut merger = SlideMerge::from_job(&job)?;
    for (key, value) in fields {
        merger = merger.with_field(&key, value);
    }
    let result = merger.merge_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    if let Some(path) = output {
        result.save(path, format)?;
        print_summary(&result.report);
        println!("{} {}", "Saved to".green(), path.display());
        if print_report {
            println!("{}", result.report_json(format)?);
        }
    } else {
        // document owns stdout
        println!("{}", result.to_json(format)?);
        if print_report {
            eprintln!("{}", result.report_json(format)?);
        }
    }

    Ok(())
}

fn print_summary(report: &MergeReport) {
    println!("{}", "Merge Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Shapes".bold(), report.shapes_visited);
    println!("{}: {}", "Substitutions".bold(), report.substitutions);
    println!(
        "{}: {} classified, {} filled",
        "Tables".bold(),
        report.tables_classified,
        report.tables_filled
    );
    println!(
        "{}: {}",
        "Image".bold(),
        if report.image_swapped { "Swapped" } else { "No" }
    );

    if !report.missing.is_empty() {
        let missing: Vec<&str> = report.missing.iter().map(String::as_str).collect();
        println!("{}: {}", "Missing".yellow().bold(), missing.join(", "));
    }
    if !report.is_clean() {
        println!(
            "{}: {} skipped element(s)",
            "Warnings".yellow().bold(),
            report.failures.total()
        );
        for failure in &report.failure_log {
            println!(
                "  {} page {}, shape {}: {}",
                "!".yellow(),
                failure.page,
                failure.shape_id,
                failure.message
            );
        }
    }
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = json::load_document(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!(
        "{}: {} x {} pt",
        "Slide size".bold(),
        doc.metadata.slide_width,
        doc.metadata.slide_height
    );

    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = doc.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = doc.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let tables: usize = doc.pages.iter().map(|p| p.tables().count()).sum();
    let paragraphs: usize = doc.pages.iter().map(|p| p.paragraph_count()).sum();
    let tokens = merge::scan(&doc);

    println!("{}: {}", "Shapes".bold(), doc.shape_count());
    println!("{}: {}", "Paragraphs".bold(), paragraphs);
    println!("{}: {}", "Tables".bold(), tables);
    println!("{}: {}", "Images".bold(), doc.resources.len());
    println!("{}: {}", "Tokens".bold(), tokens.len());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "slidemerge".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Slide deck template merge tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/slidemerge".dimmed()
    );
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("CUSTOMER_NAME=Acme Corp"),
            Ok(("CUSTOMER_NAME".to_string(), "Acme Corp".to_string()))
        );
        assert_eq!(
            parse_key_value("NOTE=a=b"),
            Ok(("NOTE".to_string(), "a=b".to_string()))
        );
        assert!(parse_key_value("NOVALUE").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_cli_parses_merge() {
        let cli = Cli::try_parse_from([
            "slidemerge",
            "merge",
            "deck.json",
            "--job",
            "job.json",
            "--set",
            "PM=Dana",
            "--set",
            "DATE=14/11/2025",
            "-o",
            "out.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Merge { fields, output, .. } => {
                assert_eq!(fields.len(), 2);
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected merge"),
        }
    }

    #[test]
    fn test_merge_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("deck.json");
        fs::write(
            &input,
            r#"{"pages": [{"number": 1, "shapes": [{"type": "text", "id": 1, "name": "Title",
                "geometry": {"left": 0, "top": 0, "width": 100, "height": 20},
                "text": {"paragraphs": [{"runs": [{"text": "Hi {{PM}}"}]}]}}]}]}"#,
        )
        .unwrap();
        let output = dir.path().join("out.json");

        cmd_merge(
            &input,
            None,
            None,
            vec![("PM".to_string(), "Dana".to_string())],
            Some(&output),
            true,
            false,
        )
        .unwrap();

        let merged = json::load_document(&output).unwrap();
        assert_eq!(merged.plain_text(), "Hi Dana");
    }

    #[test]
    fn test_set_overrides_braced_job_field() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("deck.json");
        fs::write(
            &input,
            r#"{"pages": [{"number": 1, "shapes": [{"type": "text", "id": 1,
                "geometry": {"left": 0, "top": 0, "width": 100, "height": 20},
                "text": {"paragraphs": [{"runs": [{"text": "Owner: {{PM}}"}]}]}}]}]}"#,
        )
        .unwrap();
        let job = dir.path().join("job.json");
        fs::write(&job, r#"{"fields": {"{{PM}}": "Lee"}}"#).unwrap();
        let output = dir.path().join("out.json");

        cmd_merge(
            &input,
            Some(&job),
            None,
            vec![("PM".to_string(), "Dana".to_string())],
            Some(&output),
            true,
            false,
        )
        .unwrap();

        let merged = json::load_document(&output).unwrap();
        assert_eq!(merged.plain_text(), "Owner: Dana");
    }
}
