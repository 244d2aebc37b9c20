//! docaudit CLI - bilingual DOCX emphasis audit tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docaudit::audit::{analyze, extract_toc};
use docaudit::{
    parse_file_with_options, AlignMode, Auditor, DocumentAudit, JsonFormat, Language,
    ParseOptions, ReportFormat,
};

#[derive(Parser)]
#[command(name = "docaudit")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Compare bold and underlined text across Chinese and English DOCX files", long_about = None)]
struct Cli {
    /// Chinese DOCX file
    #[arg(value_name = "CHI")]
    chinese: Option<PathBuf>,

    /// English DOCX file
    #[arg(value_name = "ENG")]
    english: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a document pair and write a comparison report
    Audit {
        /// Chinese DOCX file
        #[arg(value_name = "CHI")]
        chinese: PathBuf,

        /// English DOCX file
        #[arg(value_name = "ENG")]
        english: PathBuf,

        /// Output file (Bilingual_Audit_Report.html next to the Chinese file if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write a JSON report instead of HTML
        #[arg(long)]
        json: bool,

        /// Analyze the documents one after the other
        #[arg(long)]
        sequential: bool,
    },

    /// Print the table of contents titles of a document
    Toc {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Document language
        #[arg(long, value_enum, default_value = "eng")]
        lang: Lang,
    },

    /// Print the aligned sections of a document as JSON
    Sections {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Document language
        #[arg(long, value_enum, default_value = "eng")]
        lang: Lang,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Lang {
    /// Chinese ("頁碼" TOC keyword, "甲部：" titles)
    Chi,
    /// English ("Page" TOC keyword, "Part A:" titles)
    Eng,
}

impl From<Lang> for Language {
    fn from(lang: Lang) -> Self {
        match lang {
            Lang::Chi => Language::Chinese,
            Lang::Eng => Language::English,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Audit {
            chinese,
            english,
            output,
            json,
            sequential,
        }) => cmd_audit(&chinese, &english, output, json, sequential),
        Some(Commands::Toc { input, lang }) => cmd_toc(&input, lang),
        Some(Commands::Sections {
            input,
            lang,
            output,
            compact,
        }) => cmd_sections(&input, lang, output.as_deref(), compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match (cli.chinese, cli.english) {
            (Some(chinese), Some(english)) => cmd_audit(&chinese, &english, None, false, false),
            _ => {
                println!("{}", "Usage: docaudit <CHI> <ENG>".yellow());
                println!("       docaudit --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_audit(
    chinese: &Path,
    english: &Path,
    output: Option<PathBuf>,
    json: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut auditor = Auditor::new().lenient();
    if json {
        auditor = auditor.with_format(ReportFormat::Json(JsonFormat::Pretty));
    }
    if sequential {
        auditor = auditor.sequential();
    }
    if let Some(path) = output {
        auditor = auditor.with_output(path);
    }

    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    log::debug!("Auditing {} against {}", chinese.display(), english.display());

    pb.set_message("Analyzing documents...");
    let report = auditor.audit(chinese, english)?;
    pb.inc(1);

    pb.set_message("Writing report...");
    let content = auditor.render(&report)?;
    let path = auditor.output_path(chinese);
    fs::write(&path, content)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!();
    print_summary("Chinese", &report.chinese);
    print_summary("English", &report.english);
    println!();
    println!("{} {}", "Report saved to".green(), path.display());

    Ok(())
}

fn print_summary(label: &str, audit: &DocumentAudit) {
    let aligned = format!(
        "{}/{} sections aligned",
        audit.sections.len(),
        audit.titles.len()
    );
    let mode = match audit.mode {
        AlignMode::Toc => aligned.as_str().normal(),
        AlignMode::WholeDocument => "no TOC, whole document".yellow(),
        AlignMode::Unavailable => "not available".red(),
    };

    println!("{}", label.cyan().bold());
    println!("  {} {}", "├─".dimmed(), audit.source.display());
    println!("  {} {}", "├─".dimmed(), mode);
    println!(
        "  {} {} bold, {} underlined",
        "└─".dimmed(),
        audit.stats.bold_count,
        audit.stats.underline_count
    );
}

fn cmd_toc(input: &Path, lang: Lang) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Language::from(lang).profile();
    let doc = parse_file_with_options(input, ParseOptions::new().lenient())?;
    let pattern = profile.compile()?;
    let titles = extract_toc(doc.tables(), profile.toc_keyword, &pattern);

    if titles.is_empty() {
        println!(
            "{} (keyword \"{}\")",
            "No table of contents found".yellow(),
            profile.toc_keyword
        );
        return Ok(());
    }

    println!("{}", "Table of Contents".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (i, title) in titles.iter().enumerate() {
        println!("{:>3}. {}", i + 1, title);
    }

    Ok(())
}

fn cmd_sections(
    input: &Path,
    lang: Lang,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Language::from(lang).profile();
    let doc = parse_file_with_options(input, ParseOptions::new().lenient())?;
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let audit = analyze(&doc, &name, &profile)?;

    let json = if compact {
        serde_json::to_string(&audit.sections)?
    } else {
        serde_json::to_string_pretty(&audit.sections)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docaudit".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Bilingual DOCX emphasis audit tool");
    println!();
    println!("License: MIT");
}
