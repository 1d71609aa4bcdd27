// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use section_rank::utils::logging::{
    format_error, format_info, format_step, format_success, format_warning,
};
use section_rank::models::DocumentRef;
use section_rank::{
    Config, EmbeddingBackend, HeadingFilter, HeuristicProfile, JobSpec, OperationTimer,
    OutlineSpec, PdfTextExtractor, PerformanceMetrics, PipelineOrchestrator, Validator, extractor,
    load_embedder,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "section_rank")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Rank PDF sections by relevance to a persona and task", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Also append log records to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank sections for the job in the input directory and write the report
    Run {
        #[arg(long, value_name = "DIR")]
        input_dir: Option<PathBuf>,

        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        #[arg(long, value_name = "NUM")]
        top_sections: Option<usize>,

        #[arg(long, value_name = "NUM")]
        top_subsections: Option<usize>,

        #[arg(long, value_enum)]
        profile: Option<HeuristicProfile>,

        #[arg(long, value_enum)]
        backend: Option<EmbeddingBackend>,

        #[arg(long)]
        no_progress: bool,

        /// Write the report without indentation
        #[arg(long)]
        compact: bool,
    },

    /// Show the filtered headings and page spans of one input document
    Headings {
        /// PDF file name as listed in the job specification
        document: String,

        #[arg(long, value_name = "DIR")]
        input_dir: Option<PathBuf>,

        #[arg(long, value_enum)]
        profile: Option<HeuristicProfile>,
    },

    /// Check that the job specification and every document's files are present
    Verify {
        #[arg(long, value_name = "DIR")]
        input_dir: Option<PathBuf>,

        /// Also load the embedding model
        #[arg(long)]
        load_model: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    section_rank::utils::logging::init_logger(cli.color, cli.verbose, cli.log_file.as_deref())
        .context("Failed to open log file")?;

    info!("Section Rank");
    let timer = OperationTimer::new("section ranking");

    let colored = cli.color;
    let result = load_config(&cli.config)
        .and_then(|config| dispatch(cli.command, config, colored, &timer));

    if let Err(e) = &result {
        error!("Critical error: {:#}", e);
    }
    timer.finish();

    result
}

fn load_config(path: &Path) -> Result<Config> {
    info!("Loading configuration from: {}", path.display());

    if path.exists() {
        return Config::load(Some(path)).context("Failed to load configuration");
    }

    warn!(
        "Config file {} not found, using default configuration",
        path.display()
    );
    Ok(Config::load(None).unwrap_or_else(|e| {
        warn!("Falling back to built-in defaults: {}", e);
        Config::default_config()
    }))
}

fn dispatch(command: Commands, mut config: Config, colored: bool, timer: &OperationTimer) -> Result<()> {
    match command {
        Commands::Run {
            input_dir,
            output_dir,
            top_sections,
            top_subsections,
            profile,
            backend,
            no_progress,
            compact,
        } => {
            if let Some(profile) = profile {
                config = config.with_profile(profile);
            }
            if let Some(dir) = input_dir {
                config.paths.input_dir = dir;
            }
            if let Some(dir) = output_dir {
                config.paths.output_dir = dir;
            }
            if let Some(n) = top_sections {
                config.ranking.top_sections = n;
            }
            if let Some(n) = top_subsections {
                config.ranking.top_subsections = n;
            }
            if let Some(backend) = backend {
                config.model.backend = backend;
            }
            cmd_run(&config, !no_progress, colored, !compact, timer)
        }
        Commands::Headings {
            document,
            input_dir,
            profile,
        } => {
            if let Some(profile) = profile {
                config = config.with_profile(profile);
            }
            if let Some(dir) = input_dir {
                config.paths.input_dir = dir;
            }
            cmd_headings(&config, &document)
        }
        Commands::Verify {
            input_dir,
            load_model,
        } => {
            if let Some(dir) = input_dir {
                config.paths.input_dir = dir;
            }
            cmd_verify(&config, load_model)
        }
    }
}

fn cmd_run(
    config: &Config,
    show_progress: bool,
    colored: bool,
    pretty: bool,
    timer: &OperationTimer,
) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    info!("Input directory: {}", config.paths.input_dir.display());
    info!("Output directory: {}", config.paths.output_dir.display());
    Validator::validate_directory(&config.paths.input_dir)
        .context("Input directory is not usable")?;

    let embedder = load_embedder(&config.model).context("Failed to load embedding model")?;
    timer.checkpoint(&format!("embedding model ready ({})", embedder.name()));
    let pdf_reader = PdfTextExtractor::new();

    let orchestrator = PipelineOrchestrator::new(config, embedder.as_ref(), &pdf_reader)
        .with_progress(show_progress, colored);
    let summary = orchestrator.execute(pretty).context("Pipeline run failed")?;

    let metrics = PerformanceMetrics::new(
        "documents",
        summary.stats.documents_processed,
        Duration::from_secs_f64(summary.stats.duration_secs),
    );
    info!("{}", metrics.format());
    info!("{}", summary.stats.summary());
    info!(
        "Document success rate: {:.1}% ({:.2} documents/s)",
        summary.stats.success_rate(),
        summary.stats.documents_per_second()
    );

    println!(
        "{}",
        format_success(&format!(
            "Report saved to {}",
            summary.report_path.display()
        ))
    );
    if summary.stats.documents_skipped > 0 {
        println!(
            "{}",
            format_warning(&format!(
                "{} document(s) skipped, see log for details",
                summary.stats.documents_skipped
            ))
        );
    }

    Ok(())
}

fn cmd_headings(config: &Config, document: &str) -> Result<()> {
    let doc = DocumentRef {
        filename: document.to_string(),
        title: None,
    };
    let input_dir = &config.paths.input_dir;
    let outline_path = doc.outline_path(input_dir);
    let pdf_path = doc.pdf_path(input_dir);

    let outline = OutlineSpec::load(&outline_path)
        .with_context(|| format!("Failed to load outline {}", outline_path.display()))?;

    let pdf_reader = PdfTextExtractor::new();
    let page_count = extractor::total_pages(&pdf_reader, &pdf_path);
    let headings = HeadingFilter::new(&config.heuristics).filter(&outline, page_count);

    println!(
        "{}",
        format_info(&format!(
            "{}: {} of {} headings kept ({} pages, {:?} profile)",
            document,
            headings.len() - 1,
            outline.outline.len(),
            page_count,
            config.heuristics.profile
        ))
    );

    let total = headings.len();
    for (i, heading) in headings.iter().enumerate() {
        println!(
            "{}",
            format_step(
                i + 1,
                total,
                &format!(
                    "{} {} (pages {}-{})",
                    heading.level,
                    Validator::truncate_text(&heading.text, 60),
                    heading.page,
                    heading.last_content_page()
                )
            )
        );
    }

    Ok(())
}

fn cmd_verify(config: &Config, load_model: bool) -> Result<()> {
    Validator::validate_directory(&config.paths.input_dir)
        .context("Input directory is not usable")?;

    let job = JobSpec::load(&config.job_path()).context("Failed to load job specification")?;
    println!(
        "{}",
        format_success(&format!(
            "Job specification: {} document(s) for '{}'",
            job.documents.len(),
            job.persona.role
        ))
    );

    let pdf_reader = PdfTextExtractor::new();
    let mut problems = 0;

    for doc in &job.documents {
        let outline_path = doc.outline_path(&config.paths.input_dir);
        let pdf_path = doc.pdf_path(&config.paths.input_dir);

        let mut missing = Vec::new();
        for path in [&outline_path, &pdf_path] {
            if Validator::require_file(path).is_err() {
                missing.push(path.display().to_string());
            }
        }

        if missing.is_empty() {
            let pages = extractor::total_pages(&pdf_reader, &pdf_path);
            println!(
                "{}",
                format_success(&format!("{} ({} pages)", doc.filename, pages))
            );
        } else {
            problems += 1;
            println!(
                "{}",
                format_error(&format!("{}: missing {}", doc.filename, missing.join(", ")))
            );
        }
    }

    if load_model {
        let embedder = load_embedder(&config.model).context("Failed to load embedding model")?;
        println!(
            "{}",
            format_success(&format!("Embedding model: {}", embedder.name()))
        );
    }

    if problems > 0 {
        return Err(anyhow::anyhow!(
            "{} document(s) have missing input files",
            problems
        ));
    }

    Ok(())
}
