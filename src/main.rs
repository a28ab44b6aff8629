use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cv_analyzer::{build_analyzer, AnalysisRequest, ConfigManager, Document, DocumentFormat};
use std::path::PathBuf;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cvenom-ats")]
#[command(about = "Score a résumé against a job description and suggest improvements")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze already-extracted résumé text
    Analyze {
        /// File holding the extracted résumé text
        #[arg(long)]
        resume: PathBuf,
        /// Source format (pdf, docx, txt); guessed from the filename when omitted
        #[arg(long)]
        format: Option<DocumentFormat>,
        /// Display name recorded in the result
        #[arg(long)]
        filename: Option<String>,
        /// Job description text
        #[arg(long, conflicts_with = "job_file")]
        job: Option<String>,
        /// File holding the job description
        #[arg(long)]
        job_file: Option<PathBuf>,
        /// Credential for the extraction service, overrides GROQ_API_KEY
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Print the effective configuration
    Config,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let config = ConfigManager::load(cli.config.as_deref())?;

    match cli.command {
        Command::Config => {
            let yaml = serde_yaml::to_string(&config.redacted())
                .context("Failed to render configuration")?;
            print!("{}", yaml);
        }
        Command::Analyze {
            resume,
            format,
            filename,
            job,
            job_file,
            api_key,
        } => {
            let text = tokio::fs::read_to_string(&resume)
                .await
                .with_context(|| format!("Failed to read résumé text: {}", resume.display()))?;

            let filename = filename.unwrap_or_else(|| {
                resume
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| resume.display().to_string())
            });
            let format = match format {
                Some(format) => format,
                None => DocumentFormat::from_filename(&filename)
                    .context("Cannot guess the format; pass --format")?,
            };

            let job_description = match (job, job_file) {
                (Some(job), _) => Some(job),
                (None, Some(path)) => Some(
                    tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Failed to read job description: {}", path.display()))?,
                ),
                (None, None) => None,
            };

            let analyzer = build_analyzer(&config)?;
            let request = AnalysisRequest {
                job_description,
                credential: api_key,
            };
            let document = Document::new(text, filename, format);

            let record = analyzer.analyze(&document, &request).await;
            info!("Match score: {}", record.match_score);

            let json = serde_json::to_string_pretty(&record)
                .context("Failed to serialize analysis record")?;
            println!("{}", json);
        }
    }

    Ok(())
}
