use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{ArgGroup, Parser};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use extractors::spreadsheet::parse_upload;
use extractors::{normalize_job, EmailParser};
use jobcal_agents::llm::{GeminiClient, LlmClient, GEMINI_FLASH_ID};
use jobcal_agents::EventExtractorAgent;
use shared_types::{NormalizedJob, ParsedJob};

#[derive(Parser, Debug)]
#[command(name = "email-extractor", about = "Extract calendar job records from emails or spreadsheets")]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["eml_path", "text", "file"]),
))]
struct Cli {
    /// Path to a .eml file
    #[arg(long, value_name = "PATH", group = "input")]
    eml_path: Option<PathBuf>,

    /// Raw email body text
    #[arg(long, group = "input")]
    text: Option<String>,

    /// Path to a spreadsheet (.csv, .xlsx, .xls)
    #[arg(long, value_name = "PATH", group = "input")]
    file: Option<PathBuf>,

    /// Optional subject override (used with --text)
    #[arg(long)]
    subject: Option<String>,

    /// Run the LLM enrichment pass over email input
    #[arg(long)]
    enrich: bool,

    /// Override the Gemini model ID
    #[arg(long, default_value = GEMINI_FLASH_ID)]
    model: String,

    /// Year assumed for dates that omit one (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,
}

#[derive(Debug, Deserialize, Clone)]
struct ApiConfig {
    api_keys: Option<ApiKeysConfig>,
}

#[derive(Debug, Deserialize, Clone)]
struct ApiKeysConfig {
    gemini_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let current_year = cli.year.unwrap_or_else(|| chrono::Utc::now().year());

    if let Some(path) = &cli.file {
        let jobs = extract_from_spreadsheet(path, current_year)?;
        println!("{}", serde_json::to_string_pretty(&jobs)?);
        return Ok(());
    }

    let (subject, body) = match (&cli.eml_path, &cli.text) {
        (Some(path), None) => load_email_from_eml(path)?,
        (None, Some(body)) => (cli.subject.clone().unwrap_or_default(), body.clone()),
        _ => unreachable!("clap enforces exactly one input"),
    };

    let email_content = format!("{}\n\n{}", subject, body);
    let parser = EmailParser::new();
    let mut parsed = parser.parse(&email_content);

    if cli.enrich {
        let api_key = load_gemini_api_key()?;
        let llm_client: Arc<dyn LlmClient> = Arc::new(GeminiClient::new(api_key, cli.model)?);
        let agent = EventExtractorAgent::new(llm_client);
        parsed = agent.enrich(&email_content, parsed).await;
    }

    let normalized = normalize_job(&parsed, current_year);
    println!("{}", serde_json::to_string_pretty(&normalized)?);
    Ok(())
}

fn extract_from_spreadsheet(path: &Path, current_year: i32) -> Result<Vec<NormalizedJob>> {
    let parsed: Vec<ParsedJob> = parse_upload(path)
        .with_context(|| format!("Failed to parse spreadsheet at {:?}", path))?;

    Ok(parsed
        .iter()
        .map(|job| normalize_job(job, current_year))
        .collect())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init();
}

fn load_gemini_api_key() -> Result<String> {
    let config_path = get_config_path();
    if !config_path.exists() {
        return Err(anyhow::anyhow!(
            "Config file not found at {:?}. Create it with a [api_keys] gemini_api_key entry.",
            config_path
        ));
    }

    let builder = Config::builder()
        .add_source(File::from(config_path.clone()))
        .build()?;

    let config: ApiConfig = builder.try_deserialize()?;
    config
        .api_keys
        .and_then(|keys| keys.gemini_api_key)
        .ok_or_else(|| anyhow::anyhow!("Missing gemini_api_key in config at {:?}", config_path))
}

fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("jobcal").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

fn load_email_from_eml(path: &Path) -> Result<(String, String)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read .eml file at {:?}", path))?;
    let parser = mail_parser::MessageParser::default();
    let parsed = parser
        .parse(&bytes)
        .ok_or_else(|| anyhow::anyhow!("Failed to parse .eml file"))?;

    let subject = parsed.subject().map(|s| s.to_string()).unwrap_or_default();
    let body = parsed
        .body_text(0)
        .map(|s| s.to_string())
        .or_else(|| parsed.body_html(0).map(|s| s.to_string()))
        .ok_or_else(|| anyhow::anyhow!("Email has no body text or HTML"))?;

    Ok((subject, body))
}
