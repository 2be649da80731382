use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use stylescout_core::config::Config;
use stylescout_core::fallback::build_fallback;
use stylescout_core::media::ImageInput;
use stylescout_core::output::{write_json, write_jsonl, OutputFormat};
use stylescout_core::session::{create_session_dir, list_sessions, write_json as write_json_file};
use stylescout_core::AnalysisResult;
use stylescout_pipeline::{GeminiClient, Pipeline, ProgressEvent};

#[derive(Parser)]
#[command(
    name = "stylescout",
    version,
    about = "Turn an outfit photo into purchasable product leads"
)]
struct Cli {
    #[arg(long, global = true, value_name = "json|jsonl|text")]
    format: Option<String>,

    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an outfit photo and search stores for each detected item
    Analyze(AnalyzeArgs),
    /// Print the deterministic fallback search links for a phrase
    Fallback(FallbackArgs),
    /// List stored analysis sessions, newest first
    Sessions,
}

#[derive(Args)]
struct AnalyzeArgs {
    #[arg(long, short = 'i')]
    image: PathBuf,

    /// Override the MIME type guessed from the file extension
    #[arg(long)]
    mime: Option<String>,

    #[arg(long)]
    vision_model: Option<String>,

    #[arg(long)]
    search_model: Option<String>,
}

#[derive(Args)]
struct FallbackArgs {
    #[arg(long, short = 't')]
    terms: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let format = resolve_format(cli.format.as_deref())?;

    match cli.command {
        Commands::Analyze(args) => handle_analyze(args, format, cli.timeout_secs).await,
        Commands::Fallback(args) => handle_fallback(args, format),
        Commands::Sessions => handle_sessions(format),
    }
}

fn resolve_format(flag: Option<&str>) -> Result<OutputFormat> {
    if let Some(fmt) = flag {
        return fmt.parse();
    }
    if env::var("STYLESCOUT_AGENT").ok().as_deref() == Some("1") {
        return Ok(OutputFormat::Json);
    }
    Ok(OutputFormat::Text)
}

async fn handle_analyze(
    args: AnalyzeArgs,
    format: OutputFormat,
    timeout_flag: Option<u64>,
) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(model) = args.vision_model {
        config.defaults.vision_model = Some(model);
    }
    if let Some(model) = args.search_model {
        config.defaults.search_model = Some(model);
    }
    let timeout_secs = timeout_flag.or(config.defaults.timeout_secs).unwrap_or(60);

    let input = ImageInput::from_path_with_mime(&args.image, args.mime.as_deref())?;
    let client = GeminiClient::from_config(&config, timeout_secs)?;
    let pipeline = Pipeline::new(Arc::new(client));

    let bytes = input.read_bytes()?;
    let session = create_session_dir()?;

    let analysis = pipeline
        .run(&bytes, &input.mime_type, |event| {
            report_progress(&event, format);
        })
        .await?;

    let response_json = session.path.join("response.json");
    write_json_file(&response_json, &analysis)?;

    match format {
        OutputFormat::Json => write_json(&serde_json::json!({
            "id": session.id,
            "analysis": analysis,
            "responseJson": response_json.to_string_lossy(),
        })),
        OutputFormat::Jsonl => write_jsonl("analysis", &analysis),
        OutputFormat::Text => {
            render_text(&analysis);
            Ok(())
        }
    }
}

fn report_progress(event: &ProgressEvent, format: OutputFormat) {
    match format {
        OutputFormat::Jsonl => {
            let _ = write_jsonl("progress", event);
        }
        OutputFormat::Json => {}
        OutputFormat::Text => match event {
            ProgressEvent::AnalyzingImage => eprintln!("Analyzing your outfit photo..."),
            ProgressEvent::SearchingStores { total } => {
                eprintln!("Searching stores for {total} item(s)...");
            }
            ProgressEvent::ItemCompleted {
                name,
                completed,
                total,
            } => eprintln!("Found products for {name} ({completed}/{total})"),
        },
    }
}

fn render_text(analysis: &AnalysisResult) {
    println!("Overall style: {}", analysis.overall_style);
    if analysis.items.is_empty() {
        println!("No clothing items detected.");
        return;
    }
    for item in &analysis.items {
        println!();
        println!(
            "{} ({}, {}, est. {})",
            item.name, item.color, item.style, item.estimated_price
        );
        println!("  {}", item.description);
        for product in &item.products {
            println!("  - {} [{}] {}", product.title, product.price, product.url);
        }
    }
}

fn handle_fallback(args: FallbackArgs, format: OutputFormat) -> Result<()> {
    let products = build_fallback(&args.terms);
    match format {
        OutputFormat::Json => write_json(&products),
        OutputFormat::Jsonl => write_jsonl("fallback", &products),
        OutputFormat::Text => {
            for product in &products {
                println!("{}\t{}", product.store, product.url);
            }
            Ok(())
        }
    }
}

fn handle_sessions(format: OutputFormat) -> Result<()> {
    let sessions = list_sessions()?;
    match format {
        OutputFormat::Json => write_json(&sessions),
        OutputFormat::Jsonl => write_jsonl("sessions", &sessions),
        OutputFormat::Text => {
            for session in sessions {
                println!("{}\t{}", session.id, session.path.display());
            }
            Ok(())
        }
    }
}
