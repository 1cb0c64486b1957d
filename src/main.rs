use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use darkroom::api;
use darkroom::models::{OperationRequest, OutputFormat};
use darkroom::server;
use darkroom::services::OpRegistry;

#[derive(Parser)]
#[command(name = "darkroom")]
#[command(about = "Darkroom - image upload and transformation server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply an operation to an image file directly (no server needed)
    Apply {
        /// Input image path
        #[arg(short, long)]
        input: PathBuf,

        /// Output image path; its extension selects the output format
        #[arg(short, long)]
        output: PathBuf,

        /// Operation name, e.g. "filter.blur" or "enhance.contrast"
        #[arg(long)]
        op: String,

        /// Operation magnitude (enhance factor or quantize color count)
        #[arg(short, long)]
        mag: Option<String>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Darkroom API",
        description = "Image upload and transformation server",
        version = "0.2.0",
        license(name = "MIT")
    ),
    paths(api::upload_single, api::upload_multiple),
    components(schemas(api::SingleUploadForm, api::MultiUploadForm)),
    tags(
        (name = "Upload", description = "Image upload and transformation")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Apply {
            input,
            output,
            op,
            mag,
        }) => run_apply_command(&input, &output, &op, mag.as_deref()),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Apply one operation to one image file (no server needed)
fn run_apply_command(
    input: &PathBuf,
    output: &PathBuf,
    op: &str,
    mag: Option<&str>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "darkroom=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let state = server::create_app_state();

    let request = OperationRequest::parse(op, mag)?;
    let format = OutputFormat::from_filename(&output.to_string_lossy())?;
    let bytes = std::fs::read(input)?;

    let encoded = state.pipeline.transform(&bytes, &request, format)?;
    std::fs::write(output, &encoded.bytes)?;
    println!("Wrote {} ({} bytes)", output.display(), encoded.bytes.len());

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let max_upload = std::env::var("MAX_UPLOAD_BYTES").ok();

    println!("Darkroom v{VERSION} - image upload and transformation server\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR        = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  MAX_UPLOAD_BYTES = {}",
        max_upload
            .as_deref()
            .unwrap_or("33554432 (default, 32 MiB)")
    );

    let registry = OpRegistry::new();
    println!("\nRegistered Operations:");
    println!("  Filter:");
    for name in registry.filter_names() {
        println!("    {name}");
    }
    println!("  Enhance (mag = strength factor, 1.0 = identity):");
    for name in registry.enhance_names() {
        println!("    {name}");
    }
    println!("  Quantize (mag = target color count):");
    for name in registry.quantize_names() {
        println!("    {name}");
    }

    println!("\nCommands:");
    println!("  darkroom serve    Start the HTTP server");
    println!("  darkroom apply    Apply an operation to an image file");
    println!("\nRun 'darkroom --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "darkroom=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let max_upload_bytes = std::env::var("MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(server::DEFAULT_MAX_UPLOAD_BYTES);

    let state = server::create_app_state();

    tracing::info!(
        filters = state.registry.filter_names().len(),
        enhancers = state.registry.enhance_names().len(),
        quantizers = state.registry.quantize_names().len(),
        max_upload_bytes,
        "Operation registries initialized"
    );

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state, max_upload_bytes)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Static file serving (production only)
        .nest_service("/static", ServeDir::new("./static"));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Darkroom server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
