use clap::Parser;
use finlens_api::{error_body, AppState, RestApi};
use finlens_similarity::{EngineConfig, RatingScale, SimilarityEngine};
use finlens_storage::{DatasetStore, LoadOptions};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Global finance dashboard backend with a country similarity recommender
#[derive(Parser, Debug)]
#[command(name = "finlens")]
#[command(about = "Finance dashboard backend and country recommender", long_about = None)]
struct Args {
    /// Path to the CSV dataset
    #[arg(short, long, default_value = "./Global finance data.csv")]
    data: PathBuf,

    /// Address to bind the HTTP API on
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 5000)]
    http_port: u16,

    /// Number of similar countries to return
    #[arg(long, default_value_t = finlens_similarity::DEFAULT_TOP_K)]
    top_k: usize,

    /// Canonical credit rating order, best first (e.g. "AAA,AA+,AA").
    /// Without it the order is derived from the data.
    #[arg(long, value_delimiter = ',')]
    rating_scale: Option<Vec<String>>,

    /// Print recommendations for one country as JSON and exit
    #[arg(long, value_name = "ENTITY")]
    recommend: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting finlens v{}", env!("CARGO_PKG_VERSION"));
    info!("Dataset: {:?}", args.data);

    let config = EngineConfig {
        top_k: args.top_k,
        rating_scale: match args.rating_scale {
            Some(order) => RatingScale::Fixed(order),
            None => RatingScale::Derived,
        },
        ..EngineConfig::default()
    };
    let engine = SimilarityEngine::new(config)?;

    let store = Arc::new(DatasetStore::open(&args.data, LoadOptions::default())?);
    info!("Dataset loaded: {} rows", store.snapshot().len());

    if let Some(country) = args.recommend {
        let body = match engine.recommend(&store.snapshot(), &country) {
            Ok(result) => serde_json::to_value(&result)?,
            Err(e) => {
                warn!("Recommendation unavailable: {}", e);
                error_body(&e)
            }
        };
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let state = AppState::new(store, engine);
    let host = args.host.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on {}:{}", host, http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, host, http_port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://{}:{}/", args.host, args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
