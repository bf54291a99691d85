//! Credence HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use credence::classifier::LogisticRegression;
use credence::config::Config;
use credence::embedding::{Embedder, EmbedderConfig};
use credence::gateway::{HandlerState, create_router_with_state};
use credence::ocr::{TesseractConfig, TesseractRecognizer, TextRecognizer};
use credence::pipeline::Pipeline;
use credence::scoring::TrustTable;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "Credence starting"
    );

    let embedder_config = match &config.embedder_path {
        Some(path) if !config.embedder_stub => EmbedderConfig::new(path.clone()),
        _ => {
            tracing::warn!(
                embedding_dim = config.embedding_dim,
                "CREDENCE_EMBEDDER_STUB set, running embedder in stub mode"
            );
            EmbedderConfig::stub_with_dim(config.embedding_dim)
        }
    };
    let embedder = Arc::new(Embedder::load(embedder_config).context("loading embedder")?);

    let classifier_path = config
        .classifier_path
        .as_ref()
        .context("CREDENCE_CLASSIFIER_PATH is required")?;
    let classifier = Arc::new(
        LogisticRegression::load(classifier_path)
            .with_context(|| format!("loading classifier from {}", classifier_path.display()))?,
    );

    let mut ocr_config = TesseractConfig::new(config.ocr_binary.clone(), config.ocr_language.clone());
    if let Some(dir) = &config.scratch_dir {
        ocr_config = ocr_config.with_scratch_dir(dir.clone());
    }
    let recognizer = TesseractRecognizer::new(ocr_config).context("probing OCR engine")?;

    let trust = TrustTable::new(&config.trusted_domains);

    tracing::info!(
        embedder = embedder.mode(),
        device = embedder.device(),
        embedding_dim = embedder.embedding_dim(),
        ocr = recognizer.engine_name(),
        ocr_version = recognizer.version(),
        trusted_domains = trust.len(),
        "Models loaded"
    );

    let pipeline = Pipeline::new(embedder, classifier, recognizer, trust)
        .context("embedder and classifier disagree on dimension")?;

    let state = HandlerState::new(Arc::new(pipeline)).with_max_upload_bytes(config.max_upload_bytes);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Credence shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("CREDENCE_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
