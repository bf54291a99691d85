//! In-process server for end-to-end tests.
//!
//! The embedder is the deterministic stub, the classifier is built in memory and OCR
//! is a `MockRecognizer`. Routing, form decoding, status mapping and CORS are the
//! production ones.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use credence::classifier::LogisticRegression;
use credence::constants::DEFAULT_TRUSTED_DOMAINS;
use credence::embedding::{Embedder, EmbedderConfig};
use credence::gateway::{HandlerState, create_router_with_state};
use credence::ocr::MockRecognizer;
use credence::pipeline::Pipeline;
use credence::scoring::TrustTable;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const TEST_EMBEDDING_DIM: usize = 32;

/// What the mock OCR engine does with any uploaded image.
#[derive(Debug, Clone)]
pub enum OcrBehavior {
    Reads(Vec<String>),
    Rejects,
}

#[derive(Debug, Clone)]
pub struct ServerSetup {
    /// Classifier weights; all zeros means `prob_fake == sigmoid(bias)`.
    pub weights: Vec<f64>,
    pub bias: f64,
    pub ocr: OcrBehavior,
    pub trusted_domains: Vec<String>,
}

impl Default for ServerSetup {
    fn default() -> Self {
        Self {
            weights: vec![0.0; TEST_EMBEDDING_DIM],
            bias: 0.0,
            ocr: OcrBehavior::Reads(Vec::new()),
            trusted_domains: DEFAULT_TRUSTED_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl ServerSetup {
    pub fn bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    pub fn weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = weights;
        self
    }

    pub fn ocr_reads<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ocr = OcrBehavior::Reads(fragments.into_iter().map(Into::into).collect());
        self
    }

    pub fn ocr_rejects(mut self) -> Self {
        self.ocr = OcrBehavior::Rejects;
        self
    }

    /// Binds an ephemeral port and serves until the returned handle is dropped.
    pub async fn spawn(self) -> anyhow::Result<RunningServer> {
        let embedder = Embedder::load(EmbedderConfig::stub_with_dim(TEST_EMBEDDING_DIM))
            .context("stub embedder")?;
        let classifier =
            LogisticRegression::new(self.weights, self.bias).context("in-memory classifier")?;
        let recognizer = match self.ocr {
            OcrBehavior::Reads(fragments) => MockRecognizer::with_fragments(fragments),
            OcrBehavior::Rejects => MockRecognizer::failing(),
        };
        let pipeline = Pipeline::new(
            Arc::new(embedder),
            Arc::new(classifier),
            recognizer,
            TrustTable::new(&self.trusted_domains),
        )
        .context("pipeline assembly")?;

        let app = create_router_with_state(HandlerState::new(Arc::new(pipeline)));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let stopped = async {
                let _ = stop_rx.await;
            };
            if let Err(e) = axum::serve(listener, app).with_graceful_shutdown(stopped).await {
                eprintln!("test server exited with error: {e}");
            }
        });

        Ok(RunningServer {
            addr,
            stop_tx: Some(stop_tx),
        })
    }
}

/// A server accepting connections on `addr`. Dropping it stops the server.
pub struct RunningServer {
    pub addr: SocketAddr,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl RunningServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}
