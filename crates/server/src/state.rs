use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::request_log::RequestLog;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use rerank::RerankProvider;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// How often the Prometheus recorder drains histogram buckets.
pub const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// The Prometheus recorder is process-global; every state shares one handle.
static PROMETHEUS: OnceCell<Option<PrometheusHandle>> = OnceCell::new();

fn prometheus_handle() -> Option<PrometheusHandle> {
    PROMETHEUS
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::warn!(error = %err, "prometheus recorder not installed");
                None
            }
        })
        .clone()
}

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Active reranker: hosted provider or heuristic simulation
    pub reranker: Arc<dyn RerankProvider>,

    /// Recent requests for the devtools view
    pub request_log: Arc<RequestLog>,

    /// Prometheus render handle; `None` when metrics are disabled
    pub metrics: Option<PrometheusHandle>,

    pub started_at: Instant,
}

impl ServerState {
    /// Create new server state
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let reranker = simlab::build_reranker(&config.rerank, &config.provider)
            .map_err(|err| ServerError::Config(err.to_string()))?;
        Ok(Self::with_reranker(config, reranker))
    }

    /// State with an explicit reranker, bypassing provider selection.
    pub fn with_reranker(config: ServerConfig, reranker: Arc<dyn RerankProvider>) -> Self {
        let metrics = if config.metrics_enabled {
            prometheus_handle()
        } else {
            None
        };

        Self {
            request_log: Arc::new(RequestLog::new(config.request_log_capacity)),
            config: Arc::new(config),
            reranker,
            metrics,
            started_at: Instant::now(),
        }
    }

    /// Periodically drains the recorder's histogram buckets. Must be called
    /// inside a tokio runtime; returns `None` when metrics are disabled.
    pub fn spawn_metrics_upkeep(&self, period: Duration) -> Option<JoinHandle<()>> {
        let handle = self.metrics.clone()?;
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                handle.run_upkeep();
            }
        }))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
    pub reranker: String,
    pub simulated: bool,
}

impl From<&ServerState> for ServerMetadata {
    fn from(state: &ServerState) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.uptime_seconds(),
            reranker: state.reranker.name().to_string(),
            simulated: state.reranker.is_simulated(),
        }
    }
}
