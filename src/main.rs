//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use longshot::adapters::ai::{GeminiAdapter, MockAnalyzerAdapter};
use longshot::adapters::integrations::GoogleDriveAdapter;
use longshot::adapters::ui::tui::TuiInputPort;
use longshot::ports::{AnalyzerPort, DrivePort, InputPort};
use longshot::usecases::{AnalysisService, ExportService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    longshot::adapters::ui::init_ui();

    let cfg = longshot::shared::config::AppConfig::load().unwrap_or_default();

    // --- Analyzer: Gemini when a key is configured, mock otherwise ---
    let analyzer: Arc<dyn AnalyzerPort> = if cfg.is_ai_configured() {
        info!(
            model = %cfg.gemini_model_or_default(),
            url = %cfg.gemini_api_url_or_default(),
            "AI analysis enabled with Gemini adapter"
        );
        Arc::new(GeminiAdapter::with_base_url(
            cfg.gemini_api_key().unwrap_or_default(),
            cfg.gemini_model_or_default(),
            cfg.gemini_api_url_or_default(),
        ))
    } else {
        warn!("LONGSHOT_GEMINI_API_KEY not set, using mock analyzer");
        Arc::new(MockAnalyzerAdapter::new())
    };

    // --- Drive destination (optional) ---
    let drive: Option<Arc<dyn DrivePort>> = if cfg.is_drive_configured() {
        info!("Google Drive destination enabled (LONGSHOT_DRIVE_TOKEN)");
        Some(Arc::new(GoogleDriveAdapter::new(
            cfg.drive_token().unwrap_or_default(),
        )))
    } else {
        info!("LONGSHOT_DRIVE_TOKEN not set, Drive export disabled");
        None
    };

    // --- Services ---
    let analysis_service = Arc::new(AnalysisService::new(analyzer));
    let output_dir = PathBuf::from(cfg.output_dir_or_default());
    let export_service = Arc::new(ExportService::new(drive, output_dir));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        Arc::clone(&analysis_service),
        Arc::clone(&export_service),
        cfg.size_warn_mb_or_default(),
    ));

    // --- Run (menu -> analyze -> preview -> export) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
