//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use bmi_stylist::adapters::ai::{MockGenerationAdapter, OpenAiAdapter};
use bmi_stylist::adapters::ui::tui::TuiInputPort;
use bmi_stylist::ports::{GenerationPort, InputPort, UnitResolver};
use bmi_stylist::shared::config::{AppConfig, ResolverMode};
use bmi_stylist::usecases::{
    AssessmentService, CommentaryService, DelegatingResolver, DeterministicResolver,
};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;
    let resolver_mode = cfg.resolver_mode()?;
    let weight_unit = cfg.default_weight_unit()?;
    let height_unit = cfg.default_height_unit()?;

    // --- Generation collaborator: fail fast on a missing key unless mock is requested ---
    let generator: Arc<dyn GenerationPort> = if cfg.use_mock() {
        warn!("BMI_STYLIST_USE_MOCK set, using mock generation adapter");
        Arc::new(MockGenerationAdapter::new())
    } else {
        let api_key = cfg.api_key()?;
        info!(
            url = %cfg.base_url_or_default(),
            timeout_secs = cfg.request_timeout().as_secs(),
            "generation collaborator configured"
        );
        Arc::new(OpenAiAdapter::new(
            &cfg.base_url_or_default(),
            api_key,
            cfg.request_timeout(),
        )?)
    };

    // --- Unit resolver: one strategy, chosen here and reported on every reading ---
    let resolver: Arc<dyn UnitResolver> = match resolver_mode {
        ResolverMode::Deterministic => Arc::new(DeterministicResolver::new()),
        ResolverMode::Delegated => {
            warn!(
                model = %cfg.resolver_model_or_default(),
                "unit conversion delegated to the collaborator; results are not deterministic"
            );
            Arc::new(DelegatingResolver::new(
                Arc::clone(&generator),
                cfg.resolver_model_or_default(),
            ))
        }
    };
    info!(mode = %resolver_mode, "unit resolver ready");

    // --- Services ---
    let commentary = Arc::new(CommentaryService::new(
        Arc::clone(&generator),
        cfg.commentary_model_or_default(),
    ));
    let assessment = Arc::new(AssessmentService::new(resolver, commentary));

    bmi_stylist::adapters::ui::init_ui();

    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(assessment, weight_unit, height_unit));
    input_port.run().await?;

    Ok(())
}
