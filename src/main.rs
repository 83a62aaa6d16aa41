use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use voxgate::application::services::{AudioPreparer, TranscriptionService};
use voxgate::infrastructure::audio::SymphoniaDecoder;
use voxgate::infrastructure::observability::{TracingConfig, init_tracing};
use voxgate::infrastructure::speech::LatticeClient;
use voxgate::presentation::{AppState, ScaffoldConfig, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    let tracing_config = TracingConfig {
        environment: settings.environment.to_string(),
        ..TracingConfig::default()
    };
    init_tracing(tracing_config, settings.server.port);

    if settings.speech.app_id.trim().is_empty() || settings.speech.secret_key.trim().is_empty() {
        tracing::warn!(
            "SPEECH_APP_ID or SPEECH_SECRET_KEY is not set; transcription requests will fail"
        );
    }

    let speech_api = Arc::new(LatticeClient::new(
        &settings.speech.host,
        settings.speech.app_id.clone(),
        settings.speech.secret_key.clone(),
    ));

    let decoder = Arc::new(SymphoniaDecoder);

    let transcription_service = Arc::new(TranscriptionService::new(
        Arc::clone(&speech_api),
        settings.speech.poll_interval,
        settings.speech.poll_timeout,
        settings.speech.default_options.clone(),
    ));

    let audio_preparer = Arc::new(AudioPreparer::new(
        Arc::clone(&decoder),
        settings.audio.target_sample_rate,
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;

    let state = AppState {
        transcription_service,
        audio_preparer,
        settings,
        scaffold_config: ScaffoldConfig::default(),
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
