use std::sync::Arc;

use crate::application::ports::{AudioDecoder, SpeechApi};
use crate::application::services::{AudioPreparer, TranscriptionService};
use crate::presentation::config::{ScaffoldConfig, Settings};

pub struct AppState<A, D>
where
    A: SpeechApi,
    D: AudioDecoder,
{
    pub transcription_service: Arc<TranscriptionService<A>>,
    pub audio_preparer: Arc<AudioPreparer<D>>,
    pub settings: Settings,
    pub scaffold_config: ScaffoldConfig,
}

impl<A, D> Clone for AppState<A, D>
where
    A: SpeechApi,
    D: AudioDecoder,
{
    fn clone(&self) -> Self {
        Self {
            transcription_service: Arc::clone(&self.transcription_service),
            audio_preparer: Arc::clone(&self.audio_preparer),
            settings: self.settings.clone(),
            scaffold_config: self.scaffold_config.clone(),
        }
    }
}
