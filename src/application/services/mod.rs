mod audio_preparer;
mod transcription_service;

pub use audio_preparer::{AudioPreparer, mix_to_mono, quantize, resample};
pub use transcription_service::{
    Phase, TranscribeError, TranscriptionOutcome, TranscriptionService,
};
