mod audio_decoder;
mod speech_api;

pub use audio_decoder::{AudioDecoder, AudioDecoderError, DecodedAudio};
pub use speech_api::{SpeechApi, SpeechApiError};
