/// Decoded audio as interleaved f32 samples at the container's native
/// channel layout and sample rate. Downmix and resampling happen later in
/// the preparer, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub channels: usize,
    pub sample_rate: u32,
}

/// Platform audio decoding capability. Kept behind a trait so the pure
/// mixdown/resample/quantize stages are testable without a real media
/// environment.
pub trait AudioDecoder: Send + Sync {
    fn decode(&self, data: &[u8]) -> Result<DecodedAudio, AudioDecoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDecoderError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("no audio track found")]
    NoAudioTrack,
    #[error("unknown sample rate")]
    UnknownSampleRate,
}
