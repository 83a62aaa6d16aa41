use std::sync::Arc;

use crate::application::ports::{AudioDecoder, AudioDecoderError};
use crate::domain::PcmBuffer;

/// Turns an arbitrary compressed audio blob into transport-ready 16-bit PCM:
/// decode, mix to mono, downsample to the target rate, quantize. No network
/// I/O; decoding is the only platform-dependent stage.
pub struct AudioPreparer<D: AudioDecoder> {
    decoder: Arc<D>,
    target_sample_rate: u32,
}

impl<D: AudioDecoder> AudioPreparer<D> {
    pub fn new(decoder: Arc<D>, target_sample_rate: u32) -> Self {
        Self {
            decoder,
            target_sample_rate,
        }
    }

    pub fn prepare(&self, blob: &[u8]) -> Result<PcmBuffer, AudioDecoderError> {
        let decoded = self.decoder.decode(blob)?;
        let mono = mix_to_mono(&decoded.samples, decoded.channels);

        let (samples, sample_rate) =
            if self.target_sample_rate > 0 && self.target_sample_rate < decoded.sample_rate {
                (
                    resample(&mono, decoded.sample_rate, self.target_sample_rate),
                    self.target_sample_rate,
                )
            } else {
                (mono, decoded.sample_rate)
            };

        tracing::debug!(
            samples = samples.len(),
            sample_rate,
            "Audio prepared for transport"
        );

        Ok(PcmBuffer::new(quantize(&samples), sample_rate))
    }
}

/// Per-frame arithmetic mean across channels; pass-through if already mono.
pub fn mix_to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Block-averaging decimation: partitions the input into `from_rate/to_rate`
/// sized windows (fractional boundaries via rounded cumulative offsets) and
/// averages each window to one output sample. No anti-alias filtering — a
/// known quality trade-off, kept deliberately. Upsampling is a no-op: for
/// `to_rate == 0` or `to_rate >= from_rate` the input is returned unchanged.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if to_rate == 0 || to_rate >= from_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = (samples.len() as f64 / ratio).round() as usize;
    let mut output = Vec::with_capacity(out_len);
    let mut start = 0usize;

    for i in 0..out_len {
        let end = (((i + 1) as f64 * ratio).round() as usize).min(samples.len());
        if start >= end {
            break;
        }
        let window = &samples[start..end];
        output.push(window.iter().sum::<f32>() / window.len() as f32);
        start = end;
    }

    output
}

/// Clamps to [-1, 1] and scales to the signed 16-bit range: negative values
/// by 32768, positive by 32767.
pub fn quantize(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&sample| {
            let clamped = sample.clamp(-1.0, 1.0);
            if clamped < 0.0 {
                (clamped * 32768.0) as i16
            } else {
                (clamped * 32767.0) as i16
            }
        })
        .collect()
}
