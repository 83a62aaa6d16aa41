use std::sync::Arc;

use voxgate::application::ports::{AudioDecoder, AudioDecoderError, DecodedAudio};
use voxgate::application::services::{AudioPreparer, mix_to_mono, quantize, resample};
use voxgate::domain::{PcmBuffer, SliceIdGenerator};
use voxgate::infrastructure::audio::SymphoniaDecoder;

fn build_wav(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
    let num_samples = samples.len() as u32;
    let block_align = channels * 2;
    let byte_rate = sample_rate * block_align as u32;
    let data_size = num_samples * 2;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

#[test]
fn given_fresh_generator_when_first_id_issued_then_it_is_all_a() {
    let mut generator = SliceIdGenerator::new();

    assert_eq!(generator.next_id().as_str(), "aaaaaaaaaa");
}

#[test]
fn given_sequential_calls_when_ids_issued_then_strictly_increasing_and_distinct() {
    let mut generator = SliceIdGenerator::new();

    let ids: Vec<String> = (0..200)
        .map(|_| generator.next_id().as_str().to_string())
        .collect();

    for pair in ids.windows(2) {
        assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
    }

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn given_last_letter_z_when_next_id_issued_then_carry_rolls_into_previous_position() {
    let mut generator = SliceIdGenerator::new();

    let ids: Vec<String> = (0..27)
        .map(|_| generator.next_id().as_str().to_string())
        .collect();

    assert_eq!(ids[25], "aaaaaaaaaz");
    assert_eq!(ids[26], "aaaaaaaaba");
}

#[test]
fn given_stereo_opposite_channels_when_mixed_then_mono_is_zero() {
    // channel A = [1, 1], channel B = [-1, -1], interleaved
    let samples = [1.0, -1.0, 1.0, -1.0];

    let mono = mix_to_mono(&samples, 2);

    assert_eq!(mono, vec![0.0, 0.0]);
}

#[test]
fn given_mono_input_when_mixed_then_passes_through_unchanged() {
    let samples = [0.25, -0.5, 0.75];

    assert_eq!(mix_to_mono(&samples, 1), samples.to_vec());
}

#[test]
fn given_equal_rates_when_resampling_then_output_equals_input() {
    let samples = [0.1, 0.2, 0.3];

    assert_eq!(resample(&samples, 16_000, 16_000), samples.to_vec());
}

#[test]
fn given_zero_or_higher_target_rate_when_resampling_then_no_op() {
    let samples = [0.1, 0.2, 0.3];

    assert_eq!(resample(&samples, 16_000, 0), samples.to_vec());
    assert_eq!(resample(&samples, 16_000, 48_000), samples.to_vec());
}

#[test]
fn given_ratio_three_downsample_when_resampling_then_output_is_one_third() {
    let samples: Vec<f32> = vec![0.0; 3000];

    let output = resample(&samples, 48_000, 16_000);

    assert_eq!(output.len(), 1000);
}

#[test]
fn given_exact_windows_when_resampling_then_each_output_is_window_average() {
    let samples = [1.0, 1.0, 1.0, 2.0, 2.0, 2.0];

    let output = resample(&samples, 48_000, 16_000);

    assert_eq!(output, vec![1.0, 2.0]);
}

#[test]
fn given_full_scale_floats_when_quantized_then_hits_int16_extremes() {
    let output = quantize(&[1.0, -1.0, 0.0]);

    assert_eq!(output, vec![32767, -32768, 0]);
}

#[test]
fn given_out_of_range_floats_when_quantized_then_clamped() {
    let output = quantize(&[2.5, -3.0]);

    assert_eq!(output, vec![32767, -32768]);
}

#[test]
fn given_pcm_buffer_when_serialized_then_bytes_are_little_endian() {
    let pcm = PcmBuffer::new(vec![1, -2], 16_000);

    assert_eq!(pcm.to_bytes(), vec![0x01, 0x00, 0xFE, 0xFF]);
}

#[test]
fn given_pcm_buffer_when_base64_encoded_then_round_trips_over_text_transport() {
    use base64::Engine as _;

    let pcm = PcmBuffer::new(vec![100, -100, 0, 32767], 16_000);

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(pcm.to_base64())
        .unwrap();

    assert_eq!(decoded, pcm.to_bytes());
}

#[test]
fn given_mono_wav_when_decoded_then_native_rate_and_channel_count_returned() {
    let wav = build_wav(16_000, 1, &vec![0i16; 1600]);

    let decoded = SymphoniaDecoder.decode(&wav).unwrap();

    assert_eq!(decoded.sample_rate, 16_000);
    assert_eq!(decoded.channels, 1);
    assert_eq!(decoded.samples.len(), 1600);
}

#[test]
fn given_stereo_wav_when_decoded_then_samples_stay_interleaved() {
    // 800 frames of two channels
    let wav = build_wav(44_100, 2, &vec![0i16; 1600]);

    let decoded = SymphoniaDecoder.decode(&wav).unwrap();

    assert_eq!(decoded.sample_rate, 44_100);
    assert_eq!(decoded.channels, 2);
    assert_eq!(decoded.samples.len(), 1600);
}

#[test]
fn given_garbage_bytes_when_decoded_then_returns_decoding_error() {
    let result = SymphoniaDecoder.decode(b"definitely not audio");

    assert!(matches!(result, Err(AudioDecoderError::DecodingFailed(_))));
}

struct FixedDecoder {
    audio: DecodedAudio,
}

impl AudioDecoder for FixedDecoder {
    fn decode(&self, _data: &[u8]) -> Result<DecodedAudio, AudioDecoderError> {
        Ok(self.audio.clone())
    }
}

#[test]
fn given_stereo_48khz_blob_when_prepared_then_mono_16khz_pcm_produced() {
    let decoder = Arc::new(FixedDecoder {
        audio: DecodedAudio {
            samples: vec![0.5; 9600], // 4800 stereo frames at 48 kHz
            channels: 2,
            sample_rate: 48_000,
        },
    });
    let preparer = AudioPreparer::new(decoder, 16_000);

    let pcm = preparer.prepare(b"blob").unwrap();

    assert_eq!(pcm.sample_rate, 16_000);
    assert_eq!(pcm.samples.len(), 1600);
    assert!(pcm.samples.iter().all(|&s| s == (0.5f32 * 32767.0) as i16));
}

#[test]
fn given_capture_already_at_target_rate_when_prepared_then_rate_unchanged() {
    let decoder = Arc::new(FixedDecoder {
        audio: DecodedAudio {
            samples: vec![0.0; 160],
            channels: 1,
            sample_rate: 8_000,
        },
    });
    let preparer = AudioPreparer::new(decoder, 16_000);

    let pcm = preparer.prepare(b"blob").unwrap();

    // No upsampling: 8 kHz input stays at 8 kHz.
    assert_eq!(pcm.sample_rate, 8_000);
    assert_eq!(pcm.samples.len(), 160);
}
