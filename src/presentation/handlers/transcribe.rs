use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use base64::Engine as _;
use base64::engine::general_purpose;
use serde::Serialize;

use crate::application::ports::{AudioDecoder, SpeechApi};
use crate::application::services::TranscribeError;
use crate::domain::{AudioJob, TaskProgress, TaskStatus, TranscriptSegment, TranscriptionOptions};
use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeResponse {
    pub transcript: String,
    pub segments: Vec<TranscriptSegment>,
    pub task_id: String,
    pub progress: TaskProgress,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<A, D>(
    State(state): State<AppState<A, D>>,
    mut multipart: Multipart,
) -> Response
where
    A: SpeechApi + 'static,
    D: AudioDecoder + 'static,
{
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut part_file_name: Option<String> = None;
    let mut explicit_file_name: Option<String> = None;
    let mut pcm_base64: Option<String> = None;
    let mut overrides = TranscriptionOptions::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return bad_request(format!("Failed to read multipart: {}", e));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                part_file_name = field.file_name().map(String::from);
                match field.bytes().await {
                    Ok(data) => file_bytes = Some(data.to_vec()),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read file bytes");
                        return bad_request(format!("Failed to read file: {}", e));
                    }
                }
            }
            "filename" => match field.text().await {
                Ok(text) => explicit_file_name = Some(text),
                Err(e) => return bad_request(format!("Failed to read filename: {}", e)),
            },
            "pcm_base64" => match field.text().await {
                Ok(text) => pcm_base64 = Some(text),
                Err(e) => return bad_request(format!("Failed to read pcm_base64: {}", e)),
            },
            other => {
                // Option overrides; anything outside the whitelist is ignored.
                if let Ok(value) = field.text().await {
                    if !overrides.apply(other, &value) {
                        tracing::debug!(field = %other, "Ignoring unknown form field");
                    }
                }
            }
        }
    }

    let (bytes, file_name) = if let Some(encoded) = pcm_base64 {
        let bytes = match general_purpose::STANDARD.decode(encoded.trim()) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid pcm_base64 payload");
                return bad_request(format!("Invalid pcm_base64 payload: {}", e));
            }
        };
        let name = explicit_file_name.unwrap_or_else(|| "audio.pcm".to_string());
        (bytes, name)
    } else if let Some(raw) = file_bytes {
        let name = explicit_file_name
            .or(part_file_name)
            .unwrap_or_else(|| "audio".to_string());

        if state.settings.audio.normalize_uploads {
            match state.audio_preparer.prepare(&raw) {
                Ok(pcm) => {
                    let stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(&name);
                    (pcm.to_bytes(), format!("{}.pcm", stem))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to decode uploaded audio");
                    return bad_request(format!("Undecodable audio: {}", e));
                }
            }
        } else {
            (raw, name)
        }
    } else {
        tracing::warn!("Transcribe request with no audio");
        return bad_request("No audio provided".to_string());
    };

    tracing::debug!(bytes = bytes.len(), file_name = %file_name, "Audio payload received");

    let job = match AudioJob::new(
        bytes,
        file_name,
        state.settings.speech.piece_size_bytes,
        state.settings.speech.max_file_bytes,
    ) {
        Ok(job) => job,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected audio payload");
            return bad_request(e.to_string());
        }
    };

    if state.scaffold_config.enabled {
        return scaffold_response(&state).await;
    }

    match state.transcription_service.transcribe(&job, &overrides).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(TranscribeResponse {
                transcript: outcome.transcript,
                segments: outcome.segments,
                task_id: outcome.task_id.to_string(),
                progress: outcome.progress,
            }),
        )
            .into_response(),
        Err(e) => {
            let status = match &e {
                TranscribeError::Config | TranscribeError::Timeout { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                TranscribeError::Upstream { .. }
                | TranscribeError::Parse { .. }
                | TranscribeError::EmptyResult => StatusCode::BAD_GATEWAY,
            };
            tracing::error!(error = %e, "Transcription failed");
            (status, Json(ErrorResponse { error: e.to_string() })).into_response()
        }
    }
}

/// Canned response for frontend integration work; no upstream calls.
async fn scaffold_response<A, D>(state: &AppState<A, D>) -> Response
where
    A: SpeechApi,
    D: AudioDecoder,
{
    if state.scaffold_config.mock_response_delay_ms > 0 {
        tokio::time::sleep(tokio::time::Duration::from_millis(
            state.scaffold_config.mock_response_delay_ms,
        ))
        .await;
    }

    tracing::info!("Scaffold mode: returning canned transcript");

    (
        StatusCode::OK,
        Json(TranscribeResponse {
            transcript: "This is a scaffold transcript.".to_string(),
            segments: vec![TranscriptSegment {
                text: "This is a scaffold transcript.".to_string(),
                speaker: Some("1".to_string()),
                start_ms: Some(0),
                end_ms: Some(1500),
                words: None,
            }],
            task_id: format!("scaffold-{}", uuid::Uuid::new_v4()),
            progress: TaskProgress {
                desc: "task completed".to_string(),
                status: TaskStatus::Complete,
            },
        }),
    )
        .into_response()
}
