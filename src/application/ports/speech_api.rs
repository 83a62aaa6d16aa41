use async_trait::async_trait;

use crate::domain::{SliceId, TaskId, TaskProgress, TranscriptSegment, TranscriptionOptions};

/// The chunked speech-to-text API consumed by the orchestrator. One method
/// per protocol phase; every call is independently authenticated by the
/// implementation.
#[async_trait]
pub trait SpeechApi: Send + Sync {
    /// Registers a transcription job and returns its opaque task id.
    async fn prepare(
        &self,
        file_len: u64,
        file_name: &str,
        slice_num: u32,
        options: &TranscriptionOptions,
    ) -> Result<TaskId, SpeechApiError>;

    /// Uploads one contiguous chunk under the given slice id.
    async fn upload_slice(
        &self,
        task_id: &TaskId,
        slice_id: &SliceId,
        content: Vec<u8>,
    ) -> Result<(), SpeechApiError>;

    /// Signals that all slices are uploaded.
    async fn merge(&self, task_id: &TaskId, file_name: &str) -> Result<(), SpeechApiError>;

    async fn get_progress(&self, task_id: &TaskId) -> Result<TaskProgress, SpeechApiError>;

    async fn get_result(&self, task_id: &TaskId) -> Result<Vec<TranscriptSegment>, SpeechApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechApiError {
    #[error("speech api credentials are not configured")]
    MissingCredentials,
    #[error("transport: {0}")]
    Transport(String),
    #[error("upstream error {code}: {message}")]
    Upstream { code: i64, message: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
