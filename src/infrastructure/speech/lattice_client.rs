use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart;

use crate::application::ports::{SpeechApi, SpeechApiError};
use crate::domain::{SliceId, TaskId, TaskProgress, TranscriptSegment, TranscriptionOptions};
use crate::infrastructure::speech::signer::RequestSigner;
use crate::infrastructure::speech::types::{ApiEnvelope, RawSegment};

/// HTTP client for the Lattice chunked speech-to-text API. Each protocol
/// phase is a signed POST; `prepare`, `merge`, `getProgress` and
/// `getResult` are form-encoded, `upload` is multipart.
pub struct LatticeClient {
    client: Client,
    base_url: String,
    signer: RequestSigner,
}

impl LatticeClient {
    pub fn new(base_url: &str, app_id: String, secret_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            signer: RequestSigner::new(app_id, secret_key),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post_form(
        &self,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<ApiEnvelope, SpeechApiError> {
        let url = self.endpoint(path);

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| SpeechApiError::Transport(format!("{} request: {}", path, e)))?;

        Self::read_envelope(path, response).await
    }

    async fn read_envelope(
        path: &str,
        response: reqwest::Response,
    ) -> Result<ApiEnvelope, SpeechApiError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SpeechApiError::Upstream {
                code: status.as_u16() as i64,
                message: format!("{} returned {}: {}", path, status, body),
            });
        }

        response
            .json::<ApiEnvelope>()
            .await
            .map_err(|e| SpeechApiError::MalformedResponse(format!("{} envelope: {}", path, e)))
    }
}

#[async_trait]
impl SpeechApi for LatticeClient {
    async fn prepare(
        &self,
        file_len: u64,
        file_name: &str,
        slice_num: u32,
        options: &TranscriptionOptions,
    ) -> Result<TaskId, SpeechApiError> {
        let mut params = self.signer.auth_params()?;
        params.push(("file_len".to_string(), file_len.to_string()));
        params.push(("file_name".to_string(), file_name.to_string()));
        params.push(("slice_num".to_string(), slice_num.to_string()));
        for (key, value) in options.entries() {
            params.push((key.to_string(), value.to_string()));
        }

        tracing::debug!(file_len, file_name, slice_num, "Preparing transcription task");

        let envelope = self.post_form("prepare", params).await?;
        let task_id = envelope.into_data()?.filter(|id| !id.is_empty()).ok_or(
            SpeechApiError::MalformedResponse("prepare returned no task id".to_string()),
        )?;

        Ok(TaskId::new(task_id))
    }

    async fn upload_slice(
        &self,
        task_id: &TaskId,
        slice_id: &SliceId,
        content: Vec<u8>,
    ) -> Result<(), SpeechApiError> {
        let auth = self.signer.auth_params()?;

        let mut form = multipart::Form::new();
        for (key, value) in auth {
            form = form.text(key, value);
        }
        form = form
            .text("task_id", task_id.as_str().to_string())
            .text("slice_id", slice_id.as_str().to_string())
            .part(
                "content",
                multipart::Part::bytes(content).file_name(slice_id.as_str().to_string()),
            );

        let url = self.endpoint("upload");
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SpeechApiError::Transport(format!("upload request: {}", e)))?;

        let envelope = Self::read_envelope("upload", response).await?;
        envelope.into_data()?;

        Ok(())
    }

    async fn merge(&self, task_id: &TaskId, file_name: &str) -> Result<(), SpeechApiError> {
        let mut params = self.signer.auth_params()?;
        params.push(("task_id".to_string(), task_id.as_str().to_string()));
        params.push(("file_name".to_string(), file_name.to_string()));

        let envelope = self.post_form("merge", params).await?;
        envelope.into_data()?;

        Ok(())
    }

    async fn get_progress(&self, task_id: &TaskId) -> Result<TaskProgress, SpeechApiError> {
        let mut params = self.signer.auth_params()?;
        params.push(("task_id".to_string(), task_id.as_str().to_string()));

        let envelope = self.post_form("getProgress", params).await?;
        let data = envelope.into_data()?.ok_or(SpeechApiError::MalformedResponse(
            "getProgress returned no data".to_string(),
        ))?;

        serde_json::from_str(&data)
            .map_err(|e| SpeechApiError::MalformedResponse(format!("getProgress data: {}", e)))
    }

    async fn get_result(&self, task_id: &TaskId) -> Result<Vec<TranscriptSegment>, SpeechApiError> {
        let mut params = self.signer.auth_params()?;
        params.push(("task_id".to_string(), task_id.as_str().to_string()));

        let envelope = self.post_form("getResult", params).await?;
        let data = envelope.into_data()?.ok_or(SpeechApiError::MalformedResponse(
            "getResult returned no data".to_string(),
        ))?;

        let raw: Vec<RawSegment> = serde_json::from_str(&data)
            .map_err(|e| SpeechApiError::MalformedResponse(format!("getResult data: {}", e)))?;

        Ok(raw.into_iter().map(TranscriptSegment::from).collect())
    }
}
