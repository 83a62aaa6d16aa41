use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::application::ports::{SpeechApi, SpeechApiError};
use crate::domain::{
    AudioJob, SliceIdGenerator, TaskId, TaskProgress, TranscriptSegment, TranscriptionOptions,
};

/// Drives the speech API's mandatory phase sequence for exactly one job:
/// prepare, sequential slice upload, merge, fixed-interval polling, result
/// retrieval. The caller blocks until a transcript or a terminal error.
///
/// Phases are chained through move-only marker types (`Prepared` through
/// `Finished`), so a merge before the upload loop or a fetch before the
/// poll loop does not compile.
pub struct TranscriptionService<A: SpeechApi> {
    api: Arc<A>,
    poll_interval: Duration,
    poll_timeout: Duration,
    default_options: TranscriptionOptions,
}

/// Final transcript plus the per-segment detail it was flattened from.
#[derive(Debug, Clone)]
pub struct TranscriptionOutcome {
    pub transcript: String,
    pub segments: Vec<TranscriptSegment>,
    pub task_id: TaskId,
    pub progress: TaskProgress,
}

struct Prepared {
    task_id: TaskId,
}

struct Uploaded {
    task_id: TaskId,
}

struct Merged {
    task_id: TaskId,
}

struct Finished {
    task_id: TaskId,
    progress: TaskProgress,
}

impl<A: SpeechApi> TranscriptionService<A> {
    pub fn new(
        api: Arc<A>,
        poll_interval: Duration,
        poll_timeout: Duration,
        default_options: TranscriptionOptions,
    ) -> Self {
        Self {
            api,
            poll_interval,
            poll_timeout,
            default_options,
        }
    }

    #[tracing::instrument(
        skip(self, job, overrides),
        fields(file_name = %job.file_name(), bytes = job.total_size_bytes(), slices = job.slice_count())
    )]
    pub async fn transcribe(
        &self,
        job: &AudioJob,
        overrides: &TranscriptionOptions,
    ) -> Result<TranscriptionOutcome, TranscribeError> {
        let options = overrides.merged_over(&self.default_options);

        let prepared = self.prepare(job, &options).await?;
        let uploaded = self.upload_all(prepared, job).await?;
        let merged = self.merge(uploaded, job).await?;
        let finished = self.poll(merged).await?;
        self.fetch_result(finished).await
    }

    async fn prepare(
        &self,
        job: &AudioJob,
        options: &TranscriptionOptions,
    ) -> Result<Prepared, TranscribeError> {
        let task_id = self
            .api
            .prepare(
                job.total_size_bytes(),
                job.file_name(),
                job.slice_count(),
                options,
            )
            .await
            .map_err(|e| phase_error(Phase::Prepare, e))?;

        tracing::info!(task_id = %task_id, slices = job.slice_count(), "Transcription task prepared");

        Ok(Prepared { task_id })
    }

    async fn upload_all(
        &self,
        prepared: Prepared,
        job: &AudioJob,
    ) -> Result<Uploaded, TranscribeError> {
        let task_id = prepared.task_id;
        let mut generator = SliceIdGenerator::new();

        // Strictly sequential: slice numbering and merge correctness depend
        // on upload order. Any slice failure aborts the whole job.
        for chunk in job.bytes().chunks(job.piece_size_bytes()) {
            let slice_id = generator.next_id();
            self.api
                .upload_slice(&task_id, &slice_id, chunk.to_vec())
                .await
                .map_err(|e| phase_error(Phase::Upload, e))?;

            tracing::debug!(task_id = %task_id, slice_id = %slice_id, bytes = chunk.len(), "Slice uploaded");
        }

        Ok(Uploaded { task_id })
    }

    async fn merge(&self, uploaded: Uploaded, job: &AudioJob) -> Result<Merged, TranscribeError> {
        let task_id = uploaded.task_id;
        self.api
            .merge(&task_id, job.file_name())
            .await
            .map_err(|e| phase_error(Phase::Merge, e))?;

        tracing::debug!(task_id = %task_id, "Slices merged");

        Ok(Merged { task_id })
    }

    async fn poll(&self, merged: Merged) -> Result<Finished, TranscribeError> {
        let task_id = merged.task_id;
        let deadline = Instant::now() + self.poll_timeout;
        let mut last_desc = String::new();

        loop {
            let progress = self
                .api
                .get_progress(&task_id)
                .await
                .map_err(|e| phase_error(Phase::Poll, e))?;

            if !progress.desc.is_empty() {
                last_desc = progress.desc.clone();
            }

            tracing::debug!(
                task_id = %task_id,
                status = progress.status.code(),
                desc = %progress.desc,
                "Transcription progress"
            );

            if progress.status.is_complete() {
                return Ok(Finished { task_id, progress });
            }

            if Instant::now() >= deadline {
                return Err(TranscribeError::Timeout {
                    budget_secs: self.poll_timeout.as_secs(),
                    last_progress: last_desc,
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn fetch_result(
        &self,
        finished: Finished,
    ) -> Result<TranscriptionOutcome, TranscribeError> {
        let Finished { task_id, progress } = finished;

        let segments = self
            .api
            .get_result(&task_id)
            .await
            .map_err(|e| phase_error(Phase::FetchResult, e))?;

        let transcript = segments
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        // An empty transcript is never a valid application state.
        if transcript.is_empty() {
            return Err(TranscribeError::EmptyResult);
        }

        tracing::info!(
            task_id = %task_id,
            segments = segments.len(),
            chars = transcript.len(),
            "Transcription completed"
        );

        Ok(TranscriptionOutcome {
            transcript,
            segments,
            task_id,
            progress,
        })
    }
}

/// Protocol phase names carried in errors so the caller sees which step
/// failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Prepare,
    Upload,
    Merge,
    Poll,
    FetchResult,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Prepare => "prepare",
            Phase::Upload => "upload",
            Phase::Merge => "merge",
            Phase::Poll => "poll",
            Phase::FetchResult => "fetch result",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("speech api credentials are not configured")]
    Config,
    #[error("{phase} failed with upstream code {code}: {message}")]
    Upstream {
        phase: Phase,
        code: i64,
        message: String,
    },
    #[error("transcription timed out after {budget_secs}s (last progress: {last_progress:?})")]
    Timeout {
        budget_secs: u64,
        last_progress: String,
    },
    #[error("{phase} returned malformed data: {message}")]
    Parse { phase: Phase, message: String },
    #[error("transcription produced no usable text")]
    EmptyResult,
}

fn phase_error(phase: Phase, err: SpeechApiError) -> TranscribeError {
    match err {
        SpeechApiError::MissingCredentials => TranscribeError::Config,
        SpeechApiError::Upstream { code, message } => TranscribeError::Upstream {
            phase,
            code,
            message,
        },
        SpeechApiError::Transport(message) => TranscribeError::Upstream {
            phase,
            code: -1,
            message,
        },
        SpeechApiError::MalformedResponse(message) => TranscribeError::Parse { phase, message },
    }
}
