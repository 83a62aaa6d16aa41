use serde::Deserialize;

use crate::application::ports::SpeechApiError;
use crate::domain::TranscriptSegment;

/// Envelope wrapping every speech API response. `ok == 0` is success;
/// anything else carries `failed` and `err_no` as the upstream error.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub ok: i64,
    #[serde(default)]
    pub err_no: i64,
    #[serde(default)]
    pub failed: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

impl ApiEnvelope {
    pub fn into_data(self) -> Result<Option<String>, SpeechApiError> {
        if self.ok != 0 {
            return Err(SpeechApiError::Upstream {
                code: self.err_no,
                message: self
                    .failed
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "unspecified upstream failure".to_string()),
            });
        }
        Ok(self.data)
    }
}

/// One segment as the getResult call encodes it inside the envelope's
/// `data` field. `bg`/`ed` are millisecond bounds sent as strings.
#[derive(Debug, Deserialize)]
pub struct RawSegment {
    #[serde(default)]
    pub onebest: String,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub bg: Option<String>,
    #[serde(default)]
    pub ed: Option<String>,
    #[serde(default)]
    pub words: Option<serde_json::Value>,
}

impl From<RawSegment> for TranscriptSegment {
    fn from(raw: RawSegment) -> Self {
        TranscriptSegment {
            text: raw.onebest,
            speaker: raw.speaker,
            start_ms: raw.bg.and_then(|v| v.parse().ok()),
            end_ms: raw.ed.and_then(|v| v.parse().ok()),
            words: raw.words,
        }
    }
}
