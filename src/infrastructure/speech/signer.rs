use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine as _;
use base64::engine::general_purpose;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha1::Sha1;

use crate::application::ports::SpeechApiError;

type HmacSha1 = Hmac<Sha1>;

/// Per-call request signing for the speech API. The protocol requires a
/// fresh timestamp and signature on every call, so nothing is cached here.
pub struct RequestSigner {
    app_id: String,
    secret_key: String,
}

impl RequestSigner {
    pub fn new(app_id: String, secret_key: String) -> Self {
        Self { app_id, secret_key }
    }

    pub fn ensure_credentials(&self) -> Result<(), SpeechApiError> {
        if self.app_id.trim().is_empty() || self.secret_key.trim().is_empty() {
            return Err(SpeechApiError::MissingCredentials);
        }
        Ok(())
    }

    /// `base64(hmac_sha1(secret, lowercase_hex(md5(app_id + ts))))`
    pub fn sign(&self, ts: &str) -> String {
        let digest = Md5::digest(format!("{}{}", self.app_id, ts));
        let hex_digest = format!("{:x}", digest);

        let mut mac = HmacSha1::new_from_slice(self.secret_key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(hex_digest.as_bytes());

        general_purpose::STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Fresh `app_id`/`ts`/`signa` triple for one authenticated call.
    pub fn auth_params(&self) -> Result<Vec<(String, String)>, SpeechApiError> {
        self.ensure_credentials()?;

        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| SpeechApiError::Transport(format!("system clock: {}", e)))?
            .as_secs()
            .to_string();
        let signa = self.sign(&ts);

        Ok(vec![
            ("app_id".to_string(), self.app_id.clone()),
            ("ts".to_string(), ts),
            ("signa".to_string(), signa),
        ])
    }
}
