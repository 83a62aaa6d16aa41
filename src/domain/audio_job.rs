/// One audio payload submitted for transcription. Lives for the duration of
/// a single request; never persisted.
#[derive(Debug, Clone)]
pub struct AudioJob {
    bytes: Vec<u8>,
    file_name: String,
    piece_size_bytes: usize,
}

impl AudioJob {
    pub fn new(
        bytes: Vec<u8>,
        file_name: String,
        piece_size_bytes: usize,
        max_file_bytes: u64,
    ) -> Result<Self, AudioJobError> {
        if bytes.is_empty() {
            return Err(AudioJobError::Empty);
        }
        if bytes.len() as u64 > max_file_bytes {
            return Err(AudioJobError::TooLarge {
                size: bytes.len() as u64,
                max: max_file_bytes,
            });
        }
        if piece_size_bytes == 0 {
            return Err(AudioJobError::InvalidPieceSize);
        }
        Ok(Self {
            bytes,
            file_name,
            piece_size_bytes,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn piece_size_bytes(&self) -> usize {
        self.piece_size_bytes
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Number of slices the upload loop will issue.
    pub fn slice_count(&self) -> u32 {
        self.bytes.len().div_ceil(self.piece_size_bytes) as u32
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AudioJobError {
    #[error("audio payload is empty")]
    Empty,
    #[error("audio payload is {size} bytes, exceeding the {max} byte limit")]
    TooLarge { size: u64, max: u64 },
    #[error("piece size must be greater than zero")]
    InvalidPieceSize,
}
