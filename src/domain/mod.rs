mod audio_job;
mod options;
mod pcm;
mod segment;
mod slice_id;
mod task;

pub use audio_job::{AudioJob, AudioJobError};
pub use options::TranscriptionOptions;
pub use pcm::PcmBuffer;
pub use segment::TranscriptSegment;
pub use slice_id::{SliceId, SliceIdGenerator};
pub use task::{TaskId, TaskProgress, TaskStatus};
