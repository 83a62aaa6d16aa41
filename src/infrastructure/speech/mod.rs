mod lattice_client;
mod signer;
mod types;

pub use lattice_client::LatticeClient;
pub use signer::RequestSigner;
pub use types::{ApiEnvelope, RawSegment};
