pub mod diagnostics;
pub mod error;
pub mod peers;
pub mod profile;
pub mod types;
pub mod universe;

#[cfg(feature = "filings")]
pub mod filings;

#[cfg(feature = "quality")]
pub mod quality;

#[cfg(feature = "report")]
pub mod report;

pub use error::PeerBotError;
pub use types::*;

/// Standard result type for all peerbot operations
pub type PeerBotResult<T> = Result<T, PeerBotError>;
