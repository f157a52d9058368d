pub mod overrides;
pub mod query;
pub mod ranker;
pub mod scored;
pub mod scorer;
pub mod search;
pub mod tuning;

pub use overrides::PeerOverrides;
pub use query::{QueryDescriptor, VirtualProfile};
pub use ranker::{ListedFallback, PeerRanker};
pub use scored::{ScoreProvenance, ScoredPeer};
pub use scorer::{score, ScoreBreakdown, ScoringTarget};
pub use tuning::TuningParameters;
