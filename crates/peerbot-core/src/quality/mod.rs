pub mod evaluator;
pub mod golden;

pub use evaluator::{
    evaluate, evaluate_by_id, run_quality_eval, QualityEvalInput, QualityEvalResult,
    QualityMetrics,
};
pub use golden::{GoldenPeer, GoldenPeerSet, GoldenSetStore, UpsertOutcome};
