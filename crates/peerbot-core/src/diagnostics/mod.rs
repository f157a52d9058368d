pub mod exclusion;

pub use exclusion::{
    check_exclusion, run_exclusion_check, ExclusionContext, ExclusionDetails, ExclusionInput,
    ExclusionReason, ExclusionResult, ExclusionStatus,
};
