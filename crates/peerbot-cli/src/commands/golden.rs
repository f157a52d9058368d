use clap::Args;
use serde_json::{json, Value};

use peerbot_core::quality::GoldenPeerSet;
use peerbot_core::PeerBotError;

use super::shared::{CmdResult, GoldenArgs};
use crate::input;

/// Arguments for listing and maintaining golden peer sets
#[derive(Args)]
pub struct GoldenSetsArgs {
    /// Show a single set by id
    #[arg(long, conflicts_with = "upsert")]
    pub id: Option<String>,

    /// Insert or replace the set in this JSON/YAML file
    #[arg(long)]
    pub upsert: Option<String>,

    /// Write the resulting collection to this JSON file
    #[arg(long)]
    pub save: Option<String>,

    #[command(flatten)]
    pub golden: GoldenArgs,
}

pub fn run_golden_sets(args: GoldenSetsArgs) -> CmdResult<Value> {
    let store = args.golden.load()?;

    if let Some(ref id) = args.id {
        let set = store.get(id).ok_or_else(|| PeerBotError::NotFound {
            entity: "golden set".into(),
            key: id.clone(),
        })?;
        return Ok(serde_json::to_value(set)?);
    }

    let outcome = match args.upsert {
        Some(ref path) => {
            let set: GoldenPeerSet = input::file::read_input(path)?;
            Some(store.upsert(set)?)
        }
        None => None,
    };

    let sets = store.list();
    if let Some(ref path) = args.save {
        input::file::write_json(path, &sets)?;
        tracing::info!(path = %path, count = sets.len(), "golden sets saved");
    }

    Ok(json!({
        "result": {
            "outcome": outcome,
            "count": sets.len(),
            "sets": sets,
        }
    }))
}
