mod engine;
mod engine_config;
mod json_contract;

pub use engine::TimelineEngine;
pub use engine_config::TimelineEngineConfig;
pub use json_contract::{
    ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1,
};
