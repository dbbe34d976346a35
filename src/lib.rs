#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line front end shared by the `iat_timeline` binary.
pub mod cli;
/// Experiment configuration types.
pub mod config;
/// Centralized constants: stimuli, keys, trial counts, tags.
pub mod constants;
/// Stimulus, pool entry, and trial record types.
pub mod data;
/// JSON handoff to the presentation runtime.
pub mod export;
/// Balance metrics over generated sequences.
pub mod metrics;
/// Pool construction from stimulus lists.
pub mod pool;
/// HTML fragments for instruction, trial, and feedback screens.
pub mod render;
/// Seeded random streams.
pub mod rng;
/// Response scoring against trial records.
pub mod scoring;
/// Trial-sequence generation.
pub mod sequence;
/// Timeline assembly for the 7-block design.
pub mod timeline;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::{
    BalancingPolicy, BlockInstruction, BlockKind, BlockSpec, Counterbalancing, ExperimentConfig,
    KeyMapping, StimulusSet, TrialCounts,
};
pub use data::{Category, PoolEntry, ResponseSide, Stimulus, TrialRecord};
pub use errors::IatError;
pub use export::TimelineExport;
pub use rng::DeterministicRng;
pub use sequence::{SequenceGenerator, generate};
pub use timeline::{Timeline, TimelineNode, build_timeline};
pub use types::{BlockId, ClassTag, ConditionTag, Html, KeyName, ScreenName, StimulusText};
