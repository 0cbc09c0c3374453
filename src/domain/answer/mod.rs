//! Answer generation modes and their stage plans

mod mode;

pub use mode::{GenerationMode, StagePlan};
