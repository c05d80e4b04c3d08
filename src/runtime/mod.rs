//! Runtime: experiment orchestration and reporting.
//!
//! - [`pipeline`]: engine construction and per-subject train/evaluate runs
//! - [`report`]: accuracy results and cross-subject summaries

pub mod pipeline;
pub mod report;

pub use pipeline::{
    run_experiment, run_subject, Engine, EngineConfig, Evaluation, ExperimentConfig,
};
pub use report::{ExperimentReport, SubjectResult, Summary};
