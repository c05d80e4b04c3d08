//! Single-pass training of class prototypes.

pub mod trainer;

pub use trainer::{train, TrainedModel};
