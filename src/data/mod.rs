//! Recording I/O and test/train set construction.

pub mod dataset;
pub mod split;

pub use dataset::{load_subject, parse_samples, read_labels, read_samples, Recording};
pub use split::{downsample, training_split};
