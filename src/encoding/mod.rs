//! Turning raw EMG samples into query hypervectors.

pub mod encoder;
pub mod quantize;

pub use encoder::{Encoder, EncodingMode};
pub use quantize::{quantize, Quantizer};
