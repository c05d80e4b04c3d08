//! Hyperdimensional memory (HDM).
//!
//! The vector-symbolic substrate of the classifier:
//! - **Hypervectors** in three representations (bipolar, integer, real)
//!   behind one [`HyperVector`] trait
//! - **Item memory** for unordered symbols (EMG channels)
//! - **Continuous item memory** for ordered, quantised amplitude levels
//! - **Associative memory** for class prototypes with nearest-neighbour search

pub mod hdm;
pub mod hdm_bipolar;
pub mod hdm_continuous;
pub mod hdm_integer;
pub mod hdm_item;
pub mod hdm_real;
pub mod hdm_retrieval;

pub use hdm::{Bundler, HyperVector, Representation};
pub use hdm_bipolar::BipolarVector;
pub use hdm_continuous::ContinuousItemMemory;
pub use hdm_integer::IntegerVector;
pub use hdm_item::ItemMemory;
pub use hdm_real::RealVector;
pub use hdm_retrieval::AssociativeMemory;
