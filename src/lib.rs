//! freqset: a frequency-ordered unique collection.
//!
//! A set of distinct elements kept continuously sorted by how many times each
//! element has been re-added, most-frequent first. See [`FrequencySet`] for
//! the public surface and the [`set`] module docs for the architecture.

pub mod ds;
pub mod error;
pub mod prelude;
pub mod set;

pub use set::FrequencySet;
