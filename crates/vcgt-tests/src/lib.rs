//! # vcgt-tests
//!
//! Test support for vcgt-core.
//!
//! This crate provides:
//! - A byte-level ICC profile builder for synthetic vcgt profiles
//! - Seeded random mutation of profiles for robustness tests
//! - Test corpus management for real-world display profiles
//!
//! ## Test Categories
//!
//! 1. **Resampling**: table sizes above, below and equal to the ramp size
//! 2. **Formula**: gamma formula evaluation and scale constants
//! 3. **Malformed input**: truncation, bogus counts, unsupported encodings
//! 4. **Monotonicity**: validator findings through the full pipeline
//! 5. **Corpus**: every profile under `testdata/profiles`

pub mod builder;
pub mod corpus;
pub mod mutate;

pub use builder::{ProfileBuilder, formula_tag, table_tag, table_tag_raw};
pub use corpus::TestCorpus;
pub use mutate::Mutator;
