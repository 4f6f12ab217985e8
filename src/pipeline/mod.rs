//! The chunk → summarize → merge → sanitize pipeline.
//!
//! Every inbound email flows through:
//! 1. `chunk::chunk()` — lossless character-budget partition (pure)
//! 2. `summarize::summarize_chunk()` — one completion call per chunk, in order
//! 3. `merge::merge()` — fuse partials, or pass through a single one
//! 4. `sanitize::sanitize()` — strip code-fence artifacts (after every call)
//!
//! Failures degrade to empty/placeholder content; nothing here aborts a
//! request.

pub mod chunk;
pub mod merge;
pub mod processor;
pub mod sanitize;
pub mod summarize;
pub mod types;

pub use processor::{Pipeline, PipelineReport};
