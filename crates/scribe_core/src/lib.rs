//! scribe_core: shared primitives for the scribe toolkit.
//!
//! Currently this is source-position tracking; everything else lives in the
//! stage-specific crates.

pub mod text;
