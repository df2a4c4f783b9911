//! Stages of a batch run.
//!
//! ```text
//! discover ──▶ compile (per document) ──▶ cleanup
//! (read_dir)   (subprocess + timeout)     (suffix match + remove)
//! ```
//!
//! 1. [`discover`]: create the output directory, list source documents
//! 2. [`compile`]: run the external compiler for one document and classify
//!    the result; the only stage that spawns processes
//! 3. [`cleanup`]: best-effort removal of intermediate files from the
//!    output directory

pub mod cleanup;
pub mod compile;
pub mod discover;
