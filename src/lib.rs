//! strudel-ref - compact reference indexes for coding agents
//!
//! Compiles hand-authored sources (YAML anti-patterns, comment-annotated
//! idioms and snippets) and documentation-extraction JSON dumps into
//! line-delimited JSON files meant to be grepped line by line.

// Safety lints
#![deny(unsafe_code)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Panic prevention - warn in library code (allow in tests via #[cfg_attr])
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]

// Code quality
#![warn(clippy::cognitive_complexity)]
#![warn(clippy::too_many_arguments)]
#![warn(clippy::too_many_lines)]

pub mod compile;
pub mod config;
pub mod docs;
pub mod doctor;
pub mod header;
pub mod index;
pub mod jsonl;
pub mod model;
pub mod normalize;
pub mod overlay;
pub mod source;
pub mod sounds;
pub mod stats;
