// src/lib.rs

//! spec-cleaner
//!
//! Canonicalizes the preamble of RPM spec files: tag spelling, value
//! alignment, tag order, one dependency per line, license spelling and a
//! handful of deprecated constructs. Comments stay attached to the line
//! below them and conditional blocks are never crossed.
//!
//! # Architecture
//!
//! - `rules`: classifies one raw line into a [`LineKind`]
//! - `tables`: license alias and pkg-config conversion tables
//! - `preamble`: paragraph / category / group reordering engine
//! - `sink`: where finished lines go
//! - `driver`: splits a whole spec file and feeds the engine

pub mod config;
pub mod driver;
mod error;
pub mod preamble;
pub mod rules;
pub mod sink;
pub mod tables;

pub use config::CleanerConfig;
pub use driver::{clean_spec, clean_spec_into};
pub use error::{Error, Result};
pub use preamble::{Category, Group, Paragraph, Preamble, SectionKind};
pub use rules::{LineKind, classify};
pub use sink::{LineSink, WriterSink};
pub use tables::ConversionTables;
