//! Blockfit (workspace facade crate).
//!
//! This package exposes `blockfit::{core,engine,types}` while the implementation lives in
//! dedicated crates under `crates/`, plus the TOML [`settings`] used by the binary.

pub use blockfit_core as core;
pub use blockfit_engine as engine;
pub use blockfit_types as types;

pub mod settings;
