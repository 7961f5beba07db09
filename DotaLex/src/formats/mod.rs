//! Upstream document formats

pub mod vdf;

pub use vdf::{parse_vdf, parse_vdf_root, read_vdf, to_vdf_string};
