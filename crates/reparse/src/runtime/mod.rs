//! Runtime module: boot, then pump stdin to stdout.

pub mod boot;
pub mod serve;
