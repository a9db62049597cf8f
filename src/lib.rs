//! filedrop library: config, outbound delivery seam, tool registry, send_file tool.

pub mod config;
pub mod outbound;
pub mod tools;
