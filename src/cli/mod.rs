//! Command-line interface for the `plens` tool.

pub mod commands;
