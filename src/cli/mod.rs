//! CLI subcommand implementations for the Pagevault binary.

pub mod archive_cmd;
pub mod doctor;
pub mod serve;
