// Command implementations for the edkit CLI and embedding hosts

pub mod aggregate;
pub mod copy_path;
pub mod identifier;
pub mod sample_config;
pub mod search_definition;
