pub mod config;
pub mod logging;

pub mod download;
pub mod fetch;
pub mod manifest;
pub mod map_list;
pub mod orchestrator;
pub mod resource_path;
pub mod session;
