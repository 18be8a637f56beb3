// Command modules for token-launch CLI

pub mod create;
pub mod size;
pub mod utils;
