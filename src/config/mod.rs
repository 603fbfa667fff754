// src/config/mod.rs

pub mod consts;
pub mod env_file;
pub mod options;

pub use options::Settings;
