//! Generator and server configuration

mod generator;
mod server;

pub use generator::{BusinessLineSpec, GeneratorConfig};
pub use server::{ServerConfig, DEFAULT_DATA_PATH};
