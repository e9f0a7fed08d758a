use std::path::PathBuf;

use anyhow::Result;

use pongbox::PongApp;
use pongbox_engine::device::GpuInit;
use pongbox_engine::logging::{init_logging, LoggingConfig};
use pongbox_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let texture_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/textures");
    let app = PongApp::new(texture_dir)?;

    let config = RuntimeConfig {
        title: "Pong in a box".to_string(),
        ..RuntimeConfig::default()
    };
    Runtime::run(config, GpuInit::default(), app)
}
