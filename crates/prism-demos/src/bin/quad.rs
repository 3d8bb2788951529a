use anyhow::Result;
use prism_demos::driver::QuadApp;
use prism_demos::scene::SceneParams;
use prism_engine::device::GpuInit;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "prism: quad".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, GpuInit::default(), QuadApp::new(SceneParams::default()))
}
