use anyhow::Result;
use prism_demos::driver::CubeApp;
use prism_demos::scene::SceneParams;
use prism_engine::device::GpuInit;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "prism: cube".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, GpuInit::default(), CubeApp::new(SceneParams::default()))
}
