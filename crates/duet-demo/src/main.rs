use winit::dpi::LogicalSize;

use duet_engine::device::GpuInit;
use duet_engine::logging::{init_logging, LoggingConfig};
use duet_engine::window::{Runtime, RuntimeConfig};

use crate::app::DemoApp;

mod app;
mod scene;

fn main() {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Triangles".to_string(),
        initial_size: LogicalSize::new(1024.0, 768.0),
    };

    if let Err(e) = Runtime::run(config, GpuInit::default(), DemoApp::new()) {
        log::error!("setup failed: {e:#}");

        // Keep the console open so the diagnostic can be read before exiting.
        eprintln!("setup failed: {e:#}");
        eprintln!("press enter to exit");
        let _ = std::io::stdin().read_line(&mut String::new());

        std::process::exit(-1);
    }
}
