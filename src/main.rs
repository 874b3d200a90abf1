//! Camera-modes binary: probe a device and list the capture modes it gets.

use std::path::PathBuf;
use std::sync::Arc;

use camera_modes::{
    build_standard_modes, Capabilities, ModeCatalog, ModeController, ModeError, ModeId,
    ModesConfig, UiEvent, V4L2Probe,
};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "camera-modes", about = "List the capture modes a camera supports")]
struct Args {
    /// V4L2 device index (e.g., 0 for /dev/video0).
    #[arg(long, default_value_t = 0)]
    device: u32,

    /// TOML file with mode ids and capability overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip device probing and use only configured capabilities.
    #[arg(long)]
    no_probe: bool,

    /// Instantiate this mode and run one start/stop cycle.
    #[arg(long)]
    start: Option<u32>,
}

/// Application context handed to controllers.
struct CliApp {
    device: u32,
}

/// Controller that only logs its lifecycle.
struct PreviewController {
    name: &'static str,
    device: u32,
}

impl ModeController for PreviewController {
    fn start_capture(&mut self) -> camera_modes::Result<()> {
        log::info!("{} mode started on /dev/video{}", self.name, self.device);
        Ok(())
    }

    fn stop_capture(&mut self) -> camera_modes::Result<()> {
        log::info!("{} mode stopped", self.name);
        Ok(())
    }

    fn handle_event(&mut self, event: UiEvent) -> bool {
        log::debug!("{} mode ignoring {event:?}", self.name);
        false
    }
}

struct PreviewCatalog;

impl PreviewCatalog {
    fn preview(name: &'static str, app: &CliApp) -> Box<dyn ModeController> {
        Box::new(PreviewController {
            name,
            device: app.device,
        })
    }
}

impl ModeCatalog<CliApp> for PreviewCatalog {
    fn photo(&self, app: &CliApp) -> Box<dyn ModeController> {
        Self::preview("photo", app)
    }

    fn video(&self, app: &CliApp) -> Box<dyn ModeController> {
        Self::preview("video", app)
    }

    fn wide_angle_panorama(&self, app: &CliApp) -> Box<dyn ModeController> {
        Self::preview("panorama", app)
    }

    fn photo_sphere(&self, app: &CliApp) -> Box<dyn ModeController> {
        Self::preview("photosphere", app)
    }

    fn refocus(&self, app: &CliApp) -> Box<dyn ModeController> {
        Self::preview("refocus", app)
    }

    fn hdr(&self, app: &CliApp) -> Box<dyn ModeController> {
        Self::preview("hdr", app)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> camera_modes::Result<()> {
    let config = match &args.config {
        Some(path) => ModesConfig::load(path)?,
        None => ModesConfig::default(),
    };

    let probed = if args.no_probe {
        Capabilities::NONE
    } else {
        let probe = V4L2Probe::open(args.device)?;
        println!("Device: {}", probe.card());
        println!("Driver: {}", probe.driver());
        Capabilities::probe(&probe)
    };
    let capabilities = config.capabilities.apply(probed);

    let registry = build_standard_modes(&capabilities, &config.modes, &Arc::new(PreviewCatalog))?;

    for agent in registry.agents() {
        let id = agent.mode_id();
        let name = config.modes.name_of(id, &capabilities).unwrap_or("?");
        let default = if registry.default_mode_id() == Some(id) {
            " (default)"
        } else {
            ""
        };
        println!(
            "{:>3}  {name:<12} camera={}{default}",
            id.0,
            agent.requires_camera_resource()
        );
    }

    if let Some(id) = args.start.map(ModeId) {
        let app = CliApp {
            device: args.device,
        };
        let mut controller = registry
            .create_controller(id, &app)
            .ok_or(ModeError::UnknownMode(id))?;
        controller.start_capture()?;
        controller.handle_event(UiEvent::ShutterPressed);
        controller.stop_capture()?;
    }

    Ok(())
}
