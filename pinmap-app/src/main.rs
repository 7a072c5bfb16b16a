use anyhow::Context;
use clap::Parser;
use pinmap::{
    data::locations::parse_locations,
    input::events::{MapEvent, MapEventKind},
    seattle_locations, LocationRecord, MapCanvas, MapConfig, UiMapExt,
};
use std::path::PathBuf;

/// Pin map viewer
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON map config; defaults reproduce the Seattle map
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON array of locations to show instead of the built-in Seattle list
    #[arg(long)]
    locations: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pinmap::init_logging();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => MapConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MapConfig::default(),
    };
    let locations = match &args.locations {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read locations {}", path.display()))?;
            parse_locations(&json)?
        }
        None => seattle_locations().to_vec(),
    };

    let window_size = [
        (config.size.0 as f32 + 80.0).max(640.0),
        config.size.1 as f32 + 120.0,
    ];
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window_size)
            .with_title(config.title.clone()),
        ..Default::default()
    };

    let app = PinMapApp::new(config, &locations)?;
    eframe::run_native(
        "pinmap-app",
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Box::new(app)
        }),
    )
    .map_err(|err| anyhow::anyhow!("viewer exited with an error: {err}"))?;

    Ok(())
}

/// The main application struct
struct PinMapApp {
    canvas: MapCanvas,
}

impl PinMapApp {
    fn new(config: MapConfig, locations: &[LocationRecord]) -> pinmap::Result<Self> {
        let mut canvas = MapCanvas::from_config(&config, locations)?;

        canvas.on(MapEventKind::PopupOpen, |event| {
            if let MapEvent::PopupOpen { marker_id } = event {
                log::info!("popup opened for location {}", marker_id);
            }
        });
        canvas.on(MapEventKind::PopupClose, |event| {
            if let MapEvent::PopupClose { marker_id } = event {
                log::info!("popup closed for location {}", marker_id);
            }
        });

        Ok(Self { canvas })
    }
}

impl eframe::App for PinMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(self.canvas.config().title.as_str());
                ui.add_space(8.0);
                ui.pin_map(&mut self.canvas);

                let viewport = self.canvas.viewport();
                ui.label(format!(
                    "Center: {:.4}, {:.4} | Zoom: {:.2} | Open popups: {}",
                    viewport.center.lat,
                    viewport.center.lng,
                    viewport.zoom,
                    self.canvas.shown_marker_ids().len()
                ));
            });
        });
    }
}
