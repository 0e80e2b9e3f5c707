//! Application entry point for the 3D Brownian tree viewer.
//!
//! This binary sets up logging and eframe/egui and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use brownian_core::SimulationConfig;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use viewer::Viewer;

/// Starts the native eframe application.
///
/// An optional first argument names a TOML file whose values pre-fill the
/// start form. A file that cannot be read or parsed is logged and the
/// defaults are used instead.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brownian_tree_3d=info,brownian_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => match SimulationConfig::load_from_file(&path) {
            Ok(cfg) => {
                info!(%path, "loaded simulation config");
                cfg
            }
            Err(e) => {
                error!(%path, %e, "falling back to default config");
                SimulationConfig::default()
            }
        },
        None => SimulationConfig::default(),
    };

    eframe::run_native(
        "3D Brownian Tree",
        eframe::NativeOptions::default(),
        Box::new(move |_cc| Ok(Box::new(Viewer::new(cfg)))),
    )
}
