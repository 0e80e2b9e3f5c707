//! Interactive 3D Brownian tree viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the parameter form, the
//! running [`Simulation`] and a flat list of node markers, and implements
//! [`eframe::App`] to project the markers onto the screen and drive ticks.

use brownian_core::{
    CerebellumLobes, ColorScheme, NodeEvent, Simulation, SimulationConfig, Topology,
    types::Color,
};
use eframe::App;
use glam::{Mat3, Vec3};
use tracing::{error, info};

/// Radio-button choice for the starting layout. Mirrors [`Topology`]
/// without its payload so the form can keep separation and lobe count
/// around while the user switches between layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LayoutChoice {
    One,
    Two,
    Cerebellum,
}

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The start form: [`SimulationConfig`] fields, edited before growth.
/// - The simulation core: [`Simulation`], created when the user starts.
/// - The renderer state: `markers`, filled through the core's node sink.
/// - Camera settings (yaw/pitch orbit, pan, zoom) and tick timing.
///
/// ### Fields
/// - `cfg` - Parameters shown in the start form.
/// - `layout` / `separation` / `lobes` - Form state that builds `cfg.topology`.
/// - `use_seed` - Whether `cfg.seed` is applied.
///
/// - `sim` - Running simulation, `None` while the form is shown.
/// - `markers` - Every node received so far, in acceptance order.
/// - `last_new_start` - Index of the first marker added by the last step.
/// - `marker_size` - Node size the running simulation was started with.
/// - `error` - Last configuration error, shown under the form.
///
/// - `running` - Whether the simulation is currently auto-advancing.
/// - `ticks_per_step` - Scheduler ticks performed per step.
/// - `zoom` / `yaw` / `pitch` / `pan` - Camera.
///
/// - `step_interval` - Target time between automatic steps (seconds).
/// - `last_step_time` - Time stamp of the last step (egui time).
/// - `last_step_dt` - Actual time delta between the last two steps.
pub struct Viewer {
    cfg: SimulationConfig,
    layout: LayoutChoice,
    separation: f32,
    lobes: CerebellumLobes,
    use_seed: bool,

    sim: Option<Simulation>,
    markers: Vec<NodeEvent>,
    last_new_start: usize,
    marker_size: f32,
    error: Option<String>,

    running: bool,
    ticks_per_step: usize,
    zoom: f32,
    yaw: f32,
    pitch: f32,
    pan: egui::Vec2,

    step_interval: f64,
    last_step_time: f64,
    last_step_dt: f64,
}

impl Viewer {
    /// Creates a viewer showing the start form, pre-filled from `cfg`.
    pub fn new(cfg: SimulationConfig) -> Self {
        let (layout, separation, lobes) = match cfg.topology {
            Topology::Single => (LayoutChoice::One, 30.0, CerebellumLobes::Four),
            Topology::Pair { separation } => (LayoutChoice::Two, separation, CerebellumLobes::Four),
            Topology::Cerebellum { lobes } => (LayoutChoice::Cerebellum, 30.0, lobes),
        };

        Self {
            cfg,
            layout,
            separation,
            lobes,
            use_seed: cfg.seed.is_some(),
            sim: None,
            markers: Vec::new(),
            last_new_start: 0,
            marker_size: cfg.node_size,
            error: None,
            running: false,
            ticks_per_step: 1,
            zoom: 3.0,
            yaw: 0.0,
            pitch: 0.0,
            pan: egui::vec2(0.0, 0.0),
            step_interval: 0.02,
            last_step_time: 0.0,
            last_step_dt: 0.0,
        }
    }

    /// Config as described by the current form state.
    fn form_config(&self) -> SimulationConfig {
        let topology = match self.layout {
            LayoutChoice::One => Topology::Single,
            LayoutChoice::Two => Topology::Pair {
                separation: self.separation,
            },
            LayoutChoice::Cerebellum => Topology::Cerebellum { lobes: self.lobes },
        };
        SimulationConfig {
            topology,
            seed: if self.use_seed { self.cfg.seed.or(Some(0)) } else { None },
            ..self.cfg
        }
    }

    /// Builds a simulation from the form and starts auto-running it.
    ///
    /// On an invalid config the error is kept for display and the form
    /// stays up.
    fn start(&mut self) {
        let cfg = self.form_config();
        match Simulation::new(&cfg) {
            Ok(sim) => {
                info!(fronts = sim.fronts().len(), "growth started");
                self.markers = sim.root_events().collect();
                self.last_new_start = self.markers.len();
                self.marker_size = cfg.node_size;
                self.sim = Some(sim);
                self.cfg = cfg;
                self.error = None;
                self.running = true;
            }
            Err(e) => {
                error!(%e, "invalid simulation config");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Drops the running simulation and returns to the start form.
    fn reset(&mut self) {
        self.sim = None;
        self.markers.clear();
        self.last_new_start = 0;
        self.running = false;
    }

    /// Advances the simulation by `ticks_per_step` scheduler ticks.
    ///
    /// Every accepted node lands in `markers` through the node sink; the
    /// index where this step's nodes begin is kept for highlighting.
    fn step_once(&mut self) {
        let Some(sim) = self.sim.as_mut() else {
            return;
        };
        self.last_new_start = self.markers.len();
        sim.run_ticks(self.ticks_per_step, &mut self.markers);
    }

    fn rotation(&self) -> Mat3 {
        Mat3::from_rotation_x(self.pitch) * Mat3::from_rotation_z(self.yaw)
    }

    /// Projects a world-space point to screen-space.
    ///
    /// World axes follow the usual scene convention: x right, y into the
    /// screen, z up. The point is rotated by the orbit (yaw about z, then
    /// pitch about x), projected orthographically onto the x/z plane,
    /// scaled by `zoom`, offset by `pan` and centered in `rect`.
    ///
    /// ### Returns
    /// The screen position and the rotated depth (larger is farther away).
    fn project(&self, p: Vec3, rect: egui::Rect) -> (egui::Pos2, f32) {
        let v = self.rotation() * p;
        let center = rect.center();
        (
            egui::pos2(
                center.x + v.x * self.zoom + self.pan.x,
                center.y - v.z * self.zoom + self.pan.y,
            ),
            v.y,
        )
    }

    /// Converts a node color tag to an egui color, darkened by `shade`.
    fn to_color32(c: Color, shade: f32) -> egui::Color32 {
        let ch = |x: f32| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        egui::Color32::from_rgba_unmultiplied(
            ch(c.r * shade),
            ch(c.g * shade),
            ch(c.b * shade),
            ch(c.a),
        )
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, stepping, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let started = self.sim.is_some();

                if ui
                    .add_enabled(
                        started,
                        egui::Button::new(if self.running { "⏸ Pause" } else { "▶ Run" }),
                    )
                    .clicked()
                {
                    self.running = !self.running;
                }

                ui.add(
                    egui::DragValue::new(&mut self.step_interval)
                        .prefix("dt target = ")
                        .range(0.0..=1.0)
                        .speed(0.01),
                );
                ui.add(
                    egui::DragValue::new(&mut self.ticks_per_step)
                        .prefix("ticks/step = ")
                        .range(1..=100)
                        .speed(1.0),
                );

                if ui.add_enabled(started, egui::Button::new("Step")).clicked() {
                    let now = ctx.input(|i| i.time);
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = now - self.last_step_time;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.1..=20.0).text("Zoom"));
                if ui.button("Reset view").clicked() {
                    self.yaw = 0.0;
                    self.pitch = 0.0;
                    self.pan = egui::vec2(0.0, 0.0);
                }
            });
        });
    }

    /// Builds the bottom status bar (timing, node count, active parents).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt target = {:.3} s", self.step_interval));
                ui.label(format!("dt last = {:.3} s", self.last_step_dt));
                ui.separator();
                ui.label(format!("nodes = {}", self.markers.len()));
                if let Some(sim) = &self.sim {
                    ui.label(format!("ticks = {}", sim.ticks()));
                    ui.label(format!(
                        "active parents = {}",
                        sim.fronts().iter().map(|f| f.len()).sum::<usize>()
                    ));
                }
            });
        });
    }

    /// Builds the start form, or per-front statistics once growth runs.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                if let Some(sim) = &self.sim {
                    ui.heading("Fronts");
                    for f in sim.fronts() {
                        let s = f.stats();
                        ui.separator();
                        ui.colored_label(
                            Self::to_color32(f.color(), 1.0),
                            format!("front {}", f.id()),
                        );
                        ui.label(format!("active = {}  burned = {}", f.len(), f.burned_out()));
                        ui.label(format!("accepted = {} / {}", s.accepted, s.attempts));
                        ui.label(format!("too close = {}  crowded = {}", s.too_close, s.crowded));
                        if s.stalled > 0 {
                            ui.label(format!("stalled = {}", s.stalled));
                        }
                    }
                    return;
                }

                ui.heading("Simulation");

                ui.separator();
                Self::labeled_drag_f32(ui, "node size:", &mut self.cfg.node_size, 0.8..=50.0, 0.1);

                ui.separator();
                ui.label("Layout");
                ui.horizontal(|ui| {
                    ui.radio_value(&mut self.layout, LayoutChoice::One, "One point");
                    ui.radio_value(&mut self.layout, LayoutChoice::Two, "Two point");
                    ui.radio_value(&mut self.layout, LayoutChoice::Cerebellum, "Cerebellum");
                });
                match self.layout {
                    LayoutChoice::Two => {
                        Self::labeled_drag_f32(ui, "separation:", &mut self.separation, 1.0..=500.0, 0.5);
                    }
                    LayoutChoice::Cerebellum => {
                        ui.horizontal(|ui| {
                            ui.radio_value(&mut self.lobes, CerebellumLobes::Four, "Four");
                            ui.radio_value(&mut self.lobes, CerebellumLobes::Five, "Five");
                        });
                    }
                    LayoutChoice::One => {}
                }

                ui.separator();
                ui.label("Color scheme");
                ui.horizontal(|ui| {
                    ui.radio_value(&mut self.cfg.color_scheme, ColorScheme::Gray, "Gray");
                    ui.radio_value(&mut self.cfg.color_scheme, ColorScheme::Random, "Random");
                    ui.radio_value(&mut self.cfg.color_scheme, ColorScheme::Palette, "RGBY(W)");
                });

                ui.separator();
                ui.horizontal(|ui| {
                    ui.checkbox(&mut self.use_seed, "seed:");
                    let mut seed = self.cfg.seed.unwrap_or(0);
                    if ui
                        .add_enabled(self.use_seed, egui::DragValue::new(&mut seed))
                        .changed()
                    {
                        self.cfg.seed = Some(seed);
                    }
                });

                ui.separator();
                if ui.button("Make it so!").clicked() {
                    self.start();
                }
                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::RED, err);
                }
            });
    }

    /// Builds the central panel where the markers are drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Orbit with the primary button, pan with the secondary.
            if response.dragged_by(egui::PointerButton::Primary) {
                let delta = response.drag_delta();
                self.yaw += delta.x * 0.01;
                self.pitch = (self.pitch + delta.y * 0.01)
                    .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
            }
            if response.dragged_by(egui::PointerButton::Secondary) {
                self.pan += response.drag_delta();
            }

            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 && response.hovered() {
                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.1, 20.0);
            }

            // Painter's algorithm: far markers first.
            let mut projected: Vec<(usize, egui::Pos2, f32)> = self
                .markers
                .iter()
                .enumerate()
                .map(|(i, m)| {
                    let (p, depth) = self.project(m.pos, rect);
                    (i, p, depth)
                })
                .collect();
            projected.sort_by(|a, b| b.2.total_cmp(&a.2));

            let (near, far) = projected
                .iter()
                .fold((f32::MAX, f32::MIN), |(lo, hi), (_, _, d)| (lo.min(*d), hi.max(*d)));
            let span = (far - near).max(1.0);
            let r = (self.marker_size * 0.5 * self.zoom).max(1.5);

            for &(i, p, depth) in &projected {
                // Nearer markers are lit more strongly.
                let shade = 1.0 - 0.5 * (depth - near) / span;
                let color = Self::to_color32(self.markers[i].color, shade);
                painter.circle_filled(p, r, color);
                if i >= self.last_new_start && self.sim.is_some() {
                    painter.circle_stroke(p, r, egui::Stroke::new(1.0, egui::Color32::RED));
                }
            }

            // Auto-run simulation if requested.
            if self.running {
                let now = ctx.input(|i| i.time);
                let elapsed = now - self.last_step_time;
                if elapsed >= self.step_interval {
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = elapsed;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
