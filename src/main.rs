//! Dot Field RS - Main Application
//! Pointer-reactive dot field backdrops with egui GUI

use eframe::egui;

use dotfield::config::{AppConfig, FieldConfig};
use dotfield::events::{EventTranslator, SurfaceEvent};
use dotfield::field::DotField;
use dotfield::presets::PresetType;
use std::time::Instant;

/// One hosted field: the engine instance plus its input translator.
struct FieldInstance {
    label: &'static str,
    preset: PresetType,
    field: DotField,
    translator: EventTranslator,
    event_buf: Vec<SurfaceEvent>,
}

impl FieldInstance {
    fn new(label: &'static str, preset: PresetType, config: FieldConfig) -> Self {
        Self {
            label,
            preset,
            field: DotField::new(config),
            translator: EventTranslator::new(),
            event_buf: Vec::new(),
        }
    }

    /// Drive one frame for this instance: translate input, advance, draw.
    fn show(&mut self, ctx: &egui::Context, ui: &egui::Ui, rect: egui::Rect) {
        self.event_buf.clear();
        self.translator.collect(ctx, rect, &mut self.event_buf);
        for event in self.event_buf.drain(..) {
            self.field.handle_event(event);
        }
        self.field.step();

        let painter = ui.painter_at(rect);
        let [r, g, b] = self.field.config().background;
        painter.rect_filled(rect, 8.0, egui::Color32::from_rgb(r, g, b));
        self.field.render(&painter, rect);

        painter.text(
            rect.left_top() + egui::vec2(12.0, 8.0),
            egui::Align2::LEFT_TOP,
            self.label,
            egui::FontId::proportional(12.0),
            egui::Color32::from_gray(110),
        );
    }
}

#[derive(Clone, Copy, PartialEq)]
enum SettingsTab {
    Hero,
    Beacon,
}

/// Main application state
struct DotFieldApp {
    config: AppConfig,
    hero: FieldInstance,
    beacon: FieldInstance,
    last_update: Instant,
    last_dt: f32,
    show_settings: bool,
    settings_tab: SettingsTab,
}

impl DotFieldApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Setup dark theme
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = egui::Color32::from_rgba_unmultiplied(15, 15, 20, 245);
        visuals.panel_fill = egui::Color32::from_rgba_unmultiplied(18, 18, 24, 240);
        cc.egui_ctx.set_visuals(visuals);

        let config = AppConfig::default();
        let hero = FieldInstance::new("hero", PresetType::Hero, config.hero.clone());
        let beacon = FieldInstance::new("beacon", PresetType::Beacon, config.beacon.clone());

        Self {
            config,
            hero,
            beacon,
            last_update: Instant::now(),
            last_dt: 0.016,
            show_settings: true,
            settings_tab: SettingsTab::Hero,
        }
    }

    fn settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Dot Field RS");
        if self.config.show_fps {
            ui.label(format!("FPS: {:.0}", 1.0 / self.last_dt.max(1e-6)));
        }
        ui.separator();

        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.settings_tab, SettingsTab::Hero, "Hero field");
            ui.selectable_value(&mut self.settings_tab, SettingsTab::Beacon, "Beacon field");
        });
        ui.separator();

        let (instance, field_config) = match self.settings_tab {
            SettingsTab::Hero => (&mut self.hero, &mut self.config.hero),
            SettingsTab::Beacon => (&mut self.beacon, &mut self.config.beacon),
        };

        let mut selected = instance.preset;
        egui::ComboBox::from_label("Preset")
            .selected_text(selected.name())
            .show_ui(ui, |ui| {
                for preset in PresetType::all() {
                    ui.selectable_value(&mut selected, preset, preset.name())
                        .on_hover_text(preset.description());
                }
            });
        if selected != instance.preset {
            instance.preset = selected;
            *field_config = selected.field_config();
            instance.field.set_config(field_config.clone());
        }

        if field_sliders(ui, field_config) {
            instance.preset = PresetType::Custom;
            instance.field.set_config(field_config.clone());
        }

        ui.separator();
        ui.checkbox(&mut self.config.show_fps, "Show FPS");

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Save Config").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("json", &["json"])
                    .save_file()
                {
                    if let Err(e) = self.config.save(&path.display().to_string()) {
                        eprintln!("Error saving config: {}", e);
                    }
                }
            }
            if ui.button("Load Config").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("json", &["json"])
                    .pick_file()
                {
                    match AppConfig::load(&path.display().to_string()) {
                        Ok(loaded) => {
                            self.config = loaded;
                            self.hero.preset = PresetType::Custom;
                            self.beacon.preset = PresetType::Custom;
                            self.hero.field.set_config(self.config.hero.clone());
                            self.beacon.field.set_config(self.config.beacon.clone());
                        }
                        Err(e) => eprintln!("Error loading config: {}", e),
                    }
                }
            }
        });
    }
}

/// Live constant sliders for one field. Returns true when anything changed.
fn field_sliders(ui: &mut egui::Ui, config: &mut FieldConfig) -> bool {
    let mut changed = false;
    changed |= ui
        .add(egui::Slider::new(&mut config.spacing, 10.0..=120.0).text("Dot spacing"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut config.opacity_min, 0.0..=1.0).text("Opacity min"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut config.opacity_max, 0.0..=1.0).text("Opacity max"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut config.base_radius, 0.5..=5.0).text("Base radius"))
        .changed();
    changed |= ui
        .add(
            egui::Slider::new(&mut config.interaction_radius, 50.0..=400.0)
                .text("Interaction radius"),
        )
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut config.opacity_boost, 0.0..=1.0).text("Opacity boost"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut config.radius_boost, 0.0..=6.0).text("Radius boost"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut config.jitter, 0.0..=0.5).text("Jitter"))
        .changed();
    if changed {
        // Keep the oscillation range well-formed while dragging.
        config.opacity_max = config.opacity_max.max(config.opacity_min);
    }

    ui.horizontal(|ui| {
        ui.label("Dot color");
        changed |= ui.text_edit_singleline(&mut config.base_color).changed();
    });
    ui.horizontal(|ui| {
        ui.label("Backdrop");
        changed |= ui.color_edit_button_srgb(&mut config.background).changed();
    });
    changed
}

impl eframe::App for DotFieldApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_update).as_secs_f32();
        self.last_update = now;
        self.last_dt = dt;

        if self.show_settings {
            egui::SidePanel::left("settings")
                .default_width(260.0)
                .show(ctx, |ui| self.settings_panel(ui));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_rgb(8, 8, 10)))
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap().shrink(8.0);
                let gap = 8.0;
                let half = ((rect.height() - gap) / 2.0).max(0.0);
                let top = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), half));
                let bottom = egui::Rect::from_min_size(
                    egui::pos2(rect.left(), top.bottom() + gap),
                    egui::vec2(rect.width(), half),
                );

                self.hero.show(ctx, ui, top);
                self.beacon.show(ctx, ui, bottom);
            });

        if ctx.input(|i| i.key_pressed(egui::Key::F1)) {
            self.show_settings = !self.show_settings;
        }

        // The fields animate every frame, windowed or not.
        ctx.request_repaint();
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("starting Dot Field RS");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Dot Field RS")
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dot Field RS",
        options,
        Box::new(|cc| Box::new(DotFieldApp::new(cc))),
    )
}
