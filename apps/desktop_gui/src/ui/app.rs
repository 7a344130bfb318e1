use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;
use editor_core::{
    CodecSelection, Dispatch, EditorController, EditorSettings, ExportOutcome, FileDownloadSink,
    OpenOutcome, UiIntent,
};
use raster_engine::{CanvasBounds, RasterEngine};
use serde::{Deserialize, Serialize};
use shared::{CodecIndex, Step};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::input;

pub const SETTINGS_STORAGE_KEY: &str = "tile_editor.settings";

const MAX_ZOOM: u32 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedEditorSettings {
    pub last_open_dir: Option<PathBuf>,
    pub last_export_dir: Option<PathBuf>,
    pub zoom: u32,
}

impl Default for PersistedEditorSettings {
    fn default() -> Self {
        Self {
            last_open_dir: None,
            last_export_dir: None,
            zoom: 2,
        }
    }
}

pub struct EditorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    settings: EditorSettings,
    persisted: PersistedEditorSettings,
    controller: EditorController<RasterEngine>,
    file_name: Option<String>,
    offset_input: String,
    offset_field_focused: bool,
    status: String,
    texture: Option<TextureHandle>,
    frame_dirty: bool,
}

impl EditorApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: EditorSettings,
        persisted: Option<PersistedEditorSettings>,
    ) -> Self {
        let mut persisted = persisted.unwrap_or_default();
        persisted.zoom = persisted.zoom.clamp(1, MAX_ZOOM);

        let engine = RasterEngine::new(CanvasBounds {
            width_px: settings.canvas_width,
            height_px: settings.canvas_height,
        });
        let controller = EditorController::new(engine, &settings.codec_labels())
            .with_export_filename(settings.export_filename.clone());
        let status = if controller.registry().is_empty() {
            "No codecs available".to_string()
        } else {
            "Open a file to begin".to_string()
        };

        Self {
            cmd_tx,
            ui_rx,
            settings,
            persisted,
            controller,
            file_name: None,
            offset_input: String::new(),
            offset_field_focused: false,
            status,
            texture: None,
            frame_dirty: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::FileRead {
                    ticket,
                    name,
                    bytes,
                } => match self.controller.complete_open(ticket, bytes) {
                    Ok(OpenOutcome::Opened { .. }) => {
                        self.status = format!("Opened {name}");
                        self.file_name = Some(name);
                        self.offset_input.clear();
                        self.frame_dirty = true;
                    }
                    Ok(OpenOutcome::Superseded) => {
                        tracing::debug!(file = %name, "ignoring superseded file read");
                    }
                    Err(err) => {
                        let error = UiError::from_message(UiErrorContext::OpenFile, err.to_string());
                        tracing::warn!(file = %name, error = %err, "file rejected");
                        self.status = error.status_text();
                        if !self.controller.has_session() {
                            self.file_name = None;
                        }
                        self.frame_dirty = true;
                    }
                },
                UiEvent::FileReadFailed { ticket, error } => {
                    if self.controller.lifecycle().is_current(ticket) {
                        tracing::warn!(
                            category = ?error.category(),
                            error = error.message(),
                            "file read failed"
                        );
                        self.status = error.status_text();
                    }
                }
                UiEvent::Error(error) => {
                    tracing::error!(
                        context = ?error.context(),
                        error = error.message(),
                        "backend error"
                    );
                    self.status = error.status_text();
                }
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if self.offset_field_focused {
            return;
        }
        for (key, modifiers, press) in ctx.input(input::pressed_nav_keys) {
            let outcome = self.controller.handle_key(press);
            if outcome.suppress_default {
                ctx.input_mut(|i| {
                    i.consume_key(modifiers, key);
                });
            }
            self.note_dispatch(outcome.dispatch);
        }
    }

    fn note_dispatch(&mut self, dispatch: Dispatch) {
        if dispatch.command().is_some() {
            self.frame_dirty = true;
        }
    }

    fn apply_intent(&mut self, intent: UiIntent) {
        let dispatch = self.controller.handle_intent(intent);
        self.note_dispatch(dispatch);
    }

    fn pick_and_open(&mut self) {
        let mut dialog = rfd::FileDialog::new();
        if let Some(dir) = self.persisted.last_open_dir.clone().or_else(dirs::home_dir) {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };
        self.persisted.last_open_dir = path.parent().map(Path::to_path_buf);

        let ticket = self.controller.begin_open();
        self.status = format!("Reading {}...", path.display());
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::ReadFile { ticket, path },
            &mut self.status,
        );
        if !queued {
            self.controller.cancel_open(ticket);
        }
    }

    fn select_codec(&mut self, index: CodecIndex) {
        match self.controller.select_codec(index) {
            Ok(CodecSelection::Applied {
                mode, mode_changed, ..
            }) => {
                if mode_changed {
                    self.status = format!("Switched to {mode:?} navigation");
                }
                self.frame_dirty = true;
            }
            Ok(CodecSelection::NoSession) => {
                self.status = "Open a file before choosing a codec".to_string();
            }
            Err(err) => {
                self.status = UiError::from_message(UiErrorContext::General, err.to_string())
                    .status_text();
            }
        }
    }

    fn submit_offset(&mut self) {
        match self.controller.submit_offset(&self.offset_input) {
            Ok(dispatch) => self.note_dispatch(dispatch),
            Err(err) => {
                self.status = format!("Invalid offset: {err}");
            }
        }
    }

    fn export(&mut self) {
        if !self.controller.has_session() {
            self.status = "Nothing to export; open a file first".to_string();
            return;
        }
        let mut dialog = rfd::FileDialog::new()
            .set_file_name(self.controller.export_filename())
            .add_filter("PNG image", &["png"]);
        if let Some(dir) = self
            .persisted
            .last_export_dir
            .clone()
            .or_else(dirs::picture_dir)
        {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };
        self.persisted.last_export_dir = path.parent().map(Path::to_path_buf);

        let mut sink = FileDownloadSink::new(self.settings.staging_dir(), &path);
        match self.controller.export_image(&mut sink) {
            Ok(ExportOutcome::Delivered { byte_len, .. }) => {
                self.status = format!("Exported {byte_len} bytes to {}", path.display());
            }
            Ok(ExportOutcome::NoSession) => {
                self.status = "Nothing to export; open a file first".to_string();
            }
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                self.status =
                    UiError::from_message(UiErrorContext::Export, err.to_string()).status_text();
            }
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        if !self.frame_dirty {
            return;
        }
        self.frame_dirty = false;

        let Some(frame) = self.controller.frame() else {
            self.texture = None;
            return;
        };
        let image = egui::ColorImage::from_rgba_unmultiplied([frame.width, frame.height], &frame.rgba);
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ctx.load_texture("editor-canvas", image, egui::TextureOptions::NEAREST));
            }
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("editor_top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open...").clicked() {
                    self.pick_and_open();
                }
                ui.label(self.file_name.as_deref().unwrap_or("No file loaded"));
                ui.separator();

                if !self.controller.registry().is_empty() {
                    let current = self.controller.active_codec().unwrap_or(CodecIndex(0));
                    let mut chosen = current;
                    let selected_text = self
                        .controller
                        .registry()
                        .display_name_for(current)
                        .unwrap_or_default()
                        .to_owned();
                    egui::ComboBox::from_id_salt("codec_selector")
                        .selected_text(selected_text)
                        .show_ui(ui, |ui| {
                            for descriptor in self.controller.registry().descriptors() {
                                ui.selectable_value(
                                    &mut chosen,
                                    descriptor.index,
                                    descriptor.display_name.as_str(),
                                );
                            }
                        });
                    if chosen != current {
                        self.select_codec(chosen);
                    }
                    ui.separator();
                }

                if ui.button("Export PNG").clicked() {
                    self.export();
                }
            });
        });
    }

    fn show_controls(&mut self, ctx: &egui::Context) {
        let controls = self.controller.visible_controls();
        let has_session = self.controller.has_session();
        let mut intents = Vec::new();

        egui::SidePanel::left("navigation_controls")
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading("Navigate");
                ui.add_enabled_ui(has_session, |ui| {
                    stepper(ui, "Width", UiIntent::Width, &mut intents);
                    stepper(ui, "Height", UiIntent::Height, &mut intents);
                    ui.separator();
                    if controls.tile_stepping {
                        stepper(ui, "Tile", UiIntent::Content, &mut intents);
                    }
                    if controls.pixel_stepping {
                        stepper(ui, "Pixel", UiIntent::Content, &mut intents);
                    }
                    stepper(ui, "Byte", UiIntent::Byte, &mut intents);
                    stepper(ui, "Bit", UiIntent::Bit, &mut intents);
                    stepper(
                        ui,
                        "Row",
                        |step| UiIntent::Row { step, fast: false },
                        &mut intents,
                    );
                    stepper(
                        ui,
                        "Page",
                        |step| UiIntent::Row { step, fast: true },
                        &mut intents,
                    );
                });

                ui.separator();
                ui.label("Offset");
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.offset_input)
                            .hint_text("0x0000")
                            .desired_width(90.0),
                    );
                    self.offset_field_focused = response.has_focus();
                    let submit_with_enter =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Go").clicked() || submit_with_enter {
                        self.submit_offset();
                    }
                });

                ui.separator();
                ui.add(egui::Slider::new(&mut self.persisted.zoom, 1..=MAX_ZOOM).text("Zoom"));
            });

        for intent in intents {
            self.apply_intent(intent);
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.monospace(self.controller.status_line().unwrap_or("-"));
                ui.separator();
                ui.label(&self.status);
            });
        });
    }

    fn show_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| match &self.texture {
            Some(texture) => {
                let size = texture.size_vec2() * self.persisted.zoom as f32;
                egui::ScrollArea::both().show(ui, |ui| {
                    ui.image((texture.id(), size));
                });
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label("Open a file to view its graphics");
                });
            }
        });
    }
}

fn stepper(
    ui: &mut egui::Ui,
    label: &str,
    make: impl Fn(Step) -> UiIntent,
    intents: &mut Vec<UiIntent>,
) {
    ui.horizontal(|ui| {
        for step in [Step::Backward, Step::Forward] {
            if ui.button(step.label()).clicked() {
                intents.push(make(step));
            }
        }
        ui.label(label);
    });
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.handle_keys(ctx);

        self.show_top_bar(ctx);
        self.show_controls(ctx);
        self.show_status_bar(ctx);
        self.refresh_texture(ctx);
        self.show_canvas(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(serialized) = serde_json::to_string(&self.persisted) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
