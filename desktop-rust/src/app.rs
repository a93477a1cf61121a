use std::path::{Path, PathBuf};

use eframe::egui::{self, Color32, RichText};
use picker_common::{grid_shape, Config, Label, Session, SessionOptions, SlotView, Transition};

use crate::thumbs::ThumbCache;

const FINISH_TITLE: &str = "Congratulation !!!";
const FINISH_MESSAGE: &str = "You have finished the classification of all the thumbnails !!!";
const BORDER_GRAY: Color32 = Color32::from_rgb(0x75, 0x75, 0x75);
const WIN_BG: Color32 = Color32::from_rgb(0x22, 0x22, 0x22);
const WATCH_BG: Color32 = Color32::from_rgb(0x00, 0x00, 0x00);
const TEXT: Color32 = Color32::from_rgb(0xcc, 0xcc, 0xcc);
const BUTTON_SIZE: f32 = 35.0;

pub struct PickerApp {
    session: Session,
    slots: Vec<SlotView>,
    thumbs: ThumbCache,
    status: String,
    error: Option<String>,
    title: String,
    pending_open: Option<PathBuf>,
}

impl PickerApp {
    pub fn new(config: Config, initial_folder: Option<PathBuf>) -> Self {
        let options = config.session_options(None, None).unwrap_or_else(|err| {
            log::warn!("{err}");
            SessionOptions::default()
        });
        let session = Session::new(options);
        Self {
            title: session.title(),
            session,
            slots: Vec::new(),
            thumbs: ThumbCache::default(),
            status: String::new(),
            error: None,
            pending_open: initial_folder,
        }
    }

    fn open_folder(&mut self) {
        if let Some(path) = rfd::FileDialog::new().set_title("Open Directory").pick_folder() {
            self.open_path(&path);
        }
    }

    fn open_path(&mut self, path: &Path) {
        self.error = None;
        match self.session.open_project(path) {
            Ok(Transition::NothingToOpen) => {
                self.slots.clear();
                self.thumbs.clear();
                self.status = format!("No clips in {}", path.display());
            }
            Ok(transition) => {
                self.status = format!("Opened {}", path.display());
                self.apply(transition);
            }
            Err(err) => {
                self.slots.clear();
                self.thumbs.clear();
                self.status = format!("Open failed: {err}");
            }
        }
    }

    fn next_page(&mut self) {
        match self.session.request_advance() {
            Ok(transition) => {
                self.error = None;
                self.apply(transition);
            }
            Err(err) => {
                log::error!("commit failed: {err}");
                self.error = Some(format!("Commit failed: {err}"));
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        self.thumbs.clear();
        match transition {
            Transition::Page(slots) => self.slots = slots,
            Transition::Finished | Transition::NothingToOpen => self.slots.clear(),
        }
    }

    fn render_top(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Folder").clicked() {
                        ui.close_menu();
                        self.open_folder();
                    }
                    if ui.button("Quit").clicked() {
                        ui.close_menu();
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.separator();
                if !self.status.is_empty() {
                    ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
                }
            });
        });
    }

    fn render_bottom(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("progress")
            .exact_height(40.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let percent = self.session.progress_percent();
                    ui.label(RichText::new(format!("{percent:.2}%")).color(TEXT));

                    let next = ui.add_enabled(self.session.is_active(), egui::Button::new("Next"));
                    let bar_width = ui.available_width();
                    ui.add(
                        egui::ProgressBar::new((percent / 100.0) as f32).desired_width(bar_width),
                    );
                    if next.clicked() {
                        self.next_page();
                    }
                });
            });

        if let Some(error) = &self.error {
            egui::TopBottomPanel::bottom("error").show(ctx, |ui| {
                ui.label(RichText::new(error).color(Color32::from_rgb(230, 80, 80)));
            });
        }
    }

    fn render_grid(&mut self, ui: &mut egui::Ui) {
        let (rows, cols) = grid_shape(self.session.page_size());
        if rows == 0 {
            return;
        }
        let spacing = ui.spacing().item_spacing;
        let cell_w = (ui.available_width() - spacing.x * (cols as f32 - 1.0)) / cols as f32;
        let cell_h = (ui.available_height() - spacing.y * (rows as f32 - 1.0)) / rows as f32;
        let cell = egui::vec2(cell_w.max(80.0), cell_h.max(80.0));

        let slots = self.slots.clone();
        let mut toggles = Vec::new();

        egui::Grid::new("slots")
            .spacing(spacing)
            .min_col_width(cell.x)
            .max_col_width(cell.x)
            .show(ui, |ui| {
                for row in slots.chunks(cols) {
                    for slot in row {
                        if let Some(toggle) = self.render_slot(ui, slot, cell) {
                            toggles.push(toggle);
                        }
                    }
                    ui.end_row();
                }
            });

        for (slot, label) in toggles {
            self.session.toggle(slot, label);
        }
    }

    fn render_slot(&mut self, ui: &mut egui::Ui, slot: &SlotView, cell: egui::Vec2) -> Option<(usize, Label)> {
        let frame = egui::Frame::none()
            .fill(WATCH_BG)
            .stroke(egui::Stroke::new(1.0, BORDER_GRAY))
            .rounding(egui::Rounding::same(4.0))
            .inner_margin(egui::Margin::same(4.0));

        let mut clicked = None;
        frame.show(ui, |ui| {
            ui.set_min_size(cell - egui::vec2(8.0, 8.0));
            ui.set_max_size(cell - egui::vec2(8.0, 8.0));

            let Some(path) = &slot.path else {
                // Empty placeholder: nothing to show, nothing to click.
                return;
            };

            ui.vertical_centered(|ui| {
                let thumb_size = egui::vec2(ui.available_width(), (ui.available_height() - BUTTON_SIZE - 24.0).max(16.0));
                if let Some(texture) = self.thumbs.get(path) {
                    ui.add(egui::Image::new(texture).max_size(thumb_size));
                } else {
                    let text = if self.thumbs.has_failed(path) { "No preview" } else { "Loading..." };
                    self.thumbs.request(path);
                    ui.allocate_ui_with_layout(
                        thumb_size,
                        egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                        |ui| {
                            ui.label(RichText::new(text).color(Color32::from_gray(140)));
                        },
                    );
                }

                ui.label(RichText::new(slot.file_name().unwrap_or_default()).color(TEXT).size(12.0));

                let current = self.session.label_of_slot(slot.index).unwrap_or_default();
                ui.horizontal(|ui| {
                    let total = BUTTON_SIZE * 3.0 + ui.spacing().item_spacing.x * 2.0;
                    ui.add_space(((ui.available_width() - total) / 2.0).max(0.0));
                    for category in Label::CATEGORIES {
                        let selected = current == category;
                        let [r, g, b] = category.color();
                        let caption = RichText::new(category.shortcut().to_string()).size(20.0);
                        let button = if selected {
                            egui::Button::new(caption.color(Color32::WHITE)).fill(Color32::from_rgb(r, g, b))
                        } else {
                            egui::Button::new(caption)
                        };
                        let response = ui
                            .add_sized([BUTTON_SIZE, BUTTON_SIZE], button.stroke(egui::Stroke::new(1.0, BORDER_GRAY)))
                            .on_hover_text(category.key());
                        if response.clicked() {
                            clicked = Some((slot.index, category));
                        }
                    }
                });
            });
        });
        clicked
    }

    fn render_finished(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.heading(RichText::new(FINISH_TITLE).color(TEXT));
            ui.label(RichText::new(FINISH_MESSAGE).color(TEXT));
        });
    }
}

impl eframe::App for PickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(path) = self.pending_open.take() {
            self.open_path(&path);
        }

        self.thumbs.poll(ctx);
        if self.thumbs.is_loading() {
            ctx.request_repaint();
        }

        let title = self.session.title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }

        self.render_top(ctx);
        self.render_bottom(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(WIN_BG).inner_margin(egui::Margin::same(8.0)))
            .show(ctx, |ui| {
                if self.session.is_finished() {
                    self.render_finished(ui);
                } else if self.session.is_active() {
                    self.render_grid(ui);
                } else {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("File > Open Folder to choose a folder of clips").color(TEXT));
                    });
                }
            });
    }
}
