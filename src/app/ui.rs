use super::{EndcardConverter, FileSlot, InputMode};
use crate::utils::media::format_size;
use eframe::egui::{self, Align, Color32, RichText};

impl EndcardConverter {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 40.0;
            let footer_margin = 15.0;
            let content_height = total_height - footer_height - footer_margin;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("EndCard Converter Pro");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new(
                                "Turn images and videos into mobile-ready HTML endcards",
                            )
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);
                    self.render_source_section(ui);

                    ui.add_space(10.0);
                    self.render_edit_link_section(ui);

                    ui.add_space(20.0);
                    self.render_actions(ui);

                    if self.state.record.has_payload() {
                        ui.add_space(20.0);
                        self.render_results(ui);
                    }

                    ui.add_space(20.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(footer_margin);
                self.render_footer(ui);
            });
        });
    }

    fn render_source_section(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label("Source");
                ui.add_space(4.0);
                ui.label("ℹ").on_hover_text_at_pointer(
                    "JPEG, PNG or MP4, up to 2.2MB.\n\
                    Single mode converts one file into both orientations;\n\
                    split mode takes a separate creative per orientation.",
                );
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.selectable_value(
                    &mut self.state.input_mode,
                    InputMode::Combined,
                    "Single media file",
                );
                ui.selectable_value(
                    &mut self.state.input_mode,
                    InputMode::Split,
                    "Separate portrait & landscape",
                );
            });

            ui.add_space(8.0);
            match self.state.input_mode {
                InputMode::Combined => {
                    self.render_slot(ui, FileSlot::Combined, "📁 Select Media");
                }
                InputMode::Split => {
                    self.render_slot(ui, FileSlot::Portrait, "📁 Portrait File");
                    self.render_slot(ui, FileSlot::Landscape, "📁 Landscape File");
                }
            }
        });
    }

    fn render_slot(&mut self, ui: &mut egui::Ui, slot: FileSlot, button_label: &str) {
        let selected = match slot {
            FileSlot::Combined => self.state.combined_file.clone(),
            FileSlot::Portrait => self.state.portrait_file.clone(),
            FileSlot::Landscape => self.state.landscape_file.clone(),
        };

        ui.horizontal(|ui| {
            if ui.button(button_label).clicked() {
                self.pick_file(slot);
            }
            if let Some(file) = &selected {
                let icon = if file.media_type.is_video() { "🎬" } else { "🖼" };
                ui.label(format!(
                    "{} {} ({})",
                    icon,
                    file.filename,
                    format_size(file.size)
                ));
                if ui.button("✖").clicked() {
                    self.clear_file(slot);
                }
            }
        });
    }

    fn render_edit_link_section(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label("Edit link");
                ui.add_space(4.0);
                ui.label("ℹ").on_hover_text_at_pointer(
                    "Paste a link containing endcard_id=... (or the id itself)\n\
                    to update an existing endcard instead of creating a new one.",
                );
            });

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.edit_link_text)
                        .desired_width(ui.available_width() - 80.0)
                        .hint_text("https://.../?endcard_id=42"),
                );
                if ui.button("Load").clicked() {
                    self.apply_edit_link();
                }
            });

            if let Some(id) = &self.state.record.endcard_id {
                ui.label(
                    RichText::new(format!("Updating endcard {}", id))
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                );
            }
        });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        let can_convert = self.state.selection().is_some() && !self.state.busy();

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(can_convert, |ui| {
                let button =
                    egui::Button::new("⚙ Generate Endcard").min_size(egui::vec2(200.0, 40.0));
                if ui.add(button).clicked() {
                    self.start_conversion();
                }
            });

            if self.state.is_converting {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Converting your file...");
                });
            }
            if self.state.is_purchasing {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Contacting checkout...");
                });
            }

            ui.add_space(5.0);
            if ui.button("🗑 Clear All").clicked() {
                self.reset_session();
            }
        });
    }

    fn render_results(&mut self, ui: &mut egui::Ui) {
        let mode_label = if self.state.record.rotatable {
            "Rotatable Endcard"
        } else {
            self.state.orientation.mode_label()
        };
        let has_both = self.state.record.has_both();
        let busy = self.state.busy();

        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label("Preview");
                ui.label(RichText::new(mode_label).color(Color32::from_rgb(161, 89, 225)));
            });

            ui.add_space(8.0);
            ui.checkbox(
                &mut self.state.inject_sdk_stub,
                "Simulate the ad SDK in previews",
            );

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("🔄 Rotate Preview").clicked() {
                    self.toggle_orientation();
                }
                if ui.button("👁 Open Preview").clicked() {
                    self.preview_current();
                }
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("⬇ Download").clicked() {
                    self.download_current();
                }
                if has_both && ui.button("⬇ Download Both").clicked() {
                    self.download_both();
                }
                ui.add_enabled_ui(!busy, |ui| {
                    if ui.button("💳 Buy Full Version").clicked() {
                        self.start_checkout();
                    }
                });
            });
        });
    }

    fn render_footer(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = self.state.error_message.clone() {
            ui.add_space(5.0);
            ui.vertical_centered(|ui| {
                ui.colored_label(Color32::from_rgb(220, 50, 50), error);
            });
        }
        if let Some(status) = self.state.status_line.clone() {
            ui.vertical_centered(|ui| {
                ui.colored_label(Color32::from_rgb(0, 180, 0), status);
            });
        }
    }
}
