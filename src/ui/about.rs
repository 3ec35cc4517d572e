//! About/Help Panel Component for Rosterly
//!
//! A small modal window with application information, a pointer to the
//! online guide, and a short description of what each output format is
//! for.

use eframe::egui::{self, RichText};

/// Online documentation for the converter.
pub const DOCS_URL: &str = "https://hursts.org.uk/aimsdocs/webapp.html";

/// About/Help panel state and rendering.
#[derive(Debug, Clone, Default)]
pub struct AboutPanel;

impl AboutPanel {
    pub fn new() -> Self {
        Self
    }

    /// Render the panel. `open` is cleared when the user closes it.
    pub fn show(&self, ctx: &egui::Context, open: &mut bool) {
        egui::Window::new("Help")
            .open(open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(4.0);
                    ui.heading(RichText::new("Rosterly").size(22.0).strong());
                    ui.label(
                        RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                            .size(13.0)
                            .weak(),
                    );
                    ui.add_space(4.0);
                    ui.label("Convert an AIMS crew roster into flight journal,\niCalendar, or CSV logbook output.");
                });

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                ui.label(RichText::new("Usage").strong());
                ui.label("Drop a roster file onto the window, or use Load Roster…");
                ui.label("Pick the output type first; changing it clears the output.");
                ui.label("Conversion happens on a remote service, so you need to be online.");

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label("Online guide:");
                    if ui
                        .link("hursts.org.uk/aimsdocs")
                        .on_hover_text("Open the documentation in your browser")
                        .clicked()
                    {
                        let _ = open::that(DOCS_URL);
                    }
                });
            });
    }
}
