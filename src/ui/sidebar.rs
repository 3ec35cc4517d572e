//! Sidebar UI Component for Rosterly
//!
//! The sidebar holds the output-format selector, the format-specific
//! option panel, and the action buttons. It renders from plain values
//! and reports what the user did as a `SidebarAction`; the app applies
//! the action afterwards, keeping all state mutation in one place.

use crate::convert::Format;
use eframe::egui::{self, RichText, Ui};

/// Actions that can be triggered from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SidebarAction {
    /// An output format radio was clicked
    FormatSelected(Format),
    /// The all-day-events checkbox was toggled
    AllDayEventsToggled(bool),
    /// Open the roster file dialog
    LoadRoster,
    /// Save the current output to a file
    SaveOutput,
    /// Copy the current output to the clipboard
    CopyOutput,
    /// Open the help/about panel
    ShowHelp,
}

/// Sidebar rendering.
#[derive(Debug, Clone, Default)]
pub struct Sidebar;

impl Sidebar {
    pub fn new() -> Self {
        Self
    }

    /// Render the sidebar and return the user's action, if any.
    ///
    /// Radio clicks are reported even when the clicked format is already
    /// selected; re-selecting a format deliberately clears the output.
    pub fn show(
        &self,
        ui: &mut Ui,
        format: Format,
        all_day_events: bool,
        pending: bool,
    ) -> Option<SidebarAction> {
        let mut action = None;

        ui.add_space(4.0);
        ui.group(|ui| {
            ui.label(RichText::new("Output type").strong());
            ui.separator();
            for candidate in Format::all() {
                if ui.radio(format == *candidate, candidate.label()).clicked() {
                    action = Some(SidebarAction::FormatSelected(*candidate));
                }
            }
        });

        if format.has_options() {
            ui.add_space(4.0);
            ui.group(|ui| {
                ui.label(RichText::new("Options").strong());
                ui.separator();
                let mut checked = all_day_events;
                if ui.checkbox(&mut checked, "All Day Events").changed() {
                    action = Some(SidebarAction::AllDayEventsToggled(checked));
                }
            });
        }

        ui.add_space(12.0);
        let button_size = egui::vec2(ui.available_width(), 24.0);

        if ui
            .add_sized(button_size, egui::Button::new("Load Roster…"))
            .clicked()
        {
            action = Some(SidebarAction::LoadRoster);
        }
        if pending {
            ui.add_space(2.0);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.weak("Converting…");
            });
        }

        ui.add_space(12.0);
        if ui
            .add_sized(button_size, egui::Button::new("Save…"))
            .clicked()
        {
            action = Some(SidebarAction::SaveOutput);
        }
        ui.add_space(2.0);
        if ui
            .add_sized(button_size, egui::Button::new("Copy All"))
            .clicked()
        {
            action = Some(SidebarAction::CopyOutput);
        }

        ui.add_space(12.0);
        if ui
            .add_sized(button_size, egui::Button::new("Help"))
            .clicked()
        {
            action = Some(SidebarAction::ShowHelp);
        }

        action
    }
}
