//! Control Panel Widget
//! Left side panel with the dashboard inputs.

use crate::data::MAX_OLDEST;
use crate::gallery::FamousBridge;
use egui::{Color32, DragValue, RichText, ScrollArea};
use std::path::PathBuf;

/// Current widget values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    /// How many of the oldest bridges to map.
    pub oldest_count: usize,
    pub bridge: FamousBridge,
}

/// Left side control panel.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub agencies: Vec<String>,
    pub selected_agencies: Vec<bool>,
    pub status: String,
    pub is_loading: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            agencies: Vec::new(),
            selected_agencies: Vec::new(),
            status: "Ready".to_string(),
            is_loading: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the agency choices after a load. Nothing starts selected.
    pub fn update_agencies(&mut self, agencies: Vec<String>) {
        self.selected_agencies = vec![false; agencies.len()];
        self.agencies = agencies;
    }

    /// Selected agency names, in the order they are listed.
    pub fn get_selected_agencies(&self) -> Vec<String> {
        self.agencies
            .iter()
            .zip(self.selected_agencies.iter())
            .filter(|(_, &selected)| selected)
            .map(|(agency, _)| agency.clone())
            .collect()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌉 Bridge Dash")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Bridges in Georgia")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let path_text = self
                    .settings
                    .csv_path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "No file".to_string());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&path_text).size(12.0));
                    if self.is_loading {
                        ui.spinner();
                    }
                });

                let status_color = if self.status.starts_with("Error") {
                    Color32::from_rgb(220, 53, 69)
                } else if self.status.starts_with("Loaded") {
                    Color32::from_rgb(40, 167, 69)
                } else {
                    Color32::GRAY
                };
                ui.label(RichText::new(&self.status).size(11.0).color(status_color));
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Map Section =====
        ui.label(RichText::new("🗺 Map").size(14.0).strong());
        ui.add_space(5.0);
        ui.label("How many of the oldest bridges would you like to see?");
        ui.horizontal(|ui| {
            ui.label(format!("Enter your selection (up to {}):", MAX_OLDEST));
            let response = ui.add(
                DragValue::new(&mut self.settings.oldest_count)
                    .range(0..=MAX_OLDEST)
                    .speed(1.0),
            );
            if response.changed() {
                action = ControlPanelAction::OldestCountChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Owner Agency Section =====
        ui.label(RichText::new("📊 Bar Chart").size(14.0).strong());
        ui.add_space(5.0);
        ui.label("Select owner agencies:");

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(180.0).show(ui, |ui| {
                    for (i, agency) in self.agencies.iter().enumerate() {
                        if i < self.selected_agencies.len()
                            && ui.checkbox(&mut self.selected_agencies[i], agency).changed()
                        {
                            action = ControlPanelAction::AgenciesChanged;
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selected_agencies.iter_mut().for_each(|v| *v = true);
                action = ControlPanelAction::AgenciesChanged;
            }
            if ui.small_button("Clear All").clicked() {
                self.selected_agencies.iter_mut().for_each(|v| *v = false);
                action = ControlPanelAction::AgenciesChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Image Section =====
        ui.label(RichText::new("📷 Image Selection").size(14.0).strong());
        ui.add_space(5.0);
        ui.label("Select a famous Georgia bridge");
        for bridge in FamousBridge::ALL {
            if ui
                .radio_value(&mut self.settings.bridge, bridge, bridge.label())
                .changed()
            {
                action = ControlPanelAction::BridgeChanged;
            }
        }

        action
    }

    /// Set the status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    OldestCountChanged,
    AgenciesChanged,
    BridgeChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_agencies_follow_list_order() {
        let mut panel = ControlPanel::new();
        panel.update_agencies(vec![
            "City or Municipal Highway Agency".to_string(),
            "County Highway Agency".to_string(),
            "State Highway Agency".to_string(),
        ]);
        assert!(panel.get_selected_agencies().is_empty());

        panel.selected_agencies[2] = true;
        panel.selected_agencies[0] = true;
        assert_eq!(
            panel.get_selected_agencies(),
            vec![
                "City or Municipal Highway Agency".to_string(),
                "State Highway Agency".to_string(),
            ]
        );
    }

    #[test]
    fn test_update_agencies_resets_selection() {
        let mut panel = ControlPanel::new();
        panel.update_agencies(vec!["A".to_string()]);
        panel.selected_agencies[0] = true;

        panel.update_agencies(vec!["B".to_string(), "C".to_string()]);
        assert_eq!(panel.selected_agencies, vec![false, false]);
    }
}
