//! Bridge Dash Main Application
//! Main window with control panel and dashboard sections.

use crate::config::AppConfig;
use crate::data::{BridgeTable, DataLoader};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(BridgeTable),
    Error(String),
}

/// Main application window.
pub struct BridgeDashApp {
    config: AppConfig,
    table: Option<BridgeTable>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl BridgeDashApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            config,
            table: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };
        app.start_loading();
        app
    }

    /// Load the bridge CSV once, in a background thread.
    fn start_loading(&mut self) {
        let path: PathBuf = self.config.csv_path.clone();
        self.chart_viewer.clear();
        self.control_panel.settings.csv_path = Some(path.clone());
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            match DataLoader::load_csv(&path) {
                Ok(table) => {
                    let _ = tx.send(LoadResult::Complete(table));
                }
                Err(e) => {
                    log::error!("Failed to load {}: {}", path.display(), e);
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete(table) => {
                        self.control_panel.update_agencies(table.owner_agencies());
                        self.control_panel
                            .set_status(&format!("Loaded {} bridges", table.row_count()));
                        self.table = Some(table);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.control_panel.set_status(&format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }
}

impl eframe::App for BridgeDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        self.control_panel.is_loading = self.is_loading;
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::OldestCountChanged => log::debug!(
                            "Oldest bridge count set to {}",
                            self.control_panel.settings.oldest_count
                        ),
                        ControlPanelAction::AgenciesChanged => log::debug!(
                            "Agency selection: {:?}",
                            self.control_panel.get_selected_agencies()
                        ),
                        ControlPanelAction::BridgeChanged => log::debug!(
                            "Showing {}",
                            self.control_panel.settings.bridge.label()
                        ),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        let selected_agencies = self.control_panel.get_selected_agencies();
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(
                ctx,
                ui,
                self.table.as_ref(),
                &self.control_panel.settings,
                &selected_agencies,
                &self.config,
            );
        });
    }
}
