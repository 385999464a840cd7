//! The viewer window: controls on the left, chart in the middle, status
//! line at the bottom.

use eframe::egui;

use super::chart::ChartSelection;
use super::draw;
use super::session::Session;

pub struct ViewerApp {
    session: Session,
    date_input: String,
    value1_input: String,
    value2_input: String,
}

impl ViewerApp {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            date_input: "2023-04-10".to_string(),
            value1_input: "0".to_string(),
            value2_input: "0".to_string(),
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        if ui.button("Load data from CSV").clicked() {
            self.session.load();
        }
        if let Some(dataset) = self.session.dataset() {
            ui.weak(format!("{} rows loaded", dataset.len()));
        }

        let mut selection = self.session.selection();
        egui::ComboBox::from_label("Chart type")
            .selected_text(selection.label())
            .show_ui(ui, |ui| {
                for option in ChartSelection::ALL {
                    ui.selectable_value(&mut selection, option, option.label());
                }
            });
        if selection != self.session.selection() {
            self.session.select_chart(selection);
        }

        ui.separator();

        ui.label("Date:");
        ui.text_edit_singleline(&mut self.date_input);
        ui.label("Value 1:");
        ui.text_edit_singleline(&mut self.value1_input);
        ui.label("Value 2:");
        ui.text_edit_singleline(&mut self.value2_input);
        if ui.button("Add value").clicked() {
            self.session
                .append(&self.date_input, &self.value1_input, &self.value2_input);
        }

        ui.separator();

        ui.label("Statistics:");
        egui::ScrollArea::vertical().show(ui, |ui| {
            // &str is a read-only text buffer
            let mut stats = self.session.stats();
            ui.add(
                egui::TextEdit::multiline(&mut stats)
                    .font(egui::TextStyle::Monospace)
                    .desired_width(f32::INFINITY),
            );
        });
    }

    fn canvas(&self, ui: &mut egui::Ui) {
        match self.session.chart() {
            Some(chart) => draw::chart(ui, chart),
            None => {
                let hint = if self.session.is_loaded() {
                    "Nothing to plot"
                } else {
                    "Load a dataset to see a chart"
                };
                ui.centered_and_justified(|ui| ui.label(hint));
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.colored_label(ui.visuals().error_fg_color, self.session.status());
        });

        egui::SidePanel::left("controls")
            .resizable(false)
            .min_width(220.0)
            .show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ui));
    }
}
