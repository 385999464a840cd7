//! Painting of rendered charts with egui_plot and the egui painter.

use eframe::egui::{self, epaint::TextShape, Align2, Color32, FontId, Pos2, Shape, Stroke, Vec2};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoint, PlotPoints};
use std::f32::consts::{FRAC_PI_2, TAU};

use super::chart::{Chart, PieChart, SeriesChart, Tick};

/// Space under a bar chart reserved for slanted date labels
const LABEL_BAND: f32 = 70.0;

const MIN_PLOT_HEIGHT: f32 = 120.0;

/// matplotlib's default cycle
const PALETTE: [Color32; 10] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(255, 127, 14),
    Color32::from_rgb(44, 160, 44),
    Color32::from_rgb(214, 39, 40),
    Color32::from_rgb(148, 103, 189),
    Color32::from_rgb(140, 86, 75),
    Color32::from_rgb(227, 119, 194),
    Color32::from_rgb(127, 127, 127),
    Color32::from_rgb(188, 189, 34),
    Color32::from_rgb(23, 190, 207),
];

pub fn chart(ui: &mut egui::Ui, chart: &Chart) {
    ui.heading(chart.title());
    match chart {
        Chart::Line(series) => line(ui, series),
        Chart::Bar(series) => bar(ui, series),
        Chart::Pie(pie_chart) => pie(ui, pie_chart),
    }
}

fn line(ui: &mut egui::Ui, chart: &SeriesChart) {
    let ticks = chart.ticks.clone();
    let plot = series_plot(egui::Id::new("line_chart"), chart)
        .x_axis_formatter(move |mark, _range| label_at(&ticks, mark.value));

    let line = Line::new(PlotPoints::from(chart.points.clone()))
        .name(chart.y_label)
        .color(PALETTE[0]);
    plot.show(ui, |plot_ui| plot_ui.line(line));
}

fn bar(ui: &mut egui::Ui, chart: &SeriesChart) {
    let height = (ui.available_height() - LABEL_BAND).max(MIN_PLOT_HEIGHT);
    // Labels are painted below, slanted
    let plot = series_plot(egui::Id::new("bar_chart"), chart)
        .height(height)
        .x_axis_formatter(|_mark, _range| String::new());

    let bars = chart
        .points
        .iter()
        .map(|&[x, y]| Bar::new(x, y).width(0.8).fill(PALETTE[0]))
        .collect();
    let bar_chart = BarChart::new(bars).name(chart.y_label);
    let response = plot.show(ui, |plot_ui| plot_ui.bar_chart(bar_chart));

    let (band, _) = ui.allocate_exact_size(
        Vec2::new(ui.available_width(), LABEL_BAND),
        egui::Sense::hover(),
    );
    let painter = ui.painter_at(band);
    let color = ui.visuals().text_color();
    let angle = chart.label_rotation.to_radians();

    for tick in &chart.ticks {
        let x = response
            .transform
            .position_from_point(&PlotPoint::new(tick.position, 0.0))
            .x;
        let galley = painter.layout_no_wrap(tick.label.clone(), FontId::proportional(12.0), color);
        let text = TextShape::new(Pos2::new(x, band.top() + 2.0), galley, color).with_angle(angle);
        painter.add(text);
    }
}

fn series_plot(id: egui::Id, chart: &SeriesChart) -> Plot {
    let positions: Vec<f64> = chart.ticks.iter().map(|tick| tick.position).collect();

    Plot::new(id)
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_grid_spacer(move |_input| {
            positions
                .iter()
                .map(|&value| GridMark {
                    value,
                    step_size: 1.0,
                })
                .collect()
        })
}

fn label_at(ticks: &[Tick], value: f64) -> String {
    ticks
        .iter()
        .find(|tick| (tick.position - value).abs() < 0.5)
        .map(|tick| tick.label.clone())
        .unwrap_or_default()
}

fn pie(ui: &mut egui::Ui, chart: &PieChart) {
    let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = 0.35 * rect.width().min(rect.height());
    let text_color = ui.visuals().text_color();

    // Clockwise from twelve o'clock
    let mut start = -FRAC_PI_2;
    for (i, slice) in chart.slices.iter().enumerate() {
        let sweep = slice.fraction as f32 * TAU;
        wedge(&painter, center, radius, start, sweep, PALETTE[i % PALETTE.len()]);

        let mid = start + sweep / 2.0;
        let dir = Vec2::angled(mid);
        painter.text(
            center + dir * radius * 0.6,
            Align2::CENTER_CENTER,
            slice.percent_label(),
            FontId::proportional(13.0),
            Color32::BLACK,
        );
        let anchor = if dir.x >= 0.0 {
            Align2::LEFT_CENTER
        } else {
            Align2::RIGHT_CENTER
        };
        painter.text(
            center + dir * radius * 1.1,
            anchor,
            format!("{} ({})", slice.label, slice.count),
            FontId::proportional(14.0),
            text_color,
        );

        start += sweep;
    }
}

/// Fill a circular sector as convex pieces of at most a quarter turn.
fn wedge(painter: &egui::Painter, center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) {
    const ARC_STEPS: usize = 16;

    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f32;

    for piece in 0..pieces {
        let from = start + piece_sweep * piece as f32;
        let mut points = Vec::with_capacity(ARC_STEPS + 2);
        points.push(center);
        for step in 0..=ARC_STEPS {
            let angle = from + piece_sweep * step as f32 / ARC_STEPS as f32;
            points.push(center + Vec2::angled(angle) * radius);
        }
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }

    let edge = center + Vec2::angled(start) * radius;
    painter.line_segment([center, edge], Stroke::new(1.5, Color32::WHITE));
}
