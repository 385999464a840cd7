//! Projection of a dataset into a drawable chart.
//!
//! Charts are plain values; the window code only draws them. Dates sit on a
//! categorical axis: each distinct date gets one slot, numbered in order of
//! first appearance, and repeated dates share a slot.

use std::collections::HashMap;

use super::dataset::{Dataset, NumericColumn};
use super::error::RenderError;

/// Roughly how many date labels to keep on the x axis.
pub const TARGET_TICKS: usize = 6;

/// Tick label rotation for bar charts, in degrees.
pub const BAR_LABEL_ROTATION: f32 = 45.0;

/// Chart type picked in the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartSelection {
    #[default]
    Line,
    Bar,
    Pie,
}

impl ChartSelection {
    pub const ALL: [ChartSelection; 3] = [
        ChartSelection::Line,
        ChartSelection::Bar,
        ChartSelection::Pie,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartSelection::Line => "Line chart",
            ChartSelection::Bar => "Bar chart",
            ChartSelection::Pie => "Pie chart",
        }
    }
}

/// An x-axis label at a slot position
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Values plotted against the date axis
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesChart {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// `[slot, value]` in row order
    pub points: Vec<[f64; 2]>,
    pub ticks: Vec<Tick>,
    pub label_rotation: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
}

impl Slice {
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<Slice>,
}

/// A rendered chart, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Line(SeriesChart),
    Bar(SeriesChart),
    Pie(PieChart),
}

impl Chart {
    /// Project `dataset` for the given chart type.
    pub fn render(dataset: &Dataset, selection: ChartSelection) -> Result<Self, RenderError> {
        if dataset.is_empty() {
            return Err(RenderError::NoData);
        }

        Ok(match selection {
            ChartSelection::Line => {
                Chart::Line(series(dataset, NumericColumn::Value1, "Line chart", 0.0))
            }
            ChartSelection::Bar => Chart::Bar(series(
                dataset,
                NumericColumn::Value2,
                "Bar chart",
                BAR_LABEL_ROTATION,
            )),
            ChartSelection::Pie => Chart::Pie(pie(dataset)),
        })
    }

    pub fn title(&self) -> &str {
        match self {
            Chart::Line(chart) | Chart::Bar(chart) => &chart.title,
            Chart::Pie(chart) => &chart.title,
        }
    }
}

fn series(dataset: &Dataset, column: NumericColumn, kind: &str, rotation: f32) -> SeriesChart {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut dates: Vec<String> = Vec::new();
    let mut points = Vec::with_capacity(dataset.len());

    for row in dataset.rows() {
        let text = row.date_text();
        let slot = *slots.entry(text.clone()).or_insert_with(|| {
            dates.push(text);
            dates.len() - 1
        });
        points.push([slot as f64, row.value(column)]);
    }

    SeriesChart {
        title: format!("{kind}: Date and {}", column.name()),
        x_label: "Date",
        y_label: column.name(),
        points,
        ticks: thin_ticks(&dates, TARGET_TICKS),
        label_rotation: rotation,
    }
}

/// Keep every `len / target`-th label (at least every label when short).
pub fn thin_ticks(labels: &[String], target: usize) -> Vec<Tick> {
    let step = (labels.len() / target.max(1)).max(1);

    labels
        .iter()
        .enumerate()
        .step_by(step)
        .map(|(slot, label)| Tick {
            position: slot as f64,
            label: label.clone(),
        })
        .collect()
}

fn pie(dataset: &Dataset) -> PieChart {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in dataset.rows() {
        match counts.iter_mut().find(|(label, _)| *label == row.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((row.category.clone(), 1)),
        }
    }
    // Stable: equal counts keep first-appearance order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = dataset.len() as f64;
    PieChart {
        title: "Pie chart: Category".to_string(),
        slices: counts
            .into_iter()
            .map(|(label, count)| Slice {
                label,
                count,
                fraction: count as f64 / total,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::dataset::Record;
    use chrono::NaiveDate;

    fn record(day: u32, value1: f64, value2: f64, category: &str) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2023, 4, day).unwrap(),
            value1,
            value2,
            category: category.to_string(),
        }
    }

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("d{i}")).collect()
    }

    #[test]
    fn test_empty_dataset_fails() {
        for selection in ChartSelection::ALL {
            assert_eq!(
                Chart::render(&Dataset::default(), selection),
                Err(RenderError::NoData)
            );
        }
    }

    #[test]
    fn test_line_plots_value1() {
        let dataset = Dataset::from_rows(vec![record(1, 1.0, 2.0, "A"), record(2, 3.0, 4.0, "B")]);
        match Chart::render(&dataset, ChartSelection::Line).unwrap() {
            Chart::Line(chart) => {
                assert_eq!(chart.points, vec![[0.0, 1.0], [1.0, 3.0]]);
                assert_eq!(chart.y_label, "Value1");
                assert_eq!(chart.label_rotation, 0.0);
                assert_eq!(chart.ticks[0].label, "2023-04-01");
                assert_eq!(chart.ticks.len(), 2);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_bar_plots_value2_rotated() {
        let dataset = Dataset::from_rows(vec![record(1, 1.0, 2.0, "A"), record(2, 3.0, 4.0, "B")]);
        match Chart::render(&dataset, ChartSelection::Bar).unwrap() {
            Chart::Bar(chart) => {
                assert_eq!(chart.points, vec![[0.0, 2.0], [1.0, 4.0]]);
                assert_eq!(chart.label_rotation, BAR_LABEL_ROTATION);
                assert_eq!(chart.title, "Bar chart: Date and Value2");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_repeated_dates_share_slot() {
        let dataset = Dataset::from_rows(vec![
            record(2, 1.0, 0.0, "A"),
            record(1, 2.0, 0.0, "A"),
            record(2, 3.0, 0.0, "A"),
        ]);
        match Chart::render(&dataset, ChartSelection::Line).unwrap() {
            Chart::Line(chart) => {
                assert_eq!(chart.points, vec![[0.0, 1.0], [1.0, 2.0], [0.0, 3.0]]);
                let tick_labels: Vec<&str> =
                    chart.ticks.iter().map(|t| t.label.as_str()).collect();
                assert_eq!(tick_labels, vec!["2023-04-02", "2023-04-01"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_thin_ticks_short_axis_keeps_all() {
        let ticks = thin_ticks(&labels(4), TARGET_TICKS);
        assert_eq!(ticks.len(), 4);
    }

    #[test]
    fn test_thin_ticks_evenly_spaced() {
        let ticks = thin_ticks(&labels(30), TARGET_TICKS);
        let positions: Vec<f64> = ticks.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0]);
        assert_eq!(ticks[1].label, "d5");
    }

    #[test]
    fn test_thin_ticks_uneven_length() {
        // 13 labels -> step 2 -> 7 labels, "about six"
        let ticks = thin_ticks(&labels(13), TARGET_TICKS);
        assert_eq!(ticks.len(), 7);
        assert_eq!(ticks.last().unwrap().position, 12.0);
    }

    #[test]
    fn test_pie_proportions() {
        let dataset = Dataset::from_rows(vec![
            record(1, 0.0, 0.0, "B"),
            record(2, 0.0, 0.0, "A"),
            record(3, 0.0, 0.0, "A"),
        ]);
        match Chart::render(&dataset, ChartSelection::Pie).unwrap() {
            Chart::Pie(chart) => {
                assert_eq!(chart.slices.len(), 2);
                assert_eq!(chart.slices[0].label, "A");
                assert_eq!(chart.slices[0].count, 2);
                assert!((chart.slices[0].fraction - 2.0 / 3.0).abs() < 1e-12);
                assert_eq!(chart.slices[1].label, "B");
                assert!((chart.slices[1].fraction - 1.0 / 3.0).abs() < 1e-12);
                assert_eq!(chart.slices[0].percent_label(), "66.7%");
                assert_eq!(chart.slices[1].percent_label(), "33.3%");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_pie_ties_keep_first_appearance() {
        let dataset = Dataset::from_rows(vec![
            record(1, 0.0, 0.0, "C"),
            record(2, 0.0, 0.0, "A"),
            record(3, 0.0, 0.0, "B"),
        ]);
        match Chart::render(&dataset, ChartSelection::Pie).unwrap() {
            Chart::Pie(chart) => {
                let order: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
                assert_eq!(order, vec!["C", "A", "B"]);
                let total: f64 = chart.slices.iter().map(|s| s.fraction).sum();
                assert!((total - 1.0).abs() < 1e-12);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
