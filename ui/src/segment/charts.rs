use dioxus::prelude::*;

use crate::core::{
    metrics::{self, DerivedSeries, OverlapBreakdown},
    HistoryRecord, Palette, Snapshot,
};

const CHART_WIDTH: f64 = 480.0;
const CHART_HEIGHT: f64 = 260.0;
const PAD_X: f64 = 40.0;
const PAD_TOP: f64 = 16.0;
const PAD_BOTTOM: f64 = 36.0;
const PLOT_WIDTH: f64 = CHART_WIDTH - 2.0 * PAD_X;
const PLOT_HEIGHT: f64 = CHART_HEIGHT - PAD_TOP - PAD_BOTTOM;
const BASELINE: f64 = PAD_TOP + PLOT_HEIGHT;
const MAX_TREND_LABELS: usize = 8;

#[component]
pub fn OverlapBarChart(snapshot: Snapshot, palette: Palette) -> Element {
    let bars = bar_layout(&metrics::breakdown(&snapshot), &palette);
    let label_y = BASELINE + 18.0;

    rsx! {
        section { class: "segment-card segment-chart",
            div { class: "segment-card__header",
                h3 { class: "segment-chart__title", "User Count" }
            }
            svg {
                class: "segment-chart__svg",
                view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                line { class: "segment-chart__axis-line", x1: "{PAD_X}", y1: "{BASELINE}", x2: "{CHART_WIDTH - PAD_X}", y2: "{BASELINE}" }
                for bar in bars {
                    rect {
                        x: "{bar.x}",
                        y: "{bar.y}",
                        width: "{bar.width}",
                        height: "{bar.height}",
                        rx: "4",
                        fill: "{bar.color}",
                    }
                    text {
                        class: "segment-chart__value",
                        x: "{bar.center_x()}",
                        y: "{bar.y - 6.0}",
                        text_anchor: "middle",
                        "{bar.count}"
                    }
                    text {
                        class: "segment-chart__label",
                        x: "{bar.center_x()}",
                        y: "{label_y}",
                        text_anchor: "middle",
                        "{bar.label}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn OverlapTrendChart(history: Vec<HistoryRecord>, palette: Palette) -> Element {
    let series = metrics::derive_series(&history);
    let points = trend_layout(&series);
    let path = polyline(&points);
    let stride = label_stride(points.len());
    let label_y = BASELINE + 18.0;
    let grid: Vec<(u8, f64)> = [0u8, 25, 50, 75, 100]
        .into_iter()
        .map(|tick| (tick, value_to_y(tick)))
        .collect();

    rsx! {
        section { class: "segment-card segment-chart segment-chart--trend",
            div { class: "segment-card__header",
                h3 { class: "segment-chart__title", "Overlap % Trend Over Time" }
            }
            svg {
                class: "segment-chart__svg",
                view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                for (tick, y) in grid {
                    line { class: "segment-chart__grid", x1: "{PAD_X}", y1: "{y}", x2: "{CHART_WIDTH - PAD_X}", y2: "{y}" }
                    text { class: "segment-chart__tick", x: "{PAD_X - 8.0}", y: "{y + 4.0}", text_anchor: "end", "{tick}" }
                }
                polyline {
                    points: "{path}",
                    fill: "none",
                    stroke: "{palette.trend}",
                    stroke_width: "2",
                }
                for (idx, point) in points.into_iter().enumerate() {
                    circle { cx: "{point.x}", cy: "{point.y}", r: "3", fill: "{palette.trend}" }
                    if idx % stride == 0 {
                        text {
                            class: "segment-chart__label",
                            x: "{point.x}",
                            y: "{label_y}",
                            text_anchor: "middle",
                            "{point.label}"
                        }
                    }
                }
            }
            p { class: "segment-chart__caption", "Overlap % per snapshot (overlap ÷ union), y-axis 0–100" }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BarGeometry {
    label: &'static str,
    count: u64,
    color: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl BarGeometry {
    fn center_x(&self) -> f64 {
        round1(self.x + self.width / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TrendPoint {
    label: String,
    x: f64,
    y: f64,
}

fn bar_layout(breakdown: &OverlapBreakdown, palette: &Palette) -> Vec<BarGeometry> {
    let slot = PLOT_WIDTH / breakdown.counts.len() as f64;
    let width = slot * 0.6;
    let max = breakdown.max_count();
    let colors = [&palette.dataset_a, &palette.dataset_b, &palette.overlap];

    breakdown
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(idx, ((label, count), color))| {
            let height = if max == 0 {
                0.0
            } else {
                count as f64 / max as f64 * PLOT_HEIGHT
            };
            BarGeometry {
                label,
                count,
                color: color.clone(),
                x: round1(PAD_X + slot * idx as f64 + (slot - width) / 2.0),
                y: round1(BASELINE - height),
                width: round1(width),
                height: round1(height),
            }
        })
        .collect()
}

fn trend_layout(series: &DerivedSeries) -> Vec<TrendPoint> {
    let count = series.len();
    let step = if count > 1 {
        PLOT_WIDTH / (count - 1) as f64
    } else {
        0.0
    };

    series
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let x = if count == 1 {
                PAD_X + PLOT_WIDTH / 2.0
            } else {
                PAD_X + step * idx as f64
            };
            TrendPoint {
                label: point.label.clone(),
                x: round1(x),
                y: value_to_y(point.value),
            }
        })
        .collect()
}

fn value_to_y(value: u8) -> f64 {
    let clamped = f64::from(value.min(100));
    round1(BASELINE - clamped / 100.0 * PLOT_HEIGHT)
}

fn polyline(points: &[TrendPoint]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.x, point.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Show at most `MAX_TREND_LABELS` axis labels.
fn label_stride(points: usize) -> usize {
    points.div_ceil(MAX_TREND_LABELS).max(1)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
