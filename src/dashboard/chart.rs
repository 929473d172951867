//! Dual-axis chart panel for one request-name group
//!
//! ratatui's `Chart` has a single vertical axis, so the status-code series is
//! mapped linearly onto the execution-time scale for drawing and its own
//! scale is printed in a column at the right edge of the panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

use crate::logs::grouping::SeriesGroup;

pub const EXECUTION_COLOR: Color = Color::Rgb(0x88, 0x84, 0xd8);
pub const STATUS_COLOR: Color = Color::Rgb(0x82, 0xca, 0x9d);
const AXIS_COLOR: Color = Color::Rgb(0x66, 0x66, 0x66);

/// Width of the right-hand status scale column
const RIGHT_AXIS_WIDTH: u16 = 6;
/// Rows the x axis occupies under the plot area (line + labels)
const X_AXIS_ROWS: u16 = 2;

/// Vertical domain of one series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub min: f64,
    pub max: f64,
}

impl AxisScale {
    /// `[0, nice_ceiling(max)]` over the given values
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let max = values.into_iter().fold(f64::NEG_INFINITY, f64::max);
        Self {
            min: 0.0,
            max: nice_ceiling(max),
        }
    }

    /// Map `value` from this scale onto `onto`, linearly
    pub fn project(&self, value: f64, onto: &AxisScale) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return onto.min;
        }
        onto.min + (value - self.min) / span * (onto.max - onto.min)
    }

    /// Bottom, middle and top tick labels
    pub fn labels(&self) -> [String; 3] {
        [
            format_tick(self.min),
            format_tick((self.min + self.max) / 2.0),
            format_tick(self.max),
        ]
    }
}

/// Round up to 1, 2, 2.5, 5 or 10 times a power of ten
pub fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }

    let magnitude = 10f64.powf(value.log10().floor());
    let fraction = value / magnitude;
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|&n| fraction <= n + 1e-9)
        .unwrap_or(10.0);

    step * magnitude
}

fn format_tick(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Render one group as a bordered panel with a dual-axis line chart
pub fn render_panel(f: &mut Frame, area: Rect, group: &SeriesGroup) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", group.request_name),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(format!(" {} points ", group.points.len())).right_aligned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(RIGHT_AXIS_WIDTH)])
        .split(inner);

    let execution = group.execution_series();
    let status_raw = group.status_series();

    let left = AxisScale::from_values(execution.iter().map(|&(_, y)| y));
    let right = AxisScale::from_values(status_raw.iter().map(|&(_, y)| y));
    let status: Vec<(f64, f64)> = status_raw
        .iter()
        .map(|&(x, y)| (x, right.project(y, &left)))
        .collect();

    let categories = group.categories();
    let x_max = (categories.len().saturating_sub(1)).max(1) as f64;
    let x_labels: Vec<Span> = match categories.as_slice() {
        [] => vec![Span::raw("")],
        [only] => vec![Span::raw(only.to_string()), Span::raw("")],
        [first, .., last] => vec![Span::raw(first.to_string()), Span::raw(last.to_string())],
    };

    let datasets = vec![
        Dataset::default()
            .name("Execution time (ms)")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(EXECUTION_COLOR))
            .data(&execution),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(EXECUTION_COLOR))
            .data(&execution),
        Dataset::default()
            .name("Status code")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(STATUS_COLOR))
            .data(&status),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(STATUS_COLOR))
            .data(&status),
    ];

    let axis_style = Style::default().fg(AXIS_COLOR);
    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([left.min, left.max])
                .labels(left.labels().into_iter().map(Span::raw).collect::<Vec<_>>()),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));
    f.render_widget(chart, columns[0]);

    let right_axis = Paragraph::new(right_axis_lines(&right, columns[1].height))
        .style(Style::default().fg(STATUS_COLOR));
    f.render_widget(right_axis, columns[1]);
}

/// Status-scale labels aligned with the top, middle and bottom of the plot area
fn right_axis_lines(scale: &AxisScale, height: u16) -> Vec<Line<'static>> {
    let plot_rows = height.saturating_sub(X_AXIS_ROWS) as usize;
    if plot_rows == 0 {
        return Vec::new();
    }

    let [bottom, middle, top] = scale.labels();
    let mut lines = vec![Line::raw(""); plot_rows];
    lines[(plot_rows - 1) / 2] = Line::raw(format!(" {}", middle));
    lines[plot_rows - 1] = Line::raw(format!(" {}", bottom));
    lines[0] = Line::raw(format!(" {}", top));
    lines
}
