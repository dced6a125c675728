use std::collections::VecDeque;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph, Sparkline};

use crate::format::{format_memory, format_power};
use crate::gpu::severity::{percent_severity, power_severity, temperature_severity};
use crate::gpu::snapshot::GpuMetrics;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    metrics: &GpuMetrics,
    util_history: &VecDeque<u64>,
    theme: &Theme,
) {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(area);

    let top = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_util_gauge(frame, top[0], metrics, theme);
    render_util_sparkline(frame, top[1], util_history, theme);
    render_memory_gauge(frame, rows[1], metrics, theme);
    render_temp_power_line(frame, rows[2], metrics, theme);
}

fn render_util_gauge(frame: &mut Frame, area: Rect, metrics: &GpuMetrics, theme: &Theme) {
    let util = metrics.utilization.clamp(0.0, 100.0);
    let color = theme.severity_color(percent_severity(util));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " GPU ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(color).bg(theme.gauge_unfilled))
        .ratio(util / 100.0)
        .label(format!("{util:.0}%"));

    frame.render_widget(gauge, area);
}

fn render_util_sparkline(
    frame: &mut Frame,
    area: Rect,
    util_history: &VecDeque<u64>,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " History ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let data: Vec<u64> = util_history.iter().copied().collect();
    let sparkline = Sparkline::default()
        .block(block)
        .data(&data)
        .max(100)
        .style(Style::default().fg(theme.sparkline_color));

    frame.render_widget(sparkline, area);
}

fn render_memory_gauge(frame: &mut Frame, area: Rect, metrics: &GpuMetrics, theme: &Theme) {
    let percent = metrics.memory_percent();
    let color = theme.severity_color(percent_severity(percent));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Memory ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(color).bg(theme.gauge_unfilled))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format_memory(metrics.memory_used_mb, metrics.memory_total_mb));

    frame.render_widget(gauge, area);
}

fn render_temp_power_line(frame: &mut Frame, area: Rect, metrics: &GpuMetrics, theme: &Theme) {
    let temp_color = theme.severity_color(temperature_severity(metrics.temperature_c));
    let power_color = theme.severity_color(power_severity(
        metrics.power_draw_w,
        metrics.power_limit_w,
    ));

    let line = Line::from(vec![
        Span::styled(" Temp: ", Style::default().fg(theme.text_secondary)),
        Span::styled(
            format!("{}\u{b0}C", metrics.temperature_c),
            Style::default().fg(temp_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Power: ", Style::default().fg(theme.text_secondary)),
        Span::styled(
            format_power(metrics.power_draw_w, metrics.power_limit_w),
            Style::default()
                .fg(power_color)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
