use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table};

use crate::format::{format_mb, truncate_unicode};
use crate::gpu::snapshot::GpuProcess;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, processes: &[GpuProcess], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" Processes ({}) ", processes.len()),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    if processes.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                " No running compute processes",
                Style::default().fg(theme.text_secondary),
            )),
            inner,
        );
        return;
    }

    let name_width = area.width.saturating_sub(24) as usize;
    let header = Row::new(["PID", "Process", "Memory"]).style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = processes
        .iter()
        .map(|p| {
            Row::new([
                p.pid.to_string(),
                truncate_unicode(&p.name, name_width),
                format_mb(p.memory_mb),
            ])
            .style(Style::default().fg(theme.text_primary))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(10),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}
