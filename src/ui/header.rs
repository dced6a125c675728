use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    device_name: &str,
    last_error: Option<&str>,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![
        Span::styled(
            " gputop ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];

    // A poll error takes the device name's place until the tool recovers.
    match last_error {
        Some(err) => spans.push(Span::styled(
            err.to_string(),
            Style::default()
                .fg(theme.status_err)
                .add_modifier(Modifier::BOLD),
        )),
        None => spans.push(Span::styled(
            device_name.to_string(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
