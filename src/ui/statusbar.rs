use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::InputMode;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    input_mode: InputMode,
    status_message: Option<&(String, std::time::Instant)>,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    // Status message takes priority
    if let Some((msg, _)) = status_message {
        let color = if msg.starts_with("Failed") {
            theme.status_err
        } else {
            theme.status_ok
        };
        let line = Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let line = match input_mode {
        InputMode::PowerDialog => {
            let mut spans = Vec::new();
            spans.extend(pill_spans("0-9 .", "Edit", theme));
            spans.extend(pill_spans("Enter", "Apply", theme));
            spans.extend(pill_spans("Esc", "Cancel", theme));
            Line::from(spans)
        }
        InputMode::Help => {
            let mut spans = Vec::new();
            spans.extend(pill_spans("Esc", "Close", theme));
            Line::from(spans)
        }
        InputMode::Normal => {
            let mut spans = Vec::new();
            spans.extend(pill_spans("q", "Quit", theme));
            spans.extend(pill_spans("r", "Refresh", theme));
            spans.extend(pill_spans("p", "Power", theme));
            spans.extend(pill_spans("o", "Raw", theme));
            spans.extend(pill_spans("t", "Theme", theme));
            spans.extend(pill_spans("?", "Help", theme));
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
