use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::{Feedback, PowerDialog};
use crate::ui::centered_rect;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, dialog: &PowerDialog, theme: &Theme) {
    let width = 46u16.min(area.width.saturating_sub(4));
    let height = 8u16.min(area.height.saturating_sub(2));
    let overlay = centered_rect(width, height, area);

    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Power Limit ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(overlay);

    let current = match dialog.limits.current_w {
        Some(w) => format!("{w:.1} W"),
        None => "unknown".to_string(),
    };
    let range = match (dialog.limits.min_w, dialog.limits.max_w) {
        (Some(min), Some(max)) => format!("{min:.0} - {max:.0} W"),
        _ => "unknown".to_string(),
    };

    let label_style = Style::default().fg(theme.text_secondary);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Current: ", label_style),
            Span::styled(current, Style::default().fg(theme.text_primary)),
        ]),
        Line::from(vec![
            Span::styled(" Range:   ", label_style),
            Span::styled(range, Style::default().fg(theme.text_primary)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" New limit: ", label_style),
            Span::styled(
                dialog.input.clone(),
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("\u{2588}", Style::default().fg(theme.accent)),
        ]),
    ];

    if let Some((msg, feedback)) = &dialog.feedback {
        let color = match feedback {
            Feedback::Ok => theme.status_ok,
            Feedback::Err => theme.status_err,
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(block, overlay);
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.surface_bg)),
        inner,
    );
}
