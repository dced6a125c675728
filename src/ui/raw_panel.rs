use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::ui::theme::Theme;

/// Scrollable dump of the diagnostic tool's plain output. The scroll offset
/// is clamped upstream only at zero; scrolling past the end just shows blank
/// lines.
pub fn render(frame: &mut Frame, area: Rect, raw_output: &str, scroll: u16, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Raw output ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(raw_output)
        .style(Style::default().fg(theme.text_primary))
        .block(block)
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}
