pub mod header;
pub mod help;
pub mod metrics;
pub mod power_dialog;
pub mod processes;
pub mod raw_panel;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};

use crate::app::{App, PowerDialogState};

pub fn draw(frame: &mut Frame, app: &App) {
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(7),
        Constraint::Min(4),
    ];
    if app.show_raw_output {
        constraints.push(Constraint::Length(12));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::vertical(constraints).split(frame.area());

    header::render(
        frame,
        chunks[0],
        &app.device_name,
        app.last_error.as_deref(),
        &app.theme,
    );
    metrics::render(
        frame,
        chunks[1],
        &app.snapshot.metrics,
        &app.util_history,
        &app.theme,
    );
    processes::render(frame, chunks[2], &app.snapshot.processes, &app.theme);

    let statusbar_area = if app.show_raw_output {
        raw_panel::render(frame, chunks[3], &app.raw_output, app.raw_scroll, &app.theme);
        chunks[4]
    } else {
        chunks[3]
    };

    statusbar::render(
        frame,
        statusbar_area,
        app.input_mode(),
        app.status_message.as_ref(),
        &app.theme,
    );

    // Overlays last so they land on top
    if let PowerDialogState::Open(dialog) = &app.power_dialog {
        power_dialog::render(frame, frame.area(), dialog, &app.theme);
    }
    if app.show_help {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}

pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [vert] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [horiz] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(vert);
    horiz
}

#[cfg(test)]
mod tests;
