use std::collections::VecDeque;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::app::{Feedback, InputMode, PowerDialog};
use crate::config::ColorsConfig;
use crate::gpu::snapshot::{GpuMetrics, GpuProcess, PowerLimits};
use crate::ui::theme::{ColorSupport, SeverityOverrides, Theme};
use crate::ui::{header, help, metrics, power_dialog, processes, raw_panel, statusbar};

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buf = terminal.backend().buffer();
    buffer_to_string(buf)
}

fn make_theme() -> Theme {
    let overrides = SeverityOverrides::from_config(&ColorsConfig::default());
    Theme::from_config("dark", &overrides, ColorSupport::Truecolor)
}

fn make_metrics() -> GpuMetrics {
    GpuMetrics {
        utilization: 42.0,
        memory_used_mb: 2048.0,
        memory_total_mb: 8192.0,
        temperature_c: 61,
        power_draw_w: 180.5,
        power_limit_w: 250.0,
    }
}

#[test]
fn header_shows_tool_name_and_device() {
    let output = render_to_string(80, 3, |frame| {
        header::render(
            frame,
            Rect::new(0, 0, 80, 3),
            "NVIDIA GeForce RTX 3080",
            None,
            &make_theme(),
        );
    });
    assert!(output.contains("gputop"));
    assert!(output.contains("NVIDIA GeForce RTX 3080"));
}

#[test]
fn header_surfaces_poll_error() {
    let output = render_to_string(80, 3, |frame| {
        header::render(
            frame,
            Rect::new(0, 0, 80, 3),
            "Unknown",
            Some("Error: nvidia-smi not found. Ensure drivers are installed."),
            &make_theme(),
        );
    });
    assert!(output.contains("nvidia-smi not found"));
}

#[test]
fn metrics_panel_shows_all_readings() {
    let mut history = VecDeque::new();
    history.extend([10, 25, 42, 60, 42]);

    let output = render_to_string(80, 7, |frame| {
        metrics::render(
            frame,
            Rect::new(0, 0, 80, 7),
            &make_metrics(),
            &history,
            &make_theme(),
        );
    });
    assert!(output.contains("42%"));
    assert!(output.contains("2.0 GB / 8.0 GB (25.0%)"));
    assert!(output.contains("61\u{b0}C"));
    assert!(output.contains("180.5 W / 250.0 W"));
}

#[test]
fn process_table_lists_rows() {
    let procs = vec![
        GpuProcess {
            pid: 1234,
            name: "python3".to_string(),
            memory_mb: 2048,
        },
        GpuProcess {
            pid: 5678,
            name: "ffmpeg".to_string(),
            memory_mb: 512,
        },
    ];

    let output = render_to_string(80, 8, |frame| {
        processes::render(frame, Rect::new(0, 0, 80, 8), &procs, &make_theme());
    });
    assert!(output.contains("Processes (2)"));
    assert!(output.contains("1234"));
    assert!(output.contains("python3"));
    assert!(output.contains("2.0 GB"));
    assert!(output.contains("ffmpeg"));
    assert!(output.contains("512 MB"));
}

#[test]
fn process_table_empty_placeholder() {
    let output = render_to_string(80, 6, |frame| {
        processes::render(frame, Rect::new(0, 0, 80, 6), &[], &make_theme());
    });
    assert!(output.contains("Processes (0)"));
    assert!(output.contains("No running compute processes"));
}

#[test]
fn raw_panel_scrolls_past_top_lines() {
    let raw = "line one\nline two\nline three\nline four";

    let top = render_to_string(40, 6, |frame| {
        raw_panel::render(frame, Rect::new(0, 0, 40, 6), raw, 0, &make_theme());
    });
    assert!(top.contains("line one"));

    let scrolled = render_to_string(40, 6, |frame| {
        raw_panel::render(frame, Rect::new(0, 0, 40, 6), raw, 2, &make_theme());
    });
    assert!(!scrolled.contains("line one"));
    assert!(scrolled.contains("line three"));
}

#[test]
fn power_dialog_shows_bounds_input_and_feedback() {
    let dialog = PowerDialog {
        limits: PowerLimits {
            current_w: Some(250.0),
            min_w: Some(100.0),
            max_w: Some(320.0),
        },
        input: "275".to_string(),
        feedback: Some(("Power limit set successfully.".to_string(), Feedback::Ok)),
    };

    let output = render_to_string(60, 12, |frame| {
        power_dialog::render(frame, Rect::new(0, 0, 60, 12), &dialog, &make_theme());
    });
    assert!(output.contains("Power Limit"));
    assert!(output.contains("250.0 W"));
    assert!(output.contains("100 - 320 W"));
    assert!(output.contains("275"));
    assert!(output.contains("set successfully"));
}

#[test]
fn power_dialog_unknown_bounds() {
    let dialog = PowerDialog {
        limits: PowerLimits::default(),
        input: String::new(),
        feedback: None,
    };

    let output = render_to_string(60, 12, |frame| {
        power_dialog::render(frame, Rect::new(0, 0, 60, 12), &dialog, &make_theme());
    });
    assert!(output.contains("unknown"));
}

#[test]
fn statusbar_normal_mode_pills() {
    let output = render_to_string(80, 1, |frame| {
        statusbar::render(
            frame,
            Rect::new(0, 0, 80, 1),
            InputMode::Normal,
            None,
            &make_theme(),
        );
    });
    assert!(output.contains("Quit"));
    assert!(output.contains("Power"));
    assert!(output.contains("Theme"));
}

#[test]
fn statusbar_dialog_mode_pills() {
    let output = render_to_string(80, 1, |frame| {
        statusbar::render(
            frame,
            Rect::new(0, 0, 80, 1),
            InputMode::PowerDialog,
            None,
            &make_theme(),
        );
    });
    assert!(output.contains("Apply"));
    assert!(output.contains("Cancel"));
}

#[test]
fn statusbar_status_message_takes_priority() {
    let msg = ("Theme: vivid".to_string(), std::time::Instant::now());
    let output = render_to_string(80, 1, |frame| {
        statusbar::render(
            frame,
            Rect::new(0, 0, 80, 1),
            InputMode::Normal,
            Some(&msg),
            &make_theme(),
        );
    });
    assert!(output.contains("Theme: vivid"));
    assert!(!output.contains("Quit"));
}

#[test]
fn help_overlay_lists_entries() {
    let entries = vec![
        ("q".to_string(), "Quit"),
        ("p".to_string(), "Adjust power limit"),
    ];
    let output = render_to_string(60, 10, |frame| {
        help::render(frame, Rect::new(0, 0, 60, 10), &entries, &make_theme());
    });
    assert!(output.contains("Keybinds"));
    assert!(output.contains("Adjust power limit"));
}
