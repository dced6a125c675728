use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, parse_key};
use crate::gpu::collector::Collector;
use crate::gpu::power::{self, ApplyResult};
use crate::gpu::snapshot::{GpuSnapshot, PowerLimits};
use crate::ui::theme::{ColorSupport, SeverityOverrides, Theme, resolve_color_support};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    PowerDialog,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub refresh: KeyCode,
    pub power_limit: KeyCode,
    pub raw_output: KeyCode,
    pub cycle_theme: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            power_limit: parse_key(&kb.power_limit).unwrap_or(KeyCode::Char('p')),
            raw_output: parse_key(&kb.raw_output).unwrap_or(KeyCode::Char('o')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Returns (key_label, description) pairs for the help overlay.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.refresh), "Refresh now"),
            (key_label(self.power_limit), "Adjust power limit"),
            (key_label(self.raw_output), "Toggle raw tool output"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.help), "Toggle help"),
        ];
        entries.push(("\u{2191}\u{2193}".to_string(), "Scroll raw output"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        _ => "?".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Ok,
    Err,
}

/// Live state of the adjustment dialog. The bounds are fetched once on open
/// and go stale until the dialog is reopened.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerDialog {
    pub limits: PowerLimits,
    pub input: String,
    pub feedback: Option<(String, Feedback)>,
}

/// Explicit dialog state instead of a nullable global: opening while open is
/// a no-op, and there is exactly one place the dialog can live.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PowerDialogState {
    #[default]
    Closed,
    Open(PowerDialog),
}

pub struct App {
    pub running: bool,
    pub collector: Collector,
    pub device_name: String,
    pub snapshot: GpuSnapshot,
    pub last_error: Option<String>,
    pub show_raw_output: bool,
    pub raw_output: String,
    pub raw_scroll: u16,
    pub show_help: bool,
    pub power_dialog: PowerDialogState,
    pub theme: Theme,
    pub color_support: ColorSupport,
    pub status_message: Option<(String, Instant)>,
    pub util_history: VecDeque<u64>,
    util_history_capacity: usize,
    severity_overrides: SeverityOverrides,
    refresh_interval: Duration,
    retry_interval: Duration,
    elevate_cmd: String,
    pub keybinds: ResolvedKeybinds,
}

impl App {
    pub fn new(config: Config) -> Self {
        let collector = Collector::new(config.general.smi_path.clone());
        let color_support = resolve_color_support(&config.general.color_support);
        let severity_overrides = SeverityOverrides::from_config(&config.colors);
        let theme = Theme::from_config(&config.colors.theme, &severity_overrides, color_support);
        let keybinds = ResolvedKeybinds::from_config(&config.keybinds);
        let sparkline_length = config.general.sparkline_length.max(1);

        // The device name is fetched once, like the rest of the startup
        // state; a failing tool leaves "Unknown" until restart.
        let device_name = collector
            .device_name()
            .unwrap_or_else(|_| "Unknown".to_string());

        App {
            running: true,
            collector,
            device_name,
            snapshot: GpuSnapshot::default(),
            last_error: None,
            show_raw_output: false,
            raw_output: String::new(),
            raw_scroll: 0,
            show_help: false,
            power_dialog: PowerDialogState::Closed,
            theme,
            color_support,
            status_message: None,
            util_history: VecDeque::with_capacity(sparkline_length),
            util_history_capacity: sparkline_length,
            severity_overrides,
            refresh_interval: Duration::from_millis(config.general.refresh_rate_ms),
            retry_interval: Duration::from_millis(config.general.error_retry_ms),
            elevate_cmd: config.general.elevate_cmd,
            keybinds,
        }
    }

    /// One poll cycle. A failure leaves the previous snapshot on screen,
    /// records the error for the header, and shifts the loop to the retry
    /// cadence; the loop itself never stops.
    pub fn refresh_data(&mut self) {
        match self.collector.poll() {
            Ok(snapshot) => {
                self.last_error = None;

                let util = snapshot.metrics.utilization.clamp(0.0, 100.0) as u64;
                if self.util_history.len() == self.util_history_capacity {
                    self.util_history.pop_front();
                }
                self.util_history.push_back(util);

                tracing::debug!(
                    utilization = snapshot.metrics.utilization,
                    temperature_c = snapshot.metrics.temperature_c,
                    power_draw_w = snapshot.metrics.power_draw_w,
                    processes = snapshot.processes.len(),
                    "poll cycle"
                );
                self.snapshot = snapshot;

                if self.show_raw_output {
                    self.refresh_raw_output();
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "poll cycle failed");
                self.last_error = Some(err.to_string());
            }
        }

        // Clear expired status messages (older than 3 seconds)
        if let Some((_, created)) = &self.status_message
            && created.elapsed().as_secs() >= 3
        {
            self.status_message = None;
        }
    }

    /// Cadence for the next tick: the configured refresh interval, or the
    /// slower retry interval while the tool is failing.
    pub fn poll_interval(&self) -> Duration {
        if self.last_error.is_some() {
            self.retry_interval
        } else {
            self.refresh_interval
        }
    }

    pub fn input_mode(&self) -> InputMode {
        if matches!(self.power_dialog, PowerDialogState::Open(_)) {
            InputMode::PowerDialog
        } else if self.show_help {
            InputMode::Help
        } else {
            InputMode::Normal
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode() {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::PowerDialog => self.map_key_dialog(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        if self.show_raw_output {
            match code {
                KeyCode::Up => return Action::ScrollRaw(-1),
                KeyCode::Down => return Action::ScrollRaw(1),
                KeyCode::PageUp => return Action::ScrollRaw(-10),
                KeyCode::PageDown => return Action::ScrollRaw(10),
                _ => {}
            }
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.refresh {
            return Action::Refresh;
        }
        if code == kb.power_limit {
            return Action::OpenPowerDialog;
        }
        if code == kb.raw_output {
            return Action::ToggleRawOutput;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }

        Action::None
    }

    fn map_key_dialog(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::ClosePowerDialog,
            KeyCode::Enter => Action::ApplyPowerLimit,
            KeyCode::Backspace => Action::DialogBackspace,
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => Action::DialogInput(c),
            _ => Action::None,
        }
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if key.code == self.keybinds.help || key.code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Refresh => self.refresh_data(),
            Action::OpenPowerDialog => self.open_power_dialog(),
            Action::ClosePowerDialog => self.power_dialog = PowerDialogState::Closed,
            Action::DialogInput(c) => {
                if let PowerDialogState::Open(dialog) = &mut self.power_dialog {
                    dialog.input.push(c);
                    dialog.feedback = None;
                }
            }
            Action::DialogBackspace => {
                if let PowerDialogState::Open(dialog) = &mut self.power_dialog {
                    dialog.input.pop();
                    dialog.feedback = None;
                }
            }
            Action::ApplyPowerLimit => self.apply_power_limit(),
            Action::ToggleRawOutput => {
                self.show_raw_output = !self.show_raw_output;
                self.raw_scroll = 0;
                if self.show_raw_output {
                    self.refresh_raw_output();
                }
            }
            Action::ScrollRaw(delta) => {
                self.raw_scroll = if delta < 0 {
                    self.raw_scroll.saturating_sub(delta.unsigned_abs() as u16)
                } else {
                    self.raw_scroll.saturating_add(delta as u16)
                };
            }
            Action::CycleTheme => {
                self.theme = self
                    .theme
                    .next(&self.severity_overrides, self.color_support);
                self.set_status(format!("Theme: {}", self.theme.name));
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::None => {}
        }
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    fn refresh_raw_output(&mut self) {
        self.raw_output = match self.collector.raw_dump() {
            Ok(raw) => raw,
            Err(err) => err.to_string(),
        };
    }

    /// Opens the adjustment dialog, fetching the cap bounds once. A failed
    /// bounds query still opens the dialog with unknown bounds, matching the
    /// rest of the degrade-don't-die error handling.
    fn open_power_dialog(&mut self) {
        if matches!(self.power_dialog, PowerDialogState::Open(_)) {
            return;
        }
        let limits = self.collector.power_limits().unwrap_or_default();
        self.power_dialog = PowerDialogState::Open(PowerDialog {
            limits,
            input: String::new(),
            feedback: None,
        });
    }

    fn apply_power_limit(&mut self) {
        let PowerDialogState::Open(dialog) = &mut self.power_dialog else {
            return;
        };

        let Ok(watts) = dialog.input.trim().parse::<f64>() else {
            dialog.feedback = Some((
                format!("Invalid input: '{}' is not a number.", dialog.input),
                Feedback::Err,
            ));
            return;
        };

        if dialog.limits.rejects(watts) {
            // rejects() only fires with both bounds present
            let min = dialog.limits.min_w.unwrap_or(0.0);
            let max = dialog.limits.max_w.unwrap_or(0.0);
            dialog.feedback = Some((
                format!("Value must be between {min} and {max} W."),
                Feedback::Err,
            ));
            return;
        }

        match power::set_power_limit(&self.elevate_cmd, self.collector.smi_path(), watts) {
            ApplyResult::Applied(_) => {
                tracing::info!(watts, "power limit applied");
                dialog.feedback =
                    Some(("Power limit set successfully.".to_string(), Feedback::Ok));
            }
            ApplyResult::Failed(msg) => {
                tracing::warn!(watts, error = %msg, "power limit change failed");
                dialog.feedback = Some((format!("Failed: {msg}"), Feedback::Err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_config() -> Config {
        let mut config = Config::default();
        // Point at a binary that cannot exist so tests never shell out to a
        // real tool.
        config.general.smi_path = "/nonexistent/gputop-test-smi".to_string();
        config.general.elevate_cmd = "/nonexistent/gputop-test-elevate".to_string();
        config
    }

    fn test_app() -> App {
        App::new(test_config())
    }

    fn open_dialog_with_limits(app: &mut App, limits: PowerLimits) {
        app.power_dialog = PowerDialogState::Open(PowerDialog {
            limits,
            input: String::new(),
            feedback: None,
        });
    }

    #[test]
    fn startup_without_tool_degrades_to_unknown_name() {
        let app = test_app();
        assert_eq!(app.device_name, "Unknown");
        assert!(app.running);
    }

    #[test]
    fn default_keybinds_map_to_actions() {
        let app = test_app();

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Quit);

        let key = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::OpenPowerDialog);

        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Refresh);

        let key = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleRawOutput);

        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleHelp);

        // Ctrl+C always quits
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);
    }

    #[test]
    fn custom_keybind_remap_works() {
        let mut app = test_app();
        app.keybinds.quit = KeyCode::Char('x');

        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Quit);

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::None);
    }

    #[test]
    fn scroll_keys_only_active_with_raw_panel() {
        let mut app = test_app();
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.map_key(up), Action::None);

        app.show_raw_output = true;
        assert_eq!(app.map_key(up), Action::ScrollRaw(-1));
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.map_key(down), Action::ScrollRaw(1));
    }

    #[test]
    fn scroll_saturates_at_zero() {
        let mut app = test_app();
        app.dispatch(Action::ScrollRaw(-5));
        assert_eq!(app.raw_scroll, 0);
        app.dispatch(Action::ScrollRaw(10));
        app.dispatch(Action::ScrollRaw(-3));
        assert_eq!(app.raw_scroll, 7);
    }

    #[test]
    fn help_mode_blocks_other_keys() {
        let mut app = test_app();
        app.dispatch(Action::ToggleHelp);
        assert_eq!(app.input_mode(), InputMode::Help);

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::None);

        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleHelp);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleHelp);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);
    }

    #[test]
    fn dialog_keys_edit_apply_close() {
        let mut app = test_app();
        app.dispatch(Action::OpenPowerDialog);
        assert_eq!(app.input_mode(), InputMode::PowerDialog);

        let key = KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::DialogInput('2'));
        let key = KeyEvent::new(KeyCode::Char('.'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::DialogInput('.'));
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::None);
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ApplyPowerLimit);
        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ClosePowerDialog);

        app.dispatch(Action::ClosePowerDialog);
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert_eq!(app.power_dialog, PowerDialogState::Closed);
    }

    #[test]
    fn open_while_open_is_a_no_op() {
        let mut app = test_app();
        app.dispatch(Action::OpenPowerDialog);
        app.dispatch(Action::DialogInput('2'));
        app.dispatch(Action::DialogInput('5'));

        app.dispatch(Action::OpenPowerDialog);

        let PowerDialogState::Open(dialog) = &app.power_dialog else {
            panic!("dialog should stay open");
        };
        assert_eq!(dialog.input, "25");
    }

    #[test]
    fn dialog_input_clears_stale_feedback() {
        let mut app = test_app();
        app.dispatch(Action::OpenPowerDialog);
        app.dispatch(Action::ApplyPowerLimit); // empty input -> invalid

        let PowerDialogState::Open(dialog) = &app.power_dialog else {
            panic!("dialog should be open");
        };
        assert!(matches!(dialog.feedback, Some((_, Feedback::Err))));

        app.dispatch(Action::DialogInput('2'));
        let PowerDialogState::Open(dialog) = &app.power_dialog else {
            panic!("dialog should be open");
        };
        assert_eq!(dialog.feedback, None);
        assert_eq!(dialog.input, "2");
    }

    #[test]
    fn apply_rejects_out_of_range_input() {
        let mut app = test_app();
        open_dialog_with_limits(
            &mut app,
            PowerLimits {
                current_w: Some(250.0),
                min_w: Some(100.0),
                max_w: Some(300.0),
            },
        );
        app.dispatch(Action::DialogInput('5'));
        app.dispatch(Action::DialogInput('0'));
        app.dispatch(Action::DialogInput('0'));
        app.dispatch(Action::ApplyPowerLimit);

        let PowerDialogState::Open(dialog) = &app.power_dialog else {
            panic!("dialog should be open");
        };
        let Some((msg, Feedback::Err)) = &dialog.feedback else {
            panic!("expected error feedback, got {:?}", dialog.feedback);
        };
        assert!(msg.contains("between 100 and 300"), "message: {msg}");
    }

    #[test]
    fn apply_rejects_non_numeric_input() {
        let mut app = test_app();
        open_dialog_with_limits(&mut app, PowerLimits::default());
        app.dispatch(Action::DialogInput('1'));
        app.dispatch(Action::DialogInput('.'));
        app.dispatch(Action::DialogInput('.'));
        app.dispatch(Action::ApplyPowerLimit);

        let PowerDialogState::Open(dialog) = &app.power_dialog else {
            panic!("dialog should be open");
        };
        let Some((msg, Feedback::Err)) = &dialog.feedback else {
            panic!("expected error feedback");
        };
        assert!(msg.contains("Invalid input"), "message: {msg}");
    }

    #[cfg(unix)]
    #[test]
    fn apply_in_range_reports_success() {
        let mut config = test_config();
        config.general.elevate_cmd = "echo".to_string();
        let mut app = App::new(config);

        open_dialog_with_limits(
            &mut app,
            PowerLimits {
                current_w: Some(250.0),
                min_w: Some(100.0),
                max_w: Some(300.0),
            },
        );
        app.dispatch(Action::DialogInput('2'));
        app.dispatch(Action::DialogInput('5'));
        app.dispatch(Action::DialogInput('0'));
        app.dispatch(Action::ApplyPowerLimit);

        let PowerDialogState::Open(dialog) = &app.power_dialog else {
            panic!("dialog should be open");
        };
        assert_eq!(
            dialog.feedback,
            Some(("Power limit set successfully.".to_string(), Feedback::Ok))
        );
    }

    #[test]
    fn failed_poll_switches_to_retry_interval_and_keeps_snapshot() {
        let mut app = test_app();
        assert_eq!(app.poll_interval(), Duration::from_millis(2000));

        app.refresh_data();
        assert!(app.last_error.is_some());
        assert_eq!(app.poll_interval(), Duration::from_millis(3000));
        assert_eq!(app.snapshot.metrics, Default::default());
        assert!(app.util_history.is_empty());
        assert!(app.running, "errors must never stop the loop");
    }

    #[test]
    fn toggle_raw_output_degrades_to_error_text() {
        let mut app = test_app();
        app.dispatch(Action::ToggleRawOutput);
        assert!(app.show_raw_output);
        assert!(app.raw_output.contains("not found"), "{}", app.raw_output);

        app.dispatch(Action::ToggleRawOutput);
        assert!(!app.show_raw_output);
    }

    #[test]
    fn cycle_theme_updates_status_message() {
        let mut app = test_app();
        let before = app.theme.name;
        app.dispatch(Action::CycleTheme);
        assert_ne!(app.theme.name, before);
        let Some((msg, _)) = &app.status_message else {
            panic!("expected a status message");
        };
        assert!(msg.starts_with("Theme: "));
    }
}
