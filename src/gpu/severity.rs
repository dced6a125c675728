/// Three-tier severity bucket derived from a fixed threshold comparison.
/// No hysteresis: a value sitting on a boundary flips bucket every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

/// Utilization and memory percentages: warning from 70 %, critical from 90 %.
pub fn percent_severity(percent: f64) -> Severity {
    if percent < 70.0 {
        Severity::Normal
    } else if percent < 90.0 {
        Severity::Warning
    } else {
        Severity::Critical
    }
}

/// Core temperature: warning from 65 °C, critical from 80 °C.
pub fn temperature_severity(celsius: i64) -> Severity {
    if celsius < 65 {
        Severity::Normal
    } else if celsius < 80 {
        Severity::Warning
    } else {
        Severity::Critical
    }
}

/// Power draw relative to the active limit: warning from 80 % of the limit,
/// critical from 95 %. An unknown limit (zero after a lenient parse) reads
/// as normal; the display shows the zero alongside, so the gap is visible.
pub fn power_severity(draw_w: f64, limit_w: f64) -> Severity {
    if limit_w <= 0.0 {
        return Severity::Normal;
    }
    if draw_w < limit_w * 0.8 {
        Severity::Normal
    } else if draw_w < limit_w * 0.95 {
        Severity::Warning
    } else {
        Severity::Critical
    }
}
