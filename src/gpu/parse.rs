use std::sync::OnceLock;

use regex::Regex;

use super::snapshot::{GpuMetrics, GpuProcess, PowerLimits};

/// Parses the single-line combined metrics query
/// (`utilization.gpu,memory.used,memory.total,temperature.gpu,power.draw,power.limit`).
///
/// Field positions are fixed by the query string. Malformed or missing fields
/// fall back to zero rather than failing the whole cycle; multi-GPU output
/// yields one line per device and only the first is read.
pub fn parse_metrics(output: &str) -> GpuMetrics {
    let first = output.lines().next().unwrap_or("");
    let fields: Vec<&str> = first.split(',').map(str::trim).collect();

    GpuMetrics {
        utilization: field_f64(&fields, 0),
        memory_used_mb: field_f64(&fields, 1),
        memory_total_mb: field_f64(&fields, 2),
        temperature_c: field_i64(&fields, 3),
        power_draw_w: field_f64(&fields, 4),
        power_limit_w: field_f64(&fields, 5),
    }
}

fn field_f64(fields: &[&str], idx: usize) -> f64 {
    fields
        .get(idx)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn field_i64(fields: &[&str], idx: usize) -> i64 {
    fields
        .get(idx)
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(0)
}

/// Parses the compute-process query (`pid,process_name,used_memory`), one
/// record per line. Blank lines and lines that do not split into exactly
/// three fields are dropped.
pub fn parse_processes(output: &str) -> Vec<GpuProcess> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != 3 {
                return None;
            }
            Some(GpuProcess {
                pid: fields[0].parse().unwrap_or(0),
                name: fields[1].to_string(),
                memory_mb: fields[2].parse().unwrap_or(0),
            })
        })
        .collect()
}

struct PowerPatterns {
    current: Regex,
    min: Regex,
    max: Regex,
}

fn power_patterns() -> &'static PowerPatterns {
    static PATTERNS: OnceLock<PowerPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| PowerPatterns {
        current: Regex::new(r"^Power Limit\s*:\s*([\d.]+) W").expect("static regex"),
        min: Regex::new(r"^Min Power Limit\s*:\s*([\d.]+) W").expect("static regex"),
        max: Regex::new(r"^Max Power Limit\s*:\s*([\d.]+) W").expect("static regex"),
    })
}

/// Scans the stable `key : value` block of `-q -d POWER` for the current,
/// minimum, and maximum power cap. Lines that do not match (including `N/A`
/// values) leave the corresponding bound unset.
pub fn parse_power_limits(output: &str) -> PowerLimits {
    let patterns = power_patterns();
    let mut limits = PowerLimits::default();

    for line in output.lines() {
        let line = line.trim();
        if let Some(caps) = patterns.current.captures(line) {
            limits.current_w = caps[1].parse().ok();
        } else if let Some(caps) = patterns.min.captures(line) {
            limits.min_w = caps[1].parse().ok();
        } else if let Some(caps) = patterns.max.captures(line) {
            limits.max_w = caps[1].parse().ok();
        }
    }

    limits
}
