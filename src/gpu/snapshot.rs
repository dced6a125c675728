use serde::Serialize;

/// One cycle of the combined metrics query. Fields the tool omitted or
/// mangled are zero; the parser is deliberately lenient.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GpuMetrics {
    pub utilization: f64,
    pub memory_used_mb: f64,
    pub memory_total_mb: f64,
    pub temperature_c: i64,
    pub power_draw_w: f64,
    pub power_limit_w: f64,
}

impl GpuMetrics {
    pub fn memory_percent(&self) -> f64 {
        if self.memory_total_mb > 0.0 {
            self.memory_used_mb / self.memory_total_mb * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GpuProcess {
    pub pid: u32,
    pub name: String,
    pub memory_mb: u64,
}

/// Power cap bounds from the `-q -d POWER` block. Boards that do not support
/// software power capping report `N/A`, so each bound is independently
/// optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PowerLimits {
    pub current_w: Option<f64>,
    pub min_w: Option<f64>,
    pub max_w: Option<f64>,
}

impl PowerLimits {
    /// The range check is only enforceable when both bounds are known.
    pub fn rejects(&self, watts: f64) -> bool {
        match (self.min_w, self.max_w) {
            (Some(min), Some(max)) => watts < min || watts > max,
            _ => false,
        }
    }
}

/// Everything one poll cycle produces. Rebuilt wholesale every cycle; there
/// is no identity across cycles.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GpuSnapshot {
    pub metrics: GpuMetrics,
    pub processes: Vec<GpuProcess>,
}
