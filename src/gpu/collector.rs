use std::fmt;
use std::io::ErrorKind;
use std::process::Command;

use super::parse;
use super::snapshot::{GpuSnapshot, PowerLimits};

const METRICS_QUERY: &str = "--query-gpu=utilization.gpu,memory.used,memory.total,temperature.gpu,power.draw,power.limit";
const PROCESS_QUERY: &str = "--query-compute-apps=pid,process_name,used_memory";
const CSV_FORMAT: &str = "--format=csv,noheader,nounits";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    BinaryMissing(String),
    CommandFailed(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::BinaryMissing(path) => {
                write!(f, "Error: {path} not found. Ensure drivers are installed.")
            }
            FetchError::CommandFailed(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Shells out to the vendor diagnostic tool with fixed argument sets. Every
/// call is a fresh short-lived process; the tool returns quickly enough that
/// the blocking wait stays on the render loop.
pub struct Collector {
    smi_path: String,
}

impl Collector {
    pub fn new(smi_path: impl Into<String>) -> Self {
        Collector {
            smi_path: smi_path.into(),
        }
    }

    pub fn smi_path(&self) -> &str {
        &self.smi_path
    }

    /// Device name of the first GPU.
    pub fn device_name(&self) -> Result<String, FetchError> {
        let out = self.query(&["--query-gpu=name", CSV_FORMAT])?;
        Ok(out.lines().next().unwrap_or("Unknown").trim().to_string())
    }

    /// One full cycle: combined metrics plus the compute-process list.
    pub fn poll(&self) -> Result<GpuSnapshot, FetchError> {
        let metrics_out = self.query(&[METRICS_QUERY, CSV_FORMAT])?;
        let proc_out = self.query(&[PROCESS_QUERY, CSV_FORMAT])?;

        Ok(GpuSnapshot {
            metrics: parse::parse_metrics(&metrics_out),
            processes: parse::parse_processes(&proc_out),
        })
    }

    /// Power cap bounds, fetched once when the adjustment dialog opens.
    pub fn power_limits(&self) -> Result<PowerLimits, FetchError> {
        let out = self.query(&["-q", "-d", "POWER"])?;
        Ok(parse::parse_power_limits(&out))
    }

    /// The unrestricted text dump (no arguments), for the raw output panel.
    pub fn raw_dump(&self) -> Result<String, FetchError> {
        self.query(&[])
    }

    fn query(&self, args: &[&str]) -> Result<String, FetchError> {
        let output = Command::new(&self.smi_path)
            .args(args)
            .output()
            .map_err(|err| {
                if err.kind() == ErrorKind::NotFound {
                    FetchError::BinaryMissing(self.smi_path.clone())
                } else {
                    FetchError::CommandFailed(err.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            let msg = if detail.is_empty() {
                format!("{} exited with {}", self.smi_path, output.status)
            } else {
                detail.to_string()
            };
            return Err(FetchError::CommandFailed(msg));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
