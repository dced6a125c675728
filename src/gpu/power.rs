use std::process::Command;

/// Outcome of a power cap change, reported back as free text in the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyResult {
    Applied(String),
    Failed(String),
}

/// Applies a new power cap by running the diagnostic tool under the
/// configured elevation command (`<elevate_cmd> <smi_path> -pl <watts>`).
/// The client-side range check against the fetched bounds is the caller's
/// job; the tool enforces the real limits either way.
pub fn set_power_limit(elevate_cmd: &str, smi_path: &str, watts: f64) -> ApplyResult {
    // The tool takes whole watts.
    let watts = watts.trunc() as i64;

    let output = Command::new(elevate_cmd)
        .arg(smi_path)
        .arg("-pl")
        .arg(watts.to_string())
        .output();

    match output {
        Ok(out) if out.status.success() => {
            ApplyResult::Applied(String::from_utf8_lossy(&out.stdout).trim().to_string())
        }
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            let stdout = String::from_utf8_lossy(&out.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            let msg = if detail.is_empty() {
                format!("{elevate_cmd} exited with {}", out.status)
            } else {
                detail
            };
            ApplyResult::Failed(msg)
        }
        Err(err) => ApplyResult::Failed(err.to_string()),
    }
}
