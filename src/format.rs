use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

pub fn memory_percent(used_mb: f64, total_mb: f64) -> f64 {
    if total_mb > 0.0 {
        used_mb / total_mb * 100.0
    } else {
        0.0
    }
}

/// `used / total (pct%)` in the vendor tool's units (MiB in, shown as MB).
/// Cards with at least 1024 MB switch to GB with one decimal.
pub fn format_memory(used_mb: f64, total_mb: f64) -> String {
    let percent = memory_percent(used_mb, total_mb);
    if total_mb >= 1024.0 {
        format!(
            "{:.1} GB / {:.1} GB ({:.1}%)",
            used_mb / 1024.0,
            total_mb / 1024.0,
            percent
        )
    } else {
        format!("{used_mb:.0} MB / {total_mb:.0} MB ({percent:.1}%)")
    }
}

/// Per-process memory column; same GB switch as the totals.
pub fn format_mb(mb: u64) -> String {
    if mb >= 1024 {
        format!("{:.1} GB", mb as f64 / 1024.0)
    } else {
        format!("{mb} MB")
    }
}

pub fn format_power(draw_w: f64, limit_w: f64) -> String {
    format!("{draw_w:.1} W / {limit_w:.1} W")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_switches_to_gb_at_1024_total() {
        assert_eq!(format_memory(512.0, 1023.0), "512 MB / 1023 MB (50.0%)");
        assert_eq!(format_memory(512.0, 1024.0), "0.5 GB / 1.0 GB (50.0%)");
        assert_eq!(format_memory(2048.0, 8192.0), "2.0 GB / 8.0 GB (25.0%)");
    }

    #[test]
    fn memory_percent_shown_with_one_decimal() {
        assert_eq!(format_memory(1.0, 3.0), "1 MB / 3 MB (33.3%)");
    }

    #[test]
    fn memory_zero_total_is_zero_percent() {
        assert_eq!(format_memory(0.0, 0.0), "0 MB / 0 MB (0.0%)");
    }

    #[test]
    fn process_memory_column_gb_switch() {
        assert_eq!(format_mb(1023), "1023 MB");
        assert_eq!(format_mb(1024), "1.0 GB");
        assert_eq!(format_mb(1536), "1.5 GB");
    }

    #[test]
    fn power_pair_one_decimal() {
        assert_eq!(format_power(123.456, 250.0), "123.5 W / 250.0 W");
    }

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_unicode("hello world", 8), "hello w\u{2026}");
        assert_eq!(truncate_unicode("short", 8), "short");
    }

    #[test]
    fn truncate_wide_chars() {
        let truncated = truncate_unicode("日本語テスト", 5);
        assert!(truncated.width() <= 5);
        assert!(truncated.ends_with('\u{2026}'));
    }
}
