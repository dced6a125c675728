use ratatui::style::Color;

use crate::config::ColorsConfig;
use crate::gpu::severity::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

/// Config-level hex overrides for the three severity colors.
#[derive(Debug, Clone)]
pub struct SeverityOverrides {
    pub normal: String,
    pub warning: String,
    pub critical: String,
}

impl SeverityOverrides {
    pub fn from_config(colors: &ColorsConfig) -> Self {
        Self {
            normal: colors.severity_normal.clone(),
            warning: colors.severity_warning.clone(),
            critical: colors.severity_critical.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub overlay_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub statusbar_bg: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub gauge_filled: Color,
    pub gauge_unfilled: Color,
    pub sparkline_color: Color,
    pub severity_normal: Color,
    pub severity_warning: Color,
    pub severity_critical: Color,
}

impl Theme {
    pub fn from_config(
        theme_name: &str,
        overrides: &SeverityOverrides,
        support: ColorSupport,
    ) -> Self {
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "colorblind" => Self::colorblind(),
            "vivid" => Self::vivid(),
            _ => Self::dark(),
        };

        if support == ColorSupport::Mono {
            theme = Self::mono();
        }

        theme.apply_severity_overrides(overrides);
        theme.apply_color_support(support);
        theme
    }

    pub fn next(&self, overrides: &SeverityOverrides, support: ColorSupport) -> Self {
        if support == ColorSupport::Mono {
            return Self::mono();
        }
        let next_name = match self.name {
            "dark" => "vivid",
            "vivid" => "light",
            "light" => "colorblind",
            _ => "dark",
        };
        Theme::from_config(next_name, overrides, support)
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Normal => self.severity_normal,
            Severity::Warning => self.severity_warning,
            Severity::Critical => self.severity_critical,
        }
    }

    fn apply_severity_overrides(&mut self, overrides: &SeverityOverrides) {
        let normal = parse_hex_color(&overrides.normal);
        let warning = parse_hex_color(&overrides.warning);
        let critical = parse_hex_color(&overrides.critical);

        if let (Some(normal), Some(warning), Some(critical)) = (normal, warning, critical) {
            self.severity_normal = normal;
            self.severity_warning = warning;
            self.severity_critical = critical;
        }
    }

    fn apply_color_support(&mut self, support: ColorSupport) {
        let map = |c: Color| adapt_color(c, support);

        self.header_accent_bg = map(self.header_accent_bg);
        self.header_accent_fg = map(self.header_accent_fg);
        self.overlay_border = map(self.overlay_border);
        self.text_primary = map(self.text_primary);
        self.text_secondary = map(self.text_secondary);
        self.accent = map(self.accent);
        self.statusbar_bg = map(self.statusbar_bg);
        self.status_ok = map(self.status_ok);
        self.status_err = map(self.status_err);
        self.pill_key_bg = map(self.pill_key_bg);
        self.pill_key_fg = map(self.pill_key_fg);
        self.pill_desc_fg = map(self.pill_desc_fg);
        self.surface_bg = map(self.surface_bg);
        self.gauge_filled = map(self.gauge_filled);
        self.gauge_unfilled = map(self.gauge_unfilled);
        self.sparkline_color = map(self.sparkline_color);
        self.severity_normal = map(self.severity_normal);
        self.severity_warning = map(self.severity_warning);
        self.severity_critical = map(self.severity_critical);
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Green,
            header_accent_fg: Color::Black,
            overlay_border: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::Green,
            statusbar_bg: Color::DarkGray,
            status_ok: Color::Green,
            status_err: Color::Red,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            gauge_filled: Color::Rgb(103, 232, 249),
            gauge_unfilled: Color::DarkGray,
            sparkline_color: Color::Rgb(251, 146, 60),
            severity_normal: Color::Rgb(16, 185, 129),
            severity_warning: Color::Rgb(249, 115, 22),
            severity_critical: Color::Rgb(239, 68, 68),
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            overlay_border: Color::Rgb(150, 150, 150),
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            accent: Color::Blue,
            statusbar_bg: Color::Rgb(220, 220, 220),
            status_ok: Color::Rgb(0, 120, 0),
            status_err: Color::Red,
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
            gauge_filled: Color::Rgb(70, 130, 180),
            gauge_unfilled: Color::Rgb(200, 200, 200),
            sparkline_color: Color::Rgb(70, 130, 180),
            severity_normal: Color::Rgb(60, 160, 60),
            severity_warning: Color::Rgb(220, 120, 80),
            severity_critical: Color::Rgb(200, 60, 60),
        }
    }

    pub fn colorblind() -> Self {
        Theme {
            name: "colorblind",
            header_accent_bg: Color::Rgb(0, 114, 178),
            header_accent_fg: Color::White,
            overlay_border: Color::Rgb(86, 180, 233),
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::Rgb(86, 180, 233),
            statusbar_bg: Color::DarkGray,
            status_ok: Color::Rgb(0, 158, 115),
            status_err: Color::Rgb(213, 94, 0),
            pill_key_bg: Color::Rgb(230, 159, 0),
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            gauge_filled: Color::Rgb(0, 158, 115),
            gauge_unfilled: Color::DarkGray,
            sparkline_color: Color::Rgb(86, 180, 233),
            severity_normal: Color::Rgb(0, 114, 178),
            severity_warning: Color::Rgb(230, 159, 0),
            severity_critical: Color::Rgb(213, 94, 0),
        }
    }

    pub fn vivid() -> Self {
        Theme {
            name: "vivid",
            header_accent_bg: Color::Rgb(203, 166, 247),
            header_accent_fg: Color::Rgb(30, 30, 46),
            overlay_border: Color::Rgb(69, 71, 90),
            text_primary: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(166, 173, 200),
            accent: Color::Rgb(203, 166, 247),
            statusbar_bg: Color::Rgb(49, 50, 68),
            status_ok: Color::Rgb(166, 227, 161),
            status_err: Color::Rgb(243, 139, 168),
            pill_key_bg: Color::Rgb(203, 166, 247),
            pill_key_fg: Color::Rgb(30, 30, 46),
            pill_desc_fg: Color::Rgb(205, 214, 244),
            surface_bg: Color::Rgb(49, 50, 68),
            gauge_filled: Color::Rgb(125, 211, 252),
            gauge_unfilled: Color::Rgb(69, 71, 90),
            sparkline_color: Color::Rgb(251, 146, 60),
            severity_normal: Color::Rgb(166, 227, 161),
            severity_warning: Color::Rgb(250, 179, 135),
            severity_critical: Color::Rgb(243, 139, 168),
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            header_accent_bg: Color::White,
            header_accent_fg: Color::Black,
            overlay_border: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::White,
            statusbar_bg: Color::Black,
            status_ok: Color::White,
            status_err: Color::White,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
            gauge_filled: Color::White,
            gauge_unfilled: Color::Black,
            sparkline_color: Color::White,
            severity_normal: Color::Gray,
            severity_warning: Color::White,
            severity_critical: Color::White,
        }
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn adapt_color(color: Color, support: ColorSupport) -> Color {
    match support {
        ColorSupport::Truecolor | ColorSupport::Auto => color,
        ColorSupport::Color256 => match color {
            Color::Rgb(r, g, b) => Color::Indexed(rgb_to_ansi256(r, g, b)),
            _ => color,
        },
        ColorSupport::Mono => match color {
            Color::Rgb(r, g, b) => {
                let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                if luminance > 128.0 {
                    Color::White
                } else {
                    Color::Black
                }
            }
            Color::White | Color::Black | Color::Gray | Color::DarkGray => color,
            _ => Color::White,
        },
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let r = (r as f32 / 255.0 * 5.0).round() as u8;
    let g = (g as f32 / 255.0 * 5.0).round() as u8;
    let b = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + 36 * r + 6 * g + b
}
