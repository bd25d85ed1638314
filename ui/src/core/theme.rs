//! Light/dark presentation themes. A theme changes colors and nothing else;
//! it never touches the data pipeline.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark Mode",
            Theme::Light => "Light Mode",
        }
    }

    /// Value for the root `data-theme` attribute the stylesheet keys on.
    pub fn css_value(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }
}

/// Chart drawing colors for one theme.
#[derive(Debug, Clone)]
pub struct Palette {
    pub surface: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub grid: &'static str,
    /// Categorical series colors, cycled when a chart has more series.
    pub series: [&'static str; 8],
    /// Endpoints of the sequential ramp used for value-colored bars.
    pub ramp: (&'static str, &'static str),
}

impl Palette {
    pub fn series_color(&self, index: usize) -> &'static str {
        self.series[index % self.series.len()]
    }

    /// Sequential color for `t` in `[0, 1]`.
    pub fn ramp_color(&self, t: f64) -> String {
        let (lo, hi) = (parse_hex(self.ramp.0), parse_hex(self.ramp.1));
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            mix(lo.0, hi.0),
            mix(lo.1, hi.1),
            mix(lo.2, hi.2)
        )
    }
}

fn parse_hex(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let channel = |range| u8::from_str_radix(&hex[range], 16).unwrap_or(0);
    (channel(0..2), channel(2..4), channel(4..6))
}

static DARK: Palette = Palette {
    surface: "#14171f",
    text: "#e8eaf2",
    muted: "#9aa1b5",
    grid: "#2a2f3d",
    series: [
        "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    ],
    // Plasma-ish ramp for dark surfaces.
    ramp: ("#2c0594", "#f0f921"),
};

static LIGHT: Palette = Palette {
    surface: "#ffffff",
    text: "#1c2130",
    muted: "#5b6272",
    grid: "#e3e6ee",
    series: [
        "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    ],
    // Blues ramp for light surfaces.
    ramp: ("#deebf7", "#08519c"),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_modes() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn ramp_interpolates_endpoints() {
        let palette = Theme::Light.palette();
        assert_eq!(palette.ramp_color(0.0), "#deebf7");
        assert_eq!(palette.ramp_color(1.0), "#08519c");
        let mid = palette.ramp_color(0.5);
        assert!(mid.starts_with('#') && mid.len() == 7);
    }

    #[test]
    fn series_colors_cycle() {
        let palette = Theme::Dark.palette();
        assert_eq!(palette.series_color(0), palette.series_color(8));
    }
}
