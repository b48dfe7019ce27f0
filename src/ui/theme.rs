use ratatui::style::Color;
use crate::app::Config;

pub fn parse_color(hex: &str) -> Color {
    if hex.starts_with('#') && hex.len() == 7 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[1..3], 16),
            u8::from_str_radix(&hex[3..5], 16),
            u8::from_str_radix(&hex[5..7], 16),
        ) {
            return Color::Rgb(r, g, b);
        }
    }
    Color::White
}

/// Linear blend between two RGB colors; non-RGB colors snap at the midpoint.
pub fn blend(from: Color, to: Color, amount: f64) -> Color {
    let amount = amount.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * amount).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if amount < 0.5 => from,
        _ => to,
    }
}

/// Theme helper that provides colors from the config
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub wheel_color: Color,
    pub pointer_color: Color,
    pub label_color: Color,
    pub button_color: Color,
    pub button_text_color: Color,
    pub selection_color: Color,
}

impl Theme {
    pub fn from_config(config: &Config) -> Self {
        let dark_theme = &config.theme.dark;

        Self {
            background: parse_color(&dark_theme.background),
            foreground: parse_color(&dark_theme.foreground),
            wheel_color: parse_color(&dark_theme.wheel_color),
            pointer_color: parse_color(&dark_theme.pointer_color),
            label_color: parse_color(&dark_theme.label_color),
            button_color: parse_color(&dark_theme.button_color),
            button_text_color: parse_color(&dark_theme.button_text_color),
            selection_color: parse_color(&dark_theme.selection_color),
        }
    }

    /// Selection color faded in from the background.
    pub fn reveal_color(&self, progress: f64) -> Color {
        blend(self.background, self.selection_color, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_color("#1E6FD9"), Color::Rgb(0x1E, 0x6F, 0xD9));
        assert_eq!(parse_color("1E6FD9"), Color::White);
        assert_eq!(parse_color("#GG0000"), Color::White);
    }

    #[test]
    fn blends_between_colors() {
        let black = Color::Rgb(0, 0, 0);
        let green = Color::Rgb(80, 250, 120);
        assert_eq!(blend(black, green, 0.0), black);
        assert_eq!(blend(black, green, 1.0), green);
        assert_eq!(blend(black, green, 0.5), Color::Rgb(40, 125, 60));
        assert_eq!(blend(Color::Reset, green, 0.2), Color::Reset);
        assert_eq!(blend(Color::Reset, green, 0.8), green);
    }
}
