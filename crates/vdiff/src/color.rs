//! Colour parsing for theme overrides

use ratatui::style::Color;

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Parse hex color string (e.g., "#2ecc71" or "2ecc71")
pub fn parse_hex(s: &str) -> Result<Rgb, String> {
    let s = s.trim().trim_start_matches('#');
    if s.len() != 6 || !s.is_ascii() {
        return Err(format!(
            "invalid hex color: expected 6 characters, got {}",
            s.len()
        ));
    }

    let r = u8::from_str_radix(&s[0..2], 16)
        .map_err(|_| format!("invalid hex color: bad red component in '{}'", s))?;
    let g = u8::from_str_radix(&s[2..4], 16)
        .map_err(|_| format!("invalid hex color: bad green component in '{}'", s))?;
    let b = u8::from_str_radix(&s[4..6], 16)
        .map_err(|_| format!("invalid hex color: bad blue component in '{}'", s))?;

    Ok(Rgb { r, g, b })
}

/// Colour from a packed `0xRRGGBB` constant
pub const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Parse ANSI color name to ratatui Color
pub fn parse_ansi_name(name: &str) -> Option<Color> {
    match name.to_lowercase().replace('-', "_").as_str() {
        "default" | "reset" => Some(Color::Reset),
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "dark_grey" | "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        _ => None,
    }
}

/// Resolve a color string: hex or ANSI name
pub fn resolve_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.starts_with('#') {
        return parse_hex(value).ok().map(Color::from);
    }
    parse_ansi_name(value).or_else(|| parse_hex(value).ok().map(Color::from))
}
