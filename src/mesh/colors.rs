//! Room colors

/// RGBA color type, channels in `0.0..=1.0`
pub type Rgba = [f32; 4];

/// Color used when a room color cannot be read
pub const FALLBACK_COLOR: Rgba = [0.5, 0.5, 0.5, 1.0];

/// Hues handed out to generated rooms, cycled by server index
const PALETTE: [Rgba; 8] = [
    [0.90, 0.30, 0.24, 1.0], // Red
    [0.18, 0.80, 0.44, 1.0], // Green
    [0.20, 0.60, 0.86, 1.0], // Blue
    [0.95, 0.77, 0.06, 1.0], // Yellow
    [0.61, 0.35, 0.71, 1.0], // Purple
    [0.90, 0.49, 0.13, 1.0], // Orange
    [0.10, 0.74, 0.61, 1.0], // Teal
    [0.93, 0.44, 0.69, 1.0], // Pink
];

/// Parse a `#rrggbb` or `#rrggbbaa` color (the leading `#` is optional)
///
/// Returns `None` for anything else.
pub fn parse_hex_color(hex: &str) -> Option<Rgba> {
    let digits = hex.trim().trim_start_matches('#');
    if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
        return None;
    }

    let channel = |i: usize| -> Option<f32> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|c| c as f32 / 255.0)
    };

    let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
    Some([channel(0)?, channel(2)?, channel(4)?, alpha])
}

/// Palette color for the `index`-th room
#[inline]
pub fn palette_color(index: usize) -> Rgba {
    PALETTE[index % PALETTE.len()]
}
