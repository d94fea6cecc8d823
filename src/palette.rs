use plotters::prelude::*;

/// ECharts default theme palette, cycled per series index.
pub const DEFAULT_PALETTE: &[RGBColor] = &[
    RGBColor(0x54, 0x70, 0xc6),
    RGBColor(0x91, 0xcc, 0x75),
    RGBColor(0xfa, 0xc8, 0x58),
    RGBColor(0xee, 0x66, 0x66),
    RGBColor(0x73, 0xc0, 0xde),
    RGBColor(0x3b, 0xa2, 0x72),
    RGBColor(0xfc, 0x84, 0x52),
    RGBColor(0x9a, 0x60, 0xb4),
    RGBColor(0xea, 0x7c, 0xcc),
];

pub fn series_color(index: usize) -> RGBColor {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}

/// Parse a color override from a series config (named or `#rrggbb`).
pub fn parse_color(spec: &str) -> Option<RGBColor> {
    match spec {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "black" => Some(BLACK),
        "yellow" => Some(YELLOW),
        "cyan" => Some(CYAN),
        "magenta" => Some(MAGENTA),
        "white" => Some(WHITE),
        _ => parse_hex(spec),
    }
}

fn parse_hex(spec: &str) -> Option<RGBColor> {
    let hex = spec.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(RGBColor(r, g, b))
}
