//! Subject colour scheme and small colour helpers.

use serde::{Deserialize, Serialize};

/// Simple RGB color independent of any drawing backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// `#rrggbb` form, as used by SVG output.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colours cycled through by subject index.
pub const SUBJECT_PALETTE: [&str; 4] = ["#A3A1F4", "#F2B9B9", "#C1E27A", "#EC98D9"];

/// Colour of the subject at `index`; wraps around the palette.
pub fn subject_color(index: usize) -> Rgb {
    let hex = SUBJECT_PALETTE[index % SUBJECT_PALETTE.len()];
    parse_hex(hex).unwrap_or(Rgb::BLACK)
}

/// Parse `#rgb` or `#rrggbb` strings (leading `#` optional).
pub fn parse_hex(val: &str) -> Option<Rgb> {
    let val = val.trim();
    let hex = val.strip_prefix('#').unwrap_or(val);
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}
