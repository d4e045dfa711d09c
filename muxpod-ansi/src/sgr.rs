//! SGR (Select Graphic Rendition) parameter handling.

use crate::span::{ColorIndex, Style};

/// Sentinel for a parameter that overflowed; matches no known code.
const OVERFLOW: u32 = u32::MAX;

/// Split the parameter portion of an `ESC [ ... m` sequence into codes.
///
/// An empty list means reset (`[0]`). Empty components count as `0`.
pub fn parse_params(raw: &str) -> Vec<u32> {
    if raw.is_empty() {
        return vec![0];
    }
    raw.split(';')
        .map(|part| {
            if part.is_empty() {
                0
            } else {
                part.parse::<u32>().unwrap_or(OVERFLOW)
            }
        })
        .collect()
}

/// Apply a list of SGR codes to `state` in place.
///
/// Unknown codes are skipped without aborting the rest of the list.
pub fn apply_sgr(state: &mut Style, codes: &[u32]) {
    let mut i = 0;
    while i < codes.len() {
        match codes[i] {
            0 => *state = Style::default(),
            1 => state.bold = true,
            2 => state.dim = true,
            3 => state.italic = true,
            4 => state.underline = true,
            5 => state.blink = true,
            7 => state.inverse = true,
            8 => state.hidden = true,
            9 => state.strikethrough = true,
            21 => state.bold = false,
            22 => {
                state.bold = false;
                state.dim = false;
            }
            23 => state.italic = false,
            24 => state.underline = false,
            25 => state.blink = false,
            27 => state.inverse = false,
            28 => state.hidden = false,
            29 => state.strikethrough = false,
            code @ 30..=37 => state.fg = Some((code - 30) as ColorIndex),
            code @ 90..=97 => state.fg = Some((code - 90 + 8) as ColorIndex),
            39 => state.fg = None,
            code @ 40..=47 => state.bg = Some((code - 40) as ColorIndex),
            code @ 100..=107 => state.bg = Some((code - 100 + 8) as ColorIndex),
            49 => state.bg = None,
            code @ (38 | 48) => {
                let (color, consumed) = extended_color(codes, i + 1);
                if let Some(color) = color {
                    if code == 38 {
                        state.fg = Some(color);
                    } else {
                        state.bg = Some(color);
                    }
                }
                i += consumed;
            }
            other => log::trace!("ignoring unsupported SGR parameter {other}"),
        }
        i += 1;
    }
}

/// Decode `5;N` or `2;R;G;B` starting at `start`.
///
/// Returns the colour (if valid) and how many parameters were consumed.
fn extended_color(codes: &[u32], start: usize) -> (Option<ColorIndex>, usize) {
    match codes.get(start) {
        Some(5) => {
            let color = codes
                .get(start + 1)
                .and_then(|n| ColorIndex::try_from(*n).ok());
            (color, 2)
        }
        Some(2) => {
            let channel = |offset: usize| -> u8 {
                codes
                    .get(start + offset)
                    .map_or(0, |c| (*c).min(255) as u8)
            };
            (Some(rgb_to_256(channel(1), channel(2), channel(3))), 4)
        }
        _ => (None, 0),
    }
}

/// Down-sample a truecolor triple to the nearest 256-colour index.
///
/// Near-black and near-white map onto palette entries 0 and 15; everything
/// else lands in the 6x6x6 cube (16..=231).
pub fn rgb_to_256(r: u8, g: u8, b: u8) -> ColorIndex {
    if r < 48 && g < 48 && b < 48 {
        return 0;
    }
    if r > 207 && g > 207 && b > 207 {
        return 15;
    }
    let level = |c: u8| (u16::from(c) + 25) / 51;
    (16 + 36 * level(r) + 6 * level(g) + level(b)) as ColorIndex
}
