//! `#RRGGBB` parsing and formatting.

use super::convert::Rgb;

/// Parse `#RRGGBB` or `RRGGBB` (case-insensitive) into an [`Rgb`].
///
/// Any other shape (short form, stray whitespace, 8-digit alpha form, non-hex
/// characters) yields `None`. Callers treat `None` as "not submittable".
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Format channels as uppercase `#RRGGBB`, clamping each into `0..=255` first.
pub fn rgb_to_hex(channels: [i32; 3]) -> String {
    let [r, g, b] = channels.map(|c| c.clamp(0, 255));
    format!("#{r:02X}{g:02X}{b:02X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb_accepts_optional_hash() {
        assert_eq!(hex_to_rgb("#FF8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(hex_to_rgb("ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(hex_to_rgb("#aBcDeF"), Some(Rgb::new(0xAB, 0xCD, 0xEF)));
    }

    #[test]
    fn test_hex_to_rgb_fails_closed() {
        for bad in ["", "#", "#FFF", "FFFFF", "#FFFFFFF", "#GG0000", "##FF0000", " #FF0000", "#FF00 0", "#ÿÿÿ"] {
            assert_eq!(hex_to_rgb(bad), None, "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_rgb_to_hex_clamps_and_uppercases() {
        assert_eq!(rgb_to_hex([255, 171, 0]), "#FFAB00");
        assert_eq!(rgb_to_hex([-20, 300, 16]), "#00FF10");
    }

    #[test]
    fn test_hex_round_trip_over_sampled_cube() {
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(17) {
                for b in [0, 1, 127, 128, 254, 255] {
                    let hex = rgb_to_hex([r, g, b]);
                    let back = hex_to_rgb(&hex).expect("formatted hex must parse");
                    assert_eq!(back.to_hex(), hex);
                }
            }
        }
    }
}
