use image::Rgba;

/// Parses "#rgb", "#rgba", "#rrggbb" or "#rrggbbaa" (the '#' is optional)
/// into straight-alpha RGBA. Meant for literals in consts: bad input panics,
/// which turns into a compile error there.
pub const fn rgba_hex(s: &str) -> Rgba<u8> {
    let digits = match s.as_bytes() {
        [b'#', rest @ ..] => rest,
        all => all,
    };

    let mut nibbles = [0u8; 8];
    let mut i = 0;
    while i < digits.len() && i < nibbles.len() {
        nibbles[i] = nibble(digits[i]);
        i += 1;
    }

    let n = nibbles;
    match digits.len() {
        // Short forms repeat each digit: "#f80" is "#ff8800".
        3 => Rgba([n[0] * 17, n[1] * 17, n[2] * 17, 0xFF]),
        4 => Rgba([n[0] * 17, n[1] * 17, n[2] * 17, n[3] * 17]),
        6 => Rgba([(n[0] << 4) | n[1], (n[2] << 4) | n[3], (n[4] << 4) | n[5], 0xFF]),
        8 => Rgba([
            (n[0] << 4) | n[1],
            (n[2] << 4) | n[3],
            (n[4] << 4) | n[5],
            (n[6] << 4) | n[7],
        ]),
        _ => panic!("color hex string must be 3, 4, 6, or 8 digits"),
    }
}

const fn nibble(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => panic!("invalid hex digit in color string"),
    }
}

/* ========================= MENU DEFAULTS ========================= */

pub const MENU_BACKGROUND: Rgba<u8> = rgba_hex("#00FFFF");
pub const MENU_TEXT: Rgba<u8> = rgba_hex("#000000");
pub const MENU_SELECTED_BACKGROUND: Rgba<u8> = rgba_hex("#FF00FF");
pub const MENU_SELECTED_TEXT: Rgba<u8> = rgba_hex("#FFFFFF");

/* =========================== PALETTES =========================== */

pub const CLEAR: Rgba<u8> = rgba_hex("#000000");
pub const DEBUG_TEXT: Rgba<u8> = rgba_hex("#FFFFFF");

/// Dark-to-light teal ramp used for the title menu buttons.
pub const GREEN: [Rgba<u8>; 5] = [
    rgba_hex("#003840"),
    rgba_hex("#005A5B"),
    rgba_hex("#007369"),
    rgba_hex("#008C72"),
    rgba_hex("#02A676"),
];

pub const PURPLE: [Rgba<u8>; 5] = [
    rgba_hex("#302840"),
    rgba_hex("#47395B"),
    rgba_hex("#5F4973"),
    rgba_hex("#7B588C"),
    rgba_hex("#9969A6"),
];

pub const PLAY_SQUARE: Rgba<u8> = rgba_hex("#7FFF00");
pub const OPTIONS_SQUARE: Rgba<u8> = rgba_hex("#8A2BE2");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_hex_length() {
        assert_eq!(rgba_hex("#fff"), Rgba([0xFF, 0xFF, 0xFF, 0xFF]));
        assert_eq!(rgba_hex("1234"), Rgba([0x11, 0x22, 0x33, 0x44]));
        assert_eq!(rgba_hex("#02A676"), Rgba([0x02, 0xA6, 0x76, 0xFF]));
        assert_eq!(rgba_hex("#5f497380"), Rgba([0x5F, 0x49, 0x73, 0x80]));
    }

    #[test]
    fn menu_defaults_are_cyan_black_magenta_white() {
        assert_eq!(MENU_BACKGROUND, Rgba([0x00, 0xFF, 0xFF, 0xFF]));
        assert_eq!(MENU_TEXT, Rgba([0x00, 0x00, 0x00, 0xFF]));
        assert_eq!(MENU_SELECTED_BACKGROUND, Rgba([0xFF, 0x00, 0xFF, 0xFF]));
        assert_eq!(MENU_SELECTED_TEXT, Rgba([0xFF, 0xFF, 0xFF, 0xFF]));
    }

    #[test]
    #[should_panic(expected = "invalid hex digit")]
    fn rejects_non_hex_digits() {
        let _ = rgba_hex("#12345g");
    }

    #[test]
    #[should_panic(expected = "3, 4, 6, or 8 digits")]
    fn rejects_odd_lengths() {
        let _ = rgba_hex("#12345");
    }
}
