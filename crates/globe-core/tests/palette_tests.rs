// Host-side tests for hex color parsing and palette cycling.

use globe_core::{Palette, ParseColorError, Rgb};

#[test]
fn parses_full_hex_colors() {
    let c: Rgb = "#ff8a00".parse().unwrap();
    assert!((c.r - 1.0).abs() < 1e-6);
    assert!((c.g - 138.0 / 255.0).abs() < 1e-6);
    assert!(c.b.abs() < 1e-6);
}

#[test]
fn shorthand_expands_each_digit() {
    let short: Rgb = "#0f8".parse().unwrap();
    let long: Rgb = "#00ff88".parse().unwrap();
    assert_eq!(short, long);
}

#[test]
fn leading_hash_is_optional() {
    let bare: Rgb = "00ffd0".parse().unwrap();
    let tagged: Rgb = "#00ffd0".parse().unwrap();
    assert_eq!(bare, tagged);
}

#[test]
fn malformed_colors_are_rejected() {
    assert!(matches!(
        "#ffff".parse::<Rgb>(),
        Err(ParseColorError::BadFormat(_))
    ));
    assert!(matches!(
        "purple".parse::<Rgb>(),
        Err(ParseColorError::BadDigit(_))
    ));
    assert!(matches!(
        "#par".parse::<Rgb>(),
        Err(ParseColorError::BadDigit(_))
    ));
    assert!("".parse::<Rgb>().is_err());
}

#[test]
fn from_hex_drops_bad_entries_but_keeps_good_ones() {
    let palette = Palette::from_hex(["#ffffff", "nope!", "#00ffd0"]);
    assert_eq!(palette.len(), 2);
    assert_eq!(palette.color_for(2), palette.color_for(0));
}

#[test]
fn empty_palette_falls_back_to_the_builtin_colors() {
    let palette = Palette::from_hex(["oops"]);
    assert_eq!(palette.len(), 5);
    assert_eq!(palette.color_for(0), Rgb::WHITE);
}
