//! Avatar placeholders derived from the display name.

/// Deterministic `#rrggbb` color for `value`.
///
/// 32-bit wrapping hash over UTF-16 code units (`h = c + (h << 5) - h`), then
/// the three low bytes of `h` in little-endian order.
#[must_use]
pub fn string_to_color(value: &str) -> String {
    let hash = value.encode_utf16().fold(0_i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });

    let mut color = String::from("#");
    for shift in [0, 8, 16] {
        color.push_str(&format!("{:02x}", (hash >> shift) & 0xff));
    }
    color
}

/// Uppercased first character of `value`, or `U` when there is none.
#[must_use]
pub fn initials(value: &str) -> String {
    value
        .chars()
        .next()
        .map_or_else(|| "U".to_string(), |first| first.to_uppercase().collect())
}
