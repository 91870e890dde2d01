use crate::error::{ErrorKind, VizError};

/// Convert fractional RGB values to a `#rrggbb` string.
///
/// Each component is scaled by 255 and truncated, so `0.65` becomes `a5`.
pub fn rgb_frac_to_hex(rgb_frac: &[f64]) -> Result<String, VizError> {
    if rgb_frac.len() != 3 {
        return Err(VizError::new(
            ErrorKind::InvalidColorComponents,
            format!(
                "`rgb_frac` must have exactly three entries, got {}.",
                rgb_frac.len()
            ),
        ));
    }
    if rgb_frac.iter().any(|v| !(0.0..=1.0).contains(v)) {
        return Err(VizError::new(
            ErrorKind::InvalidColorComponents,
            "RGB values must be between 0 and 1.",
        ));
    }

    let byte = |v: f64| (v * 255.0) as u8;
    Ok(format!(
        "#{:02x}{:02x}{:02x}",
        byte(rgb_frac[0]),
        byte(rgb_frac[1]),
        byte(rgb_frac[2])
    ))
}

/// Parse `#rrggbb` (leading `#` optional) into RGB bytes.
pub fn hex_to_rgb(hex: &str) -> Result<[u8; 3], VizError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let invalid = || {
        VizError::new(
            ErrorKind::InvalidColorComponents,
            format!("`{hex}` is not a #rrggbb colour."),
        )
    };
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }
    let mut rgb = [0u8; 3];
    for (c, out) in rgb.iter_mut().enumerate() {
        *out = u8::from_str_radix(&digits[2 * c..2 * c + 2], 16).map_err(|_| invalid())?;
    }
    Ok(rgb)
}
