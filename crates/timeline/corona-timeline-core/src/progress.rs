//! Normalized scroll progress.

/// Result of sanitizing a raw progress sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Progress {
    /// Value in [0, 1].
    pub value: f32,
    /// True when the raw input was NaN or outside [0, 1].
    pub was_invalid: bool,
}

/// Clamp a raw progress sample into [0, 1]. NaN maps to 0.
#[inline]
pub fn sanitize(raw: f32) -> Progress {
    if raw.is_nan() {
        return Progress {
            value: 0.0,
            was_invalid: true,
        };
    }
    let value = raw.clamp(0.0, 1.0);
    Progress {
        value,
        was_invalid: value != raw,
    }
}
