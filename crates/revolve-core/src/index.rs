//! Pure index arithmetic for slide navigation.
//!
//! These functions are stateless; the engine calls them to wrap or clamp
//! requested slide indices against the slide count and trim bounds.

/// Clamp `value` into `[min, max]`.
///
/// Evaluated as `max(min(value, max), min)`, so an inverted range
/// (`min > max`) resolves to `min` rather than panicking.
#[inline]
pub fn get_in_range(value: i64, min: i64, max: i64) -> i64 {
    value.min(max).max(min)
}

/// Wrap a slide index into the real slide range.
///
/// A count of zero returns 0 (guards the empty carousel). Negative
/// indices are shifted up by one cycle before taking the remainder, so
/// the result is in `[0, count)` only for `-count <= index < 2 * count`.
/// Indices more than one full cycle out of range are not wrapped further;
/// dependents rely on this single-cycle behavior.
#[inline]
pub fn normalize_slide_index(index: i64, count: i64) -> i64 {
    if count == 0 {
        return 0;
    }
    if index < 0 {
        (index + count) % count
    } else {
        index % count
    }
}
