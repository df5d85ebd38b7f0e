//! Index arithmetic for stepping through the catalog.
//!
//! Both directions wrap around; an empty catalog has no neighbours.

/// Index after `current`, wrapping to the first track.
pub fn wrap_next(current: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (current % len + 1) % len)
}

/// Index before `current`, wrapping to the last track.
pub fn wrap_prev(current: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (current % len + len - 1) % len)
}
