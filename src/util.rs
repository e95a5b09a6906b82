/// Smallest `h` such that `h^(h/2) > n`, with `h/2` rounded down.
///
/// Used as the reference height for the depth bound of the balanced tree:
/// after `n` insertions its depth stays within `1.5 * (minimal_height(n) + 1)`.
///
/// ```
/// use queryable_map::minimal_height;
///
/// assert_eq!(minimal_height(1), 2);
/// assert_eq!(minimal_height(1_000), 8);
/// ```
pub fn minimal_height(n: usize) -> usize {
    let n = n as u128;
    let mut h: u32 = 1;

    loop {
        // saturating keeps the search finite for any usize
        let power = (h as u128).saturating_pow(h / 2);
        if power > n {
            return h as usize;
        }
        h += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_height() {
        assert_eq!(minimal_height(0), 1);
        assert_eq!(minimal_height(2), 3);
        assert_eq!(minimal_height(15), 4);
        assert_eq!(minimal_height(16), 5);
        assert_eq!(minimal_height(215), 6);
        assert_eq!(minimal_height(216), 7);
        assert_eq!(minimal_height(4095), 8);
        assert_eq!(minimal_height(4096), 9);
        // terminates for the largest input
        assert!(minimal_height(usize::MAX) < 64);
    }
}
