//! Out-of-range index handling for neighborhood operations.

/// How samples outside a field are synthesized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderMode {
    /// Every outside sample takes this value (zero padding with `0.0`).
    Constant(f64),
    /// Mirror about the edge sample without repeating it: `c b | a b c d | c b`.
    Reflect101,
}

/// Map a possibly out-of-range index onto `0..len`.
///
/// Returns `None` when the sample lies outside and the mode supplies a
/// constant instead.
#[inline]
pub fn map_index(i: isize, len: usize, mode: BorderMode) -> Option<usize> {
    if i >= 0 && (i as usize) < len {
        return Some(i as usize);
    }
    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Reflect101 => {
            if len == 0 {
                return None;
            }
            if len == 1 {
                return Some(0);
            }
            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len {
                Some(r)
            } else {
                Some(2 * len - 2 - r)
            }
        }
    }
}
