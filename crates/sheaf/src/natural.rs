//! Natural-order string comparison.
//!
//! Runs of digits compare by numeric magnitude and everything else compares
//! byte by byte, so `"img2" < "img10"`. A digit run starting with `0` is
//! treated as a fraction and compared left-aligned (`"0.05" < "0.5"`).

use std::cmp::Ordering;

/// Compares two strings in natural order.
///
/// With `fold_case`, ASCII letters compare case-insensitively.
///
/// ```
/// use std::cmp::Ordering;
/// use sheaf::natural_cmp;
///
/// assert_eq!(natural_cmp("img2", "img10", false), Ordering::Less);
/// assert_eq!(natural_cmp("Zett", "anti", false), Ordering::Less);
/// assert_eq!(natural_cmp("Zett", "anti", true), Ordering::Greater);
/// ```
pub fn natural_cmp(a: &str, b: &str, fold_case: bool) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (skip_spaces(a, 0), skip_spaces(b, 0));

    loop {
        match (a.get(i).copied(), b.get(j).copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let left = digit_run(a, i);
                let right = digit_run(b, j);
                let ordering = if x == b'0' || y == b'0' {
                    left.cmp(right)
                } else {
                    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
                i += left.len();
                j += right.len();
            }
            (Some(x), Some(y)) => {
                let (x, y) = if fold_case {
                    (x.to_ascii_uppercase(), y.to_ascii_uppercase())
                } else {
                    (x, y)
                };
                match x.cmp(&y) {
                    Ordering::Equal => {
                        i += 1;
                        j += 1;
                    }
                    ordering => return ordering,
                }
            }
        }
    }
}

fn skip_spaces(s: &[u8], from: usize) -> usize {
    from + s[from..]
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count()
}

fn digit_run(s: &[u8], from: usize) -> &[u8] {
    let len = s[from..].iter().take_while(|b| b.is_ascii_digit()).count();
    &s[from..from + len]
}
