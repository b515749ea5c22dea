//! Natural ordering of file names, so that `membership2` sorts before `membership10`.

use std::cmp::Ordering;

/// A maximal run of either ASCII digits or non-digit characters
#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;

    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != is_digit => {
                out.push(make_chunk(&s[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }

    if let Some(prev) = in_digits {
        out.push(make_chunk(&s[start..], prev));
    }
    out
}

fn make_chunk(run: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Digits(run)
    } else {
        Chunk::Text(run)
    }
}

/// Compare two digit runs as integers of arbitrary length.
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        // "007" after "7" keeps the order total
        .then_with(|| a.len().cmp(&b.len()))
}

/// Compare two strings in natural order.
///
/// Both strings are split into alternating digit and non-digit runs. Digit runs
/// compare numerically, text runs lexicographically, and a digit run sorts
/// before a text run at the same position.
///
/// ```
/// use partition_edit::utils::natural::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("membership2.txt", "membership10.txt"), Ordering::Less);
/// assert_eq!(natural_cmp("sol-1", "sol-1"), Ordering::Equal);
/// ```
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ord = match (l, r) {
            (Chunk::Digits(x), Chunk::Digits(y)) => compare_digits(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    left.len().cmp(&right.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks() {
        assert_eq!(
            chunks("membership12.txt"),
            vec![
                Chunk::Text("membership"),
                Chunk::Digits("12"),
                Chunk::Text(".txt")
            ]
        );
        assert!(chunks("").is_empty());
    }

    #[test]
    fn test_numeric_runs_compare_as_integers() {
        assert_eq!(natural_cmp("membership2", "membership10"), Ordering::Less);
        assert_eq!(natural_cmp("membership10", "membership9"), Ordering::Greater);
        assert_eq!(natural_cmp("a100b2", "a100b11"), Ordering::Less);
    }

    #[test]
    fn test_text_and_prefix_ordering() {
        assert_eq!(natural_cmp("abc", "abd"), Ordering::Less);
        assert_eq!(natural_cmp("membership", "membership1"), Ordering::Less);
        assert_eq!(natural_cmp("1abc", "abc"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(natural_cmp("sol007", "sol7"), Ordering::Greater);
        assert_eq!(natural_cmp("sol007", "sol8"), Ordering::Less);
    }

    #[test]
    fn test_sort_file_names() {
        let mut names = vec![
            "membership10.txt",
            "membership1.txt",
            "membership2.txt",
            "membership0.txt",
        ];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(
            names,
            vec![
                "membership0.txt",
                "membership1.txt",
                "membership2.txt",
                "membership10.txt"
            ]
        );
    }
}
