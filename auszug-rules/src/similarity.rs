//! Ratcliff/Obershelp string similarity for the declaration shortlist.
//!
//! Not an edit distance: the score is `2 * M / T` where `M` is the number of
//! characters in the longest common blocks (found recursively left and right
//! of the longest one) and `T` the total length of both strings.

/// Case-insensitive similarity in `[0, 1]`. Two empty strings score 1.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Names scoring at least `threshold` against `key`, best first, at most `limit`.
///
/// Ties keep the order of `names`.
pub fn shortlist(key: &str, names: &[String], threshold: f64, limit: usize) -> Vec<(String, f64)> {
    let mut scored: Vec<(String, f64)> = names
        .iter()
        .map(|name| (name.clone(), ratio(key, name)))
        .filter(|(_, score)| *score >= threshold)
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
    scored
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
/// The earliest block in `a` wins ties, then the earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0);
    // run[j + 1]: length of the common run ending at a[i], b[blo + j]
    let mut prev = vec![0usize; width + 1];
    let mut run = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in 0..width {
            run[j + 1] = if a[i] == b[blo + j] { prev[j] + 1 } else { 0 };
            let k = run[j + 1];
            if k > best.2 {
                best = (i + 1 - k, blo + j + 1 - k, k);
            }
        }
        std::mem::swap(&mut prev, &mut run);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identical_is_one() {
        assert_eq!(ratio("PayPal", "paypal"), 1.0);
        assert_eq!(ratio("", ""), 1.0);
    }

    #[test]
    fn test_disjoint_is_zero() {
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_known_ratios() {
        // "bcd" is the only common block
        assert_eq!(ratio("abcd", "bcde"), 0.75);
        // 2 * 6 / 19
        assert!((ratio("paypal", "PayPal Europe") - 12.0 / 19.0).abs() < 1e-12);
        // blocks "a" + "c": difflib gives 2 * 2 / 6
        assert!((ratio("abc", "acb") - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_blocks_are_found_on_both_sides() {
        // "amazon", then "eu" right of it
        let r = ratio("amazon eu", "amazon-eu");
        assert!((r - 16.0 / 18.0).abs() < 1e-12, "got {r}");
        // blocks never cross: "x " cannot pair with the trailing " x"
        let r = ratio("x amazon", "amazon x");
        assert!((r - 12.0 / 16.0).abs() < 1e-12, "got {r}");
    }

    #[test]
    fn test_symmetric_for_simple_cases() {
        assert_eq!(ratio("rewe markt", "rewe"), ratio("rewe", "rewe markt"));
    }

    #[test]
    fn test_shortlist_ranked_and_limited() {
        let known = names(&[
            "Amazon", "Amazon Prime", "Amazon Marketplace", "Amazonas", "Amaz", "Aral",
            "Netflix",
        ]);
        let list = shortlist("amazon", &known, 0.4, 5);
        assert_eq!(list.len(), 5);
        assert_eq!(list[0].0, "Amazon");
        for pair in list.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        assert!(list.iter().all(|(n, _)| n != "Netflix"));
    }

    #[test]
    fn test_shortlist_threshold() {
        let known = names(&["Stadtwerke", "Telekom"]);
        assert!(shortlist("PayPal", &known, 0.4, 5).is_empty());
    }

    #[test]
    fn test_shortlist_ties_keep_input_order() {
        let known = names(&["abx", "aby"]);
        let list = shortlist("ab", &known, 0.4, 5);
        assert_eq!(list[0].0, "abx");
        assert_eq!(list[1].0, "aby");
    }
}
