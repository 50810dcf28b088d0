//! Longest-matching-block string similarity.
//!
//! The ratio is `2·M / (|a| + |b|)` where `M` is the total size of the blocks
//! found by repeatedly taking the longest common run and recursing on the
//! pieces to its left and right. Elements are Unicode scalar values.

use std::collections::HashMap;

/// Sequences at least this long treat very frequent elements as "popular"
/// and skip them when seeding a match.
const POPULAR_MIN_LEN: usize = 200;

/// Similarity of `a` and `b` in `[0.0, 1.0]`.
///
/// Identical strings score `1.0` (two empty strings included); strings with no
/// character in common score `0.0`. The measure is not symmetric in general,
/// so callers should keep a consistent argument order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn match_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = BlockMatcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each element of `b`, ascending, minus popular elements.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }
        if b.len() >= POPULAR_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }
        Self { a, b, b2j }
    }

    /// Total length of all matching blocks.
    fn matched_len(&self) -> usize {
        let mut total = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }
        total
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given window.
    ///
    /// Ties go to the smallest `i`, then the smallest `j`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (a, b) = (self.a, self.b);
        let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);

        // run length of the match ending at (i - 1, j), keyed by j
        let mut run_at: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next_run_at = HashMap::new();
            if let Some(positions) = self.b2j.get(c) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = j
                        .checked_sub(1)
                        .and_then(|p| run_at.get(&p))
                        .copied()
                        .unwrap_or(0);
                    let len = prev + 1;
                    next_run_at.insert(j, len);
                    if len > best_len {
                        best_i = i + 1 - len;
                        best_j = j + 1 - len;
                        best_len = len;
                    }
                }
            }
            run_at = next_run_at;
        }

        // Popular elements were left out of b2j; grow the block over them.
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_len += 1;
        }
        while best_i + best_len < ahi
            && best_j + best_len < bhi
            && a[best_i + best_len] == b[best_j + best_len]
        {
            best_len += 1;
        }

        (best_i, best_j, best_len)
    }
}
