//! Gestalt (Ratcliff/Obershelp) string similarity.
//!
//! `ratio = 2 * M / (len(a) + len(b))` where `M` counts characters in the
//! matching blocks: take the longest common contiguous block, then recurse
//! on the pieces to its left and right. Longest-block ties resolve to the
//! earliest position in `a`, then in `b`.
//!
//! When the second sequence has 200 or more characters, characters that
//! make up more than 1% of it (plus one) are "popular" and cannot seed a
//! block, though blocks may still grow across them.

use crate::error::{CivicError, Result};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Sequence length at which the popular-character heuristic kicks in
const AUTOJUNK_MIN_LEN: usize = 200;

/// Matcher with a fixed second sequence, reusable across many first sequences
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    b: Vec<char>,
    /// Character -> ascending positions in `b` (popular characters removed)
    b2j: HashMap<char, Vec<usize>>,
    /// Character counts of `b`, for the multiset upper bound
    b_counts: HashMap<char, usize>,
}

impl SequenceMatcher {
    pub fn new(b: &str) -> Self {
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }
        let b_counts = b2j.iter().map(|(c, idxs)| (*c, idxs.len())).collect();

        if b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            let popular: HashSet<char> = b2j
                .iter()
                .filter(|(_, idxs)| idxs.len() > ntest)
                .map(|(c, _)| *c)
                .collect();
            b2j.retain(|c, _| !popular.contains(c));
        }

        Self { b, b2j, b_counts }
    }

    /// Longest matching block within `a[alo..ahi]` and `b[blo..bhi]`,
    /// returned as `(i, j, size)`
    fn find_longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let b = &self.b;
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);

        // j2len[j] = length of the match ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(c) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next;
        }

        // Grow across characters excluded from the index
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }

    /// Total size of all matching blocks between `a` and `b`
    fn matching_chars(&self, a: &[char]) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(a, alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }

    /// Similarity of `a` against the fixed sequence, in `[0, 1]`
    pub fn ratio(&self, a: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        score(self.matching_chars(&a), a.len() + self.b.len())
    }

    /// Upper bound on `ratio` from character multisets alone
    pub fn quick_ratio(&self, a: &str) -> f64 {
        let mut avail = self.b_counts.clone();
        let mut matches = 0;
        let mut len_a = 0;
        for c in a.chars() {
            len_a += 1;
            if let Some(n) = avail.get_mut(&c) {
                if *n > 0 {
                    *n -= 1;
                    matches += 1;
                }
            }
        }
        score(matches, len_a + self.b.len())
    }

    /// Upper bound on `ratio` from lengths alone
    pub fn real_quick_ratio(&self, a: &str) -> f64 {
        let len_a = a.chars().count();
        score(len_a.min(self.b.len()), len_a + self.b.len())
    }
}

fn score(matches: usize, length: usize) -> f64 {
    if length == 0 {
        1.0
    } else {
        2.0 * matches as f64 / length as f64
    }
}

/// Similarity ratio between `a` and `b`
pub fn ratio(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(b).ratio(a)
}

/// Up to `n` candidates whose similarity to `word` is at least `cutoff`.
///
/// Results are ordered by score, highest first; equal scores put the
/// lexicographically greater candidate first.
pub fn close_matches<'a, I>(
    word: &str,
    candidates: I,
    n: usize,
    cutoff: f64,
) -> Result<Vec<(&'a str, f64)>>
where
    I: IntoIterator<Item = &'a str>,
{
    if n == 0 {
        return Err(CivicError::InvalidMatchCount);
    }
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(CivicError::InvalidCutoff(cutoff));
    }

    Ok(rank(word, candidates, n, cutoff))
}

/// Best candidate scoring at least `cutoff` against `word`, if any.
///
/// A cutoff above 1 matches nothing; a cutoff at or below 0 accepts every
/// candidate.
pub fn best_match<'a, I>(word: &str, candidates: I, cutoff: f64) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    rank(word, candidates, 1, cutoff).into_iter().next()
}

fn rank<'a, I>(word: &str, candidates: I, n: usize, cutoff: f64) -> Vec<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let matcher = SequenceMatcher::new(word);
    let mut scored: Vec<(&'a str, f64)> = candidates
        .into_iter()
        .filter(|c| matcher.real_quick_ratio(c) >= cutoff && matcher.quick_ratio(c) >= cutoff)
        .filter_map(|c| {
            let r = matcher.ratio(c);
            (r >= cutoff).then_some((c, r))
        })
        .collect();

    scored.sort_by(|(ca, ra), (cb, rb)| {
        rb.partial_cmp(ra)
            .unwrap_or(Ordering::Equal)
            .then_with(|| cb.cmp(ca))
    });
    scored.truncate(n);
    scored
}
