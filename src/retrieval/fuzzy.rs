//! Edit-distance fuzzy matching
//!
//! Standard Levenshtein distance (insertions, deletions, substitutions,
//! unit cost) over chars, with a fixed acceptance threshold used by the
//! ranker to tolerate small typos.

/// Maximum edit distance still considered a match
pub const MAX_EDIT_DISTANCE: usize = 2;

/// Levenshtein distance between two strings, by chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row DP over the (a.len()+1) x (b.len()+1) matrix
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// True when `a` and `b` are within the fuzzy threshold but not identical.
///
/// Exact equality is excluded: the ranker already scores whole-word hits
/// separately, the fuzzy bonus is only for near misses.
pub fn fuzzy_match(a: &str, b: &str) -> bool {
    if a == b {
        return false;
    }
    // Cheap length screen before running the DP
    if a.len().abs_diff(b.len()) > MAX_EDIT_DISTANCE {
        return false;
    }
    levenshtein(a, b) <= MAX_EDIT_DISTANCE
}
