//! Combination arithmetic shared by the choosers.

/// Binomial coefficient `C(n, k)`, or `None` if an intermediate product does
/// not fit in `u128`.
pub fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc == C(n, i) here, so the division is exact.
        acc = acc.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    Some(acc)
}

/// Decode `index` (in `[0, C(n, k))`) into the combination at that position
/// of the lexicographic ordering, writing ascending indices into `out`.
///
/// `out.len()` is the combination size `k`.
pub fn index_to_combination(mut index: u128, n: usize, out: &mut [usize]) {
    let k = out.len();
    let mut candidate = 0usize;
    for slot in 0..k {
        loop {
            // Combinations that start with `candidate` at this slot.
            let remaining = n - candidate - 1;
            let block = binomial(remaining, k - slot - 1).unwrap_or(u128::MAX);
            if index < block {
                break;
            }
            index -= block;
            candidate += 1;
        }
        out[slot] = candidate;
        candidate += 1;
    }
}
