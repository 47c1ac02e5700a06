//! Small integer combinatorics used to enumerate hypercube corners.

/// n!, computed with a plain product. `factorial(0) == 1`.
///
/// Only meant for the small `n` that appear as dimension counts;
/// overflows `usize` above n = 20 on 64-bit targets.
pub fn factorial(n: usize) -> usize {
    (1..=n).product()
}

/// Binomial coefficient C(n, k), zero when `k > n`.
///
/// Uses the multiplicative form so that intermediate values stay
/// within C(n, k) * k instead of n!. That bound fits in `usize` for
/// `n <= usize::BITS / 2`, which covers every dimension count the corner
/// enumeration accepts.
pub fn choose(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut c = 1;
    for i in 0..k {
        // Exact at every step: c * (n - i) is divisible by (i + 1)
        c = c * (n - i) / (i + 1);
    }
    c
}

/// Rearrange `elements` into the next lexicographically greater permutation
/// of the same multiset, returning `true`.
///
/// If `elements` is already the greatest permutation, it is reset to the
/// smallest (sorted ascending) and `false` is returned, so repeated calls
/// cycle through every distinct permutation exactly once.
pub fn next_permutation<E: Ord>(elements: &mut [E]) -> bool {
    let n = elements.len();
    if n < 2 {
        return false;
    }

    // Rightmost ascent
    let mut i = n - 1;
    while i > 0 && elements[i - 1] >= elements[i] {
        i -= 1;
    }
    if i == 0 {
        elements.reverse();
        return false;
    }
    let pivot = i - 1;

    // Rightmost element greater than the pivot
    let mut j = n - 1;
    while elements[j] <= elements[pivot] {
        j -= 1;
    }
    elements.swap(pivot, j);
    elements[i..].reverse();

    true
}
