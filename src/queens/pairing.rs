//! Grouping of selected parents into mating pairs.

/// Groups consecutive elements into pairs.
///
/// Elements at positions `2k` and `2k + 1` form pair `k`. When the length is
/// odd, the last element is paired with the first, so `⌈n / 2⌉` pairs are
/// produced.
///
/// # Examples
///
/// ```
/// use u_queens::queens::pairwise;
///
/// assert_eq!(pairwise(&[1, 2, 3, 4, 5, 6]), vec![(1, 2), (3, 4), (5, 6)]);
/// assert_eq!(pairwise(&[7, 8, 9, 10, 11]), vec![(7, 8), (9, 10), (11, 7)]);
/// ```
pub fn pairwise<T: Clone>(items: &[T]) -> Vec<(T, T)> {
    let mut pairs: Vec<(T, T)> = items
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();
    if items.len() % 2 == 1 {
        let (first, last) = (&items[0], &items[items.len() - 1]);
        pairs.push((last.clone(), first.clone()));
    }
    pairs
}
