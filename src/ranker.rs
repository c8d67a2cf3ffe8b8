use std::cmp::Ordering;

/// Sorts by descending score. The sort is stable, so items with equal
/// scores keep the order they were evaluated in.
pub fn rank_by<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));
}
