use super::group::GroupCount;

/// The `n` largest groups by count.
///
/// The sort is stable, so equal counts keep the order they arrived in
/// (first-seen order when fed straight from `group_count`).
pub fn top_n(groups: &[GroupCount], n: usize) -> Vec<GroupCount> {
    let mut ranked = groups.to_vec();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(pairs: &[(&str, usize)]) -> Vec<GroupCount> {
        pairs.iter().map(|(k, c)| GroupCount::new(*k, *c)).collect()
    }

    #[test]
    fn ties_keep_input_order() {
        let g = groups(&[("A", 3), ("B", 1), ("C", 1)]);
        assert_eq!(top_n(&g, 2), groups(&[("A", 3), ("B", 1)]));
    }

    #[test]
    fn sorts_descending() {
        let g = groups(&[("x", 1), ("y", 5), ("z", 2), ("w", 5)]);
        assert_eq!(
            top_n(&g, 3),
            groups(&[("y", 5), ("w", 5), ("z", 2)])
        );
    }

    #[test]
    fn short_input_is_returned_whole() {
        let g = groups(&[("x", 1), ("y", 2)]);
        assert_eq!(top_n(&g, 5), groups(&[("y", 2), ("x", 1)]));
        assert!(top_n(&g, 0).is_empty());
        assert!(top_n(&[], 5).is_empty());
    }
}
