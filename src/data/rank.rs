use super::model::KeyValue;

/// Take the `n` largest groups of an aggregation result.
///
/// Sorted by measure descending; equal measures are broken by ascending
/// key order (lexical for labels, chronological for periods) so the result
/// is deterministic. `n` larger than the number of distinct keys returns
/// all of them; `n == 0` returns an empty sequence.
pub fn top_n(result: &[(KeyValue, f64)], n: usize) -> Vec<(KeyValue, f64)> {
    let mut ranked = result.to_vec();
    ranked.sort_by(|(key_a, val_a), (key_b, val_b)| {
        val_b.total_cmp(val_a).then_with(|| key_a.cmp(key_b))
    });
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, f64)]) -> Vec<(KeyValue, f64)> {
        pairs
            .iter()
            .map(|(k, v)| (KeyValue::Label(k.to_string()), *v))
            .collect()
    }

    #[test]
    fn sorts_descending_and_truncates() {
        let result = labels(&[("Books", 15.0), ("Toys", 30.0), ("Games", 22.0)]);
        let top = top_n(&result, 2);
        assert_eq!(top, labels(&[("Toys", 30.0), ("Games", 22.0)]));
    }

    #[test]
    fn ties_break_lexically_ascending() {
        let result = labels(&[("Zebra", 10.0), ("Apple", 10.0), ("Mango", 10.0)]);
        let top = top_n(&result, 3);
        assert_eq!(
            top,
            labels(&[("Apple", 10.0), ("Mango", 10.0), ("Zebra", 10.0)])
        );
    }

    #[test]
    fn n_beyond_distinct_keys_returns_everything() {
        let result = labels(&[("Books", 15.0), ("Toys", 30.0)]);
        assert_eq!(top_n(&result, 10).len(), 2);
    }

    #[test]
    fn zero_n_and_empty_input_return_empty() {
        let result = labels(&[("Books", 15.0)]);
        assert!(top_n(&result, 0).is_empty());
        assert!(top_n(&[], 5).is_empty());
    }

    #[test]
    fn output_is_a_subsequence_of_the_full_sort() {
        let result = labels(&[("A", 3.0), ("B", 9.0), ("C", 1.0), ("D", 9.0)]);
        let full = top_n(&result, result.len());
        let top = top_n(&result, 2);
        assert_eq!(top[..], full[..2]);
    }
}
