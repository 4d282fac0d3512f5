use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Row selection helpers used to build cross-validation folds
// ---------------------------------------------------------------------------

/// Number of rows per label, sorted by label.
pub fn class_counts(labels: &[String]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.clone()).or_insert(0) += 1;
    }
    counts
}

/// Encode labels as integers numbered by first appearance.
///
/// Returns the codes (one per row) and the label for each code.
pub fn encode_by_first_appearance(labels: &[String]) -> (Vec<usize>, Vec<String>) {
    let mut order: Vec<String> = Vec::new();
    let mut lookup: BTreeMap<&str, usize> = BTreeMap::new();
    let codes = labels
        .iter()
        .map(|label| {
            *lookup.entry(label.as_str()).or_insert_with(|| {
                order.push(label.clone());
                order.len() - 1
            })
        })
        .collect();
    (codes, order)
}

/// Return the indices in `0..n` that are not in `held_out`.
///
/// A row passes when its index is absent from the held-out set; the
/// result keeps ascending order.
pub fn complement_indices(n: usize, held_out: &[usize]) -> Vec<usize> {
    let mut mask = vec![true; n];
    for &i in held_out {
        if i < n {
            mask[i] = false;
        }
    }
    mask.iter()
        .enumerate()
        .filter(|(_, keep)| **keep)
        .map(|(i, _)| i)
        .collect()
}
