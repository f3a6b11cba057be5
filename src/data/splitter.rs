// ============================================================
// Layer 4 - Train/Test Splitter
// ============================================================
// Randomly shuffles training examples and splits them into a
// training set and a held-out test set.
//
// The split operates on whole examples (the boundary-delimited
// token windows), never on individual rows: splitting inside an
// example would cut reference spans in half.
//
// Why shuffle first?
//   Converted datasets arrive grouped by document, and documents
//   are internally homogeneous (all of a report's references sit
//   in its final pages). Without shuffling, the test set would be
//   the tail documents only. A Fisher-Yates shuffle gives every
//   example an equal chance of landing in either set.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Randomly shuffle `examples` and split into (train, test).
///
/// `train_fraction` is the proportion kept for training, e.g.
/// 0.8 keeps 80% and holds out 20%. A seed makes the shuffle
/// reproducible, so re-running a conversion regenerates the same
/// train and test files.
pub fn split_train_test<T>(
    mut examples:   Vec<T>,
    train_fraction: f64,
    seed:           Option<u64>,
) -> (Vec<T>, Vec<T>) {
    match seed {
        Some(seed) => examples.shuffle(&mut StdRng::seed_from_u64(seed)),
        None       => examples.shuffle(&mut rand::thread_rng()),
    }

    let total    = examples.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;
    // Clamp so tiny datasets cannot index out of range
    let split_at = split_at.min(total);

    let test = examples.split_off(split_at);

    tracing::debug!(
        "Example split: {} train, {} test",
        examples.len(),
        test.len()
    );

    (examples, test)
}

// --- Unit Tests --------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 0.8, None);
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(),  20);
    }

    #[test]
    fn test_all_examples_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, test)     = split_train_test(items, 0.7, None);
        assert_eq!(train.len() + test.len(), 50);
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<usize> = Vec::new();
        let (train, test)     = split_train_test(items, 0.8, None);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_full_training_split() {
        let items: Vec<usize> = (0..10).collect();
        let (train, test)     = split_train_test(items, 1.0, None);
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }

    #[test]
    fn test_seeded_split_is_reproducible() {
        let items: Vec<usize> = (0..100).collect();
        let (train_a, test_a) = split_train_test(items.clone(), 0.8, Some(42));
        let (train_b, test_b) = split_train_test(items, 0.8, Some(42));
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);
    }
}
