use foodshare_core::{Error, Result};

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Splits sample indices into `(train, test)`, keeping each label's share
/// roughly equal on both sides.
///
/// The test side gets `ceil(n * test_percent / 100)` samples. Each label must
/// have at least one sample on each side, so both labels need two samples and
/// the test side must fit one of each.
pub(super) fn stratified(
    labels: &[bool],
    test_percent: usize,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let (mut positive, mut negative): (Vec<usize>, Vec<usize>) =
        (0..labels.len()).partition(|&i| labels[i]);

    if positive.is_empty() || negative.is_empty() {
        return Err(Error::insufficient_data(
            "claim history needs both completed and not-completed claims",
        ));
    }
    if positive.len() < 2 || negative.len() < 2 {
        return Err(Error::insufficient_data(
            "each outcome needs at least two claims to split into train and test sets",
        ));
    }

    let n = labels.len();
    let test_size = (n * test_percent).div_ceil(100);
    if test_size < 2 || test_size > n - 2 {
        return Err(Error::insufficient_data(
            "too few claims to hold out a test set covering both outcomes",
        ));
    }

    // Proportional share of the test side, leaving one of each label on
    // either side.
    let wanted = (test_size * positive.len() + n / 2) / n;
    let low = usize::max(1, (test_size + 1).saturating_sub(negative.len()));
    let high = (positive.len() - 1).min(test_size - 1);
    let positive_test = wanted.clamp(low, high);

    let mut rng = StdRng::seed_from_u64(seed);
    positive.shuffle(&mut rng);
    negative.shuffle(&mut rng);

    let mut test: Vec<usize> = positive
        .drain(..positive_test)
        .chain(negative.drain(..test_size - positive_test))
        .collect();
    let mut train: Vec<usize> = positive.into_iter().chain(negative).collect();

    train.sort_unstable();
    test.sort_unstable();
    Ok((train, test))
}
