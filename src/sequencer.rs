use rand::Rng;

/// Returns a uniformly random permutation of `items` without mutating the
/// input. In-place Fisher-Yates over a copy: for each index i from len-1 down
/// to 1, draw j uniformly from [0, i] and swap. Linear time, each permutation
/// equally likely given a uniform source.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    let mut rng = rand::thread_rng();
    shuffle_with(items, &mut rng)
}

pub fn shuffle_with<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}
