use rand::SeedableRng;
use rand::rngs::StdRng;

/// A fixed seed makes a layout reproducible; otherwise every call draws fresh entropy.
pub(crate) fn layout_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
