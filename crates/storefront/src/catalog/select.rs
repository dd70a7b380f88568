//! Random selection, injectable for deterministic tests.

use rand::Rng;

use super::CatalogSource;

/// Source of the two random draws the loader makes: which gendered document
/// an `any` load resolves to, and which product is selected from a list.
pub trait Chooser: Send + Sync {
    /// Resolve an `any` preference to a concrete document. Fair coin.
    fn pick_source(&self) -> CatalogSource;

    /// Uniform index into a list of `len` items. `len` is never zero.
    fn pick_index(&self, len: usize) -> usize;
}

/// Default chooser backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomChooser;

impl Chooser for RandomChooser {
    fn pick_source(&self) -> CatalogSource {
        if rand::rng().random_bool(0.5) {
            CatalogSource::Ladies
        } else {
            CatalogSource::Mens
        }
    }

    fn pick_index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_index_stays_in_bounds() {
        let chooser = RandomChooser;
        for len in 1..=8 {
            for _ in 0..100 {
                assert!(chooser.pick_index(len) < len);
            }
        }
    }
}
