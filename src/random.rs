use rand::Rng;

const LCG_MULTIPLIER: i64 = 1103515245;
const LCG_INCREMENT: i64 = 12345;
const DEFAULT_SEED: i64 = 3819201;

/// Source of randomness for adversaries that move at random.
pub trait RandomGenerator {
    fn next(&mut self) -> i32;

    /// Returns a value in `from..to`.
    fn next_range(&mut self, from: i32, to: i32) -> i32;

    /// Picks one element uniformly, or `None` for an empty slice.
    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        let len = i32::try_from(items.len()).unwrap_or(i32::MAX);
        let index = usize::try_from(self.next_range(0, len)).ok()?;
        items.get(index)
    }
}

/// Backed by the thread-local generator of the `rand` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next(&mut self) -> i32 {
        rand::random()
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        rand::rng().random_range(from..to)
    }
}

/// A linear congruential generator, reproducible from its seed.
#[derive(Debug, Clone)]
pub struct SeededGenerator {
    seed: i64,
}

impl Default for SeededGenerator {
    fn default() -> Self {
        SeededGenerator::new(DEFAULT_SEED)
    }
}

impl SeededGenerator {
    pub const fn new(seed: i64) -> Self {
        Self { seed }
    }
}

impl RandomGenerator for SeededGenerator {
    fn next(&mut self) -> i32 {
        self.seed = self
            .seed
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            % (i32::MAX as i64);
        self.seed as i32
    }

    fn next_range(&mut self, from: i32, to: i32) -> i32 {
        (self.next() % (to - from)).abs() + from
    }
}
