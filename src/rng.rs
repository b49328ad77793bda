use fastrand::Rng;

/// Random source for the proposal engine.
///
/// All operators draw from one handle threaded through the call chain, so a
/// fixed seed and a fixed call sequence reproduce the same proposals.
#[derive(Debug, Clone)]
pub struct DecoderRng {
    inner: Rng,
}

impl DecoderRng {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            inner: Rng::with_seed(seed),
        }
    }

    pub fn new() -> Self {
        Self { inner: Rng::new() }
    }

    /// Uniform integer in `[0, n)`. `n` must be positive.
    pub fn uniform(&mut self, n: usize) -> usize {
        self.inner.usize(0..n)
    }

    /// Biased coin, true with probability `p`.
    pub fn coin(&mut self, p: f64) -> bool {
        self.inner.f64() < p
    }

    /// Truncated geometric draw in `[0, max_inclusive]`.
    ///
    /// Inversion sampling with success parameter `decay`: larger decay makes
    /// small values more likely. The draw happens even when the cap is zero,
    /// so the consumed RNG sequence does not depend on the cap.
    pub fn geometric(&mut self, decay: f64, max_inclusive: usize) -> usize {
        debug_assert!(decay > 0.0 && decay < 1.0);
        let u = loop {
            let u = self.inner.f64();
            if u > 0.0 {
                break u;
            }
        };
        let k = u.ln() / (1.0 - decay).ln();
        if k >= max_inclusive as f64 {
            max_inclusive
        } else {
            k as usize
        }
    }

    /// Bucket index for a uniform draw against an ascending cumulative-weight
    /// vector. Bucket `i` spans `[cumulative[i-1], cumulative[i])`.
    pub fn select_cumulative(&mut self, cumulative: &[f64]) -> usize {
        assert!(!cumulative.is_empty(), "empty cumulative distribution");
        let total = cumulative[cumulative.len() - 1];
        let u = self.inner.f64() * total;
        cumulative
            .partition_point(|&c| c <= u)
            .min(cumulative.len() - 1)
    }

    /// Uniform permutation of the slice.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        self.inner.shuffle(slice);
    }
}

impl Default for DecoderRng {
    fn default() -> Self {
        Self::new()
    }
}
