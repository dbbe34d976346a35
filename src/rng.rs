//! Seeded random streams used for reproducible trial generation.

/// Small deterministic RNG (SplitMix64) used for reproducible sequences.
///
/// Implements [`rand::RngCore`], so it can be handed to anything that takes
/// `impl Rng`, including [`crate::sequence::generate`].
#[derive(Debug, Clone)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Stream starting at `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Child stream for a named consumer (for example a block id).
    pub fn for_label(seed: u64, offset: u64, label: &str) -> Self {
        Self::new(derive_seed(seed ^ offset, label))
    }

    /// Current internal state.
    pub fn state(&self) -> u64 {
        self.state
    }

    fn next_u64_internal(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9E3779B97F4A7C15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl rand::RngCore for DeterministicRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64_internal() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u64_internal()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64_internal().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Mix a label into a seed so that independent consumers get independent streams.
///
/// The label is folded in 8-byte little-endian words through SplitMix64, so the
/// result depends only on the inputs and is stable across platforms and
/// compiler releases. Exported timelines stay reproducible from their seed.
pub fn derive_seed(seed: u64, label: &str) -> u64 {
    let mut rng = DeterministicRng::new(seed ^ label.len() as u64);
    let mut mixed = rng.next_u64_internal();
    for chunk in label.as_bytes().chunks(8) {
        let mut word = [0u8; 8];
        word[..chunk.len()].copy_from_slice(chunk);
        rng.state = mixed ^ u64::from_le_bytes(word);
        mixed = rng.next_u64_internal();
    }
    mixed
}
