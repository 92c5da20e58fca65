#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub(crate) fn next_f32_01(&mut self) -> f32 {
        // 24 bits of precision, so the result is exact in f32 and < 1.0.
        let v = self.next_u64() >> 40;
        (v as f32) * (1.0 / ((1u32 << 24) as f32))
    }
}

/// Deterministic value in `[0, 1)` for a lattice point of a seeded stream.
pub(crate) fn hash01(seed: u32, index: i64) -> f32 {
    let mixed = (u64::from(seed) << 32) ^ (index as u64).wrapping_mul(0xD6E8_FEB8_6659_FD93);
    Rng64::new(mixed).next_f32_01()
}

pub(crate) fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Lattice index of `x`, saturating for values outside the `i64` range.
pub(crate) fn lattice_index(x: f64) -> i64 {
    x.floor() as i64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
