//! Seeded pseudo-random number generation.
//!
//! The generator is a mulberry32 stream keyed by an FNV-1a hash of the seed
//! string. All arithmetic is wrapping 32-bit, which reproduces the original
//! deployment's sequence bit-for-bit: the same seed string always produces
//! the same sequence of outputs, across processes and platforms.
//!
//! Every section generator derives its own namespaced rng (e.g.
//! `lang-<seed>`) so sections of one session are mutually independent while
//! each remains individually reproducible.

/// Deterministic random stream. One instance per generation call; never
/// shared between calls.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: &str) -> Self {
        Self {
            state: hash_seed(seed),
        }
    }

    /// Next value in `[0, 1)`.
    pub fn float(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(s | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }

    /// Integer in `[0, bound)`.
    pub fn int(&mut self, bound: usize) -> usize {
        (self.float() * bound as f64) as usize
    }
}

fn hash_seed(seed: &str) -> u32 {
    let mut h: u32 = 0x811c_9dc5;
    for unit in seed.encode_utf16() {
        h ^= u32::from(unit);
        h = h.wrapping_mul(0x0100_0193);
    }
    h
}

/// Fisher–Yates shuffle into a fresh vector.
pub fn shuffle<T: Clone>(items: &[T], rng: &mut SeededRng) -> Vec<T> {
    let mut arr = items.to_vec();
    for i in (1..arr.len()).rev() {
        let j = rng.int(i + 1);
        arr.swap(i, j);
    }
    arr
}

/// Uniform pick from a non-empty slice.
pub fn pick<'a, T>(items: &'a [T], rng: &mut SeededRng) -> &'a T {
    &items[rng.int(items.len())]
}

/// Integer in `[min, max]` inclusive.
pub fn range_int(rng: &mut SeededRng, min: i64, max: i64) -> i64 {
    (rng.float() * (max - min + 1) as f64) as i64 + min
}

/// Float in `[min, max)` rounded to the given number of decimal places.
pub fn range_float(rng: &mut SeededRng, min: f64, max: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    ((rng.float() * (max - min) + min) * factor).round() / factor
}

/// Random four-character base-36 fragment, used as the suffix of item ids.
pub fn id_fragment(rng: &mut SeededRng) -> String {
    let n = (rng.float() * 36f64.powi(4)) as u64;
    let encoded = to_base36(n);
    format!("{encoded:0>4}")
}

/// Lowercase base-36 rendering of a non-negative integer.
pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ascii")
}
