//! Seeded gradient noise for terrain synthesis.
//!
//! Classic improved Perlin noise: a shuffled, duplicated 256-entry
//! permutation table hashes lattice corners to one of 12 gradient directions,
//! and a quintic fade curve blends the corner dot-products trilinearly.
//! Two generators built from the same seed produce identical output.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Seeded permutation-table gradient noise generator.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    /// Shuffled 256-entry permutation, duplicated to avoid index wrapping.
    perm: [u8; 512],
}

impl PerlinNoise {
    /// Build a generator from a seed.
    ///
    /// The permutation table is a Fisher-Yates shuffle of 0..256 driven by a
    /// ChaCha20 stream seeded with `seed`, so equal seeds shuffle equally.
    pub fn new(seed: u64) -> Self {
        let mut table: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        for i in (1..256usize).rev() {
            let j = rng.random_range(0..=i);
            table.swap(i, j);
        }

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i % 256];
        }
        Self { perm }
    }

    /// Noise value at a point, in [-1, 1].
    pub fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        // Unit cube containing the point.
        let cx = (x.floor() as i64 & 255) as usize;
        let cy = (y.floor() as i64 & 255) as usize;
        let cz = (z.floor() as i64 & 255) as usize;

        // Position inside the cube.
        let x = x - x.floor();
        let y = y - y.floor();
        let z = z - z.floor();

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        // Hashes for the 8 surrounding corners.
        let p = &self.perm;
        let a = p[cx] as usize + cy;
        let aa = p[a] as usize + cz;
        let ab = p[a + 1] as usize + cz;
        let b = p[cx + 1] as usize + cy;
        let ba = p[b] as usize + cz;
        let bb = p[b + 1] as usize + cz;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p[aa], x, y, z), grad(p[ba], x - 1.0, y, z)),
                lerp(
                    u,
                    grad(p[ab], x, y - 1.0, z),
                    grad(p[bb], x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p[aa + 1], x, y, z - 1.0),
                    grad(p[ba + 1], x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(p[ab + 1], x, y - 1.0, z - 1.0),
                    grad(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }

    /// Layered noise: `octaves` layers at doubling frequency and amplitudes
    /// decaying by `persistence`, normalized by the total amplitude so the
    /// result stays in [-1, 1].
    pub fn octave_noise(&self, x: f64, y: f64, z: f64, octaves: u32, persistence: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self.noise(x * frequency, y * frequency, z * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        total / max_value
    }
}

/// Quintic fade curve 6t^5 - 15t^4 + 10t^3.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Gradient dot-product for one of 12 directions keyed by the low hash bits.
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
