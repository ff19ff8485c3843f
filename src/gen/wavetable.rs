//! Precomputed single-period wavetable with fixed-point lookup.

use std::f32::consts::PI;

/// One period of a waveform, sampled into a power-of-two table.
///
/// The table is built once at startup and is read-only afterwards, so it can
/// be shared freely with the audio thread. A guard sample equal to the first
/// entry is appended so linear interpolation never has to wrap an index.
///
/// Lookup uses a 32-bit fixed-point phase: the high `log2(size)` bits select
/// the table entry, the remaining low bits are the sub-sample fraction used
/// for interpolation. Indexing is masked, so any phase value is in bounds.
pub struct Wavetable {
    /// `size + 1` samples; the last one duplicates the first.
    samples: Vec<f32>,
    /// `size - 1`, applied to the index after shifting.
    mask: u32,
    /// Bits of phase below the table index.
    index_shift: u32,
    /// Low-bit mask selecting the fractional part of the phase.
    frac_mask: u32,
    /// Converts fractional phase bits to [0, 1).
    frac_scale: f32,
}

impl Wavetable {
    /// Build a sine table of `size` entries. `size` must be a power of two
    /// of at least 2; anything else is a startup error.
    pub fn sine(size: usize) -> Result<Self, anyhow::Error> {
        if !size.is_power_of_two() || !(2..=1 << 31).contains(&size) {
            return Err(anyhow::anyhow!(
                "wavetable size must be a power of two in 2..=2^31, got {}",
                size
            ));
        }

        let step = 2.0 * PI / size as f32;
        let mut samples: Vec<f32> = (0..size).map(|i| (i as f32 * step).sin()).collect();
        samples.push(samples[0]);

        let index_bits = size.trailing_zeros();
        let index_shift = 32 - index_bits;
        let frac_mask = (1u32 << index_shift) - 1;
        Ok(Self {
            samples,
            mask: (size - 1) as u32,
            index_shift,
            frac_mask,
            frac_scale: 1.0 / (1u64 << index_shift) as f32,
        })
    }

    /// Number of entries in one period (excluding the guard sample).
    pub fn len(&self) -> usize {
        self.samples.len() - 1
    }

    /// Read the table at a fixed-point phase, linearly interpolating between
    /// the indexed entry and its successor.
    #[inline]
    pub fn lookup(&self, phase: u32) -> f32 {
        let index = ((phase >> self.index_shift) & self.mask) as usize;
        let frac = (phase & self.frac_mask) as f32 * self.frac_scale;
        let a = self.samples[index];
        let b = self.samples[index + 1];
        a + (b - a) * frac
    }
}
