//! Block renderer for a single wavetable voice.

use std::sync::Arc;

use crate::gen::wavetable::Wavetable;
use crate::params::OscillatorControls;

/// A monophonic wavetable oscillator.
///
/// Owns the voice state the audio thread mutates: the fixed-point phase
/// accumulator, the current phase increment, and the current amplitude.
/// Target values come in through [`OscillatorControls`], which the control
/// thread writes without ever blocking this side.
///
/// The phase is a `u32` covering exactly one table period per 2^32 units, so
/// wraparound is the natural integer overflow. The increment is kept as
/// `i64`: negative values play the table backwards, and magnitudes beyond
/// one table period per sample stay representable (they simply alias).
pub struct WavetableOscillator {
    table: Arc<Wavetable>,
    controls: Arc<OscillatorControls>,
    phase: u32,
    phase_increment: i64,
    amplitude: f32,
}

impl WavetableOscillator {
    /// Create a voice at rest: zero phase, zero increment, zero amplitude.
    pub fn new(table: Arc<Wavetable>, controls: Arc<OscillatorControls>) -> Self {
        Self {
            table,
            controls,
            phase: 0,
            phase_increment: 0,
            amplitude: 0.0,
        }
    }

    /// Fill `out` with one block of samples.
    ///
    /// Reads the amplitude and frequency targets once, then ramps the live
    /// values linearly so both land on their targets at the final sample.
    /// After the loop the targets are assigned exactly, discarding any
    /// residue the incremental steps accumulated; the phase carries over
    /// unchanged so consecutive blocks are continuous.
    ///
    /// This is the real-time path: no allocation, no locks, no fallible
    /// operations, and table reads are masked so they cannot go out of
    /// bounds whatever the phase or increment.
    pub fn render(&mut self, out: &mut [f32]) {
        if out.is_empty() {
            return;
        }
        let rate = 1.0 / out.len() as f64;

        let next_amplitude = self.controls.target_amplitude();
        let next_increment = self.controls.target_phase_increment();
        let amplitude_step = ((next_amplitude - self.amplitude) as f64 * rate) as f32;
        let increment_step = ((next_increment - self.phase_increment) as f64 * rate) as i64;

        let mut amplitude = self.amplitude;
        let mut increment = self.phase_increment;
        let mut phase = self.phase;

        for sample in out.iter_mut() {
            *sample = amplitude * self.table.lookup(phase);
            // Truncation to u32 is the modulo-2^32 wrap, for either sign.
            phase = phase.wrapping_add(increment as u32);
            increment += increment_step;
            amplitude += amplitude_step;
        }

        self.phase = phase;
        self.phase_increment = next_increment;
        self.amplitude = next_amplitude;
    }

    /// Current fixed-point phase accumulator.
    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// Phase increment currently in effect.
    pub fn phase_increment(&self) -> i64 {
        self.phase_increment
    }

    /// Amplitude currently in effect.
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44100.0;
    const BLOCK: usize = 1024;

    fn voice() -> (WavetableOscillator, Arc<OscillatorControls>) {
        let table = Arc::new(Wavetable::sine(1024).unwrap());
        let controls = Arc::new(OscillatorControls::new(SAMPLE_RATE));
        (WavetableOscillator::new(table, Arc::clone(&controls)), controls)
    }

    #[test]
    fn amplitude_ramp_lands_exactly_on_target() {
        let (mut osc, controls) = voice();
        controls.set_frequency(440.0);
        controls.set_amplitude(0.7);

        let mut block = [0.0f32; BLOCK];
        osc.render(&mut block);

        assert_eq!(osc.amplitude(), 0.7);
        assert_eq!(osc.phase_increment(), controls.target_phase_increment());
    }

    #[test]
    fn first_sample_from_rest_is_silent() {
        let (mut osc, controls) = voice();
        controls.set_frequency(440.0);
        controls.set_amplitude(1.0);

        let mut block = [0.0f32; BLOCK];
        osc.render(&mut block);
        assert_eq!(block[0], 0.0);
    }

    #[test]
    fn zero_increment_holds_position() {
        let (mut osc, controls) = voice();
        controls.set_amplitude(1.0);
        // Frequency target stays zero; phase never advances.
        let mut block = [0.0f32; BLOCK];
        osc.render(&mut block);
        let held = osc.phase();
        osc.render(&mut block);
        assert_eq!(osc.phase(), held);
        assert!(block.iter().all(|&s| s == block[0]));
    }

    #[test]
    fn negative_frequency_stays_bounded() {
        let (mut osc, controls) = voice();
        controls.set_amplitude(1.0);
        controls.set_frequency(-880.0);

        let mut block = [0.0f32; BLOCK];
        for _ in 0..64 {
            osc.render(&mut block);
            for &s in &block {
                assert!(s.is_finite());
                assert!(s.abs() <= 1.0 + 1e-5);
            }
        }
    }

    #[test]
    fn extreme_frequency_aliases_without_panic() {
        let (mut osc, controls) = voice();
        controls.set_amplitude(1.0);
        // Far beyond Nyquist: more than one table period per sample.
        controls.set_frequency(1.0e9);

        let mut block = [0.0f32; BLOCK];
        for _ in 0..16 {
            osc.render(&mut block);
            for &s in &block {
                assert!(s.is_finite());
                assert!(s.abs() <= 1.0 + 1e-5);
            }
        }
    }

    #[test]
    fn empty_block_is_a_no_op() {
        let (mut osc, controls) = voice();
        controls.set_amplitude(1.0);
        let mut empty: [f32; 0] = [];
        osc.render(&mut empty);
        assert_eq!(osc.amplitude(), 0.0);
        assert_eq!(osc.phase(), 0);
    }
}
