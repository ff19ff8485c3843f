//! Control-side parameter channel for the oscillator.

use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};

/// One-way parameter hand-off from the control thread to the renderer.
///
/// Single producer (the control thread), single consumer (the audio
/// thread). Each target is a single machine word stored with relaxed
/// ordering: a reader can see an old or a new value of either field, but
/// never a torn one, and the renderer only samples the targets once per
/// block, so an update landing mid-render simply takes effect one block
/// later. No locks anywhere.
pub struct OscillatorControls {
    /// Target phase increment, fixed-point units per sample.
    next_phase_increment: AtomicI64,
    /// Target amplitude, stored as `f32` bits.
    next_amplitude: AtomicU32,
    /// 2^32 / sample_rate, cached at creation.
    increment_per_hz: f64,
    sample_rate: f32,
}

impl OscillatorControls {
    /// Bind the channel to the negotiated device sample rate. The rate is
    /// fixed for the lifetime of the stream.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            next_phase_increment: AtomicI64::new(0),
            next_amplitude: AtomicU32::new(0.0f32.to_bits()),
            increment_per_hz: (1u64 << 32) as f64 / sample_rate as f64,
            sample_rate,
        }
    }

    /// Set the target frequency in Hz. Any finite value is accepted: zero
    /// parks the oscillator, negative plays the table backwards, and
    /// values past Nyquist alias rather than being clamped.
    pub fn set_frequency(&self, hz: f32) {
        let increment = (hz as f64 * self.increment_per_hz).round() as i64;
        self.next_phase_increment.store(increment, Ordering::Relaxed);
    }

    /// Set the target amplitude, clamped to [0, 1].
    pub fn set_amplitude(&self, level: f32) {
        let clamped = level.clamp(0.0, 1.0);
        self.next_amplitude.store(clamped.to_bits(), Ordering::Relaxed);
    }

    /// Target phase increment as last published. Audio-thread-safe.
    #[inline]
    pub fn target_phase_increment(&self) -> i64 {
        self.next_phase_increment.load(Ordering::Relaxed)
    }

    /// Target amplitude as last published. Audio-thread-safe.
    #[inline]
    pub fn target_amplitude(&self) -> f32 {
        f32::from_bits(self.next_amplitude.load(Ordering::Relaxed))
    }

    /// The sample rate this channel converts frequencies against.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}
