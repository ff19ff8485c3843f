//! Monophonic wavetable oscillator with click-free parameter ramps.
//!
//! The oscillator voice lives in [`gen`]; the control thread talks to it
//! through the lock-free channel in [`params`]; [`platform`] drives the
//! voice from a native audio device.

pub mod gen;
pub mod params;

// Platform abstraction layer
pub mod platform;

pub mod utils;
