pub mod oscillator;
pub mod wavetable;

pub use self::oscillator::*;
pub use self::wavetable::*;
