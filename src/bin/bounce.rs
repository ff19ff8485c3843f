/* Offline render of the oscillator to a WAV file. Useful for inspecting
ramp behavior without an audio device. */

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use log::info;

use tabletone::gen::{Wavetable, WavetableOscillator};
use tabletone::params::OscillatorControls;
use tabletone::utils::init_logger;

const SAMPLE_RATE: u32 = 44100;
const BLOCK: usize = 1024;

type WavWriter = hound::WavWriter<BufWriter<File>>;

fn main() -> anyhow::Result<()> {
    init_logger();

    let table = Arc::new(Wavetable::sine(16384)?);
    let controls = Arc::new(OscillatorControls::new(SAMPLE_RATE as f32));
    let mut oscillator = WavetableOscillator::new(table, Arc::clone(&controls));

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create("bounce.wav", spec)?;

    // Attack into a sustained 440 Hz tone, roughly two seconds.
    controls.set_frequency(440.0);
    controls.set_amplitude(1.0);
    render_blocks(&mut oscillator, &mut writer, 86)?;

    // Glide down an octave, one second.
    controls.set_frequency(220.0);
    render_blocks(&mut oscillator, &mut writer, 43)?;

    // Fade to silence, one second.
    controls.set_amplitude(0.0);
    render_blocks(&mut oscillator, &mut writer, 43)?;

    writer.finalize()?;
    info!("Wrote bounce.wav");

    Ok(())
}

fn render_blocks(
    oscillator: &mut WavetableOscillator,
    writer: &mut WavWriter,
    count: usize,
) -> anyhow::Result<()> {
    let mut block = [0.0f32; BLOCK];
    for _ in 0..count {
        oscillator.render(&mut block);
        for &sample in block.iter() {
            writer.write_sample(sample)?;
        }
    }
    Ok(())
}
