/* Native binary: a single wavetable voice on the default output device,
driven by a line-oriented stdin command loop. */

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use log::{info, warn};

use tabletone::gen::Wavetable;
use tabletone::params::OscillatorControls;
use tabletone::platform::{AudioOutput, CpalOutput};
use tabletone::utils::init_logger;

const TABLE_SIZE: usize = 16384;

fn main() -> anyhow::Result<()> {
    init_logger();

    let table = Arc::new(Wavetable::sine(TABLE_SIZE).context("building wavetable")?);

    let mut output = CpalOutput::new();
    output.initialize(44100.0)?;

    // Frequency conversion is bound to the rate the device actually gave us.
    let controls = Arc::new(OscillatorControls::new(output.sample_rate()));
    output.create_stream(table, Arc::clone(&controls))?;
    output.start()?;

    print_help();

    // Main input loop. Blocking on stdin is fine: audio runs on its own
    // thread and only ever sees the published targets.
    loop {
        print!(" > ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input == "q" {
            info!("Quitting");
            break;
        }

        if let Some(rest) = input.strip_prefix('f') {
            match rest.parse::<f32>() {
                Ok(hz) if hz.is_finite() => {
                    info!("Setting frequency to {} Hz", hz);
                    controls.set_frequency(hz);
                }
                _ => {
                    warn!("Not a frequency: {:?}", input);
                    print_help();
                }
            }
        } else if let Some(rest) = input.strip_prefix('a') {
            match rest.parse::<f32>() {
                Ok(level) if level.is_finite() => {
                    let level = level.clamp(0.0, 1.0);
                    info!("Setting amplitude to {}", level);
                    controls.set_amplitude(level);
                }
                _ => {
                    warn!("Not an amplitude: {:?}", input);
                    print_help();
                }
            }
        } else if !input.is_empty() {
            print_help();
        }
    }

    info!("Finished playback, stopping stream");
    output.stop()?;

    Ok(())
}

fn print_help() {
    println!("f + number to set frequency (e.g. f261.1 or f440 or f1001.111)");
    println!("a + number to set amplitude (e.g. a0.155, clamped zero to one)");
    println!("q to quit");
}
