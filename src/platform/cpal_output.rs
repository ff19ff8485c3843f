#[cfg(feature = "native")]
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Device, FromSample, Sample, SizedSample, Stream, StreamConfig,
};
use log::{error, info};
use std::sync::Arc;

use super::AudioOutput;
use crate::gen::{Wavetable, WavetableOscillator};
use crate::params::OscillatorControls;

/// Frames rendered per chunk inside the callback. Callback buffers larger
/// than this are processed in chunks so the scratch block never grows.
const SCRATCH_FRAMES: usize = 4096;

#[cfg(feature = "native")]
pub struct CpalOutput {
    stream: Option<Stream>,
    device: Option<Device>,
    config: Option<StreamConfig>,
    sample_rate: f32,
    is_active: bool,
}

#[cfg(feature = "native")]
impl CpalOutput {
    pub fn new() -> Self {
        Self {
            stream: None,
            device: None,
            config: None,
            sample_rate: 44100.0,
            is_active: false,
        }
    }

    /// Build the output stream around a wavetable voice. The oscillator is
    /// created here and moved into the callback, so the audio thread owns
    /// the voice state outright; the control thread keeps only `controls`.
    pub fn create_stream(
        &mut self,
        table: Arc<Wavetable>,
        controls: Arc<OscillatorControls>,
    ) -> Result<(), anyhow::Error> {
        let device = self
            .device
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Device not initialized"))?;
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Config not initialized"))?;

        let supported_config = device.default_output_config()?;
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::I8 => Self::make_stream::<i8>(device, config, table, controls)?,
            cpal::SampleFormat::I16 => Self::make_stream::<i16>(device, config, table, controls)?,
            cpal::SampleFormat::I32 => Self::make_stream::<i32>(device, config, table, controls)?,
            cpal::SampleFormat::I64 => Self::make_stream::<i64>(device, config, table, controls)?,
            cpal::SampleFormat::U8 => Self::make_stream::<u8>(device, config, table, controls)?,
            cpal::SampleFormat::U16 => Self::make_stream::<u16>(device, config, table, controls)?,
            cpal::SampleFormat::U32 => Self::make_stream::<u32>(device, config, table, controls)?,
            cpal::SampleFormat::U64 => Self::make_stream::<u64>(device, config, table, controls)?,
            cpal::SampleFormat::F32 => Self::make_stream::<f32>(device, config, table, controls)?,
            cpal::SampleFormat::F64 => Self::make_stream::<f64>(device, config, table, controls)?,
            sample_format => {
                return Err(anyhow::anyhow!(
                    "Unsupported sample format '{}'",
                    sample_format
                ))
            }
        };

        self.stream = Some(stream);
        Ok(())
    }

    /// Setup the CPAL host and device
    fn setup_host_device(&mut self) -> Result<(), anyhow::Error> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow::anyhow!("Default output device is not available"))?;

        info!("Output device: {}", device.name()?);

        let config = device.default_output_config()?;
        info!("Default output config: {:?}", config);

        self.sample_rate = config.sample_rate().0 as f32;
        self.device = Some(device);
        self.config = Some(config.into());

        Ok(())
    }

    /// Create a typed stream for the given sample format
    fn make_stream<T>(
        device: &Device,
        config: &StreamConfig,
        table: Arc<Wavetable>,
        controls: Arc<OscillatorControls>,
    ) -> Result<Stream, anyhow::Error>
    where
        T: SizedSample + FromSample<f32>,
    {
        let num_channels = config.channels as usize;
        let mut oscillator = WavetableOscillator::new(table, controls);
        // Preallocated mono scratch; the callback must not allocate.
        let mut block = vec![0.0f32; SCRATCH_FRAMES];

        let err_fn = |err| error!("Error building output sound stream: {}", err);

        let stream = device.build_output_stream(
            config,
            move |output: &mut [T], _: &cpal::OutputCallbackInfo| {
                for chunk in output.chunks_mut(num_channels * SCRATCH_FRAMES) {
                    let frames = chunk.len() / num_channels;
                    oscillator.render(&mut block[..frames]);

                    for (frame, &sample) in chunk.chunks_mut(num_channels).zip(block.iter()) {
                        let value: T = T::from_sample(sample);
                        // Copy the same value to all channels
                        for out in frame.iter_mut() {
                            *out = value;
                        }
                    }
                }
            },
            err_fn,
            None,
        )?;

        Ok(stream)
    }
}

#[cfg(feature = "native")]
impl AudioOutput for CpalOutput {
    fn initialize(&mut self, sample_rate: f32) -> Result<(), anyhow::Error> {
        self.sample_rate = sample_rate;
        self.setup_host_device()?;
        Ok(())
    }

    fn start(&mut self) -> Result<(), anyhow::Error> {
        if let Some(stream) = &self.stream {
            stream.play()?;
            self.is_active = true;
            info!("Audio stream started at sample rate: {}", self.sample_rate);
        } else {
            return Err(anyhow::anyhow!(
                "Stream not created. Call create_stream first."
            ));
        }

        Ok(())
    }

    fn stop(&mut self) -> Result<(), anyhow::Error> {
        if let Some(stream) = &self.stream {
            stream.pause()?;
            self.is_active = false;
            info!("Audio stream stopped");
        }

        Ok(())
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}
