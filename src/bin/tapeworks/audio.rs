//! Live playback: source → effect → output device, with the UI on the main thread.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{PushError, RingBuffer};
use std::path::Path;
use std::sync::Arc;
use tapeworks::{AtomicParams, AudioBuffer, EffectKind, ProcessSpec, MAX_BLOCK_SIZE, MAX_CHANNELS};

use crate::render::read_wav;
use crate::signal::Source;
use crate::ui::{UiApp, UiInit, VIS_BUFFER_SIZE};

/// Capacity in visualisation blocks for the audio→UI ring
const AUDIO_RING_BLOCKS: usize = 16;

pub fn run(kind: EffectKind, input: Option<&Path>) -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let device_channels = config.channels() as usize;
    let channels = device_channels.clamp(1, MAX_CHANNELS);

    let mut source = match input {
        Some(path) => {
            let (samples, spec) = read_wav(path)?;
            if spec.sample_rate as f32 != sample_rate {
                tracing::warn!(
                    file = spec.sample_rate,
                    device = sample_rate,
                    "sample rate mismatch, playback pitch will shift"
                );
            }
            Source::looped(samples, spec.channels as usize)
        }
        None => Source::pluck(sample_rate),
    };

    let params = Arc::new(AtomicParams::new(kind.params()));
    let mut effect = kind.create(ProcessSpec::new(sample_rate, MAX_BLOCK_SIZE, channels));
    let (audio_tx, audio_rx) = RingBuffer::<f32>::new(VIS_BUFFER_SIZE * AUDIO_RING_BLOCKS);

    // Buffer reused by the audio callback
    let mut block = AudioBuffer::new(channels, MAX_BLOCK_SIZE);

    let stream = device
        .build_output_stream(
            &config.into(),
            {
                let params = Arc::clone(&params);
                let mut audio_tx = audio_tx;
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / device_channels;
                    let mut frames_written = 0;
                    while frames_written < total_frames {
                        let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        block.set_num_samples(frames_to_render);

                        source.fill(&mut block);
                        effect.process(&mut block, params.as_ref());

                        // Extra device channels repeat the last processed one
                        let out_off = frames_written * device_channels;
                        for i in 0..frames_to_render {
                            for ch in 0..device_channels {
                                data[out_off + i * device_channels + ch] = block.sample(ch.min(channels - 1), i);
                            }
                        }

                        // Push the first channel to the UI ring, non-blocking (drop on overflow)
                        for &s in block.channel(0) {
                            if let Err(PushError::Full(_)) = audio_tx.push(s) {
                                break;
                            }
                        }

                        frames_written += frames_to_render;
                    }
                }
            },
            move |err| tracing::error!("stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;

    let init = UiInit {
        effect_name: kind.name(),
        sample_rate,
        channels,
        source: match input {
            Some(path) => path.display().to_string(),
            None => "pluck".to_string(),
        },
    };

    let mut terminal = ratatui::init();
    let result = UiApp::new(audio_rx, params, init).run(&mut terminal);
    ratatui::restore();
    result
}
