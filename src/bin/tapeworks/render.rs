//! Offline WAV processing.

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;
use tapeworks::{layout::negotiate, AtomicParams, AudioBuffer, EffectKind, ProcessSpec};

/// Read a WAV as interleaved f32 samples.
pub fn read_wav(path: &Path) -> EyreResult<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
    let spec = reader.spec();

    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok((samples, spec))
}

pub fn run(
    kind: EffectKind,
    input: &Path,
    output: &Path,
    params: &AtomicParams,
    block_size: usize,
) -> EyreResult<()> {
    let (samples, spec) = read_wav(input)?;
    let channels = spec.channels as usize;
    negotiate(channels, channels).wrap_err_with(|| format!("cannot process {}", input.display()))?;

    let block_size = block_size.max(1);
    let mut effect = kind.create(ProcessSpec::new(spec.sample_rate as f32, block_size, channels));

    println!(
        "{}: {} frames, {} Hz, {} channel(s)",
        kind,
        samples.len() / channels,
        spec.sample_rate,
        channels
    );

    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer =
        WavWriter::create(output, out_spec).wrap_err_with(|| format!("failed to create {}", output.display()))?;

    let mut buffer = AudioBuffer::new(channels, block_size);
    let mut interleaved = vec![0.0f32; block_size * channels];

    for chunk in samples.chunks(block_size * channels) {
        buffer.read_interleaved(chunk, channels);
        effect.process(&mut buffer, params);

        let out = &mut interleaved[..buffer.num_samples() * channels];
        buffer.write_interleaved(out);
        for &sample in out.iter() {
            writer.write_sample(sample)?;
        }
    }

    writer.finalize()?;
    println!("wrote {}", output.display());
    Ok(())
}
