//! End-to-end behaviour of the shipped effects through the public API.

use std::collections::HashMap;

use tapeworks::effects::{easyverb, gramophony, reels, wavefolder};
use tapeworks::{
    is_layout_supported, AtomicParams, AudioBuffer, Effect, EffectKind, ParameterSource,
    ProcessSpec,
};

const SAMPLE_RATE: f32 = 48_000.0;

fn create(kind: EffectKind, channels: usize) -> Box<dyn Effect> {
    kind.create(ProcessSpec::new(SAMPLE_RATE, 512, channels))
}

fn tone(len: usize, freq: f32) -> Vec<f32> {
    (0..len)
        .map(|i| 0.5 * (std::f32::consts::TAU * freq * i as f32 / SAMPLE_RATE).sin())
        .collect()
}

/// A host that stores its parameters in a plain map.
struct MapSource(HashMap<&'static str, f32>);

impl ParameterSource for MapSource {
    fn get(&self, id: &str) -> f32 {
        self.0.get(id).copied().unwrap_or(0.0)
    }
}

#[test]
fn wavefolder_folds_and_scales_first_sample() {
    let mut effect = create(EffectKind::WaveFolder, 2);
    let params = AtomicParams::new(wavefolder::PARAMS);
    params.set(wavefolder::GAIN, 1.0);
    params.set(wavefolder::BIAS, 0.0);
    params.set(wavefolder::THRESHOLD, 0.3);
    params.set(wavefolder::VOLUME, 0.5);
    params.set(wavefolder::THR_LFO_DEPTH, 0.0);

    let mut buffer = AudioBuffer::from_channels(vec![vec![0.8], vec![0.2]]);
    effect.process(&mut buffer, &params);

    // 0.8 mirrors around 0.3 to -0.2, then volume halves it
    assert!((buffer.sample(0, 0) + 0.1).abs() < 1e-6);
    assert!((buffer.sample(1, 0) - 0.1).abs() < 1e-6);
}

#[test]
fn wavefolder_reads_any_parameter_source() {
    let mut effect = create(EffectKind::WaveFolder, 1);
    let source = MapSource(HashMap::from([
        (wavefolder::GAIN, 2.0),
        (wavefolder::THRESHOLD, 0.5),
        (wavefolder::VOLUME, 1.0),
        (wavefolder::THR_LFO_RATE, 1.0),
        (wavefolder::GAIN_LFO_RATE, 1.0),
        (wavefolder::BIAS_LFO_RATE, 1.0),
    ]));

    let mut buffer = AudioBuffer::from_channels(vec![vec![0.4]]);
    effect.process(&mut buffer, &source);

    // 0.4 × 2 = 0.8 → 1.0 - 0.8 = 0.2
    assert!((buffer.sample(0, 0) - 0.2).abs() < 1e-6);
}

#[test]
fn zero_mix_returns_the_dry_signal() {
    let input = AudioBuffer::from_channels(vec![tone(256, 440.0), tone(256, 660.0)]);

    for (kind, mix_id) in [
        (EffectKind::Gramophony, gramophony::MIX),
        (EffectKind::Easyverb, easyverb::MIX),
    ] {
        let mut effect = create(kind, 2);
        let params = AtomicParams::new(kind.params());
        params.set(mix_id, 0.0);

        let mut buffer = input.clone();
        effect.process(&mut buffer, &params);
        assert_eq!(buffer, input, "{kind} changed the signal at zero mix");
    }
}

#[test]
fn full_mix_changes_the_signal() {
    let input = AudioBuffer::from_channels(vec![tone(512, 440.0), tone(512, 440.0)]);

    for kind in [EffectKind::Gramophony, EffectKind::Easyverb] {
        let mut effect = create(kind, 2);
        let params = AtomicParams::new(kind.params());
        params.set("MIX", 1.0);

        let mut buffer = input.clone();
        effect.process(&mut buffer, &params);
        assert_ne!(buffer, input, "{kind} was transparent at full mix");
        assert!(buffer.channels().flatten().all(|s| s.is_finite()));
    }
}

#[test]
fn easyverb_runs_mono() {
    let mut effect = create(EffectKind::Easyverb, 1);
    let params = AtomicParams::new(easyverb::PARAMS);
    params.set(easyverb::MIX, 1.0);

    let mut impulse = vec![0.0; 512];
    impulse[0] = 1.0;
    let mut buffer = AudioBuffer::from_channels(vec![impulse]);
    effect.process(&mut buffer, &params);

    let mut tail = AudioBuffer::new(1, 4096);
    effect.process(&mut tail, &params);
    assert!(tail.magnitude(0) > 0.0);
}

#[test]
fn reels_overdubs_then_plays_back() {
    let mut effect = create(EffectKind::Reels, 2);
    let params = AtomicParams::new(reels::PARAMS);
    params.set(reels::GRAIN_SIZE, 100.0);

    // record fills the whole 100-sample grain before playback reads it
    let mut first = AudioBuffer::from_channels(vec![vec![1.0; 100], vec![1.0; 100]]);
    effect.process(&mut first, &params);
    assert!(first.channel(0).iter().all(|&s| (s - 1.25).abs() < 1e-6));

    // second pass: 1.0 × 0.25 + 0.25 × 0.6 = 0.4 in every slot
    let mut second = AudioBuffer::from_channels(vec![vec![1.0; 100], vec![1.0; 100]]);
    effect.process(&mut second, &params);
    assert!(second.channel(1).iter().all(|&s| (s - 1.4).abs() < 1e-6));

    // quiet input leaves the grain alone and keeps replaying it
    let mut quiet = AudioBuffer::new(2, 100);
    effect.process(&mut quiet, &params);
    assert!(quiet.channel(0).iter().all(|&s| (s - 0.4).abs() < 1e-6));
}

#[test]
fn reset_clears_history() {
    let mut effect = create(EffectKind::Reels, 1);
    let params = AtomicParams::new(reels::PARAMS);
    params.set(reels::GRAIN_SIZE, 100.0);

    let mut burst = AudioBuffer::from_channels(vec![vec![1.0; 100]]);
    effect.process(&mut burst, &params);
    effect.reset();

    let mut silence = AudioBuffer::new(1, 100);
    effect.process(&mut silence, &params);
    assert_eq!(silence.magnitude(0), 0.0);
}

#[test]
fn channels_beyond_prepared_pass_through() {
    for kind in [EffectKind::WaveFolder, EffectKind::Reels] {
        let mut effect = create(kind, 2);
        let params = AtomicParams::new(kind.params());
        let extra = tone(64, 1_000.0);
        let mut buffer =
            AudioBuffer::from_channels(vec![vec![0.9; 64], vec![0.9; 64], extra.clone()]);
        effect.process(&mut buffer, &params);
        assert_eq!(buffer.channel(2), extra.as_slice(), "{kind} touched channel 2");
    }
}

#[test]
fn only_matching_mono_or_stereo_layouts() {
    for kind in EffectKind::ALL {
        let effect = create(kind, 2);
        assert!(effect.is_layout_supported(1, 1));
        assert!(effect.is_layout_supported(2, 2));
        assert!(!effect.is_layout_supported(1, 2));
        assert!(!effect.is_layout_supported(2, 1));
        assert!(!effect.is_layout_supported(6, 6));
    }
    assert!(!is_layout_supported(0, 0));
}

#[test]
fn effects_are_found_by_name() {
    for kind in EffectKind::ALL {
        let parsed: EffectKind = kind.name().to_lowercase().parse().expect("known name");
        assert_eq!(parsed, kind);
        assert_eq!(create(kind, 2).name(), kind.name());
    }
    assert!("flanger".parse::<EffectKind>().is_err());
}
