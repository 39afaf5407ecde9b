//! Internal endpoint pipeline tests

use super::*;
use crate::core::{Label, NoiseProfile, VoxError, WordSegment};

/// 10000 samples of +-3 hiss, `word` samples of speech, then 500 zeros
fn recording(word: impl Fn(usize) -> i32, word_len: usize) -> Vec<i32> {
    let mut samples: Vec<i32> = (0..10000).map(|i| if i % 2 == 0 { 3 } else { -3 }).collect();
    samples.extend((0..word_len).map(word));
    samples.extend(std::iter::repeat(0).take(500));
    samples
}

fn buzzy(i: usize) -> i32 {
    if i % 2 == 0 {
        1000
    } else {
        -1000
    }
}

fn hummed(i: usize) -> i32 {
    if (i / 100) % 2 == 0 {
        800
    } else {
        -800
    }
}

#[test]
fn test_high_zcr_word_is_affirmative() {
    let pipeline = EndpointPipeline::new();
    let report = pipeline.run(&recording(buzzy, 3000)).unwrap();

    assert_eq!(report.profile.noise_level, 3);
    assert_eq!(report.profile.dc_shift, 0.0);
    assert_eq!(report.onset, 10000);
    // word plus the trailing quiet run
    assert_eq!(report.segment_len, 3050);
    assert_eq!(report.normalization_value, 1000);

    // 10 full frames and a 50-sample remainder
    assert_eq!(report.frames.len(), 11);
    assert_eq!(report.frames[10].len, 50);
    assert_eq!(report.result.frame_count, 11);

    let total_zcr: u32 = report.frames.iter().map(|f| f.zcr).sum();
    assert_eq!(total_zcr, 2999);
    assert_eq!(report.result.label, Label::Affirmative);

    // full frames of +-5000 have mean energy 5000^2
    assert!((report.frames[0].mean_energy - 25_000_000.0).abs() < 1e-6);
}

#[test]
fn test_low_zcr_word_is_negative() {
    let report = EndpointPipeline::new().run(&recording(hummed, 3000)).unwrap();

    assert_eq!(report.segment_len, 3050);
    let total_zcr: u32 = report.frames.iter().map(|f| f.zcr).sum();
    assert_eq!(total_zcr, 29);
    assert!(report.result.average_zcr < 25.0);
    assert_eq!(report.result.label, Label::Negative);
}

#[test]
fn test_runs_do_not_share_totals() {
    let pipeline = EndpointPipeline::new();
    let samples = recording(buzzy, 2400);

    let first = pipeline.run(&samples).unwrap();
    let second = pipeline.run(&samples).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.result.frame_count, 9);
}

#[test]
fn test_separate_noise_recording() {
    let noise: Vec<i32> = (0..4000).map(|i| if i % 3 == 0 { 12 } else { 9 }).collect();
    let mut word: Vec<i32> = (0..2500).map(buzzy).collect();
    word.extend(std::iter::repeat(0).take(100));

    let report = EndpointPipeline::new().run_with_noise(&noise, &word).unwrap();

    assert_eq!(report.profile.noise_level, 12);
    assert_eq!(report.profile.sample_count, 4000);
    assert_eq!(report.onset, 0);
    assert_eq!(report.segment_len, 2550);
}

#[test]
fn test_silent_word_is_degenerate() {
    let pipeline = EndpointPipeline::new();
    let profile = NoiseProfile {
        noise_level: 0,
        dc_shift: 0.0,
        sample_count: 1,
    };
    let segment = WordSegment {
        onset: 0,
        samples: vec![0; 600],
    };

    assert!(matches!(
        pipeline.classify_segment(profile, &segment),
        Err(VoxError::DegenerateSignal(_))
    ));
}

#[test]
fn test_no_word_found() {
    let samples: Vec<i32> = (0..20000).map(|i| (i % 7) as i32 - 3).collect();
    assert!(matches!(
        EndpointPipeline::new().run(&samples),
        Err(VoxError::DetectionFailed(_))
    ));
}

#[test]
fn test_run_context_accumulates_in_order() {
    let config = crate::core::EndpointConfig {
        frame_size: 4,
        ..Default::default()
    };
    let profile = NoiseProfile {
        noise_level: 1,
        dc_shift: 0.0,
        sample_count: 1,
    };
    let segment = WordSegment {
        onset: 0,
        samples: vec![2, -2, 2, -2, 2, -2],
    };

    let mut ctx = RunContext::new(profile, &segment, &config).unwrap();
    ctx.process(&segment.samples[..3]);
    assert!(ctx.frames().is_empty());
    ctx.process(&segment.samples[3..]);
    assert_eq!(ctx.frames().len(), 1);

    let (frames, totals) = ctx.finish();
    assert_eq!(frames.len(), 2);
    assert_eq!(totals.frame_count, 2);
    assert_eq!(totals.total_zcr, 5);
}
