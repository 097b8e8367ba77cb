//! Integration Tests
//!
//! End-to-end tests for the Landau search and the looping pipeline.

use approx::assert_abs_diff_eq;
use pretty_assertions::assert_eq;
use test_case::test_case;

use landau::engine::buffer::{calculate_peak, BufferShape};
use landau::engine::{export_audio, import_audio, ExportFormat};
use landau::observer::{LoopEvent, NoopObserver};
use landau::partition::{lcm_of, partitions};
use landau::{landau, landau_audio_loop, AudioBuffer, LandauError, Looper, Partition};

/// Helper: a mono clip whose value in each whole second is that second's number
fn numbered_seconds(seconds: usize, sample_rate: u32) -> AudioBuffer {
    let samples = (0..seconds * sample_rate as usize)
        .map(|i| (i / sample_rate as usize + 1) as f64)
        .collect();
    AudioBuffer::from_mono(samples, sample_rate).unwrap()
}

fn constant_mono(seconds: usize, sample_rate: u32, value: f64) -> AudioBuffer {
    AudioBuffer::from_mono(vec![value; seconds * sample_rate as usize], sample_rate).unwrap()
}

// === Search Tests ===

#[test]
fn test_search_is_exhaustive_up_to_fifteen() {
    for n in 0..=15 {
        let result = landau(n);
        let best = partitions(n).map(|p| lcm_of(&p)).max().unwrap();
        assert_eq!(result.g_n, best, "g({})", n);
        assert_eq!(result.partition.sum(), u64::from(n));
    }
}

#[test]
fn test_explicit_optimal_partition_matches_search() {
    for n in 1..=12u32 {
        let searched = landau(n);
        let audio = constant_mono(n as usize, 20, 0.5);

        let explicit = Looper::default()
            .run(&audio, Some(&searched.partition), &mut NoopObserver)
            .unwrap();
        let automatic = Looper::default()
            .run(&audio, None, &mut NoopObserver)
            .unwrap();

        assert_eq!(explicit.g_n, searched.g_n);
        assert_eq!(explicit.g_n, automatic.g_n);
        assert_eq!(explicit.partition, automatic.partition);
    }
}

#[test]
fn test_mismatched_partition_reports_n_and_sum() {
    let audio = constant_mono(5, 100, 0.5);
    let partition = Partition::new(vec![4, 3]);

    let err = landau_audio_loop(&audio, Some(&partition)).unwrap_err();
    match err {
        LandauError::PartitionMismatch { partition, sum, n } => {
            assert_eq!(partition, vec![4, 3]);
            assert_eq!(sum, 7);
            assert_eq!(n, 5);
        }
        other => panic!("Expected PartitionMismatch, got: {:?}", other),
    }
}

#[test]
fn test_partition_with_unrepresentable_lcm_fails_cleanly() {
    let primes = vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];
    let audio = constant_mono(381, 1, 0.5);

    let err = landau_audio_loop(&audio, Some(&Partition::new(primes))).unwrap_err();
    assert_eq!(err.error_code(), "LCM_OVERFLOW");
}

#[test]
fn test_unallocatable_output_fails_cleanly() {
    // LCM fits in u64, but the output would need about 9.8e18 bytes.
    let audio = constant_mono(330, 1, 0.5);
    let partition = Partition::new(vec![47, 43, 41, 37, 31, 29, 23, 19, 17, 13, 11, 7, 5, 4, 3]);

    let err = landau_audio_loop(&audio, Some(&partition)).unwrap_err();
    assert!(matches!(
        err,
        LandauError::OutputTooLarge { sample_rate: 1, .. }
    ));
}

// === Pipeline Tests ===

#[test_case(5, 8000 ; "five seconds at 8 kHz")]
#[test_case(7, 1000 ; "seven seconds at 1 kHz")]
#[test_case(10, 441 ; "ten seconds at 441 Hz")]
fn test_output_length_is_g_n_seconds(seconds: usize, sample_rate: u32) {
    let audio = numbered_seconds(seconds, sample_rate);
    let output = landau_audio_loop(&audio, None).unwrap();

    assert_eq!(
        output.audio.len() as u64,
        output.g_n * u64::from(sample_rate)
    );
    assert_eq!(output.audio.sample_rate, sample_rate);
}

#[test]
fn test_output_length_for_suboptimal_partition() {
    let audio = numbered_seconds(6, 100);
    let partition = Partition::new(vec![4, 2]);
    let output = landau_audio_loop(&audio, Some(&partition)).unwrap();

    assert_eq!(output.g_n, 4);
    assert_eq!(output.audio.len(), 400);
}

#[test]
fn test_five_second_scenario() {
    let sample_rate = 8000;
    let audio = constant_mono(5, sample_rate, 0.3);
    let output = landau_audio_loop(&audio, None).unwrap();

    assert_eq!(output.g_n, 6);
    assert_eq!(output.partition.parts(), &[3, 2]);
    assert_eq!(output.audio.len(), 48_000);
    assert_eq!(output.audio.shape(), BufferShape::OneDimensional);

    // Both segments overlap everywhere: 0.3 + 0.3, normalized to 1.0.
    for &sample in output.audio.channel(0) {
        assert_abs_diff_eq!(sample, 1.0, epsilon = 1e-9);
    }
}

#[test]
fn test_overlap_reconstruction_for_three_two() {
    // Seconds 1..=3 carry 1, 2, 3; seconds 4..=5 carry 4, 5.
    let sample_rate = 10;
    let audio = numbered_seconds(5, sample_rate);
    let output = Looper::default()
        .run(&audio, None, &mut NoopObserver)
        .unwrap();

    // Segment [1, 2, 3] loops twice, segment [4, 5] three times.
    let expected_raw = [1.0 + 4.0, 2.0 + 5.0, 3.0 + 4.0, 1.0 + 5.0, 2.0 + 4.0, 3.0 + 5.0];
    let peak = 8.0;

    for (second, raw) in expected_raw.iter().enumerate() {
        for i in 0..sample_rate as usize {
            let sample = output.audio.channel(0)[second * sample_rate as usize + i];
            assert_abs_diff_eq!(sample, raw / peak, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_non_silent_output_peaks_at_one() {
    let audio = landau::engine::demo_signal(7, 2000).unwrap();
    let output = landau_audio_loop(&audio, None).unwrap();

    assert_abs_diff_eq!(calculate_peak(&output.audio), 1.0, epsilon = 1e-9);
}

#[test]
fn test_silent_input_gives_silent_output() {
    let audio = constant_mono(4, 100, 0.0);
    let mut silent_reported = false;
    let mut observer = |event: &LoopEvent<'_>| {
        if matches!(event, LoopEvent::Silent) {
            silent_reported = true;
        }
    };
    let output = Looper::default().run(&audio, None, &mut observer).unwrap();

    assert!(silent_reported);
    assert!(output.audio.is_finite());
    assert!(output.audio.channel(0).iter().all(|&s| s == 0.0));
}

#[test]
fn test_mono_stays_mono() {
    let output = landau_audio_loop(&numbered_seconds(4, 50), None).unwrap();
    assert_eq!(output.audio.shape(), BufferShape::OneDimensional);
    assert!(output.audio.as_mono().is_some());
}

#[test]
fn test_multichannel_preserves_channel_count() {
    let sample_rate = 50;
    let left: Vec<f64> = (0..5 * sample_rate).map(|i| (i % 7) as f64).collect();
    let right: Vec<f64> = left.iter().map(|s| -s).collect();
    let center = vec![0.1; 5 * sample_rate];
    let audio = AudioBuffer::from_channels(vec![left, right, center], sample_rate as u32).unwrap();

    let output = landau_audio_loop(&audio, None).unwrap();

    assert_eq!(output.audio.channels(), 3);
    assert_eq!(output.audio.shape(), BufferShape::TwoDimensional);
    // Left and right were mirror images; they stay mirror images.
    for (l, r) in output.audio.channel(0).iter().zip(output.audio.channel(1)) {
        assert_abs_diff_eq!(*l, -*r, epsilon = 1e-12);
    }
}

// === File Round Trip ===

#[test]
fn test_loop_through_wav_files() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");

    let audio = numbered_seconds(5, 400);
    let scaled: Vec<f64> = audio.channel(0).iter().map(|s| s / 10.0).collect();
    let audio = AudioBuffer::from_mono(scaled, 400).unwrap();
    export_audio(&audio, &input_path, ExportFormat::float()).unwrap();

    let imported = import_audio(&input_path).unwrap();
    let output = landau_audio_loop(&imported, None).unwrap();
    export_audio(&output.audio, &output_path, ExportFormat::default()).unwrap();

    let written = import_audio(&output_path).unwrap();
    assert_eq!(written.len(), 6 * 400);
    assert_eq!(written.channels(), 1);
    assert_abs_diff_eq!(calculate_peak(&written), 1.0, epsilon = 1e-6);
}
