//! Audio file I/O
//!
//! Reads and writes WAV files with hound, keeping the file's own sample rate
//! and channel count. Also hosts the file-to-file looping convenience and
//! the synthetic demo signal.

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::info;
use serde::Serialize;

use crate::engine::buffer::AudioBuffer;
use crate::error::{LandauError, Result};
use crate::looper::Looper;
use crate::observer::LoopObserver;
use crate::partition::Partition;

/// Export format configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportFormat {
    /// Bit depth: 16, 24 (integer) or 32 (float). Default: 24
    pub bit_depth: u16,
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat { bit_depth: 24 }
    }
}

impl ExportFormat {
    /// Create a new export format with the given bit depth
    pub fn new(bit_depth: u16) -> Self {
        ExportFormat { bit_depth }
    }

    /// 32-bit float, lossless for normalized output
    pub fn float() -> Self {
        ExportFormat { bit_depth: 32 }
    }
}

/// Import a WAV file
///
/// A mono file becomes a one-dimensional buffer; anything with more channels
/// becomes a two-dimensional buffer. Integer samples are scaled to -1.0..1.0.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidAudio` - If the file is not a valid WAV file
/// * `UnsupportedFormat` - If the integer bit depth is not 8, 16, 24 or 32
/// * `EmptyAudio` - If the file holds no samples
pub fn import_audio(path: &Path) -> Result<AudioBuffer> {
    if !path.exists() {
        return Err(LandauError::FileNotFound {
            path: path.display().to_string(),
            source: None,
        });
    }

    let reader = WavReader::open(path).map_err(|e| LandauError::InvalidAudio {
        reason: format!("Failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    let channels = spec.channels as usize;
    let samples = read_samples_as_f64(reader, spec.bits_per_sample, spec.sample_format)?;

    if samples.is_empty() {
        return Err(LandauError::EmptyAudio);
    }

    if channels == 1 {
        AudioBuffer::from_mono(samples, spec.sample_rate)
    } else {
        AudioBuffer::from_interleaved(&samples, channels, spec.sample_rate)
    }
}

/// Export an AudioBuffer to a WAV file at the buffer's own sample rate
///
/// Integer formats clamp samples to -1.0..1.0 before scaling.
pub fn export_audio(buffer: &AudioBuffer, path: &Path, format: ExportFormat) -> Result<()> {
    let channels = u16::try_from(buffer.channels()).map_err(|_| LandauError::UnsupportedFormat {
        format: format!("{}-channel audio", buffer.channels()),
    })?;

    let sample_format = match format.bit_depth {
        16 | 24 => SampleFormat::Int,
        32 => SampleFormat::Float,
        _ => {
            return Err(LandauError::UnsupportedFormat {
                format: format!("{}-bit audio (only 16, 24, 32 supported)", format.bit_depth),
            });
        }
    };

    let spec = WavSpec {
        channels,
        sample_rate: buffer.sample_rate,
        bits_per_sample: format.bit_depth,
        sample_format,
    };

    let mut writer = WavWriter::create(path, spec).map_err(hound_to_io)?;

    for sample in buffer.to_interleaved() {
        match format.bit_depth {
            16 => {
                let scaled = (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16;
                writer.write_sample(scaled).map_err(hound_to_io)?;
            }
            24 => {
                // 24-bit stored as i32 in hound
                let scaled = (sample.clamp(-1.0, 1.0) * 8_388_607.0).round() as i32;
                writer.write_sample(scaled).map_err(hound_to_io)?;
            }
            _ => {
                writer.write_sample(sample as f32).map_err(hound_to_io)?;
            }
        }
    }

    writer.finalize().map_err(hound_to_io)?;

    Ok(())
}

/// `<stem>_landau.<ext>` next to `input` (`.wav` if it has no extension)
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wav".to_string());

    input.with_file_name(format!("{}_landau.{}", stem, extension))
}

/// What a file-to-file loop produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileLoopOutcome {
    pub output_path: PathBuf,
    pub sample_rate: u32,
    pub g_n: u64,
    pub partition: Partition,
}

/// Read `input`, loop it, and write the result
///
/// # Arguments
/// * `input` - WAV file to read
/// * `output` - Destination; defaults to [`default_output_path`]
/// * `partition` - Partition to use instead of searching for the optimal one
/// * `looper` - Pipeline settings
/// * `format` - Bit depth of the written file
/// * `observer` - Receives pipeline progress
pub fn landau_audio_loop_from_file(
    input: &Path,
    output: Option<&Path>,
    partition: Option<&Partition>,
    looper: &Looper,
    format: ExportFormat,
    observer: &mut dyn LoopObserver,
) -> Result<FileLoopOutcome> {
    let audio = import_audio(input)?;
    let looped = looper.run(&audio, partition, observer)?;

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));

    export_audio(&looped.audio, &output_path, format)?;
    info!("Saved to: {}", output_path.display());

    Ok(FileLoopOutcome {
        output_path,
        sample_rate: audio.sample_rate,
        g_n: looped.g_n,
        partition: looped.partition,
    })
}

/// The demo clip: a clip whose character changes over time
///
/// A steady 220 Hz tone, a 440 Hz partial fading in, and a 330 Hz partial
/// fading out, so each segment of a split sounds different.
pub fn demo_signal(n_seconds: u32, sample_rate: u32) -> Result<AudioBuffer> {
    let num_samples = n_seconds as usize * sample_rate as usize;
    let total = f64::from(n_seconds);
    let tau = 2.0 * std::f64::consts::PI;

    let samples = (0..num_samples)
        .map(|i| {
            let t = i as f64 / f64::from(sample_rate);
            0.3 * (tau * 220.0 * t).sin()
                + 0.3 * (tau * 440.0 * t).sin() * (t / total)
                + 0.2 * (tau * 330.0 * t).sin() * ((total - t) / total)
        })
        .collect();

    AudioBuffer::from_mono(samples, sample_rate)
}

// ============================================================================
// Internal helper functions
// ============================================================================

fn hound_to_io(e: hound::Error) -> LandauError {
    match e {
        hound::Error::IoError(io) => LandauError::Io(io),
        other => LandauError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            other.to_string(),
        )),
    }
}

/// Read samples from WAV reader and convert to f64
fn read_samples_as_f64<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f64>> {
    let invalid = |e: hound::Error| LandauError::InvalidAudio {
        reason: format!("Failed to read {}-bit samples: {}", bits_per_sample, e),
        source: Some(Box::new(e)),
    };

    match (sample_format, bits_per_sample) {
        (SampleFormat::Float, _) => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(invalid),
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|v| f64::from(v) / 128.0))
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(invalid),
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| f64::from(v) / 32_768.0))
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(invalid),
        (SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| f64::from(v) / 8_388_608.0))
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(invalid),
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| f64::from(v) / 2_147_483_648.0))
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(invalid),
        (SampleFormat::Int, bits) => Err(LandauError::UnsupportedFormat {
            format: format!("{}-bit integer audio", bits),
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
