//! Audio Buffer Management
//!
//! Provides the in-memory audio buffer the looper reads from and writes to.
//! Samples are stored per channel as 64-bit floats; any channel count of one
//! or more is accepted.

use crate::error::{LandauError, Result};

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert linear amplitude to decibels
///
/// # Arguments
/// * `linear` - Linear amplitude value
///
/// # Returns
/// Value in decibels. Returns -f64::INFINITY for zero input.
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    if linear <= 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

/// Calculate the peak absolute sample value across all channels
///
/// # Returns
/// Linear peak (0.0 for empty or silent buffers). A NaN sample makes the
/// peak NaN.
pub fn calculate_peak(buffer: &AudioBuffer) -> f64 {
    buffer
        .samples
        .iter()
        .flat_map(|channel| channel.iter())
        .map(|&s| s.abs())
        .fold(0.0_f64, |peak, s| if s > peak || s.is_nan() { s } else { peak })
}

// ============================================================================
// Buffer Shape
// ============================================================================

/// How the caller laid out the samples
///
/// A flat mono buffer is processed as a single channel and handed back flat.
/// A buffer supplied as channels stays multi-dimensional even when it has
/// only one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferShape {
    /// One-dimensional: a plain list of mono samples
    OneDimensional,
    /// Two-dimensional: (sample, channel)
    #[default]
    TwoDimensional,
}

// ============================================================================
// Audio Buffer
// ============================================================================

/// Audio samples with their sample rate
///
/// Stored non-interleaved: `samples[channel][index]`. Every channel has the
/// same length; the constructors enforce it and the field is not public.
///
/// # Example
/// ```
/// use landau::engine::buffer::{AudioBuffer, BufferShape};
///
/// let buffer = AudioBuffer::from_mono(vec![0.0; 8000], 8000).unwrap();
/// assert_eq!(buffer.channels(), 1);
/// assert_eq!(buffer.shape(), BufferShape::OneDimensional);
/// assert_eq!(buffer.duration_secs(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Sample data: outer Vec is channels, inner Vec is samples
    pub(crate) samples: Vec<Vec<f64>>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    shape: BufferShape,
}

impl AudioBuffer {
    /// Create a zeroed buffer
    ///
    /// # Arguments
    /// * `num_samples` - Number of samples per channel
    /// * `num_channels` - Number of channels (at least 1)
    /// * `sample_rate` - Sample rate in Hz
    /// * `shape` - Layout to report back to the caller
    ///
    /// # Errors
    /// `BufferTooLarge` if the samples cannot be allocated
    pub fn silent(
        num_samples: usize,
        num_channels: usize,
        sample_rate: u32,
        shape: BufferShape,
    ) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        if num_channels == 0 {
            return Err(no_channels());
        }
        if shape == BufferShape::OneDimensional && num_channels != 1 {
            return Err(LandauError::InvalidAudio {
                reason: format!(
                    "A one-dimensional buffer has one channel, not {}",
                    num_channels
                ),
                source: None,
            });
        }

        let too_large = || LandauError::BufferTooLarge {
            num_samples,
            num_channels,
        };

        let total_bytes = num_samples
            .checked_mul(std::mem::size_of::<f64>())
            .and_then(|bytes| bytes.checked_mul(num_channels))
            .ok_or_else(too_large)?;
        if total_bytes > isize::MAX as usize {
            return Err(too_large());
        }

        let mut samples = Vec::new();
        samples
            .try_reserve_exact(num_channels)
            .map_err(|_| too_large())?;
        for _ in 0..num_channels {
            let mut channel = Vec::new();
            channel
                .try_reserve_exact(num_samples)
                .map_err(|_| too_large())?;
            channel.resize(num_samples, 0.0);
            samples.push(channel);
        }

        Ok(Self {
            samples,
            sample_rate,
            shape,
        })
    }

    /// Wrap a one-dimensional mono signal
    pub fn from_mono(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        Ok(Self {
            samples: vec![samples],
            sample_rate,
            shape: BufferShape::OneDimensional,
        })
    }

    /// Wrap per-channel sample vectors
    ///
    /// # Errors
    /// `InvalidAudio` if there are no channels or the channels differ in length
    pub fn from_channels(channels: Vec<Vec<f64>>, sample_rate: u32) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        let first_len = channels.first().map(Vec::len).ok_or_else(no_channels)?;

        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, ch)| ch.len() != first_len)
        {
            return Err(LandauError::InvalidAudio {
                reason: format!(
                    "Channel {} has {} samples, expected {}",
                    index,
                    channel.len(),
                    first_len
                ),
                source: None,
            });
        }

        Ok(Self {
            samples: channels,
            sample_rate,
            shape: BufferShape::TwoDimensional,
        })
    }

    /// Create a two-dimensional buffer from interleaved frames
    ///
    /// # Arguments
    /// * `interleaved` - Interleaved sample data (L, R, L, R, ... for stereo)
    /// * `num_channels` - Number of channels per frame
    /// * `sample_rate` - Sample rate in Hz
    pub fn from_interleaved(
        interleaved: &[f64],
        num_channels: usize,
        sample_rate: u32,
    ) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        if num_channels == 0 {
            return Err(no_channels());
        }

        if interleaved.len() % num_channels != 0 {
            return Err(LandauError::InvalidAudio {
                reason: format!(
                    "Interleaved data length {} is not divisible by channel count {}",
                    interleaved.len(),
                    num_channels
                ),
                source: None,
            });
        }

        let num_samples = interleaved.len() / num_channels;
        let mut samples = vec![Vec::with_capacity(num_samples); num_channels];

        for frame in interleaved.chunks_exact(num_channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                samples[ch].push(sample);
            }
        }

        Ok(Self {
            samples,
            sample_rate,
            shape: BufferShape::TwoDimensional,
        })
    }

    /// Convert the buffer to interleaved format
    pub fn to_interleaved(&self) -> Vec<f64> {
        let num_channels = self.channels();
        let num_samples = self.len();

        let mut interleaved = Vec::with_capacity(num_channels * num_samples);
        for sample_idx in 0..num_samples {
            for channel in &self.samples {
                interleaved.push(channel[sample_idx]);
            }
        }

        interleaved
    }

    /// The samples as a flat slice, if the buffer is one-dimensional
    pub fn as_mono(&self) -> Option<&[f64]> {
        match self.shape {
            BufferShape::OneDimensional => self.samples.first().map(Vec::as_slice),
            BufferShape::TwoDimensional => None,
        }
    }

    /// Get the layout the buffer was created with
    #[inline]
    pub fn shape(&self) -> BufferShape {
        self.shape
    }

    /// Get the number of channels
    #[inline]
    pub fn channels(&self) -> usize {
        self.samples.len()
    }

    /// Get the number of samples per channel
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.first().map(|ch| ch.len()).unwrap_or(0)
    }

    /// Check if the buffer is empty (no samples)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / f64::from(self.sample_rate)
    }

    /// Get immutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel(&self, index: usize) -> &[f64] {
        &self.samples[index]
    }

    /// Get mutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [f64] {
        &mut self.samples[index]
    }

    /// Check that no sample is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.samples
            .iter()
            .flat_map(|channel| channel.iter())
            .all(|s| s.is_finite())
    }
}

fn check_sample_rate(sample_rate: u32) -> Result<()> {
    if sample_rate == 0 {
        return Err(LandauError::InvalidSampleRate { sample_rate });
    }
    Ok(())
}

fn no_channels() -> LandauError {
    LandauError::InvalidAudio {
        reason: "Audio buffer needs at least one channel".to_string(),
        source: None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linear_to_db() {
        assert_abs_diff_eq!(linear_to_db(1.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(linear_to_db(0.5), -6.0206, epsilon = 1e-3);
        assert_eq!(linear_to_db(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_calculate_peak_negative() {
        let buffer =
            AudioBuffer::from_channels(vec![vec![0.1, -0.7], vec![0.3, 0.2]], 8000).unwrap();
        assert_abs_diff_eq!(calculate_peak(&buffer), 0.7);
    }

    #[test]
    fn test_calculate_peak_silence() {
        let buffer = AudioBuffer::silent(100, 2, 8000, BufferShape::TwoDimensional).unwrap();
        assert_eq!(calculate_peak(&buffer), 0.0);
    }

    #[test]
    fn test_silent_buffer() {
        let buffer = AudioBuffer::silent(48, 3, 8, BufferShape::TwoDimensional).unwrap();
        assert_eq!(buffer.channels(), 3);
        assert_eq!(buffer.len(), 48);
        assert_eq!(buffer.duration_secs(), 6.0);
        assert!(buffer.samples.iter().flatten().all(|&s| s == 0.0));
    }

    #[test]
    fn test_silent_one_dimensional_needs_one_channel() {
        assert!(AudioBuffer::silent(10, 2, 8000, BufferShape::OneDimensional).is_err());
        assert!(AudioBuffer::silent(10, 0, 8000, BufferShape::TwoDimensional).is_err());
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let err = AudioBuffer::from_mono(vec![0.0; 4], 0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SAMPLE_RATE");
    }

    #[test]
    fn test_from_mono_shape() {
        let buffer = AudioBuffer::from_mono(vec![1.0, 2.0], 8000).unwrap();
        assert_eq!(buffer.shape(), BufferShape::OneDimensional);
        assert_eq!(buffer.as_mono(), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn test_single_channel_two_dimensional_stays_two_dimensional() {
        let buffer = AudioBuffer::from_channels(vec![vec![1.0, 2.0]], 8000).unwrap();
        assert_eq!(buffer.channels(), 1);
        assert_eq!(buffer.shape(), BufferShape::TwoDimensional);
        assert_eq!(buffer.as_mono(), None);
    }

    #[test]
    fn test_from_channels_rejects_ragged() {
        let result = AudioBuffer::from_channels(vec![vec![0.0; 3], vec![0.0; 2]], 8000);
        assert!(result.is_err());
        assert!(AudioBuffer::from_channels(Vec::new(), 8000).is_err());
    }

    #[test]
    fn test_buffer_from_interleaved_stereo() {
        let interleaved = vec![1.0, 5.0, 2.0, 6.0, 3.0, 7.0];
        let buffer = AudioBuffer::from_interleaved(&interleaved, 2, 44100).unwrap();

        assert_eq!(buffer.channels(), 2);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.channel(0), &[1.0, 2.0, 3.0]);
        assert_eq!(buffer.channel(1), &[5.0, 6.0, 7.0]);
        assert_eq!(buffer.to_interleaved(), interleaved);
    }

    #[test]
    fn test_buffer_from_interleaved_invalid() {
        assert!(AudioBuffer::from_interleaved(&[1.0, 2.0, 3.0], 2, 44100).is_err());
    }

    #[test]
    fn test_calculate_peak_nan_is_nan() {
        let buffer = AudioBuffer::from_mono(vec![0.5, f64::NAN, -0.9], 8000).unwrap();
        assert!(calculate_peak(&buffer).is_nan());

        let buffer = AudioBuffer::from_mono(vec![f64::NAN, 0.5], 8000).unwrap();
        assert!(calculate_peak(&buffer).is_nan());
    }

    #[test]
    fn test_silent_rejects_unallocatable_size() {
        // Fits in usize, but 8 bytes per sample is past isize::MAX.
        let num_samples = isize::MAX as usize / 8 + 1;
        let err = AudioBuffer::silent(num_samples, 1, 1, BufferShape::OneDimensional)
            .unwrap_err();
        assert!(matches!(
            err,
            LandauError::BufferTooLarge {
                num_channels: 1,
                ..
            }
        ));

        // Byte count overflows usize across channels.
        let err = AudioBuffer::silent(usize::MAX / 16, 3, 1, BufferShape::TwoDimensional)
            .unwrap_err();
        assert_eq!(err.error_code(), "BUFFER_TOO_LARGE");
    }

    #[test]
    fn test_channel_mut_writes_through() {
        let mut buffer = AudioBuffer::silent(4, 2, 8000, BufferShape::TwoDimensional).unwrap();
        buffer.channel_mut(1)[2] = 0.25;
        assert_eq!(buffer.channel(1), &[0.0, 0.0, 0.25, 0.0]);
        assert_eq!(buffer.channel(0), &[0.0; 4]);
    }

    #[test]
    fn test_buffer_is_finite() {
        let mut buffer = AudioBuffer::from_mono(vec![0.0, 1.0], 8000).unwrap();
        assert!(buffer.is_finite());
        buffer.channel_mut(0)[1] = f64::NAN;
        assert!(!buffer.is_finite());
    }
}
