//! Landau Looper
//!
//! Turns an n-second clip into a g(n)-second one:
//! - Split the clip by a partition of n (optimal unless one is supplied)
//! - Loop every segment independently across the full g(n) seconds
//! - Sum the loops and normalize the peak to 1.0

pub mod mixer;
pub mod normalize;
pub mod segment;

pub use mixer::{accumulate, loop_count};
pub use normalize::normalize_peak;
pub use segment::{segment, Segment};

use crate::engine::buffer::AudioBuffer;
use crate::error::{LandauError, Result};
use crate::observer::{LogObserver, LoopEvent, LoopObserver};
use crate::partition::{landau_observed, validate_partition, Partition};

/// Largest n searched by brute force unless configured otherwise
///
/// p(60) is just under a million partitions.
pub const DEFAULT_MAX_SEARCH_N: u32 = 60;

/// Allowed distance, in seconds, between the clip length and a whole second
pub const DEFAULT_DURATION_TOLERANCE_SECS: f64 = 0.1;

/// Looper settings
#[derive(Debug, Clone, PartialEq)]
pub struct LooperConfig {
    /// Clips further than this from a whole number of seconds trigger a warning
    pub duration_tolerance_secs: f64,
    /// Refuse to search partitions of n above this; `None` searches any n
    pub max_search_n: Option<u32>,
}

impl Default for LooperConfig {
    fn default() -> Self {
        Self {
            duration_tolerance_secs: DEFAULT_DURATION_TOLERANCE_SECS,
            max_search_n: Some(DEFAULT_MAX_SEARCH_N),
        }
    }
}

impl LooperConfig {
    pub fn with_duration_tolerance(mut self, secs: f64) -> Self {
        self.duration_tolerance_secs = secs;
        self
    }

    pub fn with_max_search_n(mut self, limit: Option<u32>) -> Self {
        self.max_search_n = limit;
        self
    }
}

/// Result of a looping run
#[derive(Debug, Clone, PartialEq)]
pub struct LoopOutput {
    /// Normalized output, `g_n * sample_rate` samples long, same shape as input
    pub audio: AudioBuffer,
    /// Whole seconds the input was treated as
    pub n: u32,
    /// Output length in seconds
    pub g_n: u64,
    /// Partition that was used to split the input
    pub partition: Partition,
}

/// Runs the split / loop / mix / normalize pipeline
#[derive(Debug, Clone, Default)]
pub struct Looper {
    config: LooperConfig,
}

impl Looper {
    pub fn new(config: LooperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LooperConfig {
        &self.config
    }

    /// Loop `audio` by `partition`, or by the optimal partition if `None`
    ///
    /// The clip is treated as `n = round(duration)` seconds. A supplied
    /// partition must sum to `n`; it does not have to be optimal.
    ///
    /// # Errors
    /// * `PartitionMismatch` / `ZeroPart` / `LcmOverflow` - bad supplied partition
    /// * `SearchTooLarge` - n exceeds the configured search limit
    /// * `OutputTooLarge` - g(n) seconds of audio cannot be allocated
    pub fn run(
        &self,
        audio: &AudioBuffer,
        partition: Option<&Partition>,
        observer: &mut dyn LoopObserver,
    ) -> Result<LoopOutput> {
        let sample_rate = audio.sample_rate;
        let duration_secs = audio.duration_secs();
        let n = duration_secs.round() as u32;

        if (duration_secs - f64::from(n)).abs() > self.config.duration_tolerance_secs {
            observer.on_event(&LoopEvent::DurationMismatch { duration_secs, n });
        }

        let result = match partition {
            Some(partition) => validate_partition(n, partition)?,
            None => {
                if let Some(limit) = self.config.max_search_n {
                    if n > limit {
                        return Err(LandauError::SearchTooLarge { n, limit });
                    }
                }
                landau_observed(n, observer)
            }
        };
        let g_n = result.g_n;

        observer.on_event(&LoopEvent::PartitionChosen {
            duration_secs,
            n,
            g_n,
            partition: result.partition.parts(),
        });

        let output_samples = g_n
            .checked_mul(u64::from(sample_rate))
            .and_then(|len| usize::try_from(len).ok())
            .ok_or(LandauError::OutputTooLarge { g_n, sample_rate })?;

        let mut output =
            AudioBuffer::silent(output_samples, audio.channels(), sample_rate, audio.shape())
                .map_err(|err| match err {
                    LandauError::BufferTooLarge { .. } => {
                        LandauError::OutputTooLarge { g_n, sample_rate }
                    }
                    other => other,
                })?;

        let segments = segment(audio, &result.partition);
        accumulate(&mut output, &segments, g_n, observer)?;

        let peak = normalize_peak(&mut output);
        if peak == 0.0 {
            observer.on_event(&LoopEvent::Silent);
        } else if peak.is_finite() {
            observer.on_event(&LoopEvent::Normalized { peak });
        } else {
            observer.on_event(&LoopEvent::NonFinite { peak });
        }

        Ok(LoopOutput {
            audio: output,
            n,
            g_n,
            partition: result.partition,
        })
    }
}

/// Loop `audio` with default settings, logging progress through `log`
///
/// # Example
/// ```
/// use landau::engine::buffer::AudioBuffer;
/// use landau::looper::landau_audio_loop;
///
/// let clip = AudioBuffer::from_mono(vec![0.5; 5 * 100], 100).unwrap();
/// let looped = landau_audio_loop(&clip, None).unwrap();
/// assert_eq!(looped.g_n, 6);
/// assert_eq!(looped.partition.parts(), &[3, 2]);
/// assert_eq!(looped.audio.len(), 6 * 100);
/// ```
pub fn landau_audio_loop(audio: &AudioBuffer, partition: Option<&Partition>) -> Result<LoopOutput> {
    Looper::default().run(audio, partition, &mut LogObserver)
}
