//! Progress reporting
//!
//! The search and the looping pipeline report what they are doing through a
//! [`LoopObserver`]. Nothing in the library prints; the default
//! [`LogObserver`] forwards events to the `log` facade, and any
//! `FnMut(&LoopEvent)` closure can be passed to collect them instead.

use log::{debug, info, warn};

use crate::engine::buffer::linear_to_db;

/// Something the solver or the looper did
#[derive(Debug, Clone, PartialEq)]
pub enum LoopEvent<'a> {
    /// The search found a partition with a strictly larger LCM
    SearchImproved { partition: &'a [u32], lcm: u64 },

    /// Input duration is not within tolerance of a whole number of seconds
    DurationMismatch { duration_secs: f64, n: u32 },

    /// The partition the looper will use
    PartitionChosen {
        duration_secs: f64,
        n: u32,
        g_n: u64,
        partition: &'a [u32],
    },

    /// A segment was tiled across the output
    SegmentLooped {
        index: usize,
        part_secs: u32,
        loops: u64,
        g_n: u64,
    },

    /// The mixed output was rescaled; `peak` is the pre-normalization peak
    Normalized { peak: f64 },

    /// The mixed output was silent, so normalization was skipped
    Silent,

    /// The mixed output holds NaN or infinite samples and was left unscaled
    NonFinite { peak: f64 },
}

/// Receiver for [`LoopEvent`]s
pub trait LoopObserver {
    fn on_event(&mut self, event: &LoopEvent<'_>);
}

impl<F> LoopObserver for F
where
    F: FnMut(&LoopEvent<'_>),
{
    fn on_event(&mut self, event: &LoopEvent<'_>) {
        self(event)
    }
}

/// Routes events into the `log` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl LoopObserver for LogObserver {
    fn on_event(&mut self, event: &LoopEvent<'_>) {
        match *event {
            LoopEvent::SearchImproved { partition, lcm } => {
                debug!("[SEARCH] lcm {:?} = {}", partition, lcm);
            }
            LoopEvent::DurationMismatch { duration_secs, n } => {
                warn!(
                    "Audio duration ({:.2}s) is not close to an integer. Using n={}",
                    duration_secs, n
                );
            }
            LoopEvent::PartitionChosen {
                duration_secs,
                n,
                g_n,
                partition,
            } => {
                info!("Audio duration: {:.2}s (using n={})", duration_secs, n);
                info!("Landau partition: {:?}", partition);
                info!("g({}) = {}", n, g_n);
                info!("Output duration: {} seconds", g_n);
            }
            LoopEvent::SegmentLooped {
                index,
                part_secs,
                loops,
                g_n,
            } => {
                info!(
                    "  Segment {}: {}s x {} loops = {}s",
                    index + 1,
                    part_secs,
                    loops,
                    g_n
                );
            }
            LoopEvent::Normalized { peak } => {
                debug!(
                    "[NORMALIZE] peak {:.6} ({:.1} dBFS) scaled to 1.0",
                    peak,
                    linear_to_db(peak)
                );
            }
            LoopEvent::Silent => {
                debug!("[NORMALIZE] output is silent, leaving it unchanged");
            }
            LoopEvent::NonFinite { peak } => {
                warn!(
                    "Output peak is {}; input has non-finite samples, skipping normalization",
                    peak
                );
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LoopObserver for NoopObserver {
    fn on_event(&mut self, _event: &LoopEvent<'_>) {}
}
