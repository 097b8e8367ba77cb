//! Loop mixing
//!
//! Each segment is tiled back-to-back from sample 0 across the whole output
//! and summed into it. Segments of different lengths complete different
//! numbers of loops, and all of them line up again exactly at g(n) seconds.

use super::segment::Segment;
use crate::engine::buffer::AudioBuffer;
use crate::error::{LandauError, Result};
use crate::observer::{LoopEvent, LoopObserver};

/// Number of times a part of `part_secs` fits into `g_n` seconds
///
/// # Errors
/// `NonIntegralLoopCount` if `part_secs` does not divide `g_n`. That can only
/// happen if `g_n` is not a multiple of the partition's LCM.
pub fn loop_count(g_n: u64, part_secs: u32) -> Result<u64> {
    let part = u64::from(part_secs);
    if part == 0 || g_n % part != 0 {
        return Err(LandauError::NonIntegralLoopCount { g_n, part_secs });
    }
    Ok(g_n / part)
}

/// Add every segment, tiled `g_n / part_secs` times, into `output`
///
/// `output` must already be `g_n * sample_rate` samples long with the same
/// channel count as the segments. Tiles are laid at a stride equal to the
/// segment's actual sample length, so a truncated segment leaves the end of
/// its span untouched.
pub fn accumulate(
    output: &mut AudioBuffer,
    segments: &[Segment<'_>],
    g_n: u64,
    observer: &mut dyn LoopObserver,
) -> Result<()> {
    for segment in segments {
        let loops = loop_count(g_n, segment.part_secs)?;
        let seg_len = segment.len_samples();

        if seg_len > 0 {
            for (out_channel, seg_channel) in output.samples.iter_mut().zip(&segment.channels) {
                for tile in out_channel.chunks_mut(seg_len).take(loops as usize) {
                    for (out, &sample) in tile.iter_mut().zip(seg_channel.iter()) {
                        *out += sample;
                    }
                }
            }
        }

        observer.on_event(&LoopEvent::SegmentLooped {
            index: segment.index,
            part_secs: segment.part_secs,
            loops,
            g_n,
        });
    }

    Ok(())
}
