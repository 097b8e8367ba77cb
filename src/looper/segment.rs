//! Audio segmentation
//!
//! Cuts an input buffer into consecutive slices, one per partition part.

use crate::engine::buffer::AudioBuffer;
use crate::partition::Partition;

/// A borrowed view of one part's slice of the input
///
/// Holds one slice per channel, all the same length.
#[derive(Debug, Clone)]
pub struct Segment<'a> {
    /// Position of the part in the partition
    pub index: usize,
    /// First sample of the slice in the input
    pub offset: usize,
    /// Nominal length of the part in seconds
    pub part_secs: u32,
    /// Per-channel samples
    pub channels: Vec<&'a [f64]>,
}

impl Segment<'_> {
    /// Number of samples in the slice
    ///
    /// Equal to `part_secs * sample_rate` unless the input ran out early.
    #[inline]
    pub fn len_samples(&self) -> usize {
        self.channels.first().map(|ch| ch.len()).unwrap_or(0)
    }

    /// True if the input ended before this part began
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len_samples() == 0
    }

    /// True if the input ended partway through this part
    pub fn is_truncated(&self, sample_rate: u32) -> bool {
        (self.len_samples() as u64) < u64::from(self.part_secs) * u64::from(sample_rate)
    }
}

/// Split `audio` into one segment per part of `partition`
///
/// Segments are contiguous and follow partition order starting at sample 0.
/// A buffer shorter than the partition yields truncated (possibly empty)
/// trailing segments; samples past the partition's end are left out.
pub fn segment<'a>(audio: &'a AudioBuffer, partition: &Partition) -> Vec<Segment<'a>> {
    let total = audio.len();
    let rate = audio.sample_rate as usize;
    let mut offset = 0usize;

    partition
        .parts()
        .iter()
        .enumerate()
        .map(|(index, &part_secs)| {
            let next = offset.saturating_add((part_secs as usize).saturating_mul(rate));
            let start = offset.min(total);
            let end = next.min(total);
            offset = next;

            Segment {
                index,
                offset: start,
                part_secs,
                channels: audio
                    .samples
                    .iter()
                    .map(|ch| &ch[start.min(ch.len())..end.min(ch.len())])
                    .collect(),
            }
        })
        .collect()
}
