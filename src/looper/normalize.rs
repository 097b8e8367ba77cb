//! Peak normalization

use crate::engine::buffer::{calculate_peak, AudioBuffer};

/// Scale `buffer` so its peak absolute sample is 1.0
///
/// The peak is taken across all channels together, so relative channel
/// levels are kept. A silent buffer is left untouched, and so is one whose
/// peak is NaN or infinite.
///
/// # Returns
/// The peak measured before scaling (0.0 for silence)
pub fn normalize_peak(buffer: &mut AudioBuffer) -> f64 {
    let peak = calculate_peak(buffer);
    if peak > 0.0 && peak.is_finite() {
        for sample in buffer.samples.iter_mut().flat_map(|ch| ch.iter_mut()) {
            *sample /= peak;
        }
    }
    peak
}
