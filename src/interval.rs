use crate::config::SortMode;
use crate::line::PixelSample;

/// A scan line split by threshold, both halves in their original order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Partition {
    /// Samples eligible for sorting.
    pub active: Vec<PixelSample>,
    /// Samples left out of the sort.
    pub inactive: Vec<PixelSample>,
}

/// The 0 to 255 cut derived from a strength of 0 to 100.
#[inline]
pub fn threshold_value(strength: f64) -> f64 {
    strength / 100.0 * 255.0
}

/// The threshold as it applies to keys of `mode`. Hue and saturation keys
/// live in their own ranges, so the byte threshold is scaled down by 2.55.
#[inline]
pub fn mode_threshold(mode: SortMode, strength: f64) -> f64 {
    let value = threshold_value(strength);
    match mode {
        SortMode::Brightness | SortMode::Color => value,
        SortMode::Hue | SortMode::Saturation => value / 2.55,
    }
}

/// Whether `sample` takes part in the sort, given a [`mode_threshold`].
#[inline]
pub fn is_active(sample: &PixelSample, threshold: f64) -> bool {
    sample.key >= threshold
}

pub fn partition<I>(samples: I, mode: SortMode, strength: f64) -> Partition
where
    I: IntoIterator<Item = PixelSample>,
{
    let threshold = mode_threshold(mode, strength);
    let (active, inactive) = samples
        .into_iter()
        .partition(|sample: &PixelSample| is_active(sample, threshold));
    Partition { active, inactive }
}
