use std::cmp::Ordering;

use crate::config::{Direction, SortConfig};
use crate::line::PixelSample;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionParams {
    pub section_length: usize,
    pub gap_width: usize,
    pub strength: f64,
    pub direction: Direction,
}

impl From<&SortConfig> for SectionParams {
    fn from(config: &SortConfig) -> Self {
        SectionParams {
            section_length: config.section_length,
            gap_width: config.gap_width,
            strength: config.strength,
            direction: config.direction,
        }
    }
}

impl SectionParams {
    /// How many of `len` samples in a section get sorted.
    #[inline]
    pub fn sort_count(&self, len: usize) -> usize {
        let count = (len as f64 * self.strength / 100.0).floor();
        (count.max(0.0) as usize).min(len)
    }
}

fn compare(direction: Direction) -> impl Fn(&PixelSample, &PixelSample) -> Ordering {
    move |a, b| match direction {
        Direction::Ascending => a.key.total_cmp(&b.key),
        Direction::Descending => b.key.total_cmp(&a.key),
    }
}

/// Sorts the leading fraction of `section` in place, the rest stays put.
pub fn sort_section(section: &mut [PixelSample], params: &SectionParams) {
    let count = params.sort_count(section.len());
    // slice::sort_by is stable, equal keys keep their line order
    section[..count].sort_by(compare(params.direction));
}

/// `active` must be ordered by offset. Panics on a zero section length.
pub fn sort_sections(
    active: &[PixelSample],
    line_len: usize,
    params: &SectionParams,
) -> Vec<PixelSample> {
    assert!(params.section_length > 0, "section length must be >= 1");
    // saturating, so huge sections or gaps still end the walk
    let stride = params.section_length.saturating_add(params.gap_width);
    let mut output = Vec::with_capacity(active.len());
    let mut rest = active;
    let mut x = 0usize;
    while x < line_len {
        let window_end = x.saturating_add(params.section_length).min(line_len);
        let gap_end = x.saturating_add(stride);

        let split = rest
            .iter()
            .position(|sample| sample.offset >= window_end)
            .unwrap_or(rest.len());
        let start = output.len();
        output.extend_from_slice(&rest[..split]);
        sort_section(&mut output[start..], params);
        rest = &rest[split..];

        let split = rest
            .iter()
            .position(|sample| sample.offset >= gap_end)
            .unwrap_or(rest.len());
        output.extend_from_slice(&rest[..split]);
        rest = &rest[split..];

        x = x.saturating_add(stride);
    }
    output
}
