use image::{Rgba, RgbaImage};
use log::debug;

use crate::config::{Orientation, SortConfig, SortMode};
use crate::interval;
use crate::section::{self, SectionParams};
use crate::smoothing;
use crate::sorting;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelSample {
    pub rgba: [u8; 4],
    /// Position along the scan line the pixel was read from.
    pub offset: usize,
    pub key: f64,
}

impl PixelSample {
    pub fn new(rgba: [u8; 4], offset: usize, key: f64) -> Self {
        PixelSample { rgba, offset, key }
    }
}

pub fn line_len(image: &RgbaImage, orientation: Orientation) -> usize {
    match orientation {
        Orientation::Horizontal => image.width() as usize,
        Orientation::Vertical => image.height() as usize,
    }
}

pub fn line_count(image: &RgbaImage, orientation: Orientation) -> usize {
    match orientation {
        Orientation::Horizontal => image.height() as usize,
        Orientation::Vertical => image.width() as usize,
    }
}

#[inline]
fn coords(orientation: Orientation, line: usize, pos: usize) -> (u32, u32) {
    match orientation {
        Orientation::Horizontal => (pos as u32, line as u32),
        Orientation::Vertical => (line as u32, pos as u32),
    }
}

pub fn read_line(
    image: &RgbaImage,
    orientation: Orientation,
    index: usize,
    mode: SortMode,
) -> Vec<PixelSample> {
    (0..line_len(image, orientation))
        .map(|pos| {
            let (x, y) = coords(orientation, index, pos);
            let pixel = image.get_pixel(x, y);
            PixelSample::new(pixel.0, pos, sorting::sort_key(mode, pixel))
        })
        .collect()
}

/// Writes `samples` to scan line `index` in order. A short sequence leaves the
/// trailing pixels as they were.
pub fn write_line(
    image: &mut RgbaImage,
    orientation: Orientation,
    index: usize,
    samples: &[PixelSample],
) -> usize {
    let len = line_len(image, orientation);
    if samples.len() != len {
        debug!(
            "line {} got {} samples for {} pixels, trailing pixels kept",
            index,
            samples.len(),
            len
        );
    }
    let written = samples.len().min(len);
    for (pos, sample) in samples.iter().take(written).enumerate() {
        let (x, y) = coords(orientation, index, pos);
        image.put_pixel(x, y, Rgba(sample.rgba));
    }
    written
}

/// Sorts scan line `index` of `source` into `dest`.
pub fn sort_line(
    source: &RgbaImage,
    dest: &mut RgbaImage,
    index: usize,
    config: &SortConfig,
) -> usize {
    let mut samples = read_line(source, config.orientation, index, config.mode);
    smoothing::smooth_line(&mut samples, config.noise_threshold);
    let len = samples.len();
    let interval::Partition {
        active,
        mut inactive,
    } = interval::partition(samples, config.mode, config.strength);
    let sorted = section::sort_sections(&active, len, &SectionParams::from(config));
    inactive.extend(sorted);
    write_line(dest, config.orientation, index, &inactive)
}
