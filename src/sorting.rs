use image::Pixel;

use crate::config::SortMode;

impl SortMode {
    /// The sort key of a pixel with the given channels under this mode.
    #[inline]
    pub fn key(self, r: u8, g: u8, b: u8) -> f64 {
        match self {
            SortMode::Brightness => brightness(r, g, b),
            SortMode::Hue => hue(r, g, b),
            SortMode::Saturation => saturation(r, g, b),
            SortMode::Color => color(r, g, b),
        }
    }
}

#[inline]
pub fn sort_key<P>(mode: SortMode, pixel: &P) -> f64
where
    P: Pixel<Subpixel = u8>,
{
    let rgb = pixel.to_rgb();
    mode.key(rgb[0], rgb[1], rgb[2])
}

/// Mean of the three colour channels, 0 to 255.
#[inline]
pub fn brightness(r: u8, g: u8, b: u8) -> f64 {
    (r as f64 + g as f64 + b as f64) / 3.0
}

/// HSL hue in degrees, `[0, 360)`. Grays have hue 0.
pub fn hue(r: u8, g: u8, b: u8) -> f64 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return 0.0;
    }
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let delta = max as f64 - min as f64;
    let sector = if r >= g && r >= b {
        (g - b) / delta
    } else if g >= b {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    let degrees = sector * 60.0;
    if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// HSL saturation scaled to `[0, 100]`.
pub fn saturation(r: u8, g: u8, b: u8) -> f64 {
    let max = r.max(g).max(b) as f64 / 255.0;
    let min = r.min(g).min(b) as f64 / 255.0;
    let delta = max - min;
    if delta == 0.0 {
        return 0.0;
    }
    let lightness = (max + min) / 2.0;
    let denom = 1.0 - (2.0 * lightness - 1.0).abs();
    (delta / denom * 100.0).min(100.0)
}

/// An ordering that groups pixels by their dominant channel, then by the
/// following channel, with the channel spread weighted on top.
///
/// This is an arbitrary heuristic rather than a colorimetric measure. Its
/// output is what the "color" look is built on, so keep it as is.
pub fn color(r: u8, g: u8, b: u8) -> f64 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return r as f64;
    }
    let delta = (max - min) as f64;
    let (rank, secondary) = if r == max {
        (0.0, g)
    } else if g == max {
        (1.0, b)
    } else {
        (2.0, r)
    };
    256.0 * rank + secondary as f64 + delta * 256.0 * 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_brightness_is_channel_mean() {
        assert_eq!(brightness(0, 0, 0), 0.0);
        assert_eq!(brightness(255, 255, 255), 255.0);
        assert_eq!(brightness(30, 60, 90), 60.0);
    }

    #[rstest]
    #[case::red(255, 0, 0, 0.0)]
    #[case::yellow(255, 255, 0, 60.0)]
    #[case::green(0, 255, 0, 120.0)]
    #[case::cyan(0, 255, 255, 180.0)]
    #[case::blue(0, 0, 255, 240.0)]
    #[case::magenta(255, 0, 255, 300.0)]
    #[case::gray(128, 128, 128, 0.0)]
    fn test_hue(#[case] r: u8, #[case] g: u8, #[case] b: u8, #[case] expected: f64) {
        assert!((hue(r, g, b) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_hue_stays_below_360() {
        // just below red, wrapping from negative
        let h = hue(255, 0, 1);
        assert!(h > 359.0 && h < 360.0, "{}", h);
    }

    #[rstest]
    #[case::pure_red(255, 0, 0, 100.0)]
    #[case::gray(100, 100, 100, 0.0)]
    #[case::white(255, 255, 255, 0.0)]
    #[case::half(191, 64, 64, 50.0)]
    fn test_saturation(#[case] r: u8, #[case] g: u8, #[case] b: u8, #[case] expected: f64) {
        assert!((saturation(r, g, b) - expected).abs() < 0.5, "{}", saturation(r, g, b));
    }

    #[test]
    fn test_color_grayscale_uses_red() {
        assert_eq!(color(42, 42, 42), 42.0);
    }

    #[rstest]
    #[case::red_dominant(200, 50, 10, 0.0 + 50.0 + 190.0 * 768.0)]
    #[case::green_dominant(10, 200, 50, 256.0 + 50.0 + 190.0 * 768.0)]
    #[case::blue_dominant(50, 10, 200, 512.0 + 50.0 + 190.0 * 768.0)]
    #[case::red_green_tie(100, 100, 0, 0.0 + 100.0 + 100.0 * 768.0)]
    fn test_color(#[case] r: u8, #[case] g: u8, #[case] b: u8, #[case] expected: f64) {
        assert_eq!(color(r, g, b), expected);
    }

    #[test]
    fn test_sort_key_ignores_alpha() {
        let opaque = image::Rgba([10, 20, 30, 255]);
        let clear = image::Rgba([10, 20, 30, 0]);
        assert_eq!(
            sort_key(SortMode::Brightness, &opaque),
            sort_key(SortMode::Brightness, &clear)
        );
        assert_eq!(sort_key(SortMode::Brightness, &opaque), 20.0);
    }
}
