use crate::line::PixelSample;

/// Averages every interior key with its two neighbours when both neighbours
/// are within `threshold` of it, flattening noise that would otherwise get
/// sorted. Comparisons use the keys as they were before this pass, so the
/// averaging does not cascade along the line.
pub fn smooth_keys(keys: &mut [f64], threshold: f64) {
    if threshold <= 0.0 || keys.len() < 3 {
        return;
    }
    let mut prev = keys[0];
    for i in 1..keys.len() - 1 {
        let cur = keys[i];
        let next = keys[i + 1];
        if (cur - prev).abs() < threshold && (cur - next).abs() < threshold {
            keys[i] = (prev + cur + next) / 3.0;
        }
        prev = cur;
    }
}

/// [`smooth_keys`] over the keys of a sampled scan line.
pub fn smooth_line(samples: &mut [PixelSample], threshold: f64) {
    if threshold <= 0.0 || samples.len() < 3 {
        return;
    }
    let mut keys: Vec<f64> = samples.iter().map(|sample| sample.key).collect();
    smooth_keys(&mut keys, threshold);
    for (sample, key) in samples.iter_mut().zip(keys) {
        sample.key = key;
    }
}
