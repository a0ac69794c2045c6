/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image statistics used by the exposure and normalization operators
//!
//! Accumulation is done in `f64`, HDR luminance spans enough orders of
//! magnitude that summing logarithms in `f32` loses precision on large images.
use hdrkit_image::image::Image;

/// Axis an image is reduced along
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Axis {
    /// Reduce every column, producing `width * components` values
    Height,
    /// Reduce every row, producing `height * components` values
    Width,
    /// Reduce every pixel, producing `width * height` values
    Channel
}

#[inline]
fn log_sample(value: f32, eps: Option<f32>) -> f64 {
    match eps {
        Some(eps) if value.is_nan() || value <= 0.0 => f64::from(eps).ln(),
        _ => f64::from(value).ln()
    }
}

/// Compute the geometric mean of all values, `exp(mean(ln(a)))`
///
/// When `eps` is given, values that are zero, negative or NaN are
/// replaced by it before taking the logarithm. Without it such values
/// propagate, a zero gives a mean of zero and a negative value NaN.
///
/// An empty slice returns NaN.
///
/// # Example
/// ```
/// use hdrkit_tonemap::stats::geometric_mean;
/// assert!((geometric_mean(&[1.0, 4.0], Some(1e-6)) - 2.0).abs() < 1e-12);
/// ```
pub fn geometric_mean(data: &[f32], eps: Option<f32>) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = data.iter().map(|x| log_sample(*x, eps)).sum();

    (sum / data.len() as f64).exp()
}

/// Compute geometric means along one axis of the image
///
/// The output is row major in the remaining axes, i.e for [`Axis::Height`]
/// value `x * components + c` is the mean of channel `c` in column `x`.
pub fn geometric_mean_axis(image: &Image, axis: Axis, eps: Option<f32>) -> Vec<f64> {
    let (width, height) = image.dimensions();
    let components = image.num_components();
    let data = image.data();

    match axis {
        Axis::Channel => data
            .chunks_exact(components)
            .map(|pixel| geometric_mean(pixel, eps))
            .collect(),
        Axis::Width => {
            let mut sums = vec![0.0_f64; height * components];

            for (row, sum) in data
                .chunks_exact(width * components)
                .zip(sums.chunks_exact_mut(components))
            {
                for pixel in row.chunks_exact(components) {
                    for (s, value) in sum.iter_mut().zip(pixel) {
                        *s += log_sample(*value, eps);
                    }
                }
            }
            sums.iter().map(|s| (s / width as f64).exp()).collect()
        }
        Axis::Height => {
            let mut sums = vec![0.0_f64; width * components];

            for row in data.chunks_exact(width * components) {
                for (s, value) in sums.iter_mut().zip(row) {
                    *s += log_sample(*value, eps);
                }
            }
            sums.iter().map(|s| (s / height as f64).exp()).collect()
        }
    }
}

/// Return the smallest and largest value, NaN samples are skipped
///
/// Returns `None` if every sample is NaN
pub fn min_max(data: &[f32]) -> Option<(f32, f32)> {
    data.iter()
        .filter(|x| !x.is_nan())
        .fold(None, |acc, &x| match acc {
            None => Some((x, x)),
            Some((min, max)) => Some((min.min(x), max.max(x)))
        })
}

/// Shift and scale samples so that `min` maps to 0 and `max` to 1
///
/// `min` and `max` default to the extremes of the data. Values outside
/// the given range map outside `[0,1]`, and a range of zero width
/// produces non finite values.
pub fn min_max_normalization(image: &Image, min: Option<f32>, max: Option<f32>) -> Image {
    let extremes = min_max(image.data()).unwrap_or((0.0, 1.0));

    let min = min.unwrap_or(extremes.0);
    let max = max.unwrap_or(extremes.1);
    let range = max - min;

    image.map(|x| (x - min) / range)
}

#[cfg(test)]
mod tests {
    use hdrkit_core::colorspace::ColorSpace;
    use hdrkit_image::image::Image;
    use nanorand::Rng;

    use crate::stats::{geometric_mean, geometric_mean_axis, min_max_normalization, Axis};

    #[test]
    fn known_means() {
        assert!((geometric_mean(&[1.0, 4.0], Some(1e-6)) - 2.0).abs() < 1e-12);

        let seven = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        assert!((geometric_mean(&seven, Some(1e-6)) - 3.3800151591412964).abs() < 1e-9);
    }

    #[test]
    fn non_positive_values_use_eps() {
        let mean = geometric_mean(&[0.0, -1.0, f32::NAN, 1.0], Some(1.0));
        assert!((mean - 1.0).abs() < 1e-12);

        assert_eq!(geometric_mean(&[0.0, 4.0], None), 0.0);
        assert!(geometric_mean(&[], Some(1e-6)).is_nan());
    }

    #[test]
    fn scale_equivariance() {
        let mut rand = nanorand::WyRand::new_seed(42);
        let data: Vec<f32> = (0..1000)
            .map(|_| rand.generate_range(1_u32..10_000) as f32 / 100.0)
            .collect();
        let scaled: Vec<f32> = data.iter().map(|x| x * 3.0).collect();

        let a = geometric_mean(&data, Some(1e-6));
        let b = geometric_mean(&scaled, Some(1e-6));

        assert!((b / a - 3.0).abs() < 1e-5);
    }

    #[test]
    fn axis_reductions() {
        // 2x2 RGB, every pixel (1,4,16) except one (4,4,4)
        let data = vec![1.0, 4.0, 16.0, 4.0, 4.0, 4.0, 1.0, 4.0, 16.0, 1.0, 4.0, 16.0];
        let image = Image::new(data, 2, 2, ColorSpace::RGB).unwrap();

        let per_pixel = geometric_mean_axis(&image, Axis::Channel, None);
        assert_eq!(per_pixel.len(), 4);
        assert!(per_pixel.iter().all(|x| (x - 4.0).abs() < 1e-9));

        let per_row = geometric_mean_axis(&image, Axis::Width, None);
        assert_eq!(per_row.len(), 6);
        assert!((per_row[0] - 2.0).abs() < 1e-9);
        assert!((per_row[2] - 8.0).abs() < 1e-9);
        assert!((per_row[3] - 1.0).abs() < 1e-9);

        let per_column = geometric_mean_axis(&image, Axis::Height, None);
        assert_eq!(per_column.len(), 6);
        assert!((per_column[0] - 1.0).abs() < 1e-9);
        assert!((per_column[3] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn normalization_range() {
        let image = Image::new(vec![-2.0, 0.0, 2.0, 6.0], 4, 1, ColorSpace::Luma).unwrap();

        let normalized = min_max_normalization(&image, None, None);
        assert_eq!(normalized.data(), &[0.0, 0.25, 0.5, 1.0]);

        let fixed = min_max_normalization(&image, Some(0.0), Some(4.0));
        assert_eq!(fixed.data(), &[-0.5, 0.0, 0.5, 1.5]);
    }
}
