/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Non-linear tone curves
//!
//! Curves map samples one by one and never clip their output to `[0,1]`,
//! chain a [`NormalizeRange`](crate::operators::RangeMode) or clamp
//! afterwards when a display range is needed.
use hdrkit_image::errors::ImageErrors;
use hdrkit_image::image::Image;

/// Tone curve of Reinhard's global operator
///
/// `(lum / (1 + lum_avg)) * (1 + lum / lum_white²)`
///
/// Negative inputs are clamped to zero, use `f32::INFINITY` as white point
/// for the plain `l / (1 + l)` curve. In global mode `lum_avg` is `lum` itself.
///
/// # Errors
/// [`ImageErrors::InvalidDimensions`] if `lum` and `lum_avg` differ in shape
pub fn reinhard_curve(lum: &Image, lum_avg: &Image, lum_white: f32) -> Result<Image, ImageErrors> {
    if !lum.same_shape(lum_avg) {
        return Err(ImageErrors::InvalidDimensions(format!(
            "Average luminance of {:?} does not match luminance of {:?}",
            lum_avg.dimensions(),
            lum.dimensions()
        )));
    }
    let white_squared = lum_white * lum_white;

    let mapped = lum
        .data()
        .iter()
        .zip(lum_avg.data())
        .map(|(l, avg)| {
            let l = l.clamp(0.0, f32::MAX);
            let avg = avg.clamp(0.0, f32::MAX);

            (l / (1.0 + avg)) * (1.0 + l / white_squared)
        })
        .collect();

    lum.with_data(mapped)
}

/// Tone curve of Eilertsen's operator, applied to every sample
///
/// `(1 + sigma) * p / (p + sigma)` where `p = x^exponent`,
/// negative inputs are clamped to zero.
pub fn eilertsen_curve(intensity: &Image, exponent: f32, sigma: f32) -> Image {
    intensity.map(|x| {
        let p = x.clamp(0.0, f32::MAX).powf(exponent);

        (1.0 + sigma) * (p / (p + sigma))
    })
}

/// Inverse of the Reinhard curve, `l / (1 - l)`
///
/// Re-linearizes display luminance in `[0,1]`. Values of one and above are
/// clamped to `1 - eps` so that they map to a large finite value.
pub fn kinoshita_curve(luminance: &Image, eps: f32) -> Image {
    let eps = f64::from(eps);

    luminance.map(|l| {
        let l = f64::from(l).min(1.0 - eps);

        (l / (1.0 - l)) as f32
    })
}
