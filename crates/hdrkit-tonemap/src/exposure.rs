/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Exposure compensation based on the geometric mean
//!
//! An exposure value (EV) of zero means the geometric mean of the
//! luminance is `0.18`, every step doubles or halves it.
use hdrkit_core::log::trace;
use hdrkit_image::image::Image;

use crate::stats::geometric_mean;

/// Geometric mean of an image exposed at 0 EV
pub const MIDDLE_GREY: f64 = 0.18;

/// Default value substituted for zero and negative samples
/// before taking logarithms
pub const DEFAULT_EPS: f32 = 1e-6;

/// Values written over degenerate samples after scaling
///
/// Each field is applied in order, `None` disables it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Substitutions {
    /// Replaces NaN
    pub nan:          Option<f32>,
    /// Replaces positive and negative infinity
    pub inf:          Option<f32>,
    /// Replaces values less than or equal to zero
    pub non_positive: Option<f32>
}

impl Default for Substitutions {
    fn default() -> Self {
        Substitutions {
            nan:          Some(0.0),
            inf:          Some(f32::MAX),
            non_positive: Some(0.0)
        }
    }
}

impl Substitutions {
    /// Substitutions that leave every value untouched
    pub const fn none() -> Substitutions {
        Substitutions {
            nan:          None,
            inf:          None,
            non_positive: None
        }
    }

    #[inline]
    pub(crate) fn apply(&self, mut value: f32) -> f32 {
        if let Some(nan) = self.nan {
            if value.is_nan() {
                value = nan;
            }
        }
        if let Some(inf) = self.inf {
            if value.is_infinite() {
                value = inf;
            }
        }
        if let Some(non_positive) = self.non_positive {
            if value <= 0.0 {
                value = non_positive;
            }
        }
        value
    }
}

/// Multiply every sample by `factor` and clean up the result
pub fn multiply_scalar(image: &Image, factor: f32, substitutions: Substitutions) -> Image {
    image.map(|x| substitutions.apply(x * factor))
}

/// Geometric mean of an image with a relative exposure of `ev`
///
/// ```
/// use hdrkit_tonemap::exposure::ev_to_gmean;
/// assert!((ev_to_gmean(2.0) - 0.72).abs() < 1e-12);
/// ```
pub fn ev_to_gmean(ev: f32) -> f64 {
    MIDDLE_GREY * 2f64.powf(f64::from(ev))
}

/// Relative exposure of an image whose geometric mean is `gmean`
///
/// ```
/// use hdrkit_tonemap::exposure::gmean_to_ev;
/// assert!((gmean_to_ev(0.09) + 1.0).abs() < 1e-12);
/// ```
pub fn gmean_to_ev(gmean: f64) -> f32 {
    (gmean / MIDDLE_GREY).log2() as f32
}

/// Scale samples so their geometric mean corresponds to `ev`
///
/// The factor is `0.18 * 2^ev / geometric_mean(image, eps)`, the result
/// is cleaned with the default [`Substitutions`].
pub fn exposure_scale(image: &Image, ev: f32, eps: Option<f32>) -> Image {
    let gmean = geometric_mean(image.data(), eps);
    let factor = (ev_to_gmean(ev) / gmean) as f32;

    trace!("Exposure {} EV, geometric mean {}, factor {}", ev, gmean, factor);

    multiply_scalar(image, factor, Substitutions::default())
}
