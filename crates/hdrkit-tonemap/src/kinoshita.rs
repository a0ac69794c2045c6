/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Kinoshita's inverse tone mapping operator
//!
//! Re-linearizes a display referred image with the inverse Reinhard curve
//! and scales the result so that it has the geometric mean the HDR image
//! is expected to have.
//!
//! The relation between the scale `alpha` used when tone mapping and the
//! geometric mean of the HDR luminance can be estimated from the ratio of
//! black pixels, so either one may be left unknown.
use hdrkit_core::colorspace::ColorSpace;
use hdrkit_core::log::{trace, warn};
use hdrkit_image::errors::ImageErrors;
use hdrkit_image::image::Image;

use crate::curves::kinoshita_curve;
use crate::exposure::{multiply_scalar, Substitutions, DEFAULT_EPS, MIDDLE_GREY};
use crate::luminance::{get_luminance, replace_luminance};
use crate::stats::geometric_mean;
use crate::traits::{ToneOperation, ALL_COLORSPACES};

/// Kinoshita's inverse tone mapping operator
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KinoshitaItmo {
    /// Scale used when the image was tone mapped, estimated when `None`
    pub alpha:     Option<f32>,
    /// Geometric mean of the original HDR luminance, estimated when `None`
    pub hdr_gmean: Option<f32>,
    pub eps:       f32
}

impl Default for KinoshitaItmo {
    fn default() -> Self {
        KinoshitaItmo {
            alpha:     Some(MIDDLE_GREY as f32),
            hdr_gmean: None,
            eps:       DEFAULT_EPS
        }
    }
}

fn count_black(luminance: &[f32]) -> usize {
    luminance.iter().filter(|x| **x == 0.0).count()
}

impl KinoshitaItmo {
    pub fn new(alpha: Option<f32>, hdr_gmean: Option<f32>, eps: f32) -> KinoshitaItmo {
        KinoshitaItmo {
            alpha,
            hdr_gmean,
            eps
        }
    }

    /// Resolve `(alpha, hdr_gmean)`, estimating whichever is unknown
    ///
    /// With both unknown the operator only re-linearizes, `(1, 1)`.
    pub fn parameters(&self, luminance: &[f32]) -> (f64, f64) {
        match (self.alpha, self.hdr_gmean) {
            (None, None) => (1.0, 1.0),
            (None, Some(gmean)) => {
                let gmean = f64::from(gmean);
                (estimate_alpha(luminance, gmean), gmean)
            }
            (Some(alpha), None) => {
                let alpha = f64::from(alpha);
                (alpha, estimate_hdr_gmean(luminance, alpha))
            }
            (Some(alpha), Some(gmean)) => (f64::from(alpha), f64::from(gmean))
        }
    }
}

/// Estimate `alpha` from display luminance and the HDR geometric mean
///
/// Without black pixels, or when every pixel is black, `hdr_gmean` is
/// returned unchanged. With `N` pixels
/// of which `B` are black,
/// `ln(alpha) = N/(N-B) * ln(gmean(luminance)) - B/(N-B) * ln(hdr_gmean)`.
pub fn estimate_alpha(luminance: &[f32], hdr_gmean: f64) -> f64 {
    let black = count_black(luminance);
    let total = luminance.len();

    if black == 0 {
        return hdr_gmean;
    }
    if black == total {
        warn!("All {} pixels are black, using the HDR geometric mean as alpha", total);
        return hdr_gmean;
    }
    let ldr_gmean = geometric_mean(luminance, Some(DEFAULT_EPS));
    let lit = (total - black) as f64;

    let log_alpha =
        (total as f64 / lit) * ldr_gmean.ln() - (black as f64 / lit) * hdr_gmean.ln();

    log_alpha.exp()
}

/// Estimate the HDR geometric mean from display luminance and `alpha`
///
/// Without black pixels this is the geometric mean of `luminance`. With `N`
/// pixels of which `B` are black,
/// `ln(hdr_gmean) = N/B * ln(gmean(luminance)) - (N-B)/B * ln(alpha)`.
pub fn estimate_hdr_gmean(luminance: &[f32], alpha: f64) -> f64 {
    let black = count_black(luminance);
    let gmean = geometric_mean(luminance, Some(DEFAULT_EPS));

    if black == 0 {
        return gmean;
    }
    let total = luminance.len() as f64;
    let black = black as f64;

    let log_gmean = (total / black) * gmean.ln() - ((total - black) / black) * alpha.ln();

    log_gmean.exp()
}

impl ToneOperation for KinoshitaItmo {
    fn name(&self) -> &'static str {
        "kinoshita itmo"
    }

    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        ALL_COLORSPACES
    }

    fn apply_impl(&self, image: &Image) -> Result<Image, ImageErrors> {
        let display = get_luminance(image)?;
        let linear = kinoshita_curve(&display, self.eps);

        let (alpha, hdr_gmean) = self.parameters(display.data());
        let factor = (hdr_gmean / alpha) as f32;

        trace!("Kinoshita alpha {}, hdr geometric mean {}", alpha, hdr_gmean);

        let scaled = multiply_scalar(&linear, factor, Substitutions::default());

        replace_luminance(image, &scaled, Some(&display))
    }
}
