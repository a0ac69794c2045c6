/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Tone mapping operators
//!
//! Operators are values of the closed [`ToneOperator`] type, composite
//! operators hold other operators so full tone mapping pipelines are
//! described as trees.
//!
//! # Example
//! - Reinhard's operator followed by a normalization
//!
//! ```
//! use hdrkit_core::colorspace::ColorSpace;
//! use hdrkit_image::image::Image;
//! use hdrkit_tonemap::operators::{reinhard_tmo, RangeMode, ToneOperator};
//! use hdrkit_tonemap::traits::ToneOperation;
//!
//! let hdr = Image::fill(1000.0, 4, 4, ColorSpace::RGB).unwrap();
//! let tmo = ToneOperator::Compose(vec![
//!     reinhard_tmo(0.0, f32::INFINITY),
//!     ToneOperator::NormalizeRange(RangeMode::Color),
//! ]);
//! let ldr = tmo.apply(&hdr).unwrap();
//! assert!(ldr.data().iter().all(|x| *x <= 1.0));
//! ```
use core::str::FromStr;

use hdrkit_core::colorspace::ColorSpace;
use hdrkit_core::log::trace;
use hdrkit_image::errors::ImageErrors;
use hdrkit_image::image::Image;

use crate::curves::{eilertsen_curve, kinoshita_curve, reinhard_curve};
use crate::exposure::{exposure_scale, Substitutions, DEFAULT_EPS};
use crate::kinoshita::KinoshitaItmo;
use crate::luminance::{get_luminance, replace_luminance};
use crate::stats::min_max;
use crate::traits::{ToneOperation, ALL_COLORSPACES, COLOR_COLORSPACES, LUMA_COLORSPACE};

/// Adjust the brightness of an image so that its luminance has
/// the geometric mean of a given exposure value
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ExposureCompensation {
    /// Target exposure, 0 EV is a geometric mean of 0.18
    pub ev:  f32,
    /// Substitute for non positive luminance when taking the mean
    pub eps: Option<f32>
}

impl Default for ExposureCompensation {
    fn default() -> Self {
        ExposureCompensation {
            ev:  0.0,
            eps: Some(DEFAULT_EPS)
        }
    }
}

impl ExposureCompensation {
    pub fn new(ev: f32) -> ExposureCompensation {
        ExposureCompensation {
            ev,
            ..Default::default()
        }
    }
}

impl ToneOperation for ExposureCompensation {
    fn name(&self) -> &'static str {
        "exposure compensation"
    }

    fn apply_impl(&self, image: &Image) -> Result<Image, ImageErrors> {
        if image.colorspace() == ColorSpace::Luma {
            return Ok(exposure_scale(image, self.ev, self.eps));
        }
        let luminance = get_luminance(image)?;
        let scaled = exposure_scale(&luminance, self.ev, self.eps);

        replace_luminance(image, &scaled, Some(&luminance))
    }
}

/// What [`ToneOperator::NormalizeRange`] brings into `[0,1]`
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum RangeMode {
    /// Divide by the largest luminance
    #[default]
    Luminance,
    /// Divide by the largest sample of any channel
    Color
}

impl FromStr for RangeMode {
    type Err = ImageErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("luminance") {
            Ok(RangeMode::Luminance)
        } else if s.eq_ignore_ascii_case("color") {
            Ok(RangeMode::Color)
        } else {
            Err(ImageErrors::GenericString(format!(
                "Unknown range mode {s:?}, expected luminance or color"
            )))
        }
    }
}

/// All tone mapping operators
#[derive(Clone, Debug, PartialEq)]
pub enum ToneOperator {
    /// Exposure compensation, through the luminance for colour images
    Exposure(ExposureCompensation),
    /// Reinhard's global curve on a luminance map
    ReinhardCurve { whitepoint: f32 },
    /// Eilertsen's curve on every sample
    EilertsenCurve { exponent: f32, sigma: f32 },
    /// Inverse Reinhard curve on a luminance map
    KinoshitaCurve { eps: f32 },
    /// Operators run in order, each consuming the previous result
    Compose(Vec<ToneOperator>),
    /// Run the operator on the luminance of a colour image and
    /// scale the image to the resulting luminance
    ReplaceLuminance(Box<ToneOperator>),
    /// Divide by the largest luminance or sample
    NormalizeRange(RangeMode),
    /// Kinoshita's inverse tone mapping operator
    KinoshitaItmo(KinoshitaItmo)
}

impl ToneOperator {
    pub fn exposure(ev: f32) -> ToneOperator {
        ToneOperator::Exposure(ExposureCompensation::new(ev))
    }

    pub fn reinhard_curve(whitepoint: f32) -> ToneOperator {
        ToneOperator::ReinhardCurve { whitepoint }
    }

    pub fn eilertsen_curve(exponent: f32, sigma: f32) -> ToneOperator {
        ToneOperator::EilertsenCurve { exponent, sigma }
    }

    pub fn replace_luminance(operator: ToneOperator) -> ToneOperator {
        ToneOperator::ReplaceLuminance(Box::new(operator))
    }

    fn normalize_range(image: &Image, mode: RangeMode) -> Result<Image, ImageErrors> {
        let max = match mode {
            RangeMode::Luminance => min_max(get_luminance(image)?.data()),
            RangeMode::Color => min_max(image.data())
        }
        .map_or(f32::NAN, |(_, max)| max);

        trace!("Normalizing {:?} range by {}", mode, max);

        let substitutions = Substitutions::default();

        Ok(image.map(|x| substitutions.apply(x / max)))
    }
}

impl ToneOperation for ToneOperator {
    fn name(&self) -> &'static str {
        match self {
            ToneOperator::Exposure(_) => "exposure compensation",
            ToneOperator::ReinhardCurve { .. } => "reinhard curve",
            ToneOperator::EilertsenCurve { .. } => "eilertsen curve",
            ToneOperator::KinoshitaCurve { .. } => "kinoshita curve",
            ToneOperator::Compose(_) => "compose",
            ToneOperator::ReplaceLuminance(_) => "replace luminance",
            ToneOperator::NormalizeRange(_) => "normalize range",
            ToneOperator::KinoshitaItmo(_) => "kinoshita itmo"
        }
    }

    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        match self {
            ToneOperator::ReinhardCurve { .. } | ToneOperator::KinoshitaCurve { .. } => {
                LUMA_COLORSPACE
            }
            ToneOperator::ReplaceLuminance(_) => COLOR_COLORSPACES,
            ToneOperator::Exposure(op) => op.supported_colorspaces(),
            ToneOperator::KinoshitaItmo(op) => op.supported_colorspaces(),
            _ => ALL_COLORSPACES
        }
    }

    fn apply_impl(&self, image: &Image) -> Result<Image, ImageErrors> {
        match self {
            ToneOperator::Exposure(exposure) => exposure.apply_impl(image),
            ToneOperator::ReinhardCurve { whitepoint } => {
                // global mode, every pixel is its own average
                reinhard_curve(image, image, *whitepoint)
            }
            ToneOperator::EilertsenCurve { exponent, sigma } => {
                Ok(eilertsen_curve(image, *exponent, *sigma))
            }
            ToneOperator::KinoshitaCurve { eps } => Ok(kinoshita_curve(image, *eps)),
            ToneOperator::Compose(operators) => {
                let mut current = image.clone();

                for operator in operators {
                    trace!("Running {}", operator.name());
                    current = operator.apply(&current)?;
                }
                Ok(current)
            }
            ToneOperator::ReplaceLuminance(operator) => {
                let luminance = get_luminance(image)?;
                let mapped = operator.apply(&luminance)?;

                replace_luminance(image, &mapped, Some(&luminance))
            }
            ToneOperator::NormalizeRange(mode) => ToneOperator::normalize_range(image, *mode),
            ToneOperator::KinoshitaItmo(itmo) => itmo.apply_impl(image)
        }
    }
}

/// Reinhard's global tone mapping operator
///
/// Exposure compensation followed by the Reinhard curve,
/// both on luminance which then replaces the image luminance.
pub fn reinhard_tmo(ev: f32, whitepoint: f32) -> ToneOperator {
    ToneOperator::replace_luminance(ToneOperator::Compose(vec![
        ToneOperator::exposure(ev),
        ToneOperator::reinhard_curve(whitepoint),
    ]))
}

/// Eilertsen's tone mapping operator
///
/// Exposure compensation through the luminance, then the
/// Eilertsen curve on every channel.
pub fn eilertsen_tmo(ev: f32, exponent: f32, sigma: f32) -> ToneOperator {
    ToneOperator::Compose(vec![
        ToneOperator::exposure(ev),
        ToneOperator::eilertsen_curve(exponent, sigma),
    ])
}
