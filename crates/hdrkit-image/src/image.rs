/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module represents a single image
//!
//! An image is represented as
//!
//! - a dense buffer of `f32` samples
//!     - stored row major, channel minor (`H x W x C`)
//!         - representing a colorspace
//!             - with a fixed width and height
//!
//! Samples are linear radiance values and are not clamped, they may be
//! negative, NaN or infinite if the source file stored such values.
use hdrkit_core::colorspace::ColorSpace;

use crate::errors::ImageErrors;

/// Represents a single HDR image
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace,
    data:       Vec<f32>
}

impl Image {
    /// Create a new image from interleaved samples
    ///
    /// # Errors
    /// - [`ImageErrors::InvalidDimensions`] if width or height is zero
    /// - [`ImageErrors::DimensionsMisMatch`] if `data.len()` is not
    ///   `width * height * colorspace.num_components()`
    pub fn new(
        data: Vec<f32>, width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, ImageErrors> {
        if width == 0 || height == 0 {
            return Err(ImageErrors::InvalidDimensions(format!(
                "Image dimensions {width}x{height} contain a zero"
            )));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(colorspace.num_components()))
            .ok_or(ImageErrors::GenericStr("Image dimensions overflow"))?;

        if expected != data.len() {
            return Err(ImageErrors::DimensionsMisMatch(expected, data.len()));
        }
        Ok(Image {
            width,
            height,
            colorspace,
            data
        })
    }

    /// Create an image by copying samples from a slice
    pub fn from_f32(
        data: &[f32], width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, ImageErrors> {
        Image::new(data.to_vec(), width, height, colorspace)
    }

    /// Create an image where every sample is `value`
    pub fn fill(
        value: f32, width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, ImageErrors> {
        let size = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(colorspace.num_components()))
            .ok_or(ImageErrors::GenericStr("Image dimensions overflow"))?;

        Image::new(vec![value; size], width, height, colorspace)
    }

    /// Get image dimensions as a tuple of (width,height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Get the image colorspace
    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Number of samples making up one pixel
    pub const fn num_components(&self) -> usize {
        self.colorspace.num_components()
    }

    /// Return true if `other` has the same width, height and colorspace
    pub fn same_shape(&self, other: &Image) -> bool {
        self.dimensions() == other.dimensions() && self.colorspace == other.colorspace
    }

    /// Interleaved samples of the image
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Consume the image returning its samples
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Return the samples of the pixel at `(x,y)` or `None` if out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[f32]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let components = self.num_components();
        let start = (y * self.width + x) * components;

        self.data.get(start..start + components)
    }

    /// Create an image of the same dimensions and colorspace carrying new samples
    pub fn with_data(&self, data: Vec<f32>) -> Result<Image, ImageErrors> {
        Image::new(data, self.width, self.height, self.colorspace)
    }

    /// Apply `function` to every sample returning a new image of the same shape
    pub fn map<F: FnMut(f32) -> f32>(&self, function: F) -> Image {
        Image {
            width:      self.width,
            height:     self.height,
            colorspace: self.colorspace,
            data:       self.data.iter().copied().map(function).collect()
        }
    }

    /// Extract a single channel as a luminance image
    ///
    /// # Errors
    /// [`ImageErrors::GenericString`] if `index` is not a channel of this image
    pub fn channel(&self, index: usize) -> Result<Image, ImageErrors> {
        let components = self.num_components();

        if index >= components {
            return Err(ImageErrors::GenericString(format!(
                "Channel {index} does not exist in a {:?} image",
                self.colorspace
            )));
        }
        let plane = self
            .data
            .chunks_exact(components)
            .map(|pixel| pixel[index])
            .collect();

        Image::new(plane, self.width, self.height, ColorSpace::Luma)
    }

    /// Replace non finite samples in place
    ///
    /// `nan` replaces every NaN sample and `inf` every positive or negative
    /// infinity, `None` leaves those samples untouched.
    pub fn substitute_non_finite(&mut self, nan: Option<f32>, inf: Option<f32>) {
        if nan.is_none() && inf.is_none() {
            return;
        }
        for sample in self.data.iter_mut() {
            if sample.is_nan() {
                if let Some(value) = nan {
                    *sample = value;
                }
            } else if sample.is_infinite() {
                if let Some(value) = inf {
                    *sample = value;
                }
            }
        }
    }
}
