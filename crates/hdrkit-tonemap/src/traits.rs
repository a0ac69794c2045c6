/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The interface shared by all tone mapping operators
use hdrkit_core::colorspace::ColorSpace;
use hdrkit_image::errors::ImageErrors;
use hdrkit_image::image::Image;

/// All colorspaces an image can carry
pub(crate) const ALL_COLORSPACES: &[ColorSpace] =
    &[ColorSpace::RGB, ColorSpace::XYZ, ColorSpace::Luma];

/// Colour images, i.e everything but luminance maps
pub(crate) const COLOR_COLORSPACES: &[ColorSpace] = &[ColorSpace::RGB, ColorSpace::XYZ];

/// Luminance maps only
pub(crate) const LUMA_COLORSPACE: &[ColorSpace] = &[ColorSpace::Luma];

/// An operation mapping an image to a new image of the same shape
///
/// Operations never modify their input.
pub trait ToneOperation {
    /// Get the name of the operation
    fn name(&self) -> &'static str;

    /// Run the operation, the colorspace has already been checked
    fn apply_impl(&self, image: &Image) -> Result<Image, ImageErrors>;

    /// Colorspaces this operation accepts
    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        ALL_COLORSPACES
    }

    /// Run the operation on an image
    ///
    /// # Errors
    /// - [`ImageErrors::UnsupportedColorspace`] if the operation does not
    ///   accept the image colorspace
    /// - Any error the operation itself returns
    fn apply(&self, image: &Image) -> Result<Image, ImageErrors> {
        let colorspace = image.colorspace();

        if !self.supported_colorspaces().contains(&colorspace) {
            return Err(ImageErrors::UnsupportedColorspace(
                colorspace,
                self.name(),
                self.supported_colorspaces()
            ));
        }
        self.apply_impl(image)
    }
}
