/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Luminance extraction and replacement
//!
//! Luminance of an RGB image is the `Y` component of its CIE XYZ
//! representation, a weighted sum of the three channels. The weights are
//! derived from the chromaticities of the RGB primaries and the white point.
use glam::{DMat3, DVec3};
use hdrkit_core::colorspace::ColorSpace;
use hdrkit_image::errors::ImageErrors;
use hdrkit_image::image::Image;

/// RGB color space primaries definition.
///
/// Red, green, blue and white are given as CIE xy chromaticities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    pub r: (f64, f64),
    pub g: (f64, f64),
    pub b: (f64, f64),
    pub w: (f64, f64)
}

/// D65 white point chromaticity
pub const D65_XY: (f64, f64) = (0.3127, 0.3290);

/// sRGB / Rec.709 primaries with a D65 white point
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY
};

/// Rec.2020 primaries with a D65 white point
pub const REC2020: Primaries = Primaries {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY
};

fn xy_to_xyz(x: f64, y: f64) -> DVec3 {
    if y.abs() < 1e-10 {
        DVec3::ZERO
    } else {
        DVec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Compute the matrix converting linear RGB to XYZ for a set of primaries
///
/// White `(1,1,1)` maps to the white point with `Y == 1`.
/// Degenerate primaries return the identity matrix.
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> DMat3 {
    let r = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b = xy_to_xyz(primaries.b.0, primaries.b.1);
    let w = xy_to_xyz(primaries.w.0, primaries.w.1);

    let m = DMat3::from_cols(r, g, b);

    if m.determinant().abs() < 1e-12 {
        return DMat3::IDENTITY;
    }
    // scale each primary so that they sum up to the white point
    let s = m.inverse() * w;

    DMat3::from_cols(r * s.x, g * s.y, b * s.z)
}

/// Weights giving luminance from linear RGB, the `Y` row of [`rgb_to_xyz_matrix`]
pub fn luminance_weights(primaries: &Primaries) -> [f32; 3] {
    let y = rgb_to_xyz_matrix(primaries).row(1);

    [y.x as f32, y.y as f32, y.z as f32]
}

/// Compute the luminance map of an RGB image with the given primaries
///
/// # Errors
/// [`ImageErrors::UnsupportedColorspace`] if the image is not RGB
pub fn rgb_luminance(image: &Image, primaries: &Primaries) -> Result<Image, ImageErrors> {
    if image.colorspace() != ColorSpace::RGB {
        return Err(ImageErrors::UnsupportedColorspace(
            image.colorspace(),
            "rgb luminance",
            &[ColorSpace::RGB]
        ));
    }
    let [wr, wg, wb] = luminance_weights(primaries);

    let luminance = image
        .data()
        .chunks_exact(3)
        .map(|p| wr * p[0] + wg * p[1] + wb * p[2])
        .collect();

    let (width, height) = image.dimensions();
    Image::new(luminance, width, height, ColorSpace::Luma)
}

/// Compute the luminance map of an image
///
/// - RGB images are assumed to use sRGB primaries
/// - XYZ images return their `Y` plane
/// - Luminance maps are returned as is
pub fn get_luminance(image: &Image) -> Result<Image, ImageErrors> {
    match image.colorspace() {
        ColorSpace::RGB => rgb_luminance(image, &SRGB),
        ColorSpace::XYZ => image.channel(1),
        ColorSpace::Luma => Ok(image.clone()),
        other => Err(ImageErrors::UnsupportedColorspace(
            other,
            "luminance",
            &[ColorSpace::RGB, ColorSpace::XYZ, ColorSpace::Luma]
        ))
    }
}

/// Scale every pixel so that its luminance becomes `luminance`
///
/// New luminance is clamped to `[0, f32::MAX]`, each pixel is multiplied by
/// `new / original`. Pixels whose original luminance is zero become zero.
///
/// `original` is computed with [`get_luminance`] when not given.
///
/// # Errors
/// - [`ImageErrors::UnsupportedColorspace`] if `luminance` or `original` is not a luminance map
/// - [`ImageErrors::InvalidDimensions`] if the maps and the image differ in size
pub fn replace_luminance(
    image: &Image, luminance: &Image, original: Option<&Image>
) -> Result<Image, ImageErrors> {
    let computed;
    let original = match original {
        Some(original) => original,
        None => {
            computed = get_luminance(image)?;
            &computed
        }
    };
    for map in [luminance, original] {
        if map.colorspace() != ColorSpace::Luma {
            return Err(ImageErrors::UnsupportedColorspace(
                map.colorspace(),
                "replace luminance",
                &[ColorSpace::Luma]
            ));
        }
        if map.dimensions() != image.dimensions() {
            return Err(ImageErrors::InvalidDimensions(format!(
                "Luminance map of {:?} does not match image of {:?}",
                map.dimensions(),
                image.dimensions()
            )));
        }
    }
    let components = image.num_components();
    let mut output = image.data().to_vec();

    for ((pixel, new), old) in output
        .chunks_exact_mut(components)
        .zip(luminance.data())
        .zip(original.data())
    {
        let new = new.clamp(0.0, f32::MAX);
        let ratio = if *old == 0.0 { 0.0 } else { new / old };

        pixel.iter_mut().for_each(|x| *x *= ratio);
    }
    image.with_data(output)
}
