/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Tone mapping for HDR images
//!
//! This crate maps unbounded linear HDR images into a displayable range
//! and back.
//!
//! - [`stats`]: geometric means and min-max normalization
//! - [`luminance`]: luminance maps from RGB primaries, luminance replacement
//! - [`exposure`]: exposure compensation
//! - [`curves`]: Reinhard, Eilertsen and Kinoshita tone curves
//! - [`operators`]: composable operators and the Reinhard and Eilertsen presets
//! - [`kinoshita`]: Kinoshita's inverse tone mapping
//!
//! All functions take their inputs by reference and return new images.
#![forbid(unsafe_code)]

pub mod curves;
pub mod exposure;
pub mod kinoshita;
pub mod luminance;
pub mod operators;
pub mod stats;
pub mod traits;
