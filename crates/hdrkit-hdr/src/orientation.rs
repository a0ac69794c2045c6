/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Pixel reordering for files not stored in the `-Y +X` order
//!
//! All routines work on interleaved pixels of `components` samples each.

/// Transpose a `rows x cols` image into a `cols x rows` image
///
/// ```text
///
///old image     new image
/// ┌───────┐    ┌─────┐
/// │a b c  │    │a d  │
/// │d e f  │    │b e  │
/// └───────┘    │c f  │
///              └─────┘
/// ```
pub fn transpose(
    in_matrix: &[f32], out_matrix: &mut [f32], rows: usize, cols: usize, components: usize
) {
    assert_eq!(in_matrix.len(), rows * cols * components);
    assert_eq!(out_matrix.len(), rows * cols * components);

    for (row, in_row) in in_matrix.chunks_exact(cols * components).enumerate() {
        for (col, pixel) in in_row.chunks_exact(components).enumerate() {
            let start = (col * rows + row) * components;
            out_matrix[start..start + components].copy_from_slice(pixel);
        }
    }
}

/// Reverse the order of rows
///
/// ```text
///
///old image     new image
/// ┌─────────┐   ┌──────────┐
/// │a b c d e│   │f g h i j │
/// │f g h i j│   │a b c d e │
/// └─────────┘   └──────────┘
/// ```
pub fn vertical_flip(channel: &mut [f32], width: usize, components: usize) {
    let stride = width * components;
    let rows = channel.len() / stride;

    for row in 0..rows / 2 {
        let (top, bottom) = channel.split_at_mut((rows - row - 1) * stride);
        top[row * stride..(row + 1) * stride].swap_with_slice(&mut bottom[..stride]);
    }
}

/// Reverse the order of pixels within each row
///
/// ```text
///old image     new image
///┌─────────┐   ┌──────────┐
///│a b c d e│   │e d c b a │
///│f g h i j│   │j i h g f │
///└─────────┘   └──────────┘
///```
pub fn flop(channel: &mut [f32], width: usize, components: usize) {
    for row in channel.chunks_exact_mut(width * components) {
        for x in 0..width / 2 {
            let mirror = width - x - 1;
            let (left, right) = row.split_at_mut(mirror * components);
            left[x * components..(x + 1) * components].swap_with_slice(&mut right[..components]);
        }
    }
}
