/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use std::path::{Path, PathBuf};

use nanorand::Rng;
use serde::Deserialize;
use xxhash_rust::xxh3::xxh3_128;

mod hdr;
#[cfg(feature = "exr")]
mod openexr;
mod pfm;
mod tonemap;

/// A tone curve expectation read from `tests/curves.json`
#[derive(Clone, Deserialize, Debug)]
pub struct CurveEntry {
    pub name:      String,
    pub curve:     String,
    #[serde(default)]
    pub params:    Vec<f32>,
    pub input:     Vec<f32>,
    pub expected:  Vec<f32>,
    pub tolerance: f32,
    pub comment:   Option<String>
}

/// Hash decoded samples, bit patterns included so NaN payloads and
/// signed zeros are told apart
pub fn hash(pixels: &[f32]) -> u128 {
    let bytes: Vec<u8> = pixels.iter().flat_map(|x| x.to_le_bytes()).collect();
    xxh3_128(&bytes)
}

/// Directory for files written during tests
pub fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("hdrkit-tests");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(format!("{}-{}", std::process::id(), name))
}

/// Random RGBE quads, exponents kept in a sane range with some
/// zero exponents mixed in
pub fn random_rgbe(seed: u64, count: usize) -> Vec<[u8; 4]> {
    let mut rand = nanorand::WyRand::new_seed(seed);
    (0..count)
        .map(|_| {
            let exponent = if rand.generate_range(0_u8..10) == 0 {
                0
            } else {
                rand.generate_range(120_u8..136)
            };
            [
                rand.generate_range(0_u8..=255),
                rand.generate_range(0_u8..=255),
                rand.generate_range(0_u8..=255),
                exponent
            ]
        })
        .collect()
}

/// Linear value of an RGBE quad
pub fn rgbe_to_f32(quad: [u8; 4]) -> [f32; 3] {
    if quad[3] == 0 {
        return [0.0; 3];
    }
    let scale = 2f32.powi(i32::from(quad[3]) - 128) / 256.0;
    [
        f32::from(quad[0]) * scale,
        f32::from(quad[1]) * scale,
        f32::from(quad[2]) * scale
    ]
}

/// Run length encode one plane of a scanline
///
/// Runs of three or more equal bytes become repeat runs, everything
/// else goes out as literal runs.
fn encode_plane(plane: &[u8], out: &mut Vec<u8>) {
    let mut i = 0;
    let mut literal_start = 0;

    let flush_literals = |start: usize, end: usize, out: &mut Vec<u8>| {
        for chunk in plane[start..end].chunks(128) {
            out.push(chunk.len() as u8);
            out.extend_from_slice(chunk);
        }
    };

    while i < plane.len() {
        let mut run = 1;
        while i + run < plane.len() && plane[i + run] == plane[i] && run < 127 {
            run += 1;
        }
        if run >= 3 {
            flush_literals(literal_start, i, out);
            out.push(128 + run as u8);
            out.push(plane[i]);
            i += run;
            literal_start = i;
        } else {
            i += run;
        }
    }
    flush_literals(literal_start, plane.len(), out);
}

/// Build a Radiance file from scanlines of RGBE quads
///
/// `rle` selects the new style run length encoded body over the flat one
pub fn radiance_file(resolution: &str, scanlines: &[Vec<[u8; 4]>], rle: bool) -> Vec<u8> {
    let mut out = b"#?RADIANCE\n# made by the hdrkit tests\nFORMAT=32-bit_rle_rgbe\nEXPOSURE=1.0\n\n"
        .to_vec();
    out.extend_from_slice(resolution.as_bytes());
    out.push(b'\n');

    for scanline in scanlines {
        if rle {
            let length = scanline.len();
            out.extend_from_slice(&[2, 2, (length >> 8) as u8, (length & 0xFF) as u8]);

            for plane in 0..4 {
                let bytes: Vec<u8> = scanline.iter().map(|q| q[plane]).collect();
                encode_plane(&bytes, &mut out);
            }
        } else {
            scanline.iter().for_each(|q| out.extend_from_slice(q));
        }
    }
    out
}
