/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The resolution line following the header
//!
//! It names two axes with a sign and a length, e.g `-Y 512 +X 768`.
//! The first axis is the one scanlines advance along, the second
//! the one pixels within a scanline advance along.
use alloc::string::ToString;

use crate::errors::HdrDecodeErrors;

/// Image size and orientation as declared by the resolution line
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Resolution {
    width:   usize,
    height:  usize,
    flip_lr: bool,
    flip_ud: bool,
    rotated: bool
}

struct AxisToken {
    sign:     u8,
    length:   usize,
    position: usize
}

fn find_axis(line: &str, axis: char) -> Result<AxisToken, HdrDecodeErrors> {
    let invalid = || HdrDecodeErrors::InvalidResolution(line.trim_end().to_string());

    let mut tokens = line.split_ascii_whitespace().enumerate();

    while let Some((position, token)) = tokens.next() {
        let bytes = token.as_bytes();

        if bytes.len() == 2 && (bytes[0] == b'+' || bytes[0] == b'-') && bytes[1] == axis as u8 {
            let (_, number) = tokens.next().ok_or_else(invalid)?;

            if !number.bytes().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            let length = number.parse::<usize>().map_err(|_| invalid())?;

            if length == 0 {
                return Err(invalid());
            }
            return Ok(AxisToken {
                sign: bytes[0],
                length,
                position
            });
        }
    }
    Err(invalid())
}

impl Resolution {
    /// Parse a resolution line
    ///
    /// The `Y` and `X` tokens may appear in either order and anywhere in the line
    pub fn parse(line: &str) -> Result<Resolution, HdrDecodeErrors> {
        let y = find_axis(line, 'Y')?;
        let x = find_axis(line, 'X')?;

        Ok(Resolution {
            width:   x.length,
            height:  y.length,
            flip_lr: x.sign == b'-',
            flip_ud: y.sign == b'+',
            rotated: y.position > x.position
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether columns are stored right to left
    pub const fn flip_lr(&self) -> bool {
        self.flip_lr
    }

    /// Whether rows are stored bottom to top
    pub const fn flip_ud(&self) -> bool {
        self.flip_ud
    }

    /// Whether scanlines run along the Y axis instead of X
    pub const fn rotated(&self) -> bool {
        self.rotated
    }

    /// Number of scanlines stored in the file
    pub const fn scanline_count(&self) -> usize {
        if self.rotated {
            self.width
        } else {
            self.height
        }
    }

    /// Number of pixels in one stored scanline
    pub const fn scanline_length(&self) -> usize {
        if self.rotated {
            self.height
        } else {
            self.width
        }
    }

    /// Whether the pixels need to be reoriented after decoding
    pub const fn is_standard(&self) -> bool {
        !(self.rotated || self.flip_lr || self.flip_ud)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::HdrDecodeErrors;
    use crate::resolution::Resolution;

    #[test]
    fn standard_orientation() {
        let res = Resolution::parse("-Y 4 +X 8\n").unwrap();
        assert_eq!(res.width(), 8);
        assert_eq!(res.height(), 4);
        assert!(!res.flip_lr());
        assert!(!res.flip_ud());
        assert!(!res.rotated());
        assert!(res.is_standard());
        assert_eq!(res.scanline_count(), 4);
        assert_eq!(res.scanline_length(), 8);
    }

    #[test]
    fn flipped_and_rotated() {
        let res = Resolution::parse("-X 3 +Y 5").unwrap();
        assert_eq!(res.width(), 3);
        assert_eq!(res.height(), 5);
        assert!(res.flip_lr());
        assert!(res.flip_ud());
        assert!(res.rotated());
        assert_eq!(res.scanline_count(), 3);
        assert_eq!(res.scanline_length(), 5);
    }

    #[test]
    fn invalid_lines() {
        for line in [
            "-Y 4\n",
            "+X 8\n",
            "-Y 0 +X 8\n",
            "-Y 4 +X\n",
            "-Y four +X 8\n",
            "-Y 4 +X 8a\n",
            "Y 4 X 8\n",
            ""
        ] {
            assert!(
                matches!(
                    Resolution::parse(line),
                    Err(HdrDecodeErrors::InvalidResolution(_))
                ),
                "{line:?} should not parse"
            );
        }
    }
}
