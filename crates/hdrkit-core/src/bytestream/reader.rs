/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Formatter;

pub use cursor::ByteCursor;

use crate::bytestream::ByteReaderTrait;

mod cursor;
mod std_readers;

/// Enumeration of possible methods to seek within an I/O object.
///
/// It is analogous to the [SeekFrom](std::io::SeekFrom) in the std library but
/// it's here to allow this to work in no-std crates
#[derive(Copy, PartialEq, Eq, Clone, Debug)]
pub enum SeekFrom {
    /// Sets the offset to the provided number of bytes.
    Start(u64),
    /// Sets the offset to the size of this object plus the specified number of
    /// bytes.
    End(i64),
    /// Sets the offset to the current position plus the specified number of
    /// bytes.
    ///
    /// It is an error to seek before byte 0.
    Current(i64)
}

impl SeekFrom {
    /// Convert to [SeekFrom](std::io::SeekFrom) from the `std::io` library
    ///
    /// This is only present when std feature is present
    #[cfg(feature = "std")]
    pub(crate) fn to_std_seek(self) -> std::io::SeekFrom {
        match self {
            SeekFrom::Start(pos) => std::io::SeekFrom::Start(pos),
            SeekFrom::End(pos) => std::io::SeekFrom::End(pos),
            SeekFrom::Current(pos) => std::io::SeekFrom::Current(pos)
        }
    }
}

pub enum ByteIoError {
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    TryFromIntError(core::num::TryFromIntError),
    // requested, read
    NotEnoughBytes(usize, usize),
    NotEnoughBuffer(usize, usize),
    Generic(&'static str),
    SeekError(&'static str)
}

impl ByteIoError {
    /// Whether the error was caused by the source running out of bytes
    ///
    /// Decoders use this to tell a truncated file apart from a failing
    /// underlying reader.
    pub fn is_eof(&self) -> bool {
        match self {
            #[cfg(feature = "std")]
            ByteIoError::StdIoError(err) => err.kind() == std::io::ErrorKind::UnexpectedEof,
            ByteIoError::NotEnoughBytes(..) => true,
            _ => false
        }
    }
}

impl core::fmt::Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            #[cfg(feature = "std")]
            ByteIoError::StdIoError(err) => {
                writeln!(f, "Underlying I/O error {}", err)
            }
            ByteIoError::TryFromIntError(err) => {
                writeln!(f, "Cannot convert to int {}", err)
            }
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::NotEnoughBuffer(expected, found) => {
                writeln!(
                    f,
                    "Not enough buffer to write {expected} bytes, buffer size is {found}"
                )
            }
            ByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
            ByteIoError::SeekError(err) => {
                writeln!(f, "Seek error: {err}")
            }
        }
    }
}

impl core::fmt::Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for ByteIoError {
    fn from(value: std::io::Error) -> Self {
        ByteIoError::StdIoError(value)
    }
}

impl From<core::num::TryFromIntError> for ByteIoError {
    fn from(value: core::num::TryFromIntError) -> Self {
        ByteIoError::TryFromIntError(value)
    }
}

impl From<&'static str> for ByteIoError {
    fn from(value: &'static str) -> Self {
        ByteIoError::Generic(value)
    }
}

/// A position tracking reader over any [`ByteReaderTrait`] source
///
/// Decoders wrap their input in this and use it for single byte,
/// fixed size, endian aware and line oriented reads.
pub struct ByteReader<T: ByteReaderTrait> {
    inner:       T,
    temp_buffer: Vec<u8>
}

impl<T: ByteReaderTrait> ByteReader<T> {
    pub fn new(source: T) -> ByteReader<T> {
        ByteReader {
            inner:       source,
            temp_buffer: vec![]
        }
    }
    #[inline(always)]
    pub fn skip(&mut self, num: usize) -> Result<u64, ByteIoError> {
        self.inner.z_seek(SeekFrom::Current(i64::try_from(num)?))
    }
    #[inline(always)]
    pub fn rewind(&mut self, num: usize) -> Result<u64, ByteIoError> {
        self.inner.z_seek(SeekFrom::Current(-i64::try_from(num)?))
    }
    #[inline(always)]
    pub fn seek(&mut self, from: SeekFrom) -> Result<u64, ByteIoError> {
        self.inner.z_seek(from)
    }
    /// Read a single byte returning `0` at EOF
    #[inline(always)]
    pub fn get_u8(&mut self) -> u8 {
        self.inner.read_byte_no_error()
    }
    /// Read a single byte or error out at EOF
    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        let mut buf = [0];
        self.inner.read_const_bytes(&mut buf)?;
        Ok(buf[0])
    }

    /// Look ahead position bytes and return a reference
    /// to num_bytes from that position, or an error if the
    /// peek would be out of bounds.
    ///
    /// This doesn't increment the position, bytes would have to be discarded
    /// at a later point.
    #[inline]
    pub fn peek_at(&mut self, position: usize, num_bytes: usize) -> Result<&[u8], ByteIoError> {
        // short circuit for zero
        // important since implementations like File will
        // cause a syscall on skip
        if position != 0 {
            self.skip(position)?;
        }
        self.temp_buffer.resize(num_bytes, 0);

        let result = self.inner.peek_exact_bytes(&mut self.temp_buffer[..]);

        if position != 0 {
            self.rewind(position)?;
        }
        result?;

        Ok(&self.temp_buffer)
    }
    #[inline(always)]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        self.inner.read_const_bytes(&mut byte_store)?;
        Ok(byte_store)
    }

    /// Read bytes up to and including `delimiter` into `sink`
    ///
    /// The sink is cleared before reading. Reading stops at EOF if the
    /// delimiter is never found, so the last line of a stream may lack it.
    ///
    /// # Returns
    /// - `Ok(usize)`: Number of bytes placed in sink, `0` means we were already at EOF
    pub fn read_line_into(&mut self, delimiter: u8, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        sink.clear();

        while !self.inner.is_eof()? {
            let byte = self.get_u8_err()?;
            sink.push(byte);

            if byte == delimiter {
                break;
            }
        }
        Ok(sink.len())
    }

    pub fn skip_until_false<F: Fn(u8) -> bool>(&mut self, func: F) -> Result<(), ByteIoError> {
        while !self.inner.is_eof()? {
            let byte = self.get_u8();
            if !(func)(byte) {
                self.rewind(1)?;
                break;
            }
        }
        Ok(())
    }

    #[inline]
    pub fn set_position(&mut self, position: usize) -> Result<(), ByteIoError> {
        self.seek(SeekFrom::Start(u64::try_from(position)?))?;

        Ok(())
    }

    #[inline(always)]
    pub fn eof(&mut self) -> Result<bool, ByteIoError> {
        self.inner.is_eof()
    }
    #[inline(always)]
    pub fn position(&mut self) -> Result<u64, ByteIoError> {
        self.inner.z_position()
    }

    pub fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.inner.read_exact_bytes(buf)
    }

    /// Number of bytes between the current position and the end of the stream
    ///
    /// The position is left unchanged
    pub fn remaining_len(&mut self) -> Result<u64, ByteIoError> {
        let position = self.position()?;
        let end = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(position))?;

        Ok(end.saturating_sub(position))
    }
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}
macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$int_type:tt) => {
        impl<T:ByteReaderTrait> ByteReader<T>
        {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> Result<$int_type, ByteIoError>
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                self.inner.read_const_bytes(&mut space)?;

                match mode {
                    Mode::BE => Ok($int_type::from_be_bytes(space)),
                    Mode::LE => Ok($int_type::from_le_bytes(space))
                }
            }
            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name2(&mut self) -> Result<$int_type, ByteIoError>
            {
                self.$name(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name3(&mut self) -> Result<$int_type, ByteIoError>
            {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(get_u16_inner, get_u16_be_err, get_u16_le_err, u16);
get_single_type!(get_f32_inner, get_f32_be_err, get_f32_le_err, f32);

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::bytestream::{ByteCursor, ByteReader};

    #[test]
    fn read_lines_and_rest() {
        let data = b"#?RADIANCE\nFORMAT=32-bit_rle_rgbe\n\nrest";
        let mut reader = ByteReader::new(ByteCursor::new(&data[..]));
        let mut line = Vec::new();

        assert_eq!(reader.read_line_into(b'\n', &mut line).unwrap(), 11);
        assert_eq!(&line, b"#?RADIANCE\n");
        reader.read_line_into(b'\n', &mut line).unwrap();
        assert_eq!(&line, b"FORMAT=32-bit_rle_rgbe\n");
        reader.read_line_into(b'\n', &mut line).unwrap();
        assert_eq!(&line, b"\n");
        // last line has no delimiter
        assert_eq!(reader.read_line_into(b'\n', &mut line).unwrap(), 4);
        assert_eq!(&line, b"rest");
        assert_eq!(reader.read_line_into(b'\n', &mut line).unwrap(), 0);
    }

    #[test]
    fn peek_does_not_advance() {
        let data = [2_u8, 2, 0, 8];
        let mut reader = ByteReader::new(ByteCursor::new(&data[..]));

        assert_eq!(reader.peek_at(0, 2).unwrap(), &[2, 2]);
        assert_eq!(reader.position().unwrap(), 0);
        assert_eq!(reader.peek_at(2, 2).unwrap(), &[0, 8]);
        assert_eq!(reader.position().unwrap(), 0);
        assert!(reader.peek_at(3, 2).is_err());
        assert_eq!(reader.position().unwrap(), 0);
    }

    #[test]
    fn remaining_len_keeps_position() {
        let data = [0_u8; 10];
        let mut reader = ByteReader::new(ByteCursor::new(&data[..]));

        assert_eq!(reader.remaining_len().unwrap(), 10);
        reader.skip(3).unwrap();
        assert_eq!(reader.remaining_len().unwrap(), 7);
        assert_eq!(reader.position().unwrap(), 3);
    }

    #[test]
    fn endian_reads() {
        let value = 1.5_f32;
        let mut data = Vec::new();
        data.extend_from_slice(&value.to_le_bytes());
        data.extend_from_slice(&value.to_be_bytes());
        data.extend_from_slice(&[0x01, 0x02]);

        let mut reader = ByteReader::new(ByteCursor::new(data));

        assert_eq!(reader.get_f32_le_err().unwrap(), 1.5);
        assert_eq!(reader.get_f32_be_err().unwrap(), 1.5);
        assert_eq!(reader.get_u16_be_err().unwrap(), 0x0102);
        let err = reader.get_u8_err().unwrap_err();
        assert!(err.is_eof());
    }
}
