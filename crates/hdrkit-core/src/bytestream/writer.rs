/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bytestream::{ByteIoError, ByteWriterTrait};

mod no_std_writer;
mod std_writer;

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

/// Encapsulates a simple byte writer with
/// support for endian aware writes
///
/// Keeps track of how many bytes went through it so
/// encoders can report the encoded size.
pub struct ByteWriter<T: ByteWriterTrait> {
    buffer:        T,
    bytes_written: usize
}

impl<T: ByteWriterTrait> ByteWriter<T> {
    /// Create a new writer for the sink
    pub fn new(data: T) -> ByteWriter<T> {
        ByteWriter {
            buffer:        data,
            bytes_written: 0
        }
    }

    /// Write all bytes from `buf` into the sink or error out
    /// if the sink could not take them all
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.buffer.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    /// Return the number of bytes the writer has written
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Tell the sink how many bytes we expect to write
    pub fn reserve(&mut self, size: usize) -> Result<(), ByteIoError> {
        self.buffer.reserve_capacity(size)
    }

    pub fn flush(&mut self) -> Result<(), ByteIoError> {
        self.buffer.flush_bytes()
    }
}

macro_rules! write_single_type {
    ($name:tt,$name2:tt,$name3:tt,$int_type:tt) => {
        impl<T: ByteWriterTrait> ByteWriter<T> {
            #[inline(always)]
            fn $name(&mut self, value: $int_type, mode: Mode) -> Result<(), ByteIoError> {
                let bytes = match mode {
                    Mode::BE => value.to_be_bytes(),
                    Mode::LE => value.to_le_bytes()
                };
                self.buffer.write_const_bytes(&bytes)?;
                self.bytes_written += bytes.len();
                Ok(())
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a big endian value")]
            #[inline]
            pub fn $name2(&mut self, value: $int_type) -> Result<(), ByteIoError> {
                self.$name(value, Mode::BE)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a little endian value")]
            #[inline]
            pub fn $name3(&mut self, value: $int_type) -> Result<(), ByteIoError> {
                self.$name(value, Mode::LE)
            }
        }
    };
}

write_single_type!(write_f32_inner, write_f32_be, write_f32_le, f32);

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::bytestream::ByteWriter;

    #[test]
    fn counts_written_bytes() {
        let mut sink = Vec::new();
        let mut writer = ByteWriter::new(&mut sink);

        writer.write_all(b"PF\n").unwrap();
        writer.write_f32_le(-1.0).unwrap();
        writer.write_f32_be(2.0).unwrap();

        assert_eq!(writer.bytes_written(), 11);

        let mut expected = b"PF\n".to_vec();
        expected.extend_from_slice(&(-1.0_f32).to_le_bytes());
        expected.extend_from_slice(&2.0_f32.to_be_bytes());
        assert_eq!(sink, expected);
    }
}
