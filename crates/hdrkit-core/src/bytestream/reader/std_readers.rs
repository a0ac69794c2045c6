/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "std")]

use std::io;
use std::io::{BufRead, BufReader, Read, Seek};

use crate::bytestream::reader::{ByteIoError, SeekFrom};
use crate::bytestream::ByteReaderTrait;

impl<T> ByteReaderTrait for io::Cursor<T>
where
    T: AsRef<[u8]>
{
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        let mut buf = [0];
        match self.read_exact(&mut buf) {
            Ok(()) => buf[0],
            Err(_) => 0
        }
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.read_exact(buf).map_err(ByteIoError::from)
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError> {
        self.read_exact_bytes(buf)
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.read(buf).map_err(ByteIoError::from)
    }

    #[inline(always)]
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let start = self.position();
        let result = self.read_exact(buf).map_err(ByteIoError::from);
        self.set_position(start);
        result
    }

    #[inline(always)]
    fn z_seek(&mut self, from: SeekFrom) -> Result<u64, ByteIoError> {
        self.seek(from.to_std_seek()).map_err(ByteIoError::from)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        Ok(self.position() >= self.get_ref().as_ref().len() as u64)
    }

    fn z_position(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.position())
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        self.read_to_end(sink).map_err(ByteIoError::from)
    }
}

impl<T: io::Read + io::Seek> ByteReaderTrait for BufReader<T> {
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        let mut buf = [0];
        match self.read_exact(&mut buf) {
            Ok(()) => buf[0],
            Err(_) => 0
        }
    }

    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        self.read_exact(buf).map_err(ByteIoError::from)
    }

    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError> {
        self.read_exact_bytes(buf)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        self.read(buf).map_err(ByteIoError::from)
    }

    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        // first read bytes to the buffer
        self.read_exact_bytes(buf)?;
        let converted = -i64::try_from(buf.len()).map_err(ByteIoError::from)?;
        self.seek_relative(converted).map_err(ByteIoError::from)?;

        Ok(())
    }

    fn z_seek(&mut self, from: SeekFrom) -> Result<u64, ByteIoError> {
        self.seek(from.to_std_seek()).map_err(ByteIoError::from)
    }

    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        self.fill_buf()
            .map(|b| b.is_empty())
            .map_err(ByteIoError::from)
    }

    fn z_position(&mut self) -> Result<u64, ByteIoError> {
        self.stream_position().map_err(ByteIoError::from)
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        self.read_to_end(sink).map_err(ByteIoError::from)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor};

    use crate::bytestream::ByteReader;

    #[test]
    fn std_cursor_peek_restores_position() {
        let mut reader = ByteReader::new(Cursor::new(vec![2_u8, 2, 0, 4]));

        assert_eq!(reader.peek_at(0, 2).unwrap(), &[2, 2]);
        assert_eq!(reader.position().unwrap(), 0);
        assert!(reader.peek_at(0, 5).is_err());
        assert_eq!(reader.position().unwrap(), 0);
        assert_eq!(reader.get_u16_be_err().unwrap(), 0x0202);
        assert_eq!(reader.get_u16_le_err().unwrap(), 0x0400);
        assert!(reader.eof().unwrap());
    }

    #[test]
    fn buf_reader_lines() {
        let data = Cursor::new(b"PF\n2 1\n-1.0\n".to_vec());
        let mut reader = ByteReader::new(BufReader::new(data));
        let mut line = Vec::new();

        reader.read_line_into(b'\n', &mut line).unwrap();
        assert_eq!(&line, b"PF\n");
        reader.read_line_into(b'\n', &mut line).unwrap();
        assert_eq!(&line, b"2 1\n");
        reader.read_line_into(b'\n', &mut line).unwrap();
        assert_eq!(&line, b"-1.0\n");
        assert!(reader.eof().unwrap());
    }
}
