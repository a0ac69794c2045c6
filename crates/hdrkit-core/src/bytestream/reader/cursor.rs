/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use crate::bytestream::reader::{ByteIoError, SeekFrom};
use crate::bytestream::ByteReaderTrait;

/// An in memory reader over anything that derefs to a byte slice
///
/// Works in `no_std` environments and is the preferred
/// source when the whole file is already in memory.
pub struct ByteCursor<T: AsRef<[u8]>> {
    stream:   T,
    position: usize
}

impl<T: AsRef<[u8]>> ByteCursor<T> {
    pub fn new(buffer: T) -> ByteCursor<T> {
        ByteCursor {
            stream:   buffer,
            position: 0
        }
    }
    /// Return the underlying buffer
    pub fn into_inner(self) -> T {
        self.stream
    }

    #[inline(always)]
    fn remaining(&self) -> &[u8] {
        let stream = self.stream.as_ref();
        // position may be past the end after a seek
        stream.get(self.position..).unwrap_or(&[])
    }
}

impl<T: AsRef<[u8]>> ByteReaderTrait for ByteCursor<T> {
    #[inline(always)]
    fn read_byte_no_error(&mut self) -> u8 {
        let byte = self.remaining().first().copied().unwrap_or(0);
        self.position = self.position.saturating_add(1);
        byte
    }

    #[inline(always)]
    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let remaining = self.remaining();

        match remaining.get(..buf.len()) {
            Some(bytes) => {
                buf.copy_from_slice(bytes);
                self.position += buf.len();
                Ok(())
            }
            None => Err(ByteIoError::NotEnoughBytes(buf.len(), remaining.len()))
        }
    }

    #[inline(always)]
    fn read_const_bytes<const N: usize>(&mut self, buf: &mut [u8; N]) -> Result<(), ByteIoError> {
        self.read_exact_bytes(buf)
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, ByteIoError> {
        let remaining = self.remaining();
        let len = remaining.len().min(buf.len());

        buf[..len].copy_from_slice(&remaining[..len]);
        self.position += len;

        Ok(len)
    }

    #[inline(always)]
    fn peek_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), ByteIoError> {
        let remaining = self.remaining();

        match remaining.get(..buf.len()) {
            Some(bytes) => {
                buf.copy_from_slice(bytes);
                Ok(())
            }
            None => Err(ByteIoError::NotEnoughBytes(buf.len(), remaining.len()))
        }
    }

    fn z_seek(&mut self, from: SeekFrom) -> Result<u64, ByteIoError> {
        let (base, offset) = match from {
            SeekFrom::Start(pos) => {
                self.position = usize::try_from(pos)?;
                return Ok(pos);
            }
            SeekFrom::End(pos) => (self.stream.as_ref().len(), pos),
            SeekFrom::Current(pos) => (self.position, pos)
        };
        let new_position = i64::try_from(base)?
            .checked_add(offset)
            .ok_or(ByteIoError::SeekError("Seek position overflowed"))?;

        if new_position < 0 {
            return Err(ByteIoError::SeekError("Cannot seek before the start of the stream"));
        }
        self.position = usize::try_from(new_position)?;

        Ok(self.position as u64)
    }

    #[inline(always)]
    fn is_eof(&mut self) -> Result<bool, ByteIoError> {
        Ok(self.position >= self.stream.as_ref().len())
    }

    #[inline(always)]
    fn z_position(&mut self) -> Result<u64, ByteIoError> {
        Ok(self.position as u64)
    }

    fn read_remaining(&mut self, sink: &mut Vec<u8>) -> Result<usize, ByteIoError> {
        let remaining = self.remaining();
        let len = remaining.len();

        sink.extend_from_slice(remaining);
        self.position += len;

        Ok(len)
    }
}
