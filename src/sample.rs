// riff-wave -- Basic support for reading and writing wave PCM files.
// Copyright (c) 2016 Kevin Brothaler and the riff-wave project authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Conversion between little-endian PCM sample bytes and `i32` samples.
//!
//! Every supported bit depth maps to one `i32` representation:
//!
//! Depth | On disk                     | In memory
//! ----: | --------------------------- | -------------------------------------
//!     8 | unsigned byte               | `0..=255`, silence is 128
//!    16 | signed, 2 bytes             | `-32768..=32767`
//!    24 | signed, 3 bytes             | left-justified: the 24-bit value times 256
//!    32 | signed, 4 bytes             | the full `i32` range
//!
//! The 24-bit representation keeps the sample in the top three bytes of the
//! `i32`, so `0x00 0x00 0x80` decodes to `i32::MIN`. Encoding drops the low
//! byte again, which makes decode, encode, decode a fixed point.

use std::io;
use std::io::Write;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::error::{Error, Result};

/// The transcoder for one bit depth. Pick it once per stream with
/// [`SampleCodec::for_bit_depth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleCodec {
    /// 8-bit unsigned samples.
    U8,
    /// 16-bit signed samples.
    I16,
    /// 24-bit signed samples, left-justified in memory.
    I24,
    /// 32-bit signed samples.
    I32,
}

impl SampleCodec {
    /// Returns the codec for the given bits per sample.
    pub fn for_bit_depth(bit_depth: u16) -> Result<SampleCodec> {
        match bit_depth {
            8 => Ok(SampleCodec::U8),
            16 => Ok(SampleCodec::I16),
            24 => Ok(SampleCodec::I24),
            32 => Ok(SampleCodec::I32),
            _ => Err(Error::UnsupportedBitDepth(bit_depth)),
        }
    }

    pub fn bit_depth(self) -> u16 {
        match self {
            SampleCodec::U8 => 8,
            SampleCodec::I16 => 16,
            SampleCodec::I24 => 24,
            SampleCodec::I32 => 32,
        }
    }

    /// The number of bytes one sample occupies on disk.
    pub fn width(self) -> usize {
        usize::from(self.bit_depth() / 8)
    }

    /// Decodes one sample. `bytes` must hold at least `width()` bytes.
    pub fn decode(self, bytes: &[u8]) -> i32 {
        match self {
            SampleCodec::U8 => i32::from(bytes[0]),
            SampleCodec::I16 => i32::from(LittleEndian::read_i16(bytes)),
            SampleCodec::I24 => (LittleEndian::read_u24(bytes) << 8) as i32,
            SampleCodec::I32 => LittleEndian::read_i32(bytes),
        }
    }

    /// Decodes `out.len()` consecutive samples from `bytes`.
    pub fn decode_into(self, bytes: &[u8], out: &mut [i32]) {
        for (sample, raw) in out.iter_mut().zip(bytes.chunks_exact(self.width())) {
            *sample = self.decode(raw);
        }
    }

    /// Encodes one sample. Values outside the depth's range are truncated
    /// to its low bytes (for 24-bit, to bytes 1 to 3).
    pub fn encode<W: Write>(self, sample: i32, writer: &mut W) -> io::Result<()> {
        match self {
            SampleCodec::U8 => writer.write_u8(sample as u8),
            SampleCodec::I16 => writer.write_i16::<LittleEndian>(sample as i16),
            SampleCodec::I24 => writer.write_u24::<LittleEndian>((sample as u32) >> 8),
            SampleCodec::I32 => writer.write_i32::<LittleEndian>(sample),
        }
    }

    /// Converts a sample from the in-memory representation of one depth to
    /// another's. Widening is exact; narrowing drops the low bits.
    pub fn rescale(sample: i32, from: SampleCodec, to: SampleCodec) -> i32 {
        if from == to {
            return sample;
        }

        let wide = match from {
            SampleCodec::U8 => sample.wrapping_sub(128) << 24,
            SampleCodec::I16 => sample << 16,
            SampleCodec::I24 | SampleCodec::I32 => sample,
        };

        match to {
            SampleCodec::U8 => (wide >> 24) + 128,
            SampleCodec::I16 => wide >> 16,
            SampleCodec::I24 => wide & !0xFF,
            SampleCodec::I32 => wide,
        }
    }
}
