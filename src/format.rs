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

use std::io;
use std::io::{Read, Write};
use std::time::Duration;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;

use crate::error::{Error, Result};
use crate::riff::ChunkId;

/// Uncompressed integer PCM.
pub const FORMAT_PCM: u16 = 1;
/// IEEE floating point.
pub const FORMAT_IEEE_FLOAT: u16 = 3;
/// WAVE_FORMAT_EXTENSIBLE; the real format is in the extension's sub format.
pub const FORMAT_EXTENSIBLE: u16 = 0xFFFE;

const FMT_CHUNK_SIZE: u32 = 16;
const EXTENSIBLE_CHUNK_SIZE: u32 = 40;

/// Describes the samples of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub num_channels: u16,
    pub sample_rate: u32,
    pub bit_depth: u16,
    /// The format tag from the "fmt " chunk, passed through unchanged.
    pub wav_format_tag: u16,
}

impl AudioFormat {
    /// Returns a linear PCM format.
    pub fn pcm(num_channels: u16, sample_rate: u32, bit_depth: u16) -> AudioFormat {
        AudioFormat {
            num_channels: num_channels,
            sample_rate: sample_rate,
            bit_depth: bit_depth,
            wav_format_tag: FORMAT_PCM,
        }
    }

    pub fn bytes_per_sample(&self) -> u16 {
        (self.bit_depth + 7) / 8
    }

    /// The size of one frame: one sample for each channel.
    pub fn block_align(&self) -> u16 {
        self.num_channels.wrapping_mul(self.bytes_per_sample())
    }

    pub fn avg_bytes_per_sec(&self) -> u32 {
        self.sample_rate.wrapping_mul(u32::from(self.block_align()))
    }

    pub fn is_lpcm(&self) -> bool {
        self.wav_format_tag == FORMAT_PCM
    }

    /// The playing time of `pcm_bytes` bytes of sample data, truncated to
    /// the nanosecond. `None` if the format describes no data rate.
    pub fn duration_of(&self, pcm_bytes: u64) -> Option<Duration> {
        let bits_per_sec = u128::from(self.bit_depth)
            * u128::from(self.sample_rate)
            * u128::from(self.num_channels);
        if bits_per_sec == 0 {
            return None;
        }
        let nanos = u128::from(pcm_bytes) * 8 * 1_000_000_000 / bits_per_sec;
        Some(Duration::from_nanos(nanos as u64))
    }
}

/// The fields of a WAVE_FORMAT_EXTENSIBLE "fmt " chunk beyond the basic 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatExtension {
    /// The bits of precision actually used in each sample container.
    pub valid_bits_per_sample: u16,
    /// Speaker assignment of the channels.
    pub channel_mask: u32,
    /// The first two bytes of the sub format GUID, i.e. the real format tag.
    pub sub_format: u16,
}

/// The complete contents of a "fmt " chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtChunk {
    pub format: AudioFormat,
    pub avg_bytes_per_sec: u32,
    pub block_align: u16,
    pub extension: Option<FormatExtension>,
}

impl FmtChunk {
    /// Builds the chunk an encoder writes for `format`, deriving the byte
    /// rate and block alignment.
    pub fn for_format(format: AudioFormat) -> FmtChunk {
        FmtChunk {
            format: format,
            avg_bytes_per_sec: format.avg_bytes_per_sec(),
            block_align: format.block_align(),
            extension: None,
        }
    }

    /// Reads the payload of a "fmt " chunk of `size` bytes. The reader must
    /// be limited to the payload; bytes beyond the known fields are left
    /// for the caller to skip.
    pub fn read<R: Read>(reader: &mut R, size: u32) -> Result<FmtChunk> {
        if size < FMT_CHUNK_SIZE {
            return Err(Error::malformed(ChunkId::FMT, "fmt chunk is too short"));
        }

        let wav_format_tag = reader.read_u16::<LittleEndian>()?;
        let num_channels = reader.read_u16::<LittleEndian>()?;
        let sample_rate = reader.read_u32::<LittleEndian>()?;
        let avg_bytes_per_sec = reader.read_u32::<LittleEndian>()?;
        let block_align = reader.read_u16::<LittleEndian>()?;
        let bit_depth = reader.read_u16::<LittleEndian>()?;

        let mut extension = None;
        if wav_format_tag == FORMAT_EXTENSIBLE && size >= EXTENSIBLE_CHUNK_SIZE {
            let extra_info_size = reader.read_u16::<LittleEndian>()?;
            if extra_info_size >= 22 {
                let valid_bits_per_sample = reader.read_u16::<LittleEndian>()?;
                let channel_mask = reader.read_u32::<LittleEndian>()?;
                let sub_format = reader.read_u16::<LittleEndian>()?;
                extension = Some(FormatExtension {
                    valid_bits_per_sample: valid_bits_per_sample,
                    channel_mask: channel_mask,
                    sub_format: sub_format,
                });
            }
        }

        let format = AudioFormat {
            num_channels: num_channels,
            sample_rate: sample_rate,
            bit_depth: bit_depth,
            wav_format_tag: wav_format_tag,
        };
        debug!("fmt: {:?}, {} bytes/sec, block align {}", format, avg_bytes_per_sec, block_align);

        Ok(FmtChunk {
            format: format,
            avg_bytes_per_sec: avg_bytes_per_sec,
            block_align: block_align,
            extension: extension,
        })
    }

    /// Writes the complete 24 byte chunk, header included. The extension is
    /// not written.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&ChunkId::FMT.0)?;
        writer.write_u32::<LittleEndian>(FMT_CHUNK_SIZE)?;
        writer.write_u16::<LittleEndian>(self.format.wav_format_tag)?;
        writer.write_u16::<LittleEndian>(self.format.num_channels)?;
        writer.write_u32::<LittleEndian>(self.format.sample_rate)?;
        writer.write_u32::<LittleEndian>(self.avg_bytes_per_sec)?;
        writer.write_u16::<LittleEndian>(self.block_align)?;
        writer.write_u16::<LittleEndian>(self.format.bit_depth)
    }

    /// Returns true for integer PCM, either tagged directly or through the
    /// extensible sub format.
    pub fn is_lpcm(&self) -> bool {
        match self.extension {
            Some(ref extension) if self.format.wav_format_tag == FORMAT_EXTENSIBLE => {
                extension.sub_format == FORMAT_PCM
            }
            _ => self.format.is_lpcm(),
        }
    }
}
