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

//! The "smpl" chunk, which describes how a sampler should play the audio.
//!
//! Offset | Size | Data                | Description
//! -----: | ---: | ------------------- | --------------------------------------
//!      0 |    4 | manufacturer        | MIDI manufacturer code, 0 if none.
//!      4 |    4 | product             | Manufacturer specific product code.
//!      8 |    4 | sample period       | Nanoseconds per sample.
//!     12 |    4 | MIDI unity note     | The note that plays the sample unpitched.
//!     16 |    4 | MIDI pitch fraction | Fine tuning above the unity note.
//!     20 |    4 | SMPTE format        | 0, 24, 25, 29 or 30.
//!     24 |    4 | SMPTE offset        | Packed hours, minutes, seconds and frames.
//!     28 |    4 | num sample loops    | The number of 24 byte loop records.
//!     32 |    4 | sampler data size   | The bytes that follow the loops.
//!     36 |  ... | sample loops        |
//!    ... |  ... | sampler data        |

use std::io;
use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::riff::{push_u32, ChunkId};

const SMPL_HEADER_SIZE: usize = 36;
const SAMPLE_LOOP_SIZE: usize = 24;

/// Loop types defined by the format. Other values are manufacturer specific.
pub const LOOP_FORWARD: u32 = 0;
pub const LOOP_ALTERNATING: u32 = 1;
pub const LOOP_BACKWARD: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerInfo {
    pub manufacturer: u32,
    pub product: u32,
    pub sample_period: u32,
    pub midi_unity_note: u32,
    pub midi_pitch_fraction: u32,
    pub smpte_format: u32,
    pub smpte_offset: u32,
    pub loops: Vec<SampleLoop>,
    /// Manufacturer specific bytes following the loops.
    pub sampler_data: Vec<u8>,
}

impl SamplerInfo {
    pub fn num_sample_loops(&self) -> u32 {
        self.loops.len() as u32
    }
}

/// A section of the audio to repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLoop {
    /// Refers to a cue point, usually one with the same id.
    pub cue_point_id: [u8; 4],
    pub loop_type: u32,
    /// The first sample frame of the loop.
    pub start: u32,
    /// The last sample frame of the loop, inclusive.
    pub end: u32,
    pub fraction: u32,
    /// 0 loops forever.
    pub play_count: u32,
}

pub fn decode_smpl(payload: &[u8]) -> Result<SamplerInfo> {
    if payload.len() < SMPL_HEADER_SIZE {
        return Err(Error::malformed(ChunkId::SMPL, "smpl chunk is too short"));
    }

    let in_smpl = |err: io::Error| Error::from(err).in_chunk(ChunkId::SMPL);
    let mut reader = Cursor::new(payload);
    let mut header = [0u32; 9];
    reader.read_u32_into::<LittleEndian>(&mut header).map_err(in_smpl)?;
    let num_sample_loops = header[7] as usize;
    let sampler_data_size = header[8] as usize;

    let available = (payload.len() - SMPL_HEADER_SIZE) / SAMPLE_LOOP_SIZE;
    if num_sample_loops > available {
        return Err(Error::malformed(ChunkId::SMPL, "fewer sample loops than declared"));
    }

    let mut loops = Vec::with_capacity(num_sample_loops);
    for _ in 0..num_sample_loops {
        loops.push(read_sample_loop(&mut reader).map_err(in_smpl)?);
    }

    let mut sampler_data = Vec::new();
    (&mut reader).take(sampler_data_size as u64).read_to_end(&mut sampler_data).map_err(in_smpl)?;
    if sampler_data.len() < sampler_data_size {
        return Err(Error::UnexpectedEof { chunk: ChunkId::SMPL });
    }

    Ok(SamplerInfo {
        manufacturer: header[0],
        product: header[1],
        sample_period: header[2],
        midi_unity_note: header[3],
        midi_pitch_fraction: header[4],
        smpte_format: header[5],
        smpte_offset: header[6],
        loops: loops,
        sampler_data: sampler_data,
    })
}

fn read_sample_loop<R: Read>(reader: &mut R) -> io::Result<SampleLoop> {
    let mut cue_point_id = [0u8; 4];
    reader.read_exact(&mut cue_point_id)?;
    Ok(SampleLoop {
        cue_point_id: cue_point_id,
        loop_type: reader.read_u32::<LittleEndian>()?,
        start: reader.read_u32::<LittleEndian>()?,
        end: reader.read_u32::<LittleEndian>()?,
        fraction: reader.read_u32::<LittleEndian>()?,
        play_count: reader.read_u32::<LittleEndian>()?,
    })
}

pub fn encode_smpl(info: &SamplerInfo) -> Vec<u8> {
    let mut payload = Vec::with_capacity(SMPL_HEADER_SIZE + info.loops.len() * SAMPLE_LOOP_SIZE +
                                         info.sampler_data.len());
    let header = [info.manufacturer,
                  info.product,
                  info.sample_period,
                  info.midi_unity_note,
                  info.midi_pitch_fraction,
                  info.smpte_format,
                  info.smpte_offset,
                  info.num_sample_loops(),
                  info.sampler_data.len() as u32];
    for &field in &header {
        push_u32(&mut payload, field);
    }
    for sample_loop in &info.loops {
        payload.extend_from_slice(&sample_loop.cue_point_id);
        push_u32(&mut payload, sample_loop.loop_type);
        push_u32(&mut payload, sample_loop.start);
        push_u32(&mut payload, sample_loop.end);
        push_u32(&mut payload, sample_loop.fraction);
        push_u32(&mut payload, sample_loop.play_count);
    }
    payload.extend_from_slice(&info.sampler_data);
    payload
}
