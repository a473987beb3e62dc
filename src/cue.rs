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
use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::riff::{push_u32, ChunkId};

const CUE_POINT_SIZE: usize = 24;

/// A marked position in the audio. Positions are in sample frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuePoint {
    /// Unique among the file's cue points.
    pub id: u32,
    /// The play order position.
    pub position: u32,
    /// Either "data" or "slnt", naming the chunk that holds the cue point.
    pub data_chunk_id: [u8; 4],
    pub chunk_start: u32,
    pub block_start: u32,
    pub sample_offset: u32,
}

/// Decodes a "cue " payload: a count, then that many 24 byte records.
pub fn decode_cue(payload: &[u8]) -> Result<Vec<CuePoint>> {
    let in_cue = |err: io::Error| Error::from(err).in_chunk(ChunkId::CUE);
    let mut reader = Cursor::new(payload);
    let count = reader.read_u32::<LittleEndian>().map_err(in_cue)?;

    let available = (payload.len() - 4) / CUE_POINT_SIZE;
    if (count as usize) > available {
        return Err(Error::malformed(ChunkId::CUE, "fewer cue points than declared"));
    }

    let mut points = Vec::with_capacity(count as usize);
    for _ in 0..count {
        points.push(read_cue_point(&mut reader).map_err(in_cue)?);
    }
    Ok(points)
}

fn read_cue_point<R: Read>(reader: &mut R) -> io::Result<CuePoint> {
    let id = reader.read_u32::<LittleEndian>()?;
    let position = reader.read_u32::<LittleEndian>()?;
    let mut data_chunk_id = [0u8; 4];
    reader.read_exact(&mut data_chunk_id)?;
    Ok(CuePoint {
        id: id,
        position: position,
        data_chunk_id: data_chunk_id,
        chunk_start: reader.read_u32::<LittleEndian>()?,
        block_start: reader.read_u32::<LittleEndian>()?,
        sample_offset: reader.read_u32::<LittleEndian>()?,
    })
}

/// Encodes cue points as a "cue " payload.
pub fn encode_cue(points: &[CuePoint]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(4 + points.len() * CUE_POINT_SIZE);
    push_u32(&mut payload, points.len() as u32);
    for point in points {
        push_u32(&mut payload, point.id);
        push_u32(&mut payload, point.position);
        payload.extend_from_slice(&point.data_chunk_id);
        push_u32(&mut payload, point.chunk_start);
        push_u32(&mut payload, point.block_start);
        push_u32(&mut payload, point.sample_offset);
    }
    payload
}
