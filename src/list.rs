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

//! The LIST chunk with an INFO form type:
//!
//! Offset | Size | Data         | Description
//! -----: | ---: | ------------ | ---------------------------------------------
//!      0 |    4 | "INFO"       | The list form type.
//!      4 |    4 | tag id       | For example "IART" for the artist.
//!      8 |    4 | text size    | Including the terminating NUL.
//!     12 |  ... | text         | NUL terminated, padded to an even size.
//!
//! The tag entries repeat until the end of the chunk.

use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use crate::error::{Error, Result};
use crate::metadata::Metadata;
use crate::riff::{push_u32, ChunkId};

/// Decodes a LIST payload into `metadata`. Returns false, leaving
/// `metadata` untouched, if the list isn't an INFO list.
pub fn decode_info(payload: &[u8], metadata: &mut Metadata) -> Result<bool> {
    if payload.len() < 4 {
        return Err(Error::malformed(ChunkId::LIST, "missing list form type"));
    }
    let form_type = ChunkId([payload[0], payload[1], payload[2], payload[3]]);
    if form_type != ChunkId::INFO {
        debug!("skipping LIST chunk of form type {}", form_type);
        return Ok(false);
    }

    let mut rest = &payload[4..];
    while rest.len() >= 8 {
        let id = ChunkId([rest[0], rest[1], rest[2], rest[3]]);
        let size = LittleEndian::read_u32(&rest[4..8]) as usize;
        rest = &rest[8..];

        // A last entry running past the chunk gets what's there.
        let value = &rest[..size.min(rest.len())];
        let padded = size.saturating_add(size & 1).min(rest.len());
        rest = &rest[padded..];

        if Metadata::is_track_number_alias(id) {
            debug!("reading {} as ITRK", id);
        }
        match metadata.tag_mut(id) {
            Some(field) => *field = Some(nul_terminated(value)),
            None => debug!("skipping unknown INFO tag {}", id),
        }
    }

    Ok(true)
}

/// Encodes the tags of `metadata` as a LIST payload, or `None` if no tag is
/// set.
pub fn encode_info(metadata: &Metadata) -> Option<Vec<u8>> {
    if !metadata.has_tags() {
        return None;
    }

    let mut payload = Vec::new();
    payload.extend_from_slice(&ChunkId::INFO.0);
    for (id, text) in metadata.tags() {
        let size = text.len() as u32 + 1;
        payload.extend_from_slice(&id.0);
        push_u32(&mut payload, size);
        payload.extend_from_slice(text.as_bytes());
        payload.push(0);
        if size & 1 == 1 {
            payload.push(0);
        }
    }
    Some(payload)
}

fn nul_terminated(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..len]).into_owned()
}
