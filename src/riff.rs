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

//! A pull parser over the sub-chunks of a `RIFF....WAVE` container.
//!
//! Every chunk starts with a 4 byte id and a little-endian 32-bit size. The
//! payload follows, plus one pad byte when the size is odd. The pad byte is
//! not counted in the size.

use std::fmt;
use std::io;
use std::io::{Read, Seek, SeekFrom, Write};
use std::time::Duration;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use log::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::format::AudioFormat;

/// A four character chunk identifier, as stored in the file.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    pub const RIFF: ChunkId = ChunkId(*b"RIFF");
    pub const WAVE: ChunkId = ChunkId(*b"WAVE");
    pub const FMT: ChunkId = ChunkId(*b"fmt ");
    pub const DATA: ChunkId = ChunkId(*b"data");
    pub const LIST: ChunkId = ChunkId(*b"LIST");
    pub const INFO: ChunkId = ChunkId(*b"INFO");
    pub const CUE: ChunkId = ChunkId(*b"cue ");
    pub const SMPL: ChunkId = ChunkId(*b"smpl");
    pub const FACT: ChunkId = ChunkId(*b"fact");
    pub const BEXT: ChunkId = ChunkId(*b"bext");
    pub const JUNK: ChunkId = ChunkId(*b"junk");

    /// Returns true if all four bytes are printable ASCII, which holds for
    /// every registered chunk id.
    pub fn is_printable(&self) -> bool {
        self.0.iter().all(|&b| b >= 0x20 && b < 0x7F)
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &b in &self.0 {
            if b >= 0x20 && b < 0x7F {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02X}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ChunkId(\"{}\")", self)
    }
}

/// The 12 byte header at the very start of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub id: ChunkId,
    /// The declared size of everything after the first 8 bytes.
    pub size: u32,
    pub form_type: ChunkId,
}

/// The header of one sub-chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: ChunkId,
    /// The declared payload size, excluding the pad byte.
    pub size: u32,
    /// The absolute stream offset where the payload begins.
    pub offset: u64,
}

impl ChunkHeader {
    /// The offset of the byte following the payload and its pad byte.
    pub fn next_offset(&self) -> u64 {
        let size = u64::from(self.size);
        self.offset + size + (size & 1)
    }
}

/// A chunk returned by [`RiffWalker::next_chunk`]. Reading from it yields at
/// most the chunk's payload; the walker skips whatever is left.
pub struct Chunk<'a, R: 'a> {
    header: ChunkHeader,
    payload: io::Take<&'a mut R>,
}

impl<'a, R: Read> Chunk<'a, R> {
    pub fn header(&self) -> &ChunkHeader {
        &self.header
    }

    pub fn id(&self) -> ChunkId {
        self.header.id
    }

    pub fn size(&self) -> u32 {
        self.header.size
    }

    /// The number of payload bytes still readable. This is the declared
    /// size, clamped to the container, minus what has been read.
    pub fn remaining(&self) -> u64 {
        self.payload.limit()
    }

    /// Reads the rest of the payload into memory.
    pub fn read_to_vec(&mut self) -> Result<Vec<u8>> {
        let expected = self.remaining();
        let mut payload = Vec::new();
        self.payload
            .read_to_end(&mut payload)
            .map_err(|err| Error::from(err).in_chunk(self.header.id))?;
        if (payload.len() as u64) < expected {
            return Err(Error::UnexpectedEof { chunk: self.header.id });
        }
        Ok(payload)
    }
}

impl<'a, R: Read> Read for Chunk<'a, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.payload.read(buf)
    }
}

/// Walks the chunks of a RIFF file.
pub struct RiffWalker<R> {
    reader: R,
    container: Option<ContainerHeader>,
    // Offset of the container header.
    base: u64,
    // One past the last byte covered by the declared RIFF size.
    end: u64,
    next_offset: u64,
    // Set after an odd sized chunk, in case its pad byte is missing.
    unpadded_offset: Option<u64>,
    data_size: Option<u64>,
}

impl<R> RiffWalker<R>
    where R: Read + Seek
{
    pub fn new(reader: R) -> RiffWalker<R> {
        RiffWalker {
            reader: reader,
            container: None,
            base: 0,
            end: u64::max_value(),
            next_offset: 0,
            unpadded_offset: None,
            data_size: None,
        }
    }

    /// Reads and validates the `RIFF` header at the current stream position.
    /// Calling it again returns the cached header.
    pub fn read_container_header(&mut self) -> Result<ContainerHeader> {
        if let Some(container) = self.container {
            return Ok(container);
        }

        self.base = self.reader.seek(SeekFrom::Current(0))?;
        let mut raw = [0u8; 12];
        let read = read_up_to(&mut self.reader, &mut raw)?;

        let id = ChunkId([raw[0], raw[1], raw[2], raw[3]]);
        if read < 8 || id != ChunkId::RIFF {
            return Err(Error::NotARiffFile);
        }
        if read < 12 {
            return Err(Error::UnexpectedEof { chunk: ChunkId::RIFF });
        }
        let size = LittleEndian::read_u32(&raw[4..8]);
        let form_type = ChunkId([raw[8], raw[9], raw[10], raw[11]]);
        if form_type != ChunkId::WAVE {
            return Err(Error::UnsupportedFormType(form_type));
        }

        self.end = if size < 4 {
            // Streaming writers leave the size at zero until they finish.
            warn!("RIFF size of {} is a placeholder, reading until end of stream", size);
            u64::max_value()
        } else {
            self.base + 8 + u64::from(size)
        };
        self.next_offset = self.base + 12;
        self.unpadded_offset = None;

        let container = ContainerHeader {
            id: id,
            size: size,
            form_type: form_type,
        };
        debug!("RIFF container of {} bytes, form type {}", size, form_type);
        self.container = Some(container);
        Ok(container)
    }

    /// Returns the header of the next chunk, leaving the stream at the start
    /// of its payload, or `None` at the end of the container.
    pub fn next_header(&mut self) -> Result<Option<ChunkHeader>> {
        self.read_container_header()?;

        let next_offset = self.next_offset;
        let mut header = self.read_header_at(next_offset)?;

        if let Some(unpadded) = self.unpadded_offset.take() {
            if !header.map_or(false, |h| self.is_plausible(&h)) {
                let retry = self.read_header_at(unpadded)?;
                if retry.map_or(false, |h| self.is_plausible(&h)) {
                    warn!("chunk before offset {} is missing its pad byte", unpadded);
                    header = retry;
                } else if header.is_some() {
                    // Back to the payload of the padded header.
                    header = self.read_header_at(next_offset)?;
                }
            }
        }

        let header = match header {
            Some(header) => header,
            None => return Ok(None),
        };
        if !header.id.is_printable() {
            warn!("implausible chunk id {} at offset {}, treating it as the end of the container",
                  header.id,
                  header.offset - 8);
            return Ok(None);
        }

        // The stream sits at the payload; read_header_at leaves it there.
        if header.id == ChunkId::DATA {
            self.data_size = Some(self.payload_len(&header));
        }
        self.next_offset = header.next_offset();
        self.unpadded_offset = if header.size & 1 == 1 {
            Some(header.offset + u64::from(header.size))
        } else {
            None
        };

        trace!("chunk {} of {} bytes at offset {}", header.id, header.size, header.offset);
        Ok(Some(header))
    }

    /// Returns the next chunk with a reader over its payload, or `None` at
    /// the end of the container.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk<R>>> {
        let header = match self.next_header()? {
            Some(header) => header,
            None => return Ok(None),
        };
        let limit = self.payload_len(&header);
        Ok(Some(Chunk {
            header: header,
            payload: (&mut self.reader).take(limit),
        }))
    }

    fn read_header_at(&mut self, offset: u64) -> Result<Option<ChunkHeader>> {
        match offset.checked_add(8) {
            Some(header_end) if header_end <= self.end => {}
            _ => return Ok(None),
        }

        self.reader.seek(SeekFrom::Start(offset))?;
        let mut raw = [0u8; 8];
        if read_up_to(&mut self.reader, &mut raw)? < raw.len() {
            return Ok(None);
        }

        Ok(Some(ChunkHeader {
            id: ChunkId([raw[0], raw[1], raw[2], raw[3]]),
            size: LittleEndian::read_u32(&raw[4..8]),
            offset: offset + 8,
        }))
    }

    // A header read after a possibly missing pad byte: the id must be
    // printable and the payload must fit in the container.
    fn is_plausible(&self, header: &ChunkHeader) -> bool {
        header.id.is_printable() && u64::from(header.size) <= self.end.saturating_sub(header.offset)
    }

    /// The number of payload bytes that lie inside the container. A chunk
    /// claiming more than its parent holds is cut short.
    pub fn payload_len(&self, header: &ChunkHeader) -> u64 {
        let available = self.end.saturating_sub(header.offset);
        let size = u64::from(header.size);
        if size > available {
            debug!("chunk {} claims {} bytes but only {} remain", header.id, size, available);
            available
        } else {
            size
        }
    }

    /// Goes back to the first sub-chunk.
    pub fn rewind(&mut self) -> Result<()> {
        self.read_container_header()?;
        self.next_offset = self.base + 12;
        self.unpadded_offset = None;
        Ok(())
    }

    /// Positions the underlying stream at an absolute offset, typically a
    /// payload offset taken from a `ChunkHeader`. Chunk walking is not
    /// affected.
    pub fn seek_to(&mut self, offset: u64) -> io::Result<u64> {
        self.reader.seek(SeekFrom::Start(offset))
    }

    /// Forgets the container and moves the stream back to its start.
    pub fn reset(&mut self) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.container = None;
        self.base = 0;
        self.end = u64::max_value();
        self.next_offset = 0;
        self.unpadded_offset = None;
        self.data_size = None;
        Ok(())
    }

    /// The playing time of the last `data` chunk seen, for the given format.
    pub fn duration(&self, format: &AudioFormat) -> Result<Duration> {
        let data_size = self.data_size
            .ok_or_else(|| Error::malformed(ChunkId::DATA, "no data chunk seen yet"))?;
        format.duration_of(data_size)
            .ok_or_else(|| Error::malformed(ChunkId::FMT, "zero sample rate, channel count or bit depth"))
    }

    pub fn container(&self) -> Option<&ContainerHeader> {
        self.container.as_ref()
    }

    /// The payload size of the last `data` chunk seen.
    pub fn data_size(&self) -> Option<u64> {
        self.data_size
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Reads until `buf` is full or the stream ends, returning the byte count.
pub(crate) fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

/// Appends a little-endian `u32` to an in-memory payload.
pub(crate) fn push_u32(payload: &mut Vec<u8>, value: u32) {
    let mut raw = [0u8; 4];
    LittleEndian::write_u32(&mut raw, value);
    payload.extend_from_slice(&raw);
}

/// Writes a complete chunk: header, payload and pad byte. Returns the
/// number of bytes written.
pub(crate) fn write_chunk<W: Write>(writer: &mut W, id: ChunkId, payload: &[u8]) -> io::Result<u64> {
    let size = payload.len() as u32;
    writer.write_all(&id.0)?;
    writer.write_u32::<LittleEndian>(size)?;
    writer.write_all(payload)?;
    let mut written = 8 + u64::from(size);
    if size & 1 == 1 {
        writer.write_u8(0)?;
        written += 1;
    }
    Ok(written)
}

// MARK: Tests
