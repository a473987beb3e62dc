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

use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

use log::{debug, warn};

use crate::cue;
use crate::error::{Error, Result};
use crate::format::{AudioFormat, FmtChunk};
use crate::list;
use crate::metadata::Metadata;
use crate::riff::{read_up_to, ChunkHeader, ChunkId, RiffWalker};
use crate::sample::SampleCodec;
use crate::smpl;
use crate::SampleBuffer;

// Samples added per step when reading the whole data chunk.
const FULL_PCM_GROWTH: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    HeadersRead,
    PcmLocated,
    Streaming,
    Seeked,
    EndOfPcm,
}

// Where the sample bytes live in the stream.
#[derive(Debug, Clone, Copy)]
struct PcmRegion {
    offset: u64,
    len: u64,
}

/// Helper struct that takes ownership of a reader and can be used to read data
/// from a PCM wave file.
///
/// Nothing is read until it's needed: the headers are parsed by the first
/// call that requires them, and the stream is moved to the samples by the
/// first read. The first error is kept and returned again by every later
/// call until [`reset`](#method.reset).
pub struct WaveReader<R> {
    walker: RiffWalker<R>,
    state: State,
    fmt: Option<FmtChunk>,
    // A data chunk passed over while looking for "fmt ".
    data_header: Option<ChunkHeader>,
    pcm: Option<PcmRegion>,
    // Bytes consumed from the data chunk.
    position: u64,
    metadata: Option<Metadata>,
    err: Option<Error>,
    scratch: Vec<u8>,
}

impl<R> WaveReader<R>
    where R: Read + Seek
{
    /// Returns a new wave reader for the given reader. The stream should be
    /// positioned at the start of the RIFF header.
    pub fn new(reader: R) -> WaveReader<R> {
        WaveReader {
            walker: RiffWalker::new(reader),
            state: State::Fresh,
            fmt: None,
            data_header: None,
            pcm: None,
            position: 0,
            metadata: None,
            err: None,
            scratch: Vec::new(),
        }
    }

    /// Returns true if the headers can be read and describe playable audio:
    /// at least one channel, at least 8 bits per sample and a non-zero
    /// duration. Leaves the stream at the start of the samples.
    pub fn is_valid_file(&mut self) -> bool {
        let format = match self.read_info() {
            Ok(format) => format,
            Err(err) => {
                debug!("not a valid wave file: {}", err);
                return false;
            }
        };
        if format.num_channels < 1 || format.bit_depth < 8 {
            return false;
        }
        match self.duration() {
            Ok(duration) => duration > Duration::from_secs(0),
            Err(_) => false,
        }
    }

    /// Reads the headers up to and including the "fmt " chunk. Safe to call
    /// multiple times.
    pub fn read_info(&mut self) -> Result<AudioFormat> {
        if let Some(ref fmt) = self.fmt {
            return Ok(fmt.format);
        }
        self.check_err()?;

        let result = self.read_headers();
        let fmt = self.track(result)?;
        self.fmt = Some(fmt);
        self.state = State::HeadersRead;
        Ok(fmt.format)
    }

    fn read_headers(&mut self) -> Result<FmtChunk> {
        self.walker.read_container_header()?;

        loop {
            let mut chunk = match self.walker.next_chunk()? {
                Some(chunk) => chunk,
                None => return Err(Error::PcmChunkNotFound),
            };
            let header = *chunk.header();

            if header.id == ChunkId::FMT {
                return FmtChunk::read(&mut chunk, header.size).map_err(|err| err.in_chunk(ChunkId::FMT));
            } else if header.id == ChunkId::DATA {
                debug!("data chunk before fmt chunk at offset {}", header.offset);
                self.data_header = Some(header);
            } else {
                debug!("skipping {} chunk while looking for fmt", header.id);
            }
        }
    }

    /// Moves the stream to the first sample of the "data" chunk. Does
    /// nothing if the samples were already located.
    pub fn forward_to_pcm(&mut self) -> Result<()> {
        self.read_info()?;
        self.check_err()?;
        if self.pcm.is_some() {
            return Ok(());
        }

        let result = self.locate_pcm();
        let region = self.track(result)?;
        self.pcm = Some(region);
        self.position = 0;
        self.state = State::PcmLocated;
        debug!("PCM data of {} bytes at offset {}", region.len, region.offset);
        Ok(())
    }

    fn locate_pcm(&mut self) -> Result<PcmRegion> {
        let header = match self.data_header {
            Some(header) => header,
            None => loop {
                match self.walker.next_header()? {
                    Some(header) if header.id == ChunkId::DATA => break header,
                    Some(header) => debug!("skipping {} chunk while looking for data", header.id),
                    None => return Err(Error::PcmChunkNotFound),
                }
            },
        };
        self.data_header = Some(header);

        let region = PcmRegion {
            offset: header.offset,
            len: self.walker.payload_len(&header),
        };
        self.walker.seek_to(region.offset)?;
        Ok(region)
    }

    /// Decodes samples into `buf` and returns how many were read. Returns
    /// fewer than `buf.len()` at the end of the data, and 0 after it.
    ///
    /// A stream that ends in the middle of a sample ends the data; the
    /// partial sample is dropped.
    pub fn read_samples(&mut self, buf: &mut [i32]) -> Result<usize> {
        self.forward_to_pcm()?;
        let result = self.decode_samples(buf);
        self.track(result)
    }

    fn decode_samples(&mut self, buf: &mut [i32]) -> Result<usize> {
        let codec = self.codec()?;
        let region = match self.pcm {
            Some(region) => region,
            None => return Err(Error::PcmChunkNotFound),
        };

        let width = codec.width() as u64;
        let available = (region.len - self.position) / width;
        let count = available.min(buf.len() as u64) as usize;
        if count == 0 {
            if self.state != State::EndOfPcm {
                debug!("end of PCM data after {} bytes", self.position);
                self.state = State::EndOfPcm;
            }
            return Ok(0);
        }

        let wanted = count * codec.width();
        self.scratch.resize(wanted, 0);
        let got = read_up_to(self.walker.get_mut(), &mut self.scratch[..wanted])
            .map_err(|err| Error::from(err).in_chunk(ChunkId::DATA))?;
        let decoded = got / codec.width();
        codec.decode_into(&self.scratch[..decoded * codec.width()], &mut buf[..decoded]);

        if got < wanted {
            warn!("PCM data ends {} bytes early", region.len - self.position - got as u64);
            self.position = region.len;
        } else {
            self.position += got as u64;
        }
        self.state = State::Streaming;
        Ok(decoded)
    }

    /// Fills `buffer.data` like [`read_samples`](#method.read_samples) and
    /// sets the buffer's format.
    pub fn read_pcm(&mut self, buffer: &mut SampleBuffer) -> Result<usize> {
        let read = self.read_samples(&mut buffer.data)?;
        if let Some(format) = self.format() {
            buffer.format = format;
        }
        Ok(read)
    }

    /// Reads every remaining sample into memory.
    pub fn read_full_pcm(&mut self) -> Result<SampleBuffer> {
        self.forward_to_pcm()?;
        let codec = self.track_codec()?;
        let format = self.read_info()?;

        // The declared size may be a placeholder far larger than the stream.
        let expected = self.pcm.map_or(0, |region| (region.len - self.position) / codec.width() as u64);
        let mut data: Vec<i32> = Vec::with_capacity(expected.min(FULL_PCM_GROWTH as u64) as usize);
        loop {
            let filled = data.len();
            data.resize(filled + FULL_PCM_GROWTH, 0);
            let read = self.read_samples(&mut data[filled..])?;
            data.truncate(filled + read);
            if read == 0 {
                break;
            }
        }

        Ok(SampleBuffer::new(data, format))
    }

    /// Scans every chunk for LIST/INFO, "cue " and "smpl" metadata. The
    /// sample position is kept.
    pub fn read_metadata(&mut self) -> Result<&Metadata> {
        self.read_info()?;

        self.metadata = None;
        let result = self.scan_metadata();
        if let Some(region) = self.pcm {
            let restored = self.walker.seek_to(region.offset + self.position).map_err(Error::from);
            self.track(restored)?;
        }
        let metadata = result?;
        Ok(&*self.metadata.get_or_insert(metadata))
    }

    fn scan_metadata(&mut self) -> Result<Metadata> {
        let mut metadata = Metadata::default();
        let mut data_header = None;

        self.walker.rewind()?;
        while let Some(mut chunk) = self.walker.next_chunk()? {
            let id = chunk.id();
            if id == ChunkId::LIST {
                let payload = chunk.read_to_vec()?;
                list::decode_info(&payload, &mut metadata)?;
            } else if id == ChunkId::CUE {
                let payload = chunk.read_to_vec()?;
                metadata.cue_points = cue::decode_cue(&payload)?;
            } else if id == ChunkId::SMPL {
                let payload = chunk.read_to_vec()?;
                metadata.sampler_info = Some(smpl::decode_smpl(&payload)?);
            } else if id == ChunkId::DATA {
                data_header = Some(*chunk.header());
            } else {
                debug!("no metadata in {} chunk", id);
            }
        }

        if self.data_header.is_none() {
            self.data_header = data_header;
        }
        Ok(metadata)
    }

    /// Moves within the samples. Offsets are bytes from the start of the
    /// data chunk and are clamped to it. Returns the new offset.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        self.forward_to_pcm()?;
        let region = match self.pcm {
            Some(region) => region,
            None => return Err(Error::PcmChunkNotFound),
        };

        let target = match pos {
            SeekFrom::Start(offset) => offset as i128,
            SeekFrom::Current(delta) => self.position as i128 + delta as i128,
            SeekFrom::End(delta) => region.len as i128 + delta as i128,
        };
        let target = target.max(0).min(region.len as i128) as u64;

        self.walker.seek_to(region.offset + target).map_err(Error::NotSeekable)?;
        self.position = target;
        self.state = State::Seeked;
        Ok(target)
    }

    /// The playing time of the data chunk.
    pub fn duration(&mut self) -> Result<Duration> {
        let format = self.read_info()?;
        if self.walker.data_size().is_none() {
            self.forward_to_pcm()?;
        }
        self.walker.duration(&format)
    }

    /// Forgets everything read so far and moves the stream back to its start.
    pub fn reset(&mut self) -> Result<()> {
        self.walker.reset().map_err(Error::NotSeekable)?;
        self.state = State::Fresh;
        self.fmt = None;
        self.data_header = None;
        self.pcm = None;
        self.position = 0;
        self.metadata = None;
        self.err = None;
        Ok(())
    }

    fn codec(&self) -> Result<SampleCodec> {
        match self.fmt {
            Some(ref fmt) => SampleCodec::for_bit_depth(fmt.format.bit_depth),
            None => Err(Error::malformed(ChunkId::FMT, "headers not read")),
        }
    }

    fn track_codec(&mut self) -> Result<SampleCodec> {
        let codec = self.codec();
        self.track(codec)
    }

    fn check_err(&self) -> Result<()> {
        match self.err {
            Some(ref err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    // Keeps the first error so later calls fail the same way.
    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref err) = result {
            if self.err.is_none() {
                debug!("wave reader failed: {}", err);
                self.err = Some(err.clone());
            }
        }
        result
    }

    pub fn format(&self) -> Option<AudioFormat> {
        self.fmt.map(|fmt| fmt.format)
    }

    /// The "fmt " chunk as it was read, including the extensible fields.
    pub fn fmt_chunk(&self) -> Option<&FmtChunk> {
        self.fmt.as_ref()
    }

    pub fn bit_depth(&self) -> Option<u16> {
        self.fmt.map(|fmt| fmt.format.bit_depth)
    }

    /// The size of the data chunk in bytes, once it has been found.
    pub fn pcm_len(&self) -> Option<u64> {
        self.pcm.map(|region| region.len)
    }

    /// The stream offset of the first sample, once it has been found.
    pub fn pcm_offset(&self) -> Option<u64> {
        self.pcm.map(|region| region.offset)
    }

    pub fn was_pcm_accessed(&self) -> bool {
        self.pcm.is_some()
    }

    /// Returns true once every sample has been read.
    pub fn is_eof(&self) -> bool {
        self.state == State::EndOfPcm
    }

    /// The error that stopped this reader, if any.
    pub fn err(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// The metadata from the last call to
    /// [`read_metadata`](#method.read_metadata).
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn get_ref(&self) -> &R {
        self.walker.get_ref()
    }

    /// Consumes this reader, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.walker.into_inner()
    }
}

impl<R> fmt::Display for WaveReader<R>
    where R: Read + Seek
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (form_type, format) = match (self.walker.container(), self.fmt) {
            (Some(container), Some(fmt)) => (container.form_type, fmt.format),
            _ => return write!(f, "Format: unknown"),
        };
        write!(f,
               "Format: {} - {} channels @ {} / {} bits - Duration: ",
               form_type,
               format.num_channels,
               format.sample_rate,
               format.bit_depth)?;
        match self.walker.duration(&format) {
            Ok(duration) => write!(f, "{:.6} seconds", duration.as_secs_f64()),
            Err(_) => write!(f, "unknown"),
        }
    }
}

// MARK: Tests

#[cfg(test)]
mod tests {
    use std::io::{Cursor, SeekFrom};

    use super::WaveReader;
    use crate::error::Error;
    use crate::format::AudioFormat;
    use crate::riff::ChunkId;
    use crate::SampleBuffer;

    const MONO_16: &[u8] = b"RIFF\x2C\x00\x00\x00WAVE\
                             fmt \x10\x00\x00\x00\
                             \x01\x00\x01\x00\x44\xAC\x00\x00\x88\x58\x01\x00\x02\x00\x10\x00\
                             data\x08\x00\x00\x00\
                             \x00\x00\x01\x00\xFF\x7F\x00\x80";

    fn reader(bytes: &[u8]) -> WaveReader<Cursor<Vec<u8>>> {
        WaveReader::new(Cursor::new(bytes.to_vec()))
    }

    #[test]
    fn test_read_info() {
        let mut wave_reader = reader(MONO_16);
        assert_eq!(AudioFormat::pcm(1, 44100, 16), wave_reader.read_info().unwrap());
        assert_eq!(88200, wave_reader.fmt_chunk().unwrap().avg_bytes_per_sec);
        assert_eq!(2, wave_reader.fmt_chunk().unwrap().block_align);
        assert!(!wave_reader.was_pcm_accessed());
        // Again, from the cache.
        assert_eq!(AudioFormat::pcm(1, 44100, 16), wave_reader.read_info().unwrap());
    }

    #[test]
    fn test_read_samples() {
        let mut wave_reader = reader(MONO_16);
        let mut buf = [0i32; 3];
        assert_eq!(3, wave_reader.read_samples(&mut buf).unwrap());
        assert_eq!([0, 1, 32767], buf);
        assert_eq!(1, wave_reader.read_samples(&mut buf).unwrap());
        assert_eq!(-32768, buf[0]);
        assert!(!wave_reader.is_eof());
        assert_eq!(0, wave_reader.read_samples(&mut buf).unwrap());
        assert!(wave_reader.is_eof());
        assert_eq!(Some(8), wave_reader.pcm_len());
        assert_eq!(Some(44), wave_reader.pcm_offset());
    }

    #[test]
    fn test_read_pcm_sets_format() {
        let mut wave_reader = reader(MONO_16);
        let mut buffer = SampleBuffer::new(vec![0; 8], AudioFormat::pcm(2, 8000, 8));
        assert_eq!(4, wave_reader.read_pcm(&mut buffer).unwrap());
        assert_eq!(AudioFormat::pcm(1, 44100, 16), buffer.format);
        assert_eq!(&[0, 1, 32767, -32768], &buffer.data[..4]);
    }

    #[test]
    fn test_data_before_fmt() {
        let bytes = b"RIFF\x2C\x00\x00\x00WAVE\
                      data\x08\x00\x00\x00\
                      \x00\x00\x01\x00\xFF\x7F\x00\x80\
                      fmt \x10\x00\x00\x00\
                      \x01\x00\x01\x00\x44\xAC\x00\x00\x88\x58\x01\x00\x02\x00\x10\x00";
        let mut wave_reader = reader(bytes);
        assert_eq!(AudioFormat::pcm(1, 44100, 16), wave_reader.read_info().unwrap());
        let buffer = wave_reader.read_full_pcm().unwrap();
        assert_eq!(vec![0, 1, 32767, -32768], buffer.data);
        assert_eq!(Some(20), wave_reader.pcm_offset());
    }

    #[test]
    fn test_missing_data_chunk() {
        let bytes = b"RIFF\x28\x00\x00\x00WAVE\
                      fmt \x10\x00\x00\x00\
                      \x01\x00\x01\x00\x44\xAC\x00\x00\x88\x58\x01\x00\x02\x00\x10\x00\
                      junk\x04\x00\x00\x00\x00\x00\x00\x00";
        let mut wave_reader = reader(bytes);
        assert!(wave_reader.read_info().is_ok());
        assert_matches!(Err(Error::PcmChunkNotFound), wave_reader.forward_to_pcm());
        // The error sticks.
        let mut buf = [0i32; 4];
        assert_matches!(Err(Error::PcmChunkNotFound), wave_reader.read_samples(&mut buf));
        assert_matches!(Some(&Error::PcmChunkNotFound), wave_reader.err());
    }

    #[test]
    fn test_missing_fmt_chunk() {
        let bytes = b"RIFF\x10\x00\x00\x00WAVE\
                      data\x04\x00\x00\x00\x00\x00\x00\x00";
        let mut wave_reader = reader(bytes);
        assert_matches!(Err(Error::PcmChunkNotFound), wave_reader.read_info());
    }

    #[test]
    fn test_fmt_chunk_too_small() {
        let bytes = b"RIFF\x1A\x00\x00\x00WAVE\
                      fmt \x0E\x00\x00\x00\
                      \x01\x00\x01\x00\x44\xAC\x00\x00\x88\x58\x01\x00\x02\x00";
        let mut wave_reader = reader(bytes);
        assert_matches!(Err(Error::MalformedHeader { chunk: ChunkId::FMT, .. }), wave_reader.read_info());
    }

    #[test]
    fn test_fmt_chunk_cut_short_by_eof() {
        let bytes = b"RIFF\x00\x00\x00\x00WAVE\
                      fmt \x10\x00\x00\x00\
                      \x01\x00\x01\x00\x44\xAC";
        let mut wave_reader = reader(bytes);
        assert_matches!(Err(Error::UnexpectedEof { chunk: ChunkId::FMT }), wave_reader.read_info());
    }

    #[test]
    fn test_unsupported_bit_depth_fails_on_read() {
        let bytes = b"RIFF\x2C\x00\x00\x00WAVE\
                      fmt \x10\x00\x00\x00\
                      \x01\x00\x01\x00\x44\xAC\x00\x00\x88\x58\x01\x00\x02\x00\x0C\x00\
                      data\x08\x00\x00\x00\
                      \x00\x00\x00\x00\x00\x00\x00\x00";
        let mut wave_reader = reader(bytes);
        assert_eq!(12, wave_reader.read_info().unwrap().bit_depth);
        let mut buf = [0i32; 4];
        assert_matches!(Err(Error::UnsupportedBitDepth(12)), wave_reader.read_samples(&mut buf));
    }

    #[test]
    fn test_not_a_riff_file_is_not_valid() {
        let mut wave_reader = reader(b"ID3\x03\x00\x00\x00\x00\x00\x00\x00\x00");
        assert!(!wave_reader.is_valid_file());
        assert_matches!(Some(&Error::NotARiffFile), wave_reader.err());
    }

    #[test]
    fn test_is_valid_file() {
        let mut wave_reader = reader(MONO_16);
        assert!(wave_reader.is_valid_file());
        assert_eq!(Some(44), wave_reader.pcm_offset());
    }

    #[test]
    fn test_empty_data_is_not_valid() {
        let bytes = b"RIFF\x24\x00\x00\x00WAVE\
                      fmt \x10\x00\x00\x00\
                      \x01\x00\x01\x00\x44\xAC\x00\x00\x88\x58\x01\x00\x02\x00\x10\x00\
                      data\x00\x00\x00\x00";
        let mut wave_reader = reader(bytes);
        assert!(!wave_reader.is_valid_file());
        assert!(wave_reader.err().is_none());
    }

    #[test]
    fn test_truncated_sample_ends_pcm() {
        // Declares 8 bytes, holds 5.
        let bytes = b"RIFF\x00\x00\x00\x00WAVE\
                      fmt \x10\x00\x00\x00\
                      \x01\x00\x01\x00\x44\xAC\x00\x00\x88\x58\x01\x00\x02\x00\x10\x00\
                      data\x08\x00\x00\x00\
                      \x01\x00\x02\x00\x03";
        let mut wave_reader = reader(bytes);
        let buffer = wave_reader.read_full_pcm().unwrap();
        assert_eq!(vec![1, 2], buffer.data);
        assert!(wave_reader.err().is_none());
        assert!(wave_reader.is_eof());
    }

    #[test]
    fn test_trailing_partial_sample_is_ignored() {
        let bytes = b"RIFF\x28\x00\x00\x00WAVE\
                      fmt \x10\x00\x00\x00\
                      \x01\x00\x01\x00\x44\xAC\x00\x00\x88\x58\x01\x00\x02\x00\x10\x00\
                      data\x03\x00\x00\x00\
                      \x05\x00\x06\x00";
        let mut wave_reader = reader(bytes);
        assert_eq!(vec![5], wave_reader.read_full_pcm().unwrap().data);
    }

    #[test]
    fn test_seek() {
        let mut wave_reader = reader(MONO_16);
        let mut buf = [0i32; 1];

        assert_eq!(4, wave_reader.seek(SeekFrom::Start(4)).unwrap());
        wave_reader.read_samples(&mut buf).unwrap();
        assert_eq!(32767, buf[0]);

        assert_eq!(2, wave_reader.seek(SeekFrom::Current(-4)).unwrap());
        wave_reader.read_samples(&mut buf).unwrap();
        assert_eq!(1, buf[0]);

        assert_eq!(6, wave_reader.seek(SeekFrom::End(-2)).unwrap());
        wave_reader.read_samples(&mut buf).unwrap();
        assert_eq!(-32768, buf[0]);

        assert_eq!(0, wave_reader.seek(SeekFrom::Current(-100)).unwrap());
        assert_eq!(8, wave_reader.seek(SeekFrom::Start(100)).unwrap());
        assert_eq!(0, wave_reader.read_samples(&mut buf).unwrap());
    }

    #[test]
    fn test_read_metadata_keeps_position() {
        let bytes = b"RIFF\x48\x00\x00\x00WAVE\
                      fmt \x10\x00\x00\x00\
                      \x01\x00\x01\x00\x44\xAC\x00\x00\x88\x58\x01\x00\x02\x00\x10\x00\
                      data\x08\x00\x00\x00\
                      \x00\x00\x01\x00\xFF\x7F\x00\x80\
                      LIST\x14\x00\x00\x00INFO\
                      IART\x07\x00\x00\x00artist\x00\x00";
        let mut wave_reader = reader(bytes);
        let mut buf = [0i32; 2];
        wave_reader.read_samples(&mut buf).unwrap();

        let artist = wave_reader.read_metadata().unwrap().artist.clone();
        assert_eq!(Some("artist".to_string()), artist);
        assert_eq!(Some("artist".to_string()), wave_reader.metadata().unwrap().artist);

        wave_reader.read_samples(&mut buf).unwrap();
        assert_eq!([32767, -32768], buf);
    }

    #[test]
    fn test_read_metadata_before_pcm() {
        let bytes = b"RIFF\x48\x00\x00\x00WAVE\
                      LIST\x14\x00\x00\x00INFO\
                      IART\x07\x00\x00\x00artist\x00\x00\
                      fmt \x10\x00\x00\x00\
                      \x01\x00\x01\x00\x44\xAC\x00\x00\x88\x58\x01\x00\x02\x00\x10\x00\
                      data\x08\x00\x00\x00\
                      \x00\x00\x01\x00\xFF\x7F\x00\x80";
        let mut wave_reader = reader(bytes);
        assert!(wave_reader.read_metadata().unwrap().artist.is_some());
        assert_eq!(vec![0, 1, 32767, -32768], wave_reader.read_full_pcm().unwrap().data);
    }

    #[test]
    fn test_duration_and_display() {
        let mut wave_reader = reader(MONO_16);
        assert_eq!("Format: unknown", wave_reader.to_string());
        let duration = wave_reader.duration().unwrap();
        assert_eq!(90_702, duration.as_nanos());
        assert_eq!("Format: WAVE - 1 channels @ 44100 / 16 bits - Duration: 0.000091 seconds",
                   wave_reader.to_string());
    }

    #[test]
    fn test_reset() {
        let mut wave_reader = reader(MONO_16);
        let first = wave_reader.read_full_pcm().unwrap();
        assert!(wave_reader.is_eof());

        wave_reader.reset().unwrap();
        assert!(!wave_reader.was_pcm_accessed());
        assert_eq!(None, wave_reader.format());
        assert_eq!(first, wave_reader.read_full_pcm().unwrap());
    }

    #[test]
    fn test_reset_clears_error() {
        let mut wave_reader = reader(b"RIFF");
        assert!(wave_reader.read_info().is_err());
        wave_reader.reset().unwrap();
        assert!(wave_reader.err().is_none());
        assert!(wave_reader.read_info().is_err());
    }
}
