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

use std::io::{Cursor, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use log::{debug, trace};

use crate::cue;
use crate::error::{Error, Result};
use crate::format::{AudioFormat, FmtChunk};
use crate::list;
use crate::metadata::Metadata;
use crate::riff::{write_chunk, ChunkId};
use crate::sample::SampleCodec;
use crate::smpl;
use crate::SampleBuffer;

// RIFF header, 24 byte fmt chunk and the data chunk header.
const PREAMBLE_SIZE: u64 = 12 + 24 + 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    DataOpen,
    Closed,
    Poisoned,
}

// MARK: Writing functions

/// Helper struct that takes ownership of a writer and can be used to write data
/// to a PCM wave file.
///
/// The headers are written along with the first samples. The chunk sizes
/// aren't known until [`close`](#method.close), which seeks back to fill
/// them in. A writer that hits an error refuses further writes.
#[derive(Debug)]
pub struct WaveWriter<W>
    where W: Write + Seek
{
    format: AudioFormat,
    codec: SampleCodec,
    state: State,
    // Stream offset of the "RIFF" tag.
    base: u64,
    bytes_written: u64,
    metadata: Option<Metadata>,
    scratch: Vec<u8>,

    // The underlying writer that we'll use to write data.
    writer: W,
}

impl<W> WaveWriter<W>
    where W: Write + Seek
{
    /// Returns a new wave writer for the given writer. Nothing is written
    /// until the first samples or `close`.
    pub fn new(writer: W,
               sample_rate: u32,
               bit_depth: u16,
               num_channels: u16,
               format_tag: u16)
               -> Result<WaveWriter<W>> {
        if num_channels == 0 {
            return Err(Error::NumChannelsIsZero);
        } else if sample_rate == 0 {
            return Err(Error::SampleRateIsZero);
        }
        let codec = SampleCodec::for_bit_depth(bit_depth)?;

        let format = AudioFormat {
            num_channels: num_channels,
            sample_rate: sample_rate,
            bit_depth: bit_depth,
            wav_format_tag: format_tag,
        };

        Ok(WaveWriter {
            format: format,
            codec: codec,
            state: State::Fresh,
            base: 0,
            bytes_written: 0,
            metadata: None,
            scratch: Vec::new(),
            writer: writer,
        })
    }

    /// Writes the samples of `buffer`. If the buffer was decoded at another
    /// bit depth, its samples are converted to this writer's. A buffer with
    /// an unsupported bit depth fails and closes the writer.
    pub fn write(&mut self, buffer: &SampleBuffer) -> Result<()> {
        self.check_open()?;
        let from = SampleCodec::for_bit_depth(buffer.format.bit_depth);
        let from = self.poison_on_err(from)?;
        if from == self.codec {
            return self.write_samples(&buffer.data);
        }

        debug!("converting {}-bit samples to {} bits", from.bit_depth(), self.codec.bit_depth());
        let to = self.codec;
        let converted: Vec<i32> = buffer.data.iter().map(|&s| SampleCodec::rescale(s, from, to)).collect();
        self.write_samples(&converted)
    }

    /// Writes interleaved samples in this writer's representation.
    pub fn write_samples(&mut self, samples: &[i32]) -> Result<()> {
        self.check_open()?;
        let result = self.encode_samples(samples);
        self.poison_on_err(result)
    }

    /// Writes a single sample.
    pub fn write_sample(&mut self, sample: i32) -> Result<()> {
        self.write_samples(&[sample])
    }

    fn encode_samples(&mut self, samples: &[i32]) -> Result<()> {
        if self.state == State::Fresh {
            self.write_preamble()?;
        }

        let len = (samples.len() * self.codec.width()) as u64;
        if self.bytes_written + len > u64::from(u32::max_value()) - PREAMBLE_SIZE {
            return Err(Error::malformed(ChunkId::DATA, "data chunk would exceed 4 GiB"));
        }

        self.scratch.clear();
        for &sample in samples {
            self.codec.encode(sample, &mut self.scratch)?;
        }
        self.writer.write_all(&self.scratch)?;
        self.bytes_written += len;
        trace!("wrote {} samples", samples.len());
        Ok(())
    }

    fn write_preamble(&mut self) -> Result<()> {
        self.base = self.writer.seek(SeekFrom::Current(0)).map_err(Error::NotSeekable)?;

        // The sizes are patched in by close.
        self.writer.write_all(&ChunkId::RIFF.0)?;
        self.writer.write_u32::<LittleEndian>(0)?;
        self.writer.write_all(&ChunkId::WAVE.0)?;
        FmtChunk::for_format(self.format).write(&mut self.writer)?;
        self.writer.write_all(&ChunkId::DATA.0)?;
        self.writer.write_u32::<LittleEndian>(0)?;

        self.state = State::DataOpen;
        debug!("wrote wave header for {:?}", self.format);
        Ok(())
    }

    /// Stages metadata to be written after the samples when the writer is
    /// closed.
    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = Some(metadata);
    }

    /// Finishes the file: pads the data chunk, appends the metadata chunks
    /// and fills in the chunk sizes. Closing twice does nothing.
    pub fn close(&mut self) -> Result<()> {
        match self.state {
            State::Closed => return Ok(()),
            State::Poisoned => return Err(Error::EncoderClosed),
            State::Fresh | State::DataOpen => {}
        }
        let result = self.finish();
        self.poison_on_err(result)?;
        self.state = State::Closed;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.state == State::Fresh {
            self.write_preamble()?;
        }

        let mut total = PREAMBLE_SIZE + self.bytes_written;
        if self.bytes_written & 1 == 1 {
            self.writer.write_u8(0)?;
            total += 1;
        }

        if let Some(metadata) = self.metadata.take() {
            total += self.write_metadata(&metadata)?;
            self.metadata = Some(metadata);
        }

        if total - 8 > u64::from(u32::max_value()) {
            return Err(Error::malformed(ChunkId::RIFF, "file would exceed 4 GiB"));
        }

        self.writer.seek(SeekFrom::Start(self.base + 4)).map_err(Error::NotSeekable)?;
        self.writer.write_u32::<LittleEndian>((total - 8) as u32)?;
        self.writer.seek(SeekFrom::Start(self.base + PREAMBLE_SIZE - 4)).map_err(Error::NotSeekable)?;
        self.writer.write_u32::<LittleEndian>(self.bytes_written as u32)?;
        self.writer.seek(SeekFrom::Start(self.base + total)).map_err(Error::NotSeekable)?;
        self.writer.flush()?;

        debug!("closed wave file of {} bytes with {} bytes of samples", total, self.bytes_written);
        Ok(())
    }

    fn write_metadata(&mut self, metadata: &Metadata) -> Result<u64> {
        let mut written = 0;
        if let Some(payload) = list::encode_info(metadata) {
            written += write_chunk(&mut self.writer, ChunkId::LIST, &payload)?;
        }
        if !metadata.cue_points.is_empty() {
            written += write_chunk(&mut self.writer, ChunkId::CUE, &cue::encode_cue(&metadata.cue_points))?;
        }
        if let Some(ref info) = metadata.sampler_info {
            written += write_chunk(&mut self.writer, ChunkId::SMPL, &smpl::encode_smpl(info))?;
        }
        Ok(written)
    }

    fn check_open(&self) -> Result<()> {
        match self.state {
            State::Closed | State::Poisoned => Err(Error::EncoderClosed),
            State::Fresh | State::DataOpen => Ok(()),
        }
    }

    fn poison_on_err<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref err) = result {
            debug!("wave writer failed: {}", err);
            self.state = State::Poisoned;
        }
        result
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// The number of whole frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.bytes_written / u64::from(self.format.block_align())
    }

    /// The number of sample bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes this writer, returning the underlying stream. Call `close`
    /// first, or the chunk sizes are left at zero.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

// Whether the finished file has reached a BufferedWaveWriter's sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sink {
    Pending,
    Written,
    Failed,
}

/// A wave writer for streams that can't seek, such as pipes. The whole file
/// is kept in memory and written out by [`close`](#method.close).
#[derive(Debug)]
pub struct BufferedWaveWriter<W>
    where W: Write
{
    encoder: WaveWriter<Cursor<Vec<u8>>>,
    sink: Sink,
    writer: W,
}

impl<W> BufferedWaveWriter<W>
    where W: Write
{
    pub fn new(writer: W,
               sample_rate: u32,
               bit_depth: u16,
               num_channels: u16,
               format_tag: u16)
               -> Result<BufferedWaveWriter<W>> {
        let encoder = WaveWriter::new(Cursor::new(Vec::new()),
                                      sample_rate,
                                      bit_depth,
                                      num_channels,
                                      format_tag)?;
        Ok(BufferedWaveWriter {
            encoder: encoder,
            sink: Sink::Pending,
            writer: writer,
        })
    }

    pub fn write(&mut self, buffer: &SampleBuffer) -> Result<()> {
        self.encoder.write(buffer)
    }

    pub fn write_samples(&mut self, samples: &[i32]) -> Result<()> {
        self.encoder.write_samples(samples)
    }

    pub fn write_sample(&mut self, sample: i32) -> Result<()> {
        self.encoder.write_sample(sample)
    }

    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.encoder.set_metadata(metadata);
    }

    /// Finishes the file and writes all of it to the stream. If the stream
    /// fails, the writer stays closed and every later call returns
    /// `EncoderClosed`.
    pub fn close(&mut self) -> Result<()> {
        match self.sink {
            Sink::Written => return Ok(()),
            Sink::Failed => return Err(Error::EncoderClosed),
            Sink::Pending => {}
        }
        self.encoder.close()?;

        let result = self.writer
            .write_all(self.encoder.get_ref().get_ref())
            .and_then(|_| self.writer.flush());
        match result {
            Ok(()) => {
                self.sink = Sink::Written;
                Ok(())
            }
            Err(err) => {
                debug!("buffered wave writer failed: {}", err);
                self.sink = Sink::Failed;
                Err(Error::from(err))
            }
        }
    }

    pub fn format(&self) -> AudioFormat {
        self.encoder.format()
    }

    pub fn frames_written(&self) -> u64 {
        self.encoder.frames_written()
    }

    pub fn bytes_written(&self) -> u64 {
        self.encoder.bytes_written()
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

// MARK: Tests
