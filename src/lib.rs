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

//! Reading and writing PCM wave files, sample loops and tags included.
//!
//! [`WaveReader`] decodes 8, 16, 24 and 32-bit integer PCM from any
//! `Read + Seek` stream into `i32` samples (see [`sample`](sample/index.html)
//! for how each depth maps onto them), and collects LIST INFO text tags,
//! "cue " points and "smpl" loops into a [`Metadata`]. [`WaveWriter`] does
//! the reverse and fills in the chunk sizes when it's closed;
//! [`BufferedWaveWriter`] does the same for sinks that can't seek.
//!
//! Files with a format tag other than PCM are still walked and their
//! headers read. Their samples are decoded as integers of the declared
//! width, so check [`FmtChunk::is_lpcm`] first if that matters.
//!
//! # Layout
//!
//! A wave file is a RIFF container: "RIFF", the size of everything that
//! follows, then "WAVE" and a run of chunks. Each chunk is a four byte id,
//! a 32-bit little-endian payload size and the payload, padded to an even
//! length. Sizes are 32 bits, so no file can be larger than 4 GiB.
//!
//! Chunk  | Required | Contents
//! ------ | :------: | ------------------------------------------------------
//! "fmt " | yes      | Format tag, channels, sample rate, byte rate, block align and bits per sample; 40 byte WAVE_FORMAT_EXTENSIBLE chunks add valid bits, a channel mask and the sub format.
//! "data" | yes      | Interleaved samples, one frame after another.
//! "LIST" | no       | With form type "INFO": text tags such as "INAM" (title) or "IART" (artist).
//! "cue " | no       | Marked positions, in frames.
//! "smpl" | no       | MIDI tuning and loop points for samplers.
//!
//! Writers don't agree on the order. The "fmt " chunk may come after
//! "data", metadata can sit on either side of the samples, and some
//! writers leave out pad bytes or never fill in the sizes. The
//! [`riff`](riff/index.html) walker copes with all of these.
//!
//! Format tags this library knows by name:
//!
//! Value  | Constant            | Description
//! -----: | ------------------- | ----------------------------------------
//!      1 | `FORMAT_PCM`        | Integer PCM
//!      3 | `FORMAT_IEEE_FLOAT` | IEEE floating point
//! 0xFFFE | `FORMAT_EXTENSIBLE` | The real tag is in the sub format
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//!
//! use riff_wave::{Metadata, WaveReader, WaveWriter, FORMAT_PCM};
//!
//! let mut wave_writer = WaveWriter::new(Cursor::new(Vec::new()), 8000, 16, 1, FORMAT_PCM)?;
//! let mut metadata = Metadata::default();
//! metadata.title = Some("ramp".to_string());
//! wave_writer.set_metadata(metadata);
//! wave_writer.write_samples(&[0, 1000, 2000, 3000])?;
//! wave_writer.close()?;
//!
//! let mut bytes = wave_writer.into_inner();
//! bytes.set_position(0);
//! let mut wave_reader = WaveReader::new(bytes);
//! assert_eq!(vec![0, 1000, 2000, 3000], wave_reader.read_full_pcm()?.data);
//! assert_eq!(Some("ramp"), wave_reader.read_metadata()?.title.as_ref().map(|s| s.as_str()));
//! # Ok::<(), riff_wave::Error>(())
//! ```
//!
//! See also:
//!
//! * [Multimedia Programming Interface and Data Specifications 1.0][1]
//! * [WAVEFORMATEXTENSIBLE structure][2]
//! * [Audio File Format Specifications][3]
//! * [LIST INFO chunk reference][4]
//!
//! [1]: https://www.aelius.com/njh/wavemetatools/doc/riffmci.pdf
//! [2]: https://msdn.microsoft.com/en-us/library/windows/desktop/dd757714(v=vs.85).aspx
//! [3]: http://www-mmsp.ece.mcgill.ca/documents/audioformats/wave/wave.html
//! [4]: http://bwfmetaedit.sourceforge.net/listinfo.html

// This is a helper macro that helps us validate results in our tests.
// Thank you bluss and durka42!
#[cfg(test)]
macro_rules! assert_matches {
    ($expected:pat $(if $guard:expr)*, $value:expr) => {
        match $value {
            $expected $(if $guard)* => {},
            ref actual => {
                panic!("assertion failed: `(left matches right)` (left: `{}`, right: `{:?}`",
                    stringify!($expected), actual);
            },
        }
    };
}

pub mod cue;
mod error;
mod format;
pub mod list;
mod metadata;
mod reader;
pub mod riff;
pub mod sample;
pub mod smpl;
mod writer;

pub use crate::cue::CuePoint;
pub use crate::error::{Error, Result};
pub use crate::format::{AudioFormat, FmtChunk, FormatExtension};
pub use crate::format::{FORMAT_EXTENSIBLE, FORMAT_IEEE_FLOAT, FORMAT_PCM};
pub use crate::metadata::{Metadata, INFO_TAGS};
pub use crate::reader::WaveReader;
pub use crate::riff::{Chunk, ChunkHeader, ChunkId, ContainerHeader, RiffWalker};
pub use crate::sample::SampleCodec;
pub use crate::smpl::{SampleLoop, SamplerInfo};
pub use crate::writer::{BufferedWaveWriter, WaveWriter};

/// Interleaved samples together with the format they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    pub data: Vec<i32>,
    pub format: AudioFormat,
}

impl SampleBuffer {
    pub fn new(data: Vec<i32>, format: AudioFormat) -> SampleBuffer {
        SampleBuffer {
            data: data,
            format: format,
        }
    }

    /// The number of whole frames. A trailing partial frame isn't counted.
    pub fn num_frames(&self) -> usize {
        match self.format.num_channels {
            0 => 0,
            num_channels => self.data.len() / usize::from(num_channels),
        }
    }

    /// Returns true if the samples don't divide evenly into frames, as
    /// happens when a stream is cut off in the middle of a frame.
    pub fn has_partial_frame(&self) -> bool {
        self.format.num_channels != 0 && self.data.len() % usize::from(self.format.num_channels) != 0
    }

    /// Returns the samples of one frame.
    pub fn frame(&self, index: usize) -> Option<&[i32]> {
        let num_channels = usize::from(self.format.num_channels);
        if index >= self.num_frames() {
            return None;
        }
        Some(&self.data[index * num_channels..(index + 1) * num_channels])
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// MARK: Tests

#[cfg(test)]
mod tests {
    use super::{AudioFormat, SampleBuffer};

    #[test]
    fn test_num_frames() {
        let buffer = SampleBuffer::new(vec![1, 2, 3, 4, 5], AudioFormat::pcm(2, 44100, 16));
        assert_eq!(2, buffer.num_frames());
        assert!(buffer.has_partial_frame());
        assert_eq!(5, buffer.len());
    }

    #[test]
    fn test_whole_frames() {
        let buffer = SampleBuffer::new(vec![1, 2, 3, 4], AudioFormat::pcm(2, 44100, 16));
        assert!(!buffer.has_partial_frame());
        assert_eq!(Some(&[3, 4][..]), buffer.frame(1));
        assert_eq!(None, buffer.frame(2));
    }

    #[test]
    fn test_zero_channels() {
        let buffer = SampleBuffer::new(vec![1, 2], AudioFormat::pcm(0, 44100, 16));
        assert_eq!(0, buffer.num_frames());
        assert!(!buffer.has_partial_frame());
        assert!(!buffer.is_empty());
    }
}
