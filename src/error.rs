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
use std::result;

use thiserror::Error;

use crate::riff::ChunkId;

/// Represents an error that occurred while reading or writing a wave file.
#[derive(Debug, Error)]
pub enum Error {
    /// The file does not start with a "RIFF" tag and chunk size.
    #[error("not a RIFF file")]
    NotARiffFile,
    /// The RIFF container holds something other than "WAVE".
    #[error("unsupported RIFF form type {0}")]
    UnsupportedFormType(ChunkId),
    /// A chunk header or payload doesn't match the expected layout.
    #[error("malformed {chunk} chunk: {reason}")]
    MalformedHeader {
        chunk: ChunkId,
        reason: &'static str,
    },
    /// Neither a "fmt " nor a "data" chunk could be found before the end of
    /// the container.
    #[error("PCM data chunk not found")]
    PcmChunkNotFound,
    /// Only 8-bit, 16-bit, 24-bit and 32-bit PCM files are supported.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),
    /// The stream ended in the middle of a chunk that had to be read whole.
    #[error("unexpected end of file in {chunk} chunk")]
    UnexpectedEof { chunk: ChunkId },
    /// The encoder was closed, or poisoned by an earlier error.
    #[error("the encoder is closed")]
    EncoderClosed,
    /// The underlying stream refused to seek.
    #[error("the stream is not seekable: {0}")]
    NotSeekable(#[source] io::Error),
    /// The number of channels is zero, which is invalid.
    #[error("number of channels is zero")]
    NumChannelsIsZero,
    /// The sample rate is zero, which is invalid.
    #[error("sample rate is zero")]
    SampleRateIsZero,
    /// An IO error occurred inside a known chunk.
    #[error("IO error in {chunk} chunk: {source}")]
    ChunkIo {
        chunk: ChunkId,
        #[source]
        source: io::Error,
    },
    /// An IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Represents a result when reading or writing a wave file.
pub type Result<T> = result::Result<T, Error>;

impl Error {
    /// Attaches a chunk id to a bare IO error. End of file inside a chunk
    /// becomes `UnexpectedEof`.
    pub(crate) fn in_chunk(self, chunk: ChunkId) -> Error {
        match self {
            Error::Io(err) => {
                if err.kind() == io::ErrorKind::UnexpectedEof {
                    Error::UnexpectedEof { chunk }
                } else {
                    Error::ChunkIo { chunk, source: err }
                }
            }
            other => other,
        }
    }

    pub(crate) fn malformed(chunk: ChunkId, reason: &'static str) -> Error {
        Error::MalformedHeader { chunk, reason }
    }

    /// Returns the underlying IO error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match *self {
            Error::NotSeekable(ref err) => Some(err),
            Error::ChunkIo { ref source, .. } => Some(source),
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

fn copy_io_error(err: &io::Error) -> io::Error {
    io::Error::new(err.kind(), err.to_string())
}

// io::Error isn't Clone, so the copy keeps its kind and message only.
impl Clone for Error {
    fn clone(&self) -> Error {
        match *self {
            Error::NotARiffFile => Error::NotARiffFile,
            Error::UnsupportedFormType(id) => Error::UnsupportedFormType(id),
            Error::MalformedHeader { chunk, reason } => Error::MalformedHeader { chunk, reason },
            Error::PcmChunkNotFound => Error::PcmChunkNotFound,
            Error::UnsupportedBitDepth(depth) => Error::UnsupportedBitDepth(depth),
            Error::UnexpectedEof { chunk } => Error::UnexpectedEof { chunk },
            Error::EncoderClosed => Error::EncoderClosed,
            Error::NotSeekable(ref err) => Error::NotSeekable(copy_io_error(err)),
            Error::NumChannelsIsZero => Error::NumChannelsIsZero,
            Error::SampleRateIsZero => Error::SampleRateIsZero,
            Error::ChunkIo { chunk, ref source } => Error::ChunkIo {
                chunk,
                source: copy_io_error(source),
            },
            Error::Io(ref err) => Error::Io(copy_io_error(err)),
        }
    }
}
