//! Builds wave files byte by byte for the integration tests.

#![allow(dead_code)]

use std::f64::consts::PI;

use byteorder::{LittleEndian, WriteBytesExt};

use riff_wave::{AudioFormat, SampleCodec};

/// Assembles a RIFF WAVE file from raw chunks.
pub struct RiffBuilder {
    chunks: Vec<u8>,
    riff_size: Option<u32>,
}

impl RiffBuilder {
    pub fn new() -> RiffBuilder {
        RiffBuilder {
            chunks: Vec::new(),
            riff_size: None,
        }
    }

    /// Appends a chunk, padding odd payloads.
    pub fn chunk(mut self, id: &[u8; 4], payload: &[u8]) -> RiffBuilder {
        self.chunks.extend_from_slice(id);
        self.chunks.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
        self.chunks.extend_from_slice(payload);
        if payload.len() % 2 == 1 {
            self.chunks.push(0);
        }
        self
    }

    /// Appends a chunk whose odd payload is missing its pad byte.
    pub fn unpadded_chunk(mut self, id: &[u8; 4], payload: &[u8]) -> RiffBuilder {
        self.chunks.extend_from_slice(id);
        self.chunks.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
        self.chunks.extend_from_slice(payload);
        self
    }

    /// Appends a chunk header declaring `size` bytes, followed by `payload`
    /// whatever its length.
    pub fn chunk_with_size(mut self, id: &[u8; 4], size: u32, payload: &[u8]) -> RiffBuilder {
        self.chunks.extend_from_slice(id);
        self.chunks.write_u32::<LittleEndian>(size).unwrap();
        self.chunks.extend_from_slice(payload);
        self
    }

    pub fn fmt(self, format: AudioFormat) -> RiffBuilder {
        self.chunk(b"fmt ", &fmt_payload(format))
    }

    pub fn data(self, payload: &[u8]) -> RiffBuilder {
        self.chunk(b"data", payload)
    }

    /// Overrides the RIFF size field.
    pub fn riff_size(mut self, size: u32) -> RiffBuilder {
        self.riff_size = Some(size);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let size = self.riff_size.unwrap_or(4 + self.chunks.len() as u32);
        let mut bytes = Vec::with_capacity(12 + self.chunks.len());
        bytes.extend_from_slice(b"RIFF");
        bytes.write_u32::<LittleEndian>(size).unwrap();
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(&self.chunks);
        bytes
    }
}

pub fn fmt_payload(format: AudioFormat) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.write_u16::<LittleEndian>(format.wav_format_tag).unwrap();
    payload.write_u16::<LittleEndian>(format.num_channels).unwrap();
    payload.write_u32::<LittleEndian>(format.sample_rate).unwrap();
    payload.write_u32::<LittleEndian>(format.avg_bytes_per_sec()).unwrap();
    payload.write_u16::<LittleEndian>(format.block_align()).unwrap();
    payload.write_u16::<LittleEndian>(format.bit_depth).unwrap();
    payload
}

/// Encodes samples the way they're stored in a data chunk.
pub fn pcm_bytes(bit_depth: u16, samples: &[i32]) -> Vec<u8> {
    let codec = SampleCodec::for_bit_depth(bit_depth).unwrap();
    let mut bytes = Vec::new();
    for &sample in samples {
        codec.encode(sample, &mut bytes).unwrap();
    }
    bytes
}

/// Builds a LIST INFO payload from `(id, text)` pairs.
pub fn info_payload(tags: &[(&[u8; 4], &str)]) -> Vec<u8> {
    let mut payload = b"INFO".to_vec();
    for &(id, text) in tags {
        let size = text.len() + 1;
        payload.extend_from_slice(id);
        payload.write_u32::<LittleEndian>(size as u32).unwrap();
        payload.extend_from_slice(text.as_bytes());
        payload.push(0);
        if size % 2 == 1 {
            payload.push(0);
        }
    }
    payload
}

/// A 16-bit sine wave at full scale, starting at zero.
pub fn sine(frequency: f64, sample_rate: u32, len: usize) -> Vec<i32> {
    (0..len)
        .map(|i| {
            let t = i as f64 / f64::from(sample_rate);
            ((2.0 * PI * frequency * t).sin() * 32767.0) as i32
        })
        .collect()
}

pub const KICK_SAMPLE_RATE: u32 = 22050;
pub const KICK_LEN: usize = 4484;

/// A decaying low sine standing in for a bass drum: 22050 Hz, 16-bit mono.
pub fn kick() -> Vec<i32> {
    (0..KICK_LEN)
        .map(|i| {
            let t = i as f64 / f64::from(KICK_SAMPLE_RATE);
            let envelope = (-t * 25.0).exp();
            ((2.0 * PI * 55.0 * t).sin() * envelope * 30000.0) as i32
        })
        .collect()
}

pub fn kick_file() -> Vec<u8> {
    RiffBuilder::new()
        .fmt(AudioFormat::pcm(1, KICK_SAMPLE_RATE, 16))
        .data(&pcm_bytes(16, &kick()))
        .build()
}

/// A file laid out like FL Studio's exports: "fmt ", "smpl", "cue " and
/// then the samples.
pub fn fl_studio_file() -> Vec<u8> {
    let mut smpl = Vec::new();
    for &field in &[0u32, 0, 22675, 60, 0, 0, 0, 1, 0] {
        smpl.write_u32::<LittleEndian>(field).unwrap();
    }
    smpl.extend_from_slice(&[0, 0, 2, 0]);
    for &field in &[1024u32, 0, 107999, 0, 0] {
        smpl.write_u32::<LittleEndian>(field).unwrap();
    }

    let mut cue = Vec::new();
    cue.write_u32::<LittleEndian>(1).unwrap();
    cue.write_u32::<LittleEndian>(1).unwrap();
    cue.write_u32::<LittleEndian>(0).unwrap();
    cue.extend_from_slice(b"data");
    for _ in 0..3 {
        cue.write_u32::<LittleEndian>(0).unwrap();
    }

    RiffBuilder::new()
        .fmt(AudioFormat::pcm(2, 44100, 16))
        .chunk(b"smpl", &smpl)
        .chunk(b"cue ", &cue)
        .data(&pcm_bytes(16, &[1, -1, 2, -2]))
        .build()
}
