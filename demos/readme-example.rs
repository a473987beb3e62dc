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

extern crate riff_wave;

use std::env;
use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use riff_wave::{Metadata, Result, WaveReader, WaveWriter, FORMAT_PCM};

fn main() {
    let path = env::temp_dir().join("hello.wav");
    if let Err(err) = write_wave(&path).and_then(|_| read_wave(&path)) {
        eprintln!("{}: {}", path.display(), err);
        std::process::exit(1);
    }
}

fn write_wave(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let mut wave_writer = WaveWriter::new(writer, 44100, 16, 1, FORMAT_PCM)?;

    let mut metadata = Metadata::default();
    metadata.title = Some("Hello".to_string());
    metadata.software = Some("riff-wave".to_string());
    wave_writer.set_metadata(metadata);

    for n in 0..44100 {
        let t = f64::from(n) / 44100.0;
        let sample = (2.0 * PI * 440.0 * t).sin() * 16384.0;
        wave_writer.write_sample(sample as i32)?;
    }

    wave_writer.close()
}

fn read_wave(path: &Path) -> Result<()> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut wave_reader = WaveReader::new(reader);

    let title = wave_reader.read_metadata()?.title.clone();
    let buffer = wave_reader.read_full_pcm()?;
    println!("{}", wave_reader);
    println!("Title: {}", title.unwrap_or_default());
    println!("Read {} frames", buffer.num_frames());
    Ok(())
}
