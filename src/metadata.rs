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

//! Optional file metadata: LIST/INFO text tags, cue points and sampler
//! loops.
//!
//! See also:
//!
//! * [LIST INFO chunk reference][1]
//! * [The smpl and cue chunks][2]
//!
//! [1]: http://bwfmetaedit.sourceforge.net/listinfo.html
//! [2]: https://sites.google.com/site/musicgapi/technical-documents/wav-file-format

use crate::cue::CuePoint;
use crate::riff::ChunkId;
use crate::smpl::SamplerInfo;

/// The INFO tag ids this library understands, in the order they're written.
pub const INFO_TAGS: [ChunkId; 16] = [
    ChunkId(*b"IART"),
    ChunkId(*b"INAM"),
    ChunkId(*b"ICRD"),
    ChunkId(*b"ICOP"),
    ChunkId(*b"IARL"),
    ChunkId(*b"IENG"),
    ChunkId(*b"IGNR"),
    ChunkId(*b"IPRD"),
    ChunkId(*b"ISRC"),
    ChunkId(*b"ISBJ"),
    ChunkId(*b"ICMT"),
    ChunkId(*b"ITRK"),
    ChunkId(*b"ITCH"),
    ChunkId(*b"IKEY"),
    ChunkId(*b"IMED"),
    ChunkId(*b"ISFT"),
];

// Some writers use a lowercase track number id.
const ITRK_LOWERCASE: ChunkId = ChunkId(*b"itrk");

/// Everything besides the audio itself. Tags that weren't present are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub creation_date: Option<String>,
    pub copyright: Option<String>,
    /// Archival location.
    pub location: Option<String>,
    pub engineer: Option<String>,
    pub genre: Option<String>,
    /// The product, usually the album title.
    pub product: Option<String>,
    pub source: Option<String>,
    pub subject: Option<String>,
    pub comments: Option<String>,
    pub track_number: Option<String>,
    pub technician: Option<String>,
    pub keywords: Option<String>,
    pub medium: Option<String>,
    pub software: Option<String>,

    pub cue_points: Vec<CuePoint>,
    pub sampler_info: Option<SamplerInfo>,
}

impl Metadata {
    /// Returns the text stored under an INFO tag id.
    pub fn tag(&self, id: ChunkId) -> Option<&str> {
        let value = match &id.0 {
            b"IART" => &self.artist,
            b"INAM" => &self.title,
            b"ICRD" => &self.creation_date,
            b"ICOP" => &self.copyright,
            b"IARL" => &self.location,
            b"IENG" => &self.engineer,
            b"IGNR" => &self.genre,
            b"IPRD" => &self.product,
            b"ISRC" => &self.source,
            b"ISBJ" => &self.subject,
            b"ICMT" => &self.comments,
            b"ITRK" | b"itrk" => &self.track_number,
            b"ITCH" => &self.technician,
            b"IKEY" => &self.keywords,
            b"IMED" => &self.medium,
            b"ISFT" => &self.software,
            _ => return None,
        };
        value.as_ref().map(|s| s.as_str())
    }

    /// Returns the field for an INFO tag id, or `None` for ids without one.
    pub fn tag_mut(&mut self, id: ChunkId) -> Option<&mut Option<String>> {
        let field = match &id.0 {
            b"IART" => &mut self.artist,
            b"INAM" => &mut self.title,
            b"ICRD" => &mut self.creation_date,
            b"ICOP" => &mut self.copyright,
            b"IARL" => &mut self.location,
            b"IENG" => &mut self.engineer,
            b"IGNR" => &mut self.genre,
            b"IPRD" => &mut self.product,
            b"ISRC" => &mut self.source,
            b"ISBJ" => &mut self.subject,
            b"ICMT" => &mut self.comments,
            b"ITRK" | b"itrk" => &mut self.track_number,
            b"ITCH" => &mut self.technician,
            b"IKEY" => &mut self.keywords,
            b"IMED" => &mut self.medium,
            b"ISFT" => &mut self.software,
            _ => return None,
        };
        Some(field)
    }

    /// Iterates over the tags that are set, as `(id, text)` pairs.
    pub fn tags(&self) -> impl Iterator<Item = (ChunkId, &str)> {
        INFO_TAGS.iter().filter_map(move |&id| self.tag(id).map(|text| (id, text)))
    }

    pub fn has_tags(&self) -> bool {
        self.tags().next().is_some()
    }

    /// Returns true if there's nothing to write.
    pub fn is_empty(&self) -> bool {
        !self.has_tags() && self.cue_points.is_empty() && self.sampler_info.is_none()
    }

    pub(crate) fn is_track_number_alias(id: ChunkId) -> bool {
        id == ITRK_LOWERCASE
    }
}

#[cfg(test)]
mod tests {
    use super::{Metadata, INFO_TAGS};
    use crate::riff::ChunkId;

    #[test]
    fn test_every_info_tag_has_a_field() {
        let mut metadata = Metadata::default();
        for (i, &id) in INFO_TAGS.iter().enumerate() {
            *metadata.tag_mut(id).unwrap() = Some(format!("value {}", i));
        }
        for (i, &id) in INFO_TAGS.iter().enumerate() {
            assert_eq!(Some(format!("value {}", i).as_str()), metadata.tag(id));
        }
        assert_eq!(16, metadata.tags().count());
    }

    #[test]
    fn test_lowercase_track_number() {
        let mut metadata = Metadata::default();
        *metadata.tag_mut(ChunkId(*b"itrk")).unwrap() = Some("7".to_string());
        assert_eq!(Some("7"), metadata.tag(ChunkId(*b"ITRK")));
        assert_eq!(Some("7".to_string()), metadata.track_number);
        assert!(Metadata::is_track_number_alias(ChunkId(*b"itrk")));
    }

    #[test]
    fn test_unknown_ids() {
        let mut metadata = Metadata::default();
        assert!(metadata.tag_mut(ChunkId(*b"IXYZ")).is_none());
        assert_eq!(None, metadata.tag(ChunkId::DATA));
    }

    #[test]
    fn test_is_empty() {
        let mut metadata = Metadata::default();
        assert!(metadata.is_empty());
        assert!(!metadata.has_tags());
        metadata.genre = Some("techno".to_string());
        assert!(!metadata.is_empty());
        assert_eq!(vec![(ChunkId(*b"IGNR"), "techno")], metadata.tags().collect::<Vec<_>>());
    }
}
