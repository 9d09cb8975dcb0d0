use lofty::config::ParseOptions;
use lofty::error::LoftyError;
use lofty::flac::FlacFile;
use lofty::mp4::Mp4File;
use lofty::mpeg::MpegFile;
use lofty::ogg::VorbisFile;
use lofty::prelude::*;
use lofty::probe::Probe;
use std::fs::File;
use std::path::Path;
use std::time::Duration;

/// Decoder selected from a file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    Mp3,
    Mp4,
    Flac,
    Ogg,
    /// Any other container lofty can identify from its content.
    Generic,
}

/// Tags as read from a container, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTags {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub duration: Duration,
}

impl ContainerFormat {
    /// `extension` is expected lowercase, without the dot.
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "mp3" => ContainerFormat::Mp3,
            "mp4" | "m4a" => ContainerFormat::Mp4,
            "flac" => ContainerFormat::Flac,
            "ogg" => ContainerFormat::Ogg,
            _ => ContainerFormat::Generic,
        }
    }

    /// Decode the container and pull artist/album/title/duration.
    ///
    /// Fails only when the container itself cannot be parsed as this format;
    /// absent tags come back as `None`.
    pub fn read_tags(self, path: &Path) -> Result<RawTags, LoftyError> {
        match self {
            ContainerFormat::Mp3 => {
                let file: MpegFile = read_container(path)?;
                let duration = file.properties().duration();
                // ID3v2 wins field by field; ID3v1 fills what it lacks.
                Ok(RawTags::from_accessor(file.id3v2(), duration)
                    .or(RawTags::from_accessor(file.id3v1(), duration)))
            }
            ContainerFormat::Mp4 => {
                let file: Mp4File = read_container(path)?;
                Ok(RawTags::from_accessor(file.ilst(), file.properties().duration()))
            }
            ContainerFormat::Flac => {
                let file: FlacFile = read_container(path)?;
                Ok(RawTags::from_accessor(
                    file.vorbis_comments(),
                    file.properties().duration(),
                ))
            }
            ContainerFormat::Ogg => {
                let file: VorbisFile = read_container(path)?;
                Ok(RawTags::from_accessor(
                    Some(file.vorbis_comments()),
                    file.properties().duration(),
                ))
            }
            ContainerFormat::Generic => {
                let tagged_file = Probe::open(path)?.guess_file_type()?.read()?;
                let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());
                Ok(RawTags::from_accessor(tag, tagged_file.properties().duration()))
            }
        }
    }
}

impl RawTags {
    fn from_accessor<A: Accessor>(tag: Option<&A>, duration: Duration) -> Self {
        let Some(tag) = tag else {
            return Self {
                duration,
                ..Self::default()
            };
        };
        Self {
            artist: non_empty(tag.artist()),
            album: non_empty(tag.album()),
            title: non_empty(tag.title()),
            duration,
        }
    }

    /// Keep each present field of `self`, taking the rest from `fallback`.
    fn or(self, fallback: RawTags) -> Self {
        Self {
            artist: self.artist.or(fallback.artist),
            album: self.album.or(fallback.album),
            title: self.title.or(fallback.title),
            duration: self.duration,
        }
    }
}

fn read_container<F: AudioFile>(path: &Path) -> Result<F, LoftyError> {
    let mut file = File::open(path)?;
    F::read_from(&mut file, ParseOptions::new())
}

fn non_empty(value: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(ContainerFormat::from_extension("mp3"), ContainerFormat::Mp3);
        assert_eq!(ContainerFormat::from_extension("m4a"), ContainerFormat::Mp4);
        assert_eq!(ContainerFormat::from_extension("mp4"), ContainerFormat::Mp4);
        assert_eq!(ContainerFormat::from_extension("flac"), ContainerFormat::Flac);
        assert_eq!(ContainerFormat::from_extension("ogg"), ContainerFormat::Ogg);
        assert_eq!(ContainerFormat::from_extension("wav"), ContainerFormat::Generic);
        assert_eq!(ContainerFormat::from_extension(""), ContainerFormat::Generic);
    }

    #[test]
    fn test_fallback_fills_only_missing_fields() {
        let primary = RawTags {
            artist: Some("V2 Artist".to_string()),
            album: None,
            title: None,
            duration: Duration::from_secs(7),
        };
        let fallback = RawTags {
            artist: Some("V1 Artist".to_string()),
            album: Some("V1 Album".to_string()),
            title: None,
            duration: Duration::from_secs(7),
        };

        let merged = primary.or(fallback);
        assert_eq!(merged.artist.as_deref(), Some("V2 Artist"));
        assert_eq!(merged.album.as_deref(), Some("V1 Album"));
        assert_eq!(merged.title, None);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = ContainerFormat::Mp3.read_tags(Path::new("/nonexistent/file.mp3"));
        assert!(result.is_err());
    }
}
