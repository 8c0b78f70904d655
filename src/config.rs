//! Album configuration.
//!
//! Everything the application shows comes from one JSON document: names,
//! artwork references, colors, the track list with lyrics, credits, social
//! links and the footer. It is read once at startup from a file or a URL.
use std::fs;
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use log::{info, warn};
use regex::Regex;
use serde::Deserialize;

use crate::client::ConfigClient;
use crate::viewer::PageIndex;

static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})$")
        .expect("Invalid hex color regex")
});

/// The album configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumConfig
{
    /// Album title
    pub album_name: String,
    /// Artist or band name
    pub artist_name: String,
    /// Window title, defaults to "artist – album"
    #[serde(default)]
    pub page_title: Option<String>,
    /// Artwork references in page order
    #[serde(default)]
    pub images: Images,
    /// Color overrides
    #[serde(default)]
    pub colors: Colors,
    /// Track list in play order
    pub tracks: Vec<Track>,
    /// Credits section
    #[serde(default)]
    pub credits: Credits,
    /// Social links
    #[serde(default)]
    pub links: Links,
    /// Footer message
    #[serde(default)]
    pub footer: Option<String>,
    /// File name of the full album download
    #[serde(default)]
    pub download_zip: Option<String>,
}

/// Artwork references, one per page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Images
{
    /// Front cover
    pub front: Option<String>,
    /// Front of the lyrics sheet
    pub lyrics: Option<String>,
    /// Back of the lyrics sheet
    pub lyrics_back: Option<String>,
    /// Back cover
    pub back: Option<String>,
}

/// Optional `#RRGGBB` color overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Colors
{
    /// Accent color
    pub primary: Option<String>,
    /// Background of the artwork and player area
    pub hero_background: Option<String>,
    /// Page background
    pub background: Option<String>,
    /// Body text
    pub text: Option<String>,
}

/// Record side of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Side
{
    /// Side A
    A,
    /// Side B
    B,
}

impl Side
{
    /// Section heading for the side.
    #[must_use]
    pub const fn label(self) -> &'static str
    {
        match self
        {
            Self::A => "Side A",
            Self::B => "Side B",
        }
    }
}

/// One entry of the track list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track
{
    /// Record side
    pub side: Side,
    /// Display number such as "A1"
    pub number: String,
    /// Track title
    pub name: String,
    /// Duration in the `3'55"` notation
    pub duration: String,
    /// Audio file name
    pub file: String,
    /// Lyrics, `None` for instrumentals
    #[serde(default)]
    pub lyrics: Option<String>,
}

impl Track
{
    /// The file name without its `.mp3` extension, used as the `song`
    /// selector.
    #[must_use]
    pub fn slug(&self) -> &str
    {
        self.file
            .strip_suffix(".mp3")
            .unwrap_or(&self.file)
    }

    /// Lyrics, when the track has any.
    #[must_use]
    pub fn lyrics(&self) -> Option<&str>
    {
        self.lyrics
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Credits section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Credits
{
    /// Paragraphs in display order
    #[serde(default)]
    pub paragraphs: Vec<CreditParagraph>,
}

/// A credits paragraph, either plain text or text around one link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CreditParagraph
{
    /// Plain text
    Plain(String),
    /// Text, a link, then a suffix
    Linked
    {
        /// Text before the link
        #[serde(default)]
        text: String,
        /// The link
        link: CreditLink,
        /// Text after the link
        #[serde(default)]
        suffix: String,
    },
}

/// A link inside a credits paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreditLink
{
    /// Link text
    pub text: String,
    /// Target address
    pub url: String,
}

/// Social links shown under the credits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Links
{
    /// Source repository
    pub github: Option<String>,
    /// Instagram profile
    pub instagram: Option<String>,
    /// Bandcamp page
    pub bandcamp: Option<String>,
}

impl Links
{
    /// Configured links with their labels, in display order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, &str)>
    {
        [
            ("GitHub", &self.github),
            ("Instagram", &self.instagram),
            ("Bandcamp", &self.bandcamp),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|url| (label, url)))
        .collect()
    }
}

impl AlbumConfig
{
    /// Loads the configuration from a file path or an HTTP(S) URL.
    ///
    /// # Arguments
    ///
    /// * `source` - Path or URL of the JSON document
    ///
    /// # Returns
    ///
    /// The validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or fetched, is not
    /// valid JSON of the expected shape, or has no tracks.
    pub fn load(source: &str) -> Result<Self>
    {
        let text = if ConfigClient::is_remote(source)
        {
            info!("Fetching album configuration from {source}");
            ConfigClient::new().fetch(source)?
        }
        else
        {
            fs::read_to_string(source)
                .with_context(|| format!("Failed to read album configuration {source}"))?
        };

        Self::from_json(&text).with_context(|| format!("Invalid album configuration {source}"))
    }

    /// Parses and validates a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or has no tracks.
    pub fn from_json(text: &str) -> Result<Self>
    {
        let config: Self = serde_json::from_str(text).context("Failed to parse JSON")?;

        if config.tracks.is_empty()
        {
            bail!("The track list is empty");
        }

        for (name, value) in [
            ("primary", &config.colors.primary),
            ("heroBackground", &config.colors.hero_background),
            ("background", &config.colors.background),
            ("text", &config.colors.text),
        ]
        {
            match value.as_deref()
            {
                Some(value) if parse_hex_color(value).is_none() =>
                {
                    warn!("Ignoring color {name}: {value:?} is not #RRGGBB");
                }
                _ =>
                {}
            }
        }

        Ok(config)
    }

    /// Window title.
    #[must_use]
    pub fn page_title(&self) -> String
    {
        self.page_title.clone().unwrap_or_else(|| {
            format!("{} \u{2013} {}", self.artist_name, self.album_name)
        })
    }

    /// Artwork reference for a page, if configured.
    #[must_use]
    pub fn image(&self, page: PageIndex) -> Option<&str>
    {
        let image = match page
        {
            PageIndex::FRONT => &self.images.front,
            PageIndex::LYRICS => &self.images.lyrics,
            PageIndex::LYRICS_BACK => &self.images.lyrics_back,
            _ => &self.images.back,
        };

        image.as_deref()
    }
}

/// Parses a `#RRGGBB` color into its components.
#[must_use]
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)>
{
    let caps = HEX_COLOR_REGEX.captures(value.trim())?;
    let channel = |group: usize| u8::from_str_radix(&caps[group], 16).ok();

    Some((channel(1)?, channel(2)?, channel(3)?))
}

#[cfg(test)]
mod tests
{
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::test_utils::SAMPLE_CONFIG;

    #[test]
    fn parses_full_document()
    {
        let config = AlbumConfig::from_json(SAMPLE_CONFIG).expect("sample should parse");

        assert_eq!(config.artist_name, "Test Artist");
        assert_eq!(config.tracks.len(), 3);
        assert_eq!(config.tracks[2].side, Side::B);
        assert_eq!(config.tracks[2].lyrics(), None);
        assert_eq!(config.tracks[0].slug(), "test_song_1");
        assert_eq!(config.image(PageIndex::LYRICS_BACK), Some("images/LyricsBack.png"));
        assert_eq!(config.download_zip.as_deref(), Some("test-album.zip"));
        assert_eq!(config.links.entries().len(), 3);
        assert_eq!(
            config.credits.paragraphs[1],
            CreditParagraph::Linked {
                text: "Visit ".to_owned(),
                link: CreditLink {
                    text: "Test Studio".to_owned(),
                    url: "https://test-studio.com".to_owned(),
                },
                suffix: " for more.".to_owned(),
            }
        );
    }

    #[test]
    fn minimal_document_uses_defaults()
    {
        let config = AlbumConfig::from_json(
            r#"{
              "albumName": "Agency",
              "artistName": "Ligatures",
              "tracks": [{ "side": "A", "number": "A1", "name": "One",
                           "duration": "1'00\"", "file": "one.mp3" }]
            }"#,
        )
        .expect("minimal document should parse");

        assert_eq!(config.page_title(), "Ligatures \u{2013} Agency");
        assert_eq!(config.image(PageIndex::FRONT), None);
        assert!(config.links.entries().is_empty());
        assert!(config.credits.paragraphs.is_empty());
        assert_eq!(config.tracks[0].lyrics, None);
    }

    #[test]
    fn rejects_empty_track_list()
    {
        let error = AlbumConfig::from_json(
            r#"{ "albumName": "Agency", "artistName": "Ligatures", "tracks": [] }"#,
        )
        .expect_err("empty track list should be rejected");

        assert!(error.to_string().contains("empty"));
    }

    #[test]
    fn invalid_colors_are_tolerated()
    {
        let config = AlbumConfig::from_json(
            r##"{
              "albumName": "Agency",
              "artistName": "Ligatures",
              "colors": { "primary": "blue", "text": "#e0e0e0" },
              "tracks": [{ "side": "B", "number": "B1", "name": "One",
                           "duration": "1'00\"", "file": "one.mp3" }]
            }"##,
        )
        .expect("bad colors should not fail the load");

        assert_eq!(config.colors.primary.as_deref().and_then(parse_hex_color), None);
        assert_eq!(
            config.colors.text.as_deref().and_then(parse_hex_color),
            Some((0xe0, 0xe0, 0xe0))
        );
    }

    #[test]
    fn blank_lyrics_count_as_none()
    {
        let track = Track {
            side: Side::A,
            number: "A1".to_owned(),
            name: "Quiet".to_owned(),
            duration: "1'00\"".to_owned(),
            file: "quiet.wav".to_owned(),
            lyrics: Some("  \n ".to_owned()),
        };

        assert_eq!(track.lyrics(), None);
        assert_eq!(track.slug(), "quiet.wav");
    }

    #[test]
    fn loads_from_file()
    {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE_CONFIG.as_bytes())
            .expect("write sample");

        let path = file.path().to_string_lossy().into_owned();
        let config = AlbumConfig::load(&path).expect("load from file");

        assert_eq!(config.page_title(), "Test Artist \u{2013} Test Album");
    }

    #[test]
    fn reports_missing_file()
    {
        let error = AlbumConfig::load("/nonexistent/album.json")
            .expect_err("missing file should fail");

        assert!(format!("{error:#}").contains("/nonexistent/album.json"));
    }
}
