//! Playlist and transport state of the audio player.
//!
//! Tracks which song is selected, whether it is playing and how far along it
//! is. No audio is decoded; the position clock is advanced by the host's
//! ticks and rolls over to the next track when a song ends.
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Result, bail};
use log::info;
use regex::Regex;

use crate::config::{Side, Track};

static DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(\d+)\s*'\s*([0-5]\d)\s*"?\s*$"#).expect("Invalid duration regex")
});

/// Playlist with a transport.
#[derive(Debug, Clone)]
pub struct Player
{
    /// Tracks in play order, never empty
    tracks: Vec<Track>,
    /// Index of the selected track
    current: usize,
    /// Whether the selected track is playing
    is_playing: bool,
    /// Position within the selected track
    position: Duration,
}

impl Player
{
    /// Creates a stopped player.
    ///
    /// # Arguments
    ///
    /// * `tracks` - Track list in play order
    /// * `song` - Optional selector for the initial track, see
    ///   [`find_track`]
    ///
    /// # Errors
    ///
    /// Returns an error if the track list is empty.
    pub fn new(tracks: Vec<Track>, song: Option<&str>) -> Result<Self>
    {
        if tracks.is_empty()
        {
            bail!("Cannot create a player without tracks");
        }

        let current = song
            .and_then(|selector| find_track(&tracks, selector))
            .unwrap_or(0);

        Ok(Self {
            tracks,
            current,
            is_playing: false,
            position: Duration::ZERO,
        })
    }

    /// All tracks in play order.
    #[must_use]
    pub fn tracks(&self) -> &[Track]
    {
        &self.tracks
    }

    /// Tracks of one side with their playlist indices.
    pub fn side(&self, side: Side) -> impl Iterator<Item = (usize, &Track)>
    {
        self.tracks
            .iter()
            .enumerate()
            .filter(move |(_, track)| track.side == side)
    }

    /// Index of the selected track.
    #[must_use]
    pub const fn current_index(&self) -> usize
    {
        self.current
    }

    /// The selected track.
    #[must_use]
    pub fn current_track(&self) -> &Track
    {
        &self.tracks[self.current]
    }

    /// Whether the selected track is playing.
    #[must_use]
    pub const fn is_playing(&self) -> bool
    {
        self.is_playing
    }

    /// Position within the selected track.
    #[must_use]
    pub const fn position(&self) -> Duration
    {
        self.position
    }

    /// Length of the selected track, zero when its duration is unreadable.
    #[must_use]
    pub fn duration(&self) -> Duration
    {
        parse_duration(&self.current_track().duration).unwrap_or_default()
    }

    /// Played fraction of the selected track, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64
    {
        let duration = self.duration();

        if duration.is_zero()
        {
            0.0
        }
        else
        {
            (self.position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
        }
    }

    /// Selector of the selected track, as written back to `?song=`.
    #[must_use]
    pub fn slug(&self) -> &str
    {
        self.current_track().slug()
    }

    /// Lyrics of the selected track, if it has any.
    #[must_use]
    pub fn lyrics(&self) -> Option<&str>
    {
        self.current_track().lyrics()
    }

    /// Selects a track and starts playing it from the beginning.
    ///
    /// Out-of-range indices are ignored.
    pub fn play_track(&mut self, index: usize)
    {
        if index >= self.tracks.len()
        {
            return;
        }

        self.current = index;
        self.position = Duration::ZERO;
        self.is_playing = true;
        info!("Playing {} ({})", self.current_track().name, self.slug());
    }

    /// Toggles between playing and paused.
    pub fn toggle_play(&mut self)
    {
        self.is_playing = !self.is_playing;
    }

    /// Plays the following track, wrapping to the first.
    pub fn next_track(&mut self)
    {
        self.play_track((self.current + 1) % self.tracks.len());
    }

    /// Plays the preceding track, wrapping to the last.
    pub fn prev_track(&mut self)
    {
        let previous = self
            .current
            .checked_sub(1)
            .unwrap_or(self.tracks.len() - 1);
        self.play_track(previous);
    }

    /// Jumps to a fraction of the selected track.
    ///
    /// Ignored when the duration is unknown.
    pub fn seek(&mut self, fraction: f64)
    {
        let duration = self.duration();

        if !duration.is_zero()
        {
            self.position = duration.mul_f64(fraction.clamp(0.0, 1.0));
        }
    }

    /// Moves the position by `offset` seconds, clamped to the track.
    pub fn seek_by(&mut self, offset: f64)
    {
        let duration = self.duration();

        if !duration.is_zero()
        {
            let target = (self.position.as_secs_f64() + offset)
                .clamp(0.0, duration.as_secs_f64());
            self.position = Duration::from_secs_f64(target);
        }
    }

    /// Advances the position clock while playing.
    ///
    /// When the selected track ends, the next one starts.
    pub fn advance(&mut self, elapsed: Duration)
    {
        if !self.is_playing
        {
            return;
        }

        self.position = self.position.saturating_add(elapsed);
        let duration = self.duration();

        if !duration.is_zero() && self.position >= duration
        {
            self.next_track();
        }
    }
}

/// Finds a track by file slug or display number.
///
/// The slug is the file name without `.mp3`; the number comparison ignores
/// case.
#[must_use]
pub fn find_track(tracks: &[Track], selector: &str) -> Option<usize>
{
    tracks.iter().position(|track| {
        track.slug() == selector || track.number.eq_ignore_ascii_case(selector)
    })
}

/// Parses the `3'55"` duration notation.
#[must_use]
pub fn parse_duration(text: &str) -> Option<Duration>
{
    let caps = DURATION_REGEX.captures(text)?;
    let minutes: u64 = caps[1].parse().ok()?;
    let seconds: u64 = caps[2].parse().ok()?;

    let total = minutes.checked_mul(60)?.checked_add(seconds)?;

    Some(Duration::from_secs(total))
}

/// Formats a position as `m:ss`.
#[must_use]
pub fn format_time(position: Duration) -> String
{
    let total = position.as_secs();

    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests
{
    use rstest::rstest;

    use super::*;
    use crate::test_utils::sample_config;

    fn player() -> Player
    {
        Player::new(sample_config().tracks, None).expect("sample has tracks")
    }

    #[rstest]
    #[case(None, 0)]
    #[case(Some("test_song_2"), 1)]
    #[case(Some("b1"), 2)]
    #[case(Some("A2"), 1)]
    #[case(Some("unknown"), 0)]
    fn initial_track_from_selector(#[case] song: Option<&str>, #[case] expected: usize)
    {
        let player = Player::new(sample_config().tracks, song).expect("sample has tracks");

        assert_eq!(player.current_index(), expected);
        assert!(!player.is_playing());
    }

    #[test]
    fn rejects_empty_playlist()
    {
        assert!(Player::new(Vec::new(), None).is_err());
    }

    #[test]
    fn navigation_wraps_both_ways()
    {
        let mut player = player();

        player.prev_track();
        assert_eq!(player.current_index(), 2);
        assert!(player.is_playing());

        player.next_track();
        assert_eq!(player.current_index(), 0);
        assert_eq!(player.slug(), "test_song_1");
    }

    #[test]
    fn lyrics_follow_the_selected_track()
    {
        let mut player = player();
        assert!(player.lyrics().is_some());

        player.play_track(2);
        assert_eq!(player.lyrics(), None);

        player.play_track(99);
        assert_eq!(player.current_index(), 2);
    }

    #[test]
    fn position_clock_rolls_into_next_track()
    {
        let mut player = player();
        player.advance(Duration::from_secs(10));
        assert_eq!(player.position(), Duration::ZERO);

        player.play_track(1);
        player.advance(Duration::from_secs(75));
        assert!((player.progress() - 0.5).abs() < 1e-9);

        player.advance(Duration::from_secs(75));
        assert_eq!(player.current_index(), 2);
        assert_eq!(player.position(), Duration::ZERO);
    }

    #[test]
    fn seeking_is_clamped()
    {
        let mut player = player();

        player.seek(0.5);
        assert_eq!(player.position(), Duration::from_secs(90));

        player.seek(7.0);
        assert_eq!(player.position(), Duration::from_secs(180));

        player.seek_by(-500.0);
        assert_eq!(player.position(), Duration::ZERO);

        player.seek_by(5.0);
        assert_eq!(player.position(), Duration::from_secs(5));
    }

    #[test]
    fn pausing_stops_the_clock()
    {
        let mut player = player();
        player.play_track(0);
        player.toggle_play();
        player.advance(Duration::from_secs(30));

        assert_eq!(player.position(), Duration::ZERO);
    }

    #[rstest]
    #[case("3'55\"", Some(235))]
    #[case("2'09\"", Some(129))]
    #[case("1'54", Some(114))]
    #[case(" 10'00\" ", Some(600))]
    #[case("3'75\"", None)]
    #[case("3'5\"", None)]
    #[case("307445734561825862'00", None)]
    #[case("99999999999999999999999'00", None)]
    #[case("3:55", None)]
    #[case("", None)]
    fn duration_notation(#[case] text: &str, #[case] expected: Option<u64>)
    {
        assert_eq!(parse_duration(text), expected.map(Duration::from_secs));
    }

    #[rstest]
    #[case(0, "0:00")]
    #[case(9, "0:09")]
    #[case(235, "3:55")]
    #[case(3_600, "60:00")]
    fn time_formatting(#[case] seconds: u64, #[case] expected: &str)
    {
        assert_eq!(format_time(Duration::from_secs(seconds)), expected);
    }
}
