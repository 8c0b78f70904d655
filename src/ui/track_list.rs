//! Track List Panel
//!
//! Lists the tracks grouped by record side and tracks the entry the user has
//! highlighted, which may differ from the track the player has selected.
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget};
use textwrap::wrap;

use super::palette::Palette;
use crate::player::Player;

const HIGHLIGHT_SYMBOL: &str = "> ";

/// Marker shown next to the track that is playing.
const PLAYING_MARKER: &str = " ▮▮▮";

/// Directory the audio files are served from, relative to the album.
pub const SONGS_DIR: &str = "songs/";

/// Panel listing the tracks.
#[derive(Debug, Default)]
pub struct TrackList
{
    /// Current highlight state
    state: ListState,
}

impl TrackList
{
    /// Creates a track list highlighting `selected`.
    #[must_use]
    pub fn new(selected: usize) -> Self
    {
        Self {
            state: ListState::default().with_selected(Some(selected)),
        }
    }

    /// Highlights an entry.
    pub fn select(&mut self, index: usize)
    {
        self.state.select(Some(index));
    }

    /// Index of the highlighted entry.
    #[must_use]
    pub fn selected(&self) -> Option<usize>
    {
        self.state.selected()
    }

    /// Moves the highlight down, stopping at the last of `len` entries.
    pub fn next(&mut self, len: usize)
    {
        if let Some(index) = self.state.selected()
        {
            self.state
                .select(Some(index.saturating_add(1).min(len.saturating_sub(1))));
        }
    }

    /// Moves the highlight up, stopping at the first entry.
    pub fn previous(&mut self)
    {
        if let Some(index) = self.state.selected()
        {
            self.state.select(Some(index.saturating_sub(1)));
        }
    }

    /// Renders the track list to the specified area.
    ///
    /// # Arguments
    ///
    /// * `area` - The area within the buffer to render the panel
    /// * `buf` - The buffer to render to
    /// * `player` - Source of the tracks and the playing state
    /// * `palette` - Colors
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, player: &Player, palette: &Palette)
    {
        // 2 for the border, then the number column
        let name_room = usize::from(area.width)
            .saturating_sub(HIGHLIGHT_SYMBOL.len() + 2 + 5 + PLAYING_MARKER.len());

        let mut previous_side = None;
        let items: Vec<ListItem> = player
            .tracks()
            .iter()
            .enumerate()
            .map(|(index, track)| {
                let mut lines = Vec::new();

                // Each side gets a heading above its first track
                if previous_side != Some(track.side)
                {
                    lines.push(Line::styled(
                        track.side.label(),
                        Style::new().add_modifier(Modifier::DIM),
                    ));
                    previous_side = Some(track.side);
                }

                let is_current = index == player.current_index();
                let name_style = if is_current { palette.accent() } else { Style::new() };
                let download = download_path(&track.file);
                // Duration and download path follow the first row of the name
                let wrap_width = name_room
                    .saturating_sub(track.duration.len() + download.len() + 6)
                    .max(1);

                for (row, part) in wrap(&track.name, wrap_width).into_iter().enumerate()
                {
                    let prefix = if row == 0
                    {
                        format!("{:<5}", track.number)
                    }
                    else
                    {
                        " ".repeat(5)
                    };

                    let mut spans = vec![Span::raw(prefix), Span::styled(part.into_owned(), name_style)];

                    if row == 0
                    {
                        if is_current && player.is_playing()
                        {
                            spans.push(Span::styled(PLAYING_MARKER, palette.accent()));
                        }
                        spans.push(Span::styled(
                            format!("  {}", track.duration),
                            Style::new().add_modifier(Modifier::DIM),
                        ));
                        spans.push(Span::styled(
                            format!("  ↓ {download}"),
                            Style::new().add_modifier(Modifier::DIM),
                        ));
                    }

                    lines.push(Line::from(spans));
                }

                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .title("Tracks")
                    .title_alignment(Alignment::Left)
                    .title_style(palette.accent()),
            )
            .style(palette.page())
            .highlight_style(Style::new().add_modifier(Modifier::REVERSED))
            .highlight_symbol(HIGHLIGHT_SYMBOL);

        StatefulWidget::render(list, area, buf, &mut self.state);
    }
}

/// Download reference of an audio file.
#[must_use]
pub fn download_path(file: &str) -> String
{
    format!("{SONGS_DIR}{file}")
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::test_utils::sample_config;

    #[test]
    fn highlight_stays_in_bounds()
    {
        let mut list = TrackList::new(0);

        list.previous();
        assert_eq!(list.selected(), Some(0));

        for _ in 0..5
        {
            list.next(3);
        }
        assert_eq!(list.selected(), Some(2));

        list.select(1);
        assert_eq!(list.selected(), Some(1));
    }

    #[test]
    fn renders_sides_and_playing_marker()
    {
        let mut player = Player::new(sample_config().tracks, None).expect("sample has tracks");
        player.play_track(1);
        let mut list = TrackList::new(1);
        let area = Rect::new(0, 0, 60, 10);
        let mut buffer = Buffer::empty(area);

        list.render(area, &mut buffer, &player, &Palette::default());

        let text: Vec<String> = (0..buffer.area.height)
            .map(|row| {
                (0..buffer.area.width)
                    .map(|column| buffer[(column, row)].symbol().to_owned())
                    .collect()
            })
            .collect();

        assert!(text.iter().any(|line| line.contains("Side A")));
        assert!(text.iter().any(|line| line.contains("Side B")));
        assert!(
            text.iter()
                .any(|line| line.contains("Test Song 2") && line.contains("▮▮▮"))
        );
        assert!(
            !text
                .iter()
                .any(|line| line.contains("Test Song 1") && line.contains("▮▮▮"))
        );
    }

    #[test]
    fn every_track_offers_its_download()
    {
        let player = Player::new(sample_config().tracks, None).expect("sample has tracks");
        let mut list = TrackList::new(0);
        let area = Rect::new(0, 0, 70, 10);
        let mut buffer = Buffer::empty(area);

        list.render(area, &mut buffer, &player, &Palette::default());

        let text: String = (0..buffer.area.height)
            .flat_map(|row| (0..buffer.area.width).map(move |column| (column, row)))
            .map(|cell| buffer[cell].symbol().to_owned())
            .collect();

        for file in ["test_song_1.mp3", "test_song_2.mp3", "instrumental.mp3"]
        {
            assert!(text.contains(&download_path(file)), "{file} missing from {text}");
        }
        assert_eq!(download_path("a.mp3"), "songs/a.mp3");
    }
}
