//! Application module for the album viewer.
//!
//! This module provides the main application state and logic. It lays out
//! the album page (artwork, page dots, player, track list, credits), routes
//! mouse input to the artwork viewer and feeds it frames, and keeps the
//! player clock running.
//!
//! The page is taller than most terminals. It is painted into an off-screen
//! buffer and the visible rows are copied into the frame, so scrolling moves
//! the artwork out of view just like scrolling a web page.
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use log::{debug, info};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget, Wrap},
};
use textwrap::wrap;

use super::artwork::{Artwork, DOTS_WIDTH, dot_at, dots_line};
use super::palette::Palette;
use super::track_list::TrackList;
use crate::config::{AlbumConfig, CreditParagraph};
use crate::player::{Player, format_time};
use crate::viewer::{
    DOT_WIDTH, PageIndex, PageViewer, PointerEvent, TickScheduler, ViewportSnapshot,
};

/// Horizontal size of a terminal cell, in viewer pixels.
pub const CELL_WIDTH_PX: f64 = 8.0;
/// Vertical size of a terminal cell, in viewer pixels.
pub const LINE_HEIGHT_PX: f64 = 16.0;

/// Rows below the artwork: page dots, then the player.
const DOTS_HEIGHT: u16 = 1;
const PLAYER_HEIGHT: u16 = 3;
/// The hero never gets shorter than this.
const MIN_HERO_HEIGHT: u16 = 10;
/// Lines moved per mouse wheel notch.
const WHEEL_LINES: u16 = 3;

/// Application mode that determines the current UI state.
///
/// Controls what is displayed and how user input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode
{
    /// Browsing the page - default state
    Normal,
    /// Help overlay is displayed
    Help,
    /// Lyrics of the selected track are displayed
    Lyrics,
}

/// Where things were painted, in page coordinates.
#[derive(Debug, Clone, Copy, Default)]
struct PageLayout
{
    /// Artwork pane
    artwork: Rect,
    /// Page dots row
    dots: Rect,
}

/// Main application state.
pub struct App
{
    /// The album being shown
    pub config: AlbumConfig,
    /// Artwork viewer
    pub viewer: PageViewer<TickScheduler>,
    /// Audio player transport
    pub player: Player,
    /// Track list highlight
    pub track_list: TrackList,
    /// Current application mode
    pub mode: AppMode,
    /// Current scroll position of the page, in lines
    pub scroll: u16,
    /// Flag indicating if the application should exit
    pub should_quit: bool,
    /// Geometry the viewer reads
    viewport: ViewportSnapshot,
    /// Layout of the last render
    layout: PageLayout,
    /// Lines the page can scroll, as of the last render
    max_scroll: u16,
    /// Resolved colors
    palette: Palette,
    /// Timestamp of the previous tick
    last_tick: Option<Duration>,
}

impl App
{
    /// Creates the application state.
    ///
    /// # Arguments
    ///
    /// * `config` - The album to show
    /// * `song` - Optional track selector, by file slug or number
    /// * `page` - Optional initial artwork page; out-of-range values are
    ///   ignored
    /// * `auto_advance` - Whether the artwork turns by itself
    ///
    /// # Returns
    ///
    /// A new `App` settled on the requested page.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration has no tracks.
    pub fn new(
        config: AlbumConfig,
        song: Option<&str>,
        page: Option<i64>,
        auto_advance: bool,
    ) -> Result<Self>
    {
        let player = Player::new(config.tracks.clone(), song)?;
        let page = page
            .and_then(PageIndex::new)
            .unwrap_or(PageIndex::FRONT);
        let mut viewer = PageViewer::new(TickScheduler::new(), page);

        if auto_advance
        {
            viewer.mount();
        }

        info!(
            "Showing {} on page {page}, track {}",
            config.page_title(),
            player.slug()
        );

        Ok(Self {
            palette: Palette::from_colors(&config.colors),
            track_list: TrackList::new(player.current_index()),
            config,
            viewer,
            player,
            mode: AppMode::Normal,
            scroll: 0,
            should_quit: false,
            viewport: ViewportSnapshot::default(),
            layout: PageLayout::default(),
            max_scroll: 0,
            last_tick: None,
        })
    }

    /// Advances time to `now`, measured from application start.
    ///
    /// Delivers every due frame to the viewer and runs the player clock.
    pub fn on_tick(&mut self, now: Duration)
    {
        let elapsed = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_tick = Some(now);

        self.player.advance(elapsed);

        let now_ms = now.as_secs_f64() * 1000.0;
        for handle in self.viewer.scheduler_mut().take_due()
        {
            self.viewer.frame(handle, now_ms, &self.viewport);
        }
    }

    /// Handles a mouse event in screen coordinates.
    ///
    /// Left button presses on the artwork start a drag, presses on a page dot
    /// jump to that page, and the wheel scrolls the page.
    pub fn on_mouse(&mut self, mouse: MouseEvent)
    {
        if self.mode != AppMode::Normal
        {
            return;
        }

        let row = mouse.row.saturating_add(self.scroll);
        let pointer = PointerEvent::new(f64::from(mouse.column) * CELL_WIDTH_PX);

        match mouse.kind
        {
            MouseEventKind::Down(MouseButton::Left) =>
            {
                if contains(self.layout.artwork, mouse.column, row)
                {
                    self.viewer.pointer_down(pointer);
                }
                else if contains(self.layout.dots, mouse.column, row)
                {
                    if let Some(page) = dot_at(mouse.column, self.layout.dots.x)
                    {
                        debug!("Dot {page} clicked");
                        self.viewer.go_to(page);
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) =>
            {
                self.viewer.pointer_move(pointer, &self.viewport);
            }
            MouseEventKind::Up(MouseButton::Left) =>
            {
                self.viewer.pointer_up(pointer, &self.viewport);
            }
            MouseEventKind::ScrollDown => self.scroll_down(WHEEL_LINES),
            MouseEventKind::ScrollUp => self.scroll_up(WHEEL_LINES),
            _ =>
            {}
        }
    }

    /// Handles a terminal resize. A drag in progress is cancelled.
    pub fn on_resize(&mut self)
    {
        self.viewer.pointer_cancel();
    }

    /// Renders the application UI to the provided frame.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render the UI to
    pub fn render(&mut self, frame: &mut Frame)
    {
        let area = frame.area();
        let hero_height = (area.height.saturating_mul(2) / 3).max(MIN_HERO_HEIGHT);
        let body = self.body_text(area.width);
        let tracks_height = self.tracks_height();
        let body_height = u16::try_from(body.lines.len()).unwrap_or(u16::MAX);
        let page_height = hero_height
            .saturating_add(tracks_height)
            .saturating_add(body_height);

        let mut page = Buffer::empty(Rect::new(0, 0, area.width, page_height));
        page.set_style(page.area, self.palette.page());

        self.render_hero(Rect::new(0, 0, area.width, hero_height), &mut page);

        let tracks_area = Rect::new(0, hero_height, area.width, tracks_height);
        self.track_list
            .render(tracks_area, &mut page, &self.player, &self.palette);

        Paragraph::new(body).render(
            Rect::new(0, hero_height.saturating_add(tracks_height), area.width, body_height),
            &mut page,
        );

        self.max_scroll = page_height.saturating_sub(area.height);
        self.scroll = self.scroll.min(self.max_scroll);
        self.update_viewport();

        // Copy the visible window of the page
        let screen = frame.buffer_mut();
        for row in 0..area.height
        {
            let source_row = row.saturating_add(self.scroll);

            if source_row >= page_height
            {
                break;
            }

            for column in 0..area.width
            {
                screen[(area.x + column, area.y + row)] = page[(column, source_row)].clone();
            }
        }

        match self.mode
        {
            AppMode::Help => Self::render_help(frame),
            AppMode::Lyrics => self.render_lyrics(frame),
            AppMode::Normal =>
            {}
        }
    }

    /// Paints the artwork, page dots and player into the page buffer.
    fn render_hero(&mut self, area: Rect, page: &mut Buffer)
    {
        page.set_style(area, self.palette.hero());

        let [artwork_row, dots_row, player_row] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(DOTS_HEIGHT),
                Constraint::Length(PLAYER_HEIGHT),
            ])
            .areas(area);

        // Cells are about twice as tall as wide, keep the artwork square
        let artwork_width = artwork_row
            .width
            .min(artwork_row.height.saturating_mul(2));
        let artwork = centered_width(artwork_row, artwork_width);
        self.layout.artwork = artwork;

        Artwork::new(self.viewer.scene(), &self.config, &self.palette).render(artwork, page);

        let dots = centered_width(dots_row, DOTS_WIDTH);
        self.layout.dots = dots;

        let widths = PageIndex::ALL.map(|dot| self.viewer.dot_width(dot));
        dots_line(widths, DOT_WIDTH, self.viewer.page(), &self.palette).render(dots, page);

        self.render_player(player_row, page);
    }

    /// Paints the now-playing line and the progress bar.
    fn render_player(&self, area: Rect, page: &mut Buffer)
    {
        let [title_row, gauge_row, _] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1); 3])
            .areas(area);

        let track = self.player.current_track();
        let state = if self.player.is_playing() { "▶" } else { "⏸" };

        Line::from(vec![
            Span::styled(format!(" {state} "), self.palette.accent()),
            Span::raw(format!("{}  {}", track.number, track.name)),
        ])
        .render(title_row, page);

        let label = format!(
            "{} / {}",
            format_time(self.player.position()),
            format_time(self.player.duration())
        );

        Gauge::default()
            .ratio(self.player.progress())
            .label(label)
            .gauge_style(Style::new().fg(self.palette.primary))
            .render(gauge_row, page);
    }

    /// Rows used by the track list: the title, one per side heading and one
    /// per track.
    fn tracks_height(&self) -> u16
    {
        let tracks = self.player.tracks();
        let sides = tracks
            .windows(2)
            .filter(|pair| pair[0].side != pair[1].side)
            .count() +
            1;

        u16::try_from(tracks.len() + sides + 1).unwrap_or(u16::MAX)
    }

    /// Credits, links, footer and download, wrapped to `width`.
    fn body_text(&self, width: u16) -> Text<'static>
    {
        let width = usize::from(width.saturating_sub(2)).max(1);
        let heading = |title: &str| {
            Line::styled(title.to_owned(), self.palette.accent())
        };
        let mut lines = vec![Line::default()];

        if !self.config.credits.paragraphs.is_empty()
        {
            lines.push(heading("Credits"));

            for paragraph in &self.config.credits.paragraphs
            {
                match paragraph
                {
                    CreditParagraph::Plain(text) =>
                    {
                        lines.extend(
                            wrap(text, width)
                                .into_iter()
                                .map(|part| Line::raw(format!(" {part}"))),
                        );
                    }
                    CreditParagraph::Linked { text, link, suffix } =>
                    {
                        lines.push(Line::from(vec![
                            Span::raw(format!(" {text}")),
                            Span::styled(link.text.clone(), self.palette.link()),
                            Span::raw(suffix.clone()),
                        ]));
                        lines.push(Line::styled(
                            format!("   {}", link.url),
                            Style::new().add_modifier(Modifier::DIM),
                        ));
                    }
                }
            }
            lines.push(Line::default());
        }

        let social_links = self.config.links.entries();
        if !social_links.is_empty()
        {
            lines.push(heading("Links"));
            lines.extend(social_links.into_iter().map(|(label, url)| {
                Line::from(vec![
                    Span::raw(format!(" {label:<10}")),
                    Span::styled(url.to_owned(), self.palette.link()),
                ])
            }));
            lines.push(Line::default());
        }

        if let Some(zip) = &self.config.download_zip
        {
            lines.push(Line::from(vec![
                Span::raw(" Download the album: "),
                Span::styled(zip.clone(), self.palette.link()),
            ]));
        }

        if let Some(footer) = &self.config.footer
        {
            lines.extend(
                wrap(footer, width)
                    .into_iter()
                    .map(|part| {
                        Line::styled(part.into_owned(), Style::new().add_modifier(Modifier::DIM))
                            .centered()
                    }),
            );
        }

        Text::from(lines)
    }

    /// Renders the help overlay with keyboard shortcuts.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to render the help overlay to
    fn render_help(frame: &mut Frame)
    {
        let area = centered_rect(60, 80, frame.area());

        // Clear the area first to make it fully opaque
        frame.render_widget(Clear, area);

        let text = Text::from(vec![
            Line::from("Album Viewer Help:"),
            Line::from(""),
            Line::from("Click artwork: Next page"),
            Line::from("Drag artwork: Turn the page"),
            Line::from("Tab: Next page, wrapping around"),
            Line::from("←/→: Previous/next page"),
            Line::from("1-4: Jump to page"),
            Line::from("space: Play/pause"),
            Line::from("n/p: Next/previous track"),
            Line::from("j/k or ↓/↑: Select track"),
            Line::from("Enter: Play selected track"),
            Line::from("[/]: Seek back/forward 5s"),
            Line::from("l: Show lyrics"),
            Line::from("PgDn/PgUp: Scroll page down/up"),
            Line::from("q: Quit"),
            Line::from("?: Toggle help"),
        ]);

        let help_box = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help"),
            )
            .wrap(Wrap { trim: true });

        frame.render_widget(help_box, area);
    }

    /// Renders the lyrics of the selected track.
    fn render_lyrics(&self, frame: &mut Frame)
    {
        let area = centered_rect(70, 80, frame.area());
        frame.render_widget(Clear, area);

        let track = self.player.current_track();
        let lyrics = self.player.lyrics().unwrap_or_default();

        let lyrics_box = Paragraph::new(lyrics.to_owned())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{} - Esc to close", track.name))
                    .title_style(self.palette.accent()),
            )
            .style(self.palette.page())
            .wrap(Wrap { trim: false });

        frame.render_widget(lyrics_box, area);
    }

    /// Mirrors the artwork width and page scroll into the viewer geometry.
    fn update_viewport(&mut self)
    {
        self.viewport.width = f64::from(self.layout.artwork.width) * CELL_WIDTH_PX;
        self.viewport.scroll_y = f64::from(self.scroll) * LINE_HEIGHT_PX;
    }

    /// Scrolls the page up by the specified amount.
    ///
    /// # Arguments
    ///
    /// * `amount` - Number of lines to scroll up
    pub fn scroll_up(&mut self, amount: u16)
    {
        self.scroll = self.scroll.saturating_sub(amount);
        self.update_viewport();
    }

    /// Scrolls the page down by the specified amount, up to its end.
    ///
    /// # Arguments
    ///
    /// * `amount` - Number of lines to scroll down
    pub fn scroll_down(&mut self, amount: u16)
    {
        self.scroll = self
            .scroll
            .saturating_add(amount)
            .min(self.max_scroll);
        self.update_viewport();
    }

    /// Switches mode. Overlays swallow mouse input, so a drag in progress is
    /// cancelled when one opens.
    fn set_mode(&mut self, mode: AppMode)
    {
        if mode != AppMode::Normal
        {
            self.viewer.pointer_cancel();
        }

        self.mode = mode;
    }

    /// Toggles the help overlay.
    pub fn toggle_help(&mut self)
    {
        self.set_mode(if self.mode == AppMode::Help
        {
            AppMode::Normal
        }
        else
        {
            AppMode::Help
        });
    }

    /// Shows the lyrics of the selected track. Tracks without lyrics have no
    /// lyrics view.
    pub fn open_lyrics(&mut self)
    {
        if self.player.lyrics().is_some()
        {
            self.set_mode(AppMode::Lyrics);
        }
    }

    /// Returns to the page from any overlay.
    pub fn close_overlay(&mut self)
    {
        self.set_mode(AppMode::Normal);
    }

    /// Moves the track highlight down.
    pub fn select_next(&mut self)
    {
        self.track_list
            .next(self.player.tracks().len());
    }

    /// Moves the track highlight up.
    pub fn select_previous(&mut self)
    {
        self.track_list.previous();
    }

    /// Plays the highlighted track.
    pub fn play_selected(&mut self)
    {
        if let Some(index) = self.track_list.selected()
        {
            self.player.play_track(index);
        }
    }

    /// Plays the following track and highlights it.
    pub fn next_track(&mut self)
    {
        self.player.next_track();
        self.track_list
            .select(self.player.current_index());
    }

    /// Plays the preceding track and highlights it.
    pub fn prev_track(&mut self)
    {
        self.player.prev_track();
        self.track_list
            .select(self.player.current_index());
    }

    /// Turns the artwork one page forward, stopping at the back cover.
    pub fn page_forward(&mut self)
    {
        if let Some(page) = self.viewer.page().forward()
        {
            self.viewer.go_to(page);
        }
    }

    /// Turns the artwork one page back, stopping at the front cover.
    pub fn page_backward(&mut self)
    {
        if let Some(page) = self.viewer.page().backward()
        {
            self.viewer.go_to(page);
        }
    }
}

/// Whether `rect` covers the cell at `column`, `row`.
const fn contains(rect: Rect, column: u16, row: u16) -> bool
{
    column >= rect.x &&
        column < rect.x.saturating_add(rect.width) &&
        row >= rect.y &&
        row < rect.y.saturating_add(rect.height)
}

/// A horizontally centered slice of `area` at most `width` wide.
fn centered_width(area: Rect, width: u16) -> Rect
{
    let width = width.min(area.width);

    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}

/// Creates a centered rectangle inside the given area.
///
/// # Arguments
///
/// * `percent_x` - Width of the rectangle as a percentage of the parent area
/// * `percent_y` - Height of the rectangle as a percentage of the parent area
/// * `area` - Parent rectangle
///
/// # Returns
///
/// A new rectangle positioned in the center of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect
{
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests
{
    use crossterm::event::KeyModifiers;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::test_utils::sample_config;
    use crate::ui::artwork::DOT_SLOT_WIDTH;
    use crate::viewer::ViewerState;

    const WIDTH: u16 = 80;
    const HEIGHT: u16 = 24;

    struct Harness
    {
        app: App,
        terminal: Terminal<TestBackend>,
        now: Duration,
    }

    impl Harness
    {
        fn new(auto_advance: bool) -> Self
        {
            let app = App::new(sample_config(), None, None, auto_advance).expect("sample app");
            let terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).expect("test terminal");
            let mut harness = Self {
                app,
                terminal,
                now: Duration::ZERO,
            };
            harness.draw();
            harness
        }

        fn draw(&mut self)
        {
            let app = &mut self.app;
            self.terminal
                .draw(|frame| app.render(frame))
                .expect("draw");
        }

        fn run_for(&mut self, millis: u64)
        {
            let end = self.now + Duration::from_millis(millis);
            while self.now < end
            {
                self.now += Duration::from_millis(16);
                self.app.on_tick(self.now);
            }
        }

        fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16)
        {
            self.app.on_mouse(MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            });
        }

        fn screen(&self) -> String
        {
            let buffer = self.terminal.backend().buffer();
            (0..buffer.area.height)
                .map(|row| {
                    (0..buffer.area.width)
                        .map(|column| buffer[(column, row)].symbol().to_owned())
                        .collect::<String>()
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }

    #[test]
    fn renders_album_page()
    {
        let harness = Harness::new(false);
        let screen = harness.screen();

        assert!(screen.contains("Front cover"), "{screen}");
        assert!(screen.contains("Test Artist"), "{screen}");
        assert!(screen.contains("Test Song 1"), "{screen}");
        assert!(screen.contains("0:00 / 3:00"), "{screen}");
    }

    #[test]
    fn click_on_artwork_turns_page()
    {
        let mut harness = Harness::new(false);
        let artwork = harness.app.layout.artwork;
        let (column, row) = (artwork.x + artwork.width / 2, artwork.y + 2);

        harness.mouse(MouseEventKind::Down(MouseButton::Left), column, row);
        harness.mouse(MouseEventKind::Up(MouseButton::Left), column, row);
        harness.run_for(600);

        assert_eq!(harness.app.viewer.page(), PageIndex::LYRICS);
        assert_eq!(harness.app.viewer.state(), ViewerState::Settled(PageIndex::LYRICS));
    }

    #[test]
    fn long_leftward_drag_commits_forward()
    {
        let mut harness = Harness::new(false);
        let artwork = harness.app.layout.artwork;
        let right = artwork.x + artwork.width - 2;
        let row = artwork.y + 2;

        harness.mouse(MouseEventKind::Down(MouseButton::Left), right, row);
        harness.mouse(MouseEventKind::Drag(MouseButton::Left), right - artwork.width / 2, row);
        assert!(harness.app.viewer.is_dragging());

        harness.mouse(MouseEventKind::Up(MouseButton::Left), right - artwork.width / 2, row);
        harness.run_for(600);

        assert_eq!(harness.app.viewer.page(), PageIndex::LYRICS);
    }

    #[test]
    fn clicking_a_dot_jumps_there()
    {
        let mut harness = Harness::new(false);
        let dots = harness.app.layout.dots;

        harness.mouse(
            MouseEventKind::Down(MouseButton::Left),
            dots.x + 3 * DOT_SLOT_WIDTH,
            dots.y,
        );

        assert_eq!(harness.app.viewer.page(), PageIndex::BACK);
    }

    #[test]
    fn artwork_advances_by_itself_at_the_top()
    {
        let mut harness = Harness::new(true);

        harness.run_for(11_000);

        assert_eq!(harness.app.viewer.page(), PageIndex::LYRICS);
    }

    #[test]
    fn scrolling_down_pauses_auto_advance()
    {
        let mut harness = Harness::new(true);
        harness.app.scroll_down(3);
        assert!(harness.app.scroll > 0);

        harness.run_for(11_000);
        assert_eq!(harness.app.viewer.page(), PageIndex::FRONT);

        harness.app.scroll_up(3);
        harness.run_for(11_000);
        assert_eq!(harness.app.viewer.page(), PageIndex::LYRICS);
    }

    #[test]
    fn ticks_run_the_player_clock()
    {
        let mut harness = Harness::new(false);
        harness.app.play_selected();
        harness.run_for(2_000);

        assert!(harness.app.player.position() >= Duration::from_millis(1_900));
        harness.draw();
        assert!(harness.screen().contains("0:01 / 3:00") || harness.screen().contains("0:02 / 3:00"));
    }

    #[test]
    fn lyrics_only_open_for_sung_tracks()
    {
        let mut harness = Harness::new(false);

        harness.app.open_lyrics();
        assert_eq!(harness.app.mode, AppMode::Lyrics);
        harness.draw();
        assert!(harness.screen().contains("Test lyrics"));

        harness.app.close_overlay();
        harness.app.prev_track();
        assert_eq!(harness.app.player.current_index(), 2);

        harness.app.open_lyrics();
        assert_eq!(harness.app.mode, AppMode::Normal);
    }

    #[test]
    fn opening_an_overlay_mid_drag_releases_the_artwork()
    {
        let mut harness = Harness::new(true);
        let artwork = harness.app.layout.artwork;
        let (column, row) = (artwork.x + artwork.width - 2, artwork.y + 2);

        harness.mouse(MouseEventKind::Down(MouseButton::Left), column, row);
        harness.mouse(MouseEventKind::Drag(MouseButton::Left), column - 10, row);
        assert!(harness.app.viewer.is_dragging());

        harness.app.toggle_help();
        harness.mouse(MouseEventKind::Up(MouseButton::Left), column - 10, row);
        harness.app.toggle_help();
        assert_eq!(harness.app.mode, AppMode::Normal);
        assert!(!harness.app.viewer.is_dragging());

        // The cancelled drag reverts and the timer runs again
        harness.run_for(11_000);
        assert_eq!(harness.app.viewer.page(), PageIndex::LYRICS);
    }

    #[test]
    fn lyrics_overlay_also_cancels_a_drag()
    {
        let mut harness = Harness::new(false);
        let artwork = harness.app.layout.artwork;

        harness.mouse(MouseEventKind::Down(MouseButton::Left), artwork.x + 4, artwork.y + 2);
        harness.app.open_lyrics();

        assert_eq!(harness.app.mode, AppMode::Lyrics);
        assert!(!harness.app.viewer.is_dragging());
        harness.run_for(600);
        assert_eq!(harness.app.viewer.state(), ViewerState::Settled(PageIndex::FRONT));
    }

    #[test]
    fn arrow_navigation_stops_at_the_covers()
    {
        let mut harness = Harness::new(false);

        harness.app.page_backward();
        assert_eq!(harness.app.viewer.page(), PageIndex::FRONT);
        assert!(!harness.app.viewer.is_animating());

        harness.app.page_forward();
        harness.run_for(600);
        assert_eq!(harness.app.viewer.page(), PageIndex::LYRICS);
    }
}
