//! Artwork widget.
//!
//! Paints a [`Scene`] with terminal cells: a flipping card is narrowed by the
//! cosine of its rotation and shows whichever face points at the viewer,
//! sliding pages are shifted horizontally and clipped to the pane.
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget, Wrap};

use super::palette::Palette;
use crate::config::AlbumConfig;
use crate::viewer::{PAGE_COUNT, PageIndex, Scene};

/// Glyph of an inactive page dot.
const DOT: &str = "•";
/// Glyph repeated for the active page dot.
const ACTIVE_DOT: &str = "━";
/// Cells reserved for each dot.
pub const DOT_SLOT_WIDTH: u16 = 4;
/// Width of the whole dots line.
#[allow(clippy::cast_possible_truncation)]
pub const DOTS_WIDTH: u16 = DOT_SLOT_WIDTH * PAGE_COUNT as u16;

/// The artwork pane.
pub struct Artwork<'a>
{
    /// What to paint
    scene: Scene,
    /// Source of the image references
    config: &'a AlbumConfig,
    /// Colors
    palette: &'a Palette,
}

impl<'a> Artwork<'a>
{
    /// Creates the widget for one frame.
    #[must_use]
    pub const fn new(scene: Scene, config: &'a AlbumConfig, palette: &'a Palette) -> Self
    {
        Self {
            scene,
            config,
            palette,
        }
    }

    /// Paints one page into `area`.
    fn render_face(&self, page: PageIndex, area: Rect, buf: &mut Buffer)
    {
        let mut lines = vec![Line::default()];

        if page == PageIndex::FRONT
        {
            lines.push(Line::styled(self.config.artist_name.clone(), self.palette.accent()).centered());
            lines.push(Line::from(self.config.album_name.clone()).centered());
            lines.push(Line::default());
        }

        let image = self
            .config
            .image(page)
            .unwrap_or("(no image)");
        lines.push(
            Line::styled(image.to_owned(), Style::new().add_modifier(Modifier::DIM)).centered(),
        );

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(page.label())
            .style(self.palette.hero());

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

impl Widget for Artwork<'_>
{
    fn render(self, area: Rect, buf: &mut Buffer)
    {
        match self.scene
        {
            Scene::Single { .. } | Scene::Flip { .. } =>
            {
                let visible = self
                    .scene
                    .visible_face()
                    .and_then(|(page, scale)| face_rect(area, scale, 0.0).map(|face| (page, face)));

                if let Some((page, face)) = visible
                {
                    self.render_face(page, face, buf);
                }
            }
            Scene::Slide {
                outgoing,
                incoming,
                outgoing_offset,
                incoming_offset,
            } =>
            {
                for (page, offset) in [(outgoing, outgoing_offset), (incoming, incoming_offset)]
                {
                    if let Some(face) = face_rect(area, 1.0, offset)
                    {
                        self.render_face(page, face, buf);
                    }
                }
            }
        }
    }
}

/// Rectangle of a face narrowed to `scale` of the pane width and shifted by
/// `offset_percent` of it, clipped to the pane.
///
/// # Returns
///
/// `None` when less than one column remains visible.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Every value is clamped into the pane, which fits in u16
fn face_rect(area: Rect, scale: f64, offset_percent: f64) -> Option<Rect>
{
    let full = f64::from(area.width);
    let width = (full * scale.clamp(0.0, 1.0)).round();
    let left = f64::from(area.x) + (full - width) / 2.0 + full * offset_percent / 100.0;

    let clipped_left = left.max(f64::from(area.x)).floor();
    let clipped_right = (left + width).min(f64::from(area.right())).floor();

    if clipped_right - clipped_left < 1.0
    {
        return None;
    }

    let rect = Rect::new(
        clipped_left as u16,
        area.y,
        (clipped_right - clipped_left) as u16,
        area.height,
    );

    Some(rect.intersection(area))
}

/// Renders the page dots.
///
/// # Arguments
///
/// * `widths` - Width hint of each dot, [`crate::viewer::DOT_WIDTH`] for a
///   resting dot
/// * `base_width` - Width hint of a resting dot
/// * `active` - The settled page
///
/// # Returns
///
/// The dots line, [`DOT_SLOT_WIDTH`] cells per dot.
#[must_use]
pub fn dots_line(
    widths: [f64; PAGE_COUNT],
    base_width: f64,
    active: PageIndex,
    palette: &Palette,
) -> Line<'static>
{
    let spans = PageIndex::ALL
        .iter()
        .zip(widths)
        .map(|(page, width)| {
            if *page == active
            {
                let cells = dot_cells(width, base_width);
                let text = format!(
                    "{:<slot$}",
                    ACTIVE_DOT.repeat(cells),
                    slot = usize::from(DOT_SLOT_WIDTH)
                );
                Span::styled(text, palette.accent())
            }
            else
            {
                Span::raw(format!("{DOT:<slot$}", slot = usize::from(DOT_SLOT_WIDTH)))
            }
        });

    Line::from_iter(spans)
}

/// Cells used by the active dot: one when the cycle starts, three when it
/// ends.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// The ratio is clamped to [1, 3]
fn dot_cells(width: f64, base_width: f64) -> usize
{
    (width / base_width.max(1.0)).clamp(1.0, 3.0).round() as usize
}

/// Page whose dot covers `column`, for a dots line starting at `start`.
#[must_use]
pub fn dot_at(column: u16, start: u16) -> Option<PageIndex>
{
    let offset = column.checked_sub(start)?;

    PageIndex::new(i64::from(offset / DOT_SLOT_WIDTH))
}
