//! Half-block image widget
//!
//! Each terminal cell shows two vertical pixels: the upper half block glyph
//! takes the top pixel as foreground and the bottom pixel as background.

use crate::images::Bitmap;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

const UPPER_HALF_BLOCK: &str = "▀";

pub struct HalfBlockImage<'a> {
    bitmap: &'a Bitmap,
}

impl<'a> HalfBlockImage<'a> {
    pub fn new(bitmap: &'a Bitmap) -> Self {
        Self { bitmap }
    }
}

impl Widget for HalfBlockImage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = area.width as u32;
        let pixel_rows = area.height as u32 * 2;

        for row in 0..area.height {
            for col in 0..area.width {
                let top = self.bitmap.sample(col as u32, row as u32 * 2, cols, pixel_rows);
                let bottom = self
                    .bitmap
                    .sample(col as u32, row as u32 * 2 + 1, cols, pixel_rows);

                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(UPPER_HALF_BLOCK);
                    cell.set_fg(rgb(top));
                    cell.set_bg(rgb(bottom));
                }
            }
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

/// Rows needed to show the bitmap at `width` columns, capped at `max_rows`
pub fn image_rows(bitmap: &Bitmap, width: u16, max_rows: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let pixel_rows = (width as u64 * bitmap.height() as u64).div_ceil(bitmap.width() as u64);
    let rows = pixel_rows.div_ceil(2);
    rows.min(max_rows as u64) as u16
}
