use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::foundation::error::{ReportError, ReportResult};

/// Allowed images-per-row values.
pub const PER_ROW_RANGE: std::ops::RangeInclusive<usize> = 1..=4;

/// Fixed page measurements, in mm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width.
    pub width: f64,
    /// Page height.
    pub height: f64,
    /// Left and right margin.
    pub margin: f64,
    /// Horizontal and vertical gap between tiles.
    pub gap: f64,
    /// Content origin y on the first page, below the title.
    pub first_top: f64,
    /// Content origin y on continuation pages.
    pub continuation_top: f64,
    /// A tile whose bottom would pass this y goes to a new page.
    pub break_y: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

impl PageGeometry {
    /// A4 portrait with the report's margins.
    pub const A4: Self = Self {
        width: 210.0,
        height: 297.0,
        margin: 10.0,
        gap: 5.0,
        first_top: 25.0,
        continuation_top: 15.0,
        break_y: 280.0,
    };

    /// Horizontal space between the margins.
    pub fn usable_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Square tile size for `per_row` tiles across.
    pub fn tile_size(&self, per_row: usize) -> ReportResult<Size> {
        check_per_row(per_row)?;
        let n = per_row as f64;
        let w = (self.usable_width() - (n - 1.0) * self.gap) / n;
        Ok(Size::new(w, w))
    }
}

/// Reject images-per-row values outside [`PER_ROW_RANGE`].
pub fn check_per_row(per_row: usize) -> ReportResult<()> {
    if PER_ROW_RANGE.contains(&per_row) {
        Ok(())
    } else {
        Err(ReportError::input(format!(
            "images per row must be in {}..={}, got {per_row}",
            PER_ROW_RANGE.start(),
            PER_ROW_RANGE.end()
        )))
    }
}

/// Where one tile lands.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Zero-based page index.
    pub page: usize,
    /// Tile rectangle in mm, y growing downward from the top edge.
    pub rect: Rect,
}

/// Tracks where the next tile goes while iterating entities.
#[derive(Clone, Debug)]
pub struct LayoutCursor {
    geometry: PageGeometry,
    per_row: usize,
    tile: Size,
    origin: Point,
    page: usize,
    placed: usize,
}

impl LayoutCursor {
    /// Cursor at the first-page content origin.
    pub fn new(geometry: PageGeometry, per_row: usize) -> ReportResult<Self> {
        let tile = geometry.tile_size(per_row)?;
        Ok(Self {
            geometry,
            per_row,
            tile,
            origin: Point::new(geometry.margin, geometry.first_top),
            page: 0,
            placed: 0,
        })
    }

    /// Tile size in use.
    pub fn tile(&self) -> Size {
        self.tile
    }

    /// Position of the next tile, before any page break.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Current zero-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Pages touched so far (at least one).
    pub fn page_count(&self) -> usize {
        self.page + 1
    }

    /// Place one tile: break the page if it would overflow, then advance.
    pub fn place(&mut self) -> Placement {
        if self.origin.y + self.tile.height > self.geometry.break_y {
            self.page += 1;
            self.origin = Point::new(self.geometry.margin, self.geometry.continuation_top);
        }
        let placement = Placement {
            page: self.page,
            rect: Rect::from_origin_size(self.origin, self.tile),
        };

        self.placed += 1;
        if self.placed % self.per_row == 0 {
            self.origin.x = self.geometry.margin;
            self.origin.y += self.tile.height + self.geometry.gap;
        } else {
            self.origin.x += self.tile.width + self.geometry.gap;
        }
        placement
    }
}

/// Placements for `count` tiles, in order.
pub fn plan_placements(
    geometry: PageGeometry,
    per_row: usize,
    count: usize,
) -> ReportResult<Vec<Placement>> {
    let mut cursor = LayoutCursor::new(geometry, per_row)?;
    Ok((0..count).map(|_| cursor.place()).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
