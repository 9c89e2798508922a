//! Page geometry for the sales report: title block, table columns, pagination.
//!
//! Units are PDF points with the origin at the bottom-left of the page.

use std::ops::Range;

/// US Letter.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 30.0;

pub const TITLE_SIZE: f32 = 18.0;
pub const TITLE_LEADING: f32 = 22.0;
pub const TITLE_SPACE_AFTER: f32 = 6.0;
pub const SPACER: f32 = 20.0;

pub const COLUMN_WIDTHS: [f32; 4] = [150.0, 100.0, 100.0, 100.0];
pub const CELL_PADDING_X: f32 = 6.0;
pub const GRID_WIDTH: f32 = 1.0;

pub const HEADER_SIZE: f32 = 12.0;
pub const HEADER_PADDING_TOP: f32 = 3.0;
pub const HEADER_PADDING_BOTTOM: f32 = 12.0;
pub const BODY_SIZE: f32 = 10.0;
pub const BODY_PADDING: f32 = 3.0;

/// Line height for a font size, as a 1.2 leading.
fn leading(size: f32) -> f32 {
    size * 1.2
}

pub fn header_height() -> f32 {
    HEADER_PADDING_TOP + leading(HEADER_SIZE) + HEADER_PADDING_BOTTOM
}

pub fn body_height() -> f32 {
    BODY_PADDING + leading(BODY_SIZE) + BODY_PADDING
}

pub fn table_width() -> f32 {
    COLUMN_WIDTHS.iter().sum()
}

/// Left edge of the table; the table is centered between the margins.
pub fn table_left() -> f32 {
    (PAGE_WIDTH - table_width()) / 2.0
}

/// Left edge of column `col`.
pub fn column_left(col: usize) -> f32 {
    table_left() + COLUMN_WIDTHS[..col].iter().sum::<f32>()
}

/// Baseline of the title line.
pub fn title_baseline() -> f32 {
    PAGE_HEIGHT - MARGIN - TITLE_SIZE
}

fn first_table_top() -> f32 {
    PAGE_HEIGHT - MARGIN - TITLE_LEADING - TITLE_SPACE_AFTER - SPACER
}

fn continuation_table_top() -> f32 {
    PAGE_HEIGHT - MARGIN
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Center,
    Right,
}

/// Header cells are centered; in the body only the product column is.
pub fn alignment(col: usize, header: bool) -> Align {
    if header || col == 0 {
        Align::Center
    } else {
        Align::Right
    }
}

/// X of the text start for a cell of column `col` holding text `width` points wide.
pub fn text_x(col: usize, width: f32, align: Align) -> f32 {
    let left = column_left(col);
    match align {
        Align::Center => left + (COLUMN_WIDTHS[col] - width) / 2.0,
        Align::Right => left + COLUMN_WIDTHS[col] - CELL_PADDING_X - width,
    }
}

/// One page worth of table: the header at `table_top`, then `rows` of the body.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice {
    pub rows: Range<usize>,
    pub table_top: f32,
    pub has_title: bool,
}

impl PageSlice {
    pub fn header_bottom(&self) -> f32 {
        self.table_top - header_height()
    }

    /// Bottom edge of the `i`-th body row on this page (0-based within the page).
    pub fn row_bottom(&self, i: usize) -> f32 {
        self.header_bottom() - body_height() * (i as f32 + 1.0)
    }

    pub fn table_bottom(&self) -> f32 {
        match self.rows.len() {
            0 => self.header_bottom(),
            n => self.row_bottom(n - 1),
        }
    }
}

/// How many body rows fit under a header starting at `top`.
fn rows_that_fit(top: f32) -> usize {
    let space = top - header_height() - MARGIN;
    if space <= 0.0 {
        return 0;
    }
    (space / body_height()).floor() as usize
}

/// Splits `row_count` body rows across pages. The first page carries the
/// title; the header row is repeated on every page. Always at least one page.
pub fn paginate(row_count: usize) -> Vec<PageSlice> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut top = first_table_top();
    let mut has_title = true;

    loop {
        // Never emit a page that cannot hold a single row.
        let capacity = rows_that_fit(top).max(1);
        let end = (start + capacity).min(row_count);
        pages.push(PageSlice {
            rows: start..end,
            table_top: top,
            has_title,
        });
        if end >= row_count {
            break;
        }
        start = end;
        top = continuation_table_top();
        has_title = false;
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_centered() {
        assert_eq!(table_width(), 450.0);
        assert_eq!(table_left(), 81.0);
        assert_eq!(column_left(1), 231.0);
        assert_eq!(column_left(3), 431.0);
    }

    #[test]
    fn test_alignment_rules() {
        assert_eq!(alignment(0, true), Align::Center);
        assert_eq!(alignment(2, true), Align::Center);
        assert_eq!(alignment(0, false), Align::Center);
        assert_eq!(alignment(1, false), Align::Right);
        assert_eq!(alignment(3, false), Align::Right);
    }

    #[test]
    fn test_right_aligned_text_ends_at_padding() {
        let x = text_x(1, 20.0, Align::Right);
        assert_eq!(x + 20.0, column_left(2) - CELL_PADDING_X);
    }

    #[test]
    fn test_empty_table_is_one_page() {
        let pages = paginate(0);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].has_title);
        assert!(pages[0].rows.is_empty());
    }

    #[test]
    fn test_paginate_covers_every_row_once() {
        let count = 250;
        let pages = paginate(count);
        assert!(pages.len() > 1);
        assert!(pages[0].has_title);
        assert!(pages[1..].iter().all(|p| !p.has_title));

        let mut next = 0;
        for page in &pages {
            assert_eq!(page.rows.start, next);
            next = page.rows.end;
            if !page.rows.is_empty() {
                assert!(page.row_bottom(page.rows.len() - 1) >= MARGIN);
            }
        }
        assert_eq!(next, count);
    }

    #[test]
    fn test_continuation_pages_hold_more_rows() {
        let pages = paginate(500);
        assert!(pages[1].rows.len() > pages[0].rows.len());
    }
}
