//! Page math for the carousels, kept free of DOM types so it can be tested
//! natively.

/// How many slides fit in one page at the given viewport width. Narrow
/// viewports always show one slide per page.
pub fn items_per_page(width_px: i32, breakpoint_px: i32, wide_items: usize) -> usize {
    if width_px < breakpoint_px {
        1
    } else {
        wide_items.max(1)
    }
}

/// Page/ghost plan for a slide count at a given items-per-page. Ghost slides
/// pad the track so the slide count divides evenly into pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub items_per_page: usize,
    pub pages: usize,
    pub padding: usize,
}

impl Layout {
    pub fn plan(real_slides: usize, items_per_page: usize) -> Self {
        let items_per_page = items_per_page.max(1);
        if real_slides == 0 {
            return Self {
                items_per_page,
                pages: 1,
                padding: 0,
            };
        }
        let pages = real_slides.div_ceil(items_per_page);
        let padding = pages * items_per_page - real_slides;
        Self {
            items_per_page,
            pages,
            padding,
        }
    }
}

/// Wrap a possibly-negative page index into `[0, pages)`.
pub fn wrap_index(index: isize, pages: usize) -> usize {
    if pages == 0 {
        return 0;
    }
    let pages = pages as isize;
    (((index % pages) + pages) % pages) as usize
}

/// Closest valid page after a relayout shrinks or grows the page count.
pub fn clamp_page(current: usize, pages: usize) -> usize {
    if pages == 0 { 0 } else { current.min(pages - 1) }
}

/// Pixel offset of a page, rounded to a whole pixel so the track never sits
/// on a sub-pixel boundary.
pub fn page_offset_px(page: usize, page_width: f64) -> i32 {
    (page as f64 * page_width).round() as i32
}
