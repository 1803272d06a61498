//! Autoplay carousels.
//!
//! One configurable widget, mounted twice with different role maps: the
//! testimonial slider and the clinic gallery. Both carousels share the same
//! state machine (`Running`/`Stopped` autoplay, modulo-wrapped page index,
//! hover pause, resize relayout); they differ only in which child elements
//! are required and in a few tuning knobs, all captured by [`CarouselSpec`].

pub mod config;
pub mod layout;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use layout::Layout;

/// Class carried by padding slides so relayout can find and replace them.
pub const GHOST_CLASS: &str = "carousel-ghost";

/// Inline SVG shown in place of a slide image that failed to load.
const IMAGE_FALLBACK: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' \
viewBox='0 0 4 3'%3E%3Crect width='4' height='3' fill='%23e8e4df'/%3E%3C/svg%3E";

/// How a child element participates in the widget. A missing `Required` role
/// leaves the whole widget inert; a missing `Optional` role just drops that
/// affordance.
#[derive(Clone, Copy, Debug)]
pub enum Role {
    Required(&'static str),
    Optional(&'static str),
}

/// Declarative description of one carousel instance.
pub struct CarouselSpec {
    /// Selector for the widget root; no match means the page has no such
    /// carousel and mounting quietly yields nothing.
    pub root: &'static str,
    /// Scroll viewport. When optional and absent, the root doubles as it.
    pub viewport: Role,
    pub track: Role,
    pub prev: Role,
    pub next: Role,
    pub indicators: Role,
    /// Below this width every page holds a single slide.
    pub breakpoint_px: i32,
    /// Slides per page at or above the breakpoint.
    pub wide_items: usize,
    pub interval_ms: i32,
    /// Swap broken slide images for a placeholder visual.
    pub patch_missing_images: bool,
}

struct Inner {
    document: Document,
    viewport: HtmlElement,
    track: HtmlElement,
    indicators: Option<HtmlElement>,
    breakpoint_px: i32,
    wide_items: usize,
    interval_ms: i32,
    /// Slide count at mount time; ghosts are never counted.
    real_slides: usize,
    current: usize,
    pages: usize,
    timer: Option<i32>,
    tick: Option<Closure<dyn FnMut()>>,
}

/// Shared handle to one mounted carousel. Event closures hold clones, so the
/// widget lives as long as the page does.
#[derive(Clone)]
pub struct Carousel {
    inner: Rc<RefCell<Inner>>,
}

/// Bring up every carousel the page markup carries.
pub fn mount_all(document: &Document) -> Vec<Carousel> {
    [config::testimonial_spec(), config::clinic_spec()]
        .into_iter()
        .filter_map(|spec| Carousel::mount(document, spec))
        .collect()
}

impl Carousel {
    /// Resolve the spec's roles against the document and wire the widget up.
    /// Returns `None` (permanently inert: no timer, no listeners) when the
    /// root or any required role is missing.
    pub fn mount(document: &Document, spec: CarouselSpec) -> Option<Carousel> {
        let root = document
            .query_selector(spec.root)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())?;

        let viewport = find_role(&root, spec.viewport)?.unwrap_or_else(|| root.clone());
        let track = find_role(&root, spec.track)??;
        let prev = find_role(&root, spec.prev)?;
        let next = find_role(&root, spec.next)?;
        let indicators = find_role(&root, spec.indicators)?;

        if spec.patch_missing_images {
            patch_missing_images(&track);
        }

        let real_slides = track.children().length() as usize;
        let widget = Carousel {
            inner: Rc::new(RefCell::new(Inner {
                document: document.clone(),
                viewport,
                track,
                indicators,
                breakpoint_px: spec.breakpoint_px,
                wide_items: spec.wide_items,
                interval_ms: spec.interval_ms,
                real_slides,
                current: 0,
                pages: 1,
                timer: None,
                tick: None,
            })),
        };

        widget.relayout();
        widget.wire_tick();
        widget.wire_button(prev.as_ref(), -1);
        widget.wire_button(next.as_ref(), 1);
        widget.wire_indicator_clicks();
        widget.wire_hover();
        widget.wire_resize();
        widget.start();
        Some(widget)
    }

    /// Advance one page, wrapping, with the manual-interaction timer reset.
    pub fn next(&self) {
        self.manual_step(1);
    }

    /// Retreat one page, wrapping, with the manual-interaction timer reset.
    pub fn prev(&self) {
        self.manual_step(-1);
    }

    /// Jump straight to a page (modulo-wrapped), with the timer reset.
    pub fn go_to(&self, page: usize) {
        self.stop();
        {
            let mut inner = self.inner.borrow_mut();
            inner.current = layout::wrap_index(page as isize, inner.pages);
        }
        self.render_position();
        self.start();
    }

    /// Start (or restart) autoplay. Replaces any live timer, so a manual
    /// interaction always buys a full interval of inactivity.
    pub fn start(&self) {
        self.stop();
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle = {
            let inner = self.inner.borrow();
            let Some(tick) = inner.tick.as_ref() else {
                return;
            };
            window.set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                inner.interval_ms,
            )
        };
        if let Ok(handle) = handle {
            self.inner.borrow_mut().timer = Some(handle);
        }
    }

    /// Stop autoplay. No-op when already stopped.
    pub fn stop(&self) {
        let handle = self.inner.borrow_mut().timer.take();
        if let (Some(window), Some(handle)) = (web_sys::window(), handle) {
            window.clear_interval_with_handle(handle);
        }
    }

    pub fn current_index(&self) -> usize {
        self.inner.borrow().current
    }

    pub fn page_count(&self) -> usize {
        self.inner.borrow().pages
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().timer.is_some()
    }

    /// Recompute everything that depends on viewport width: items per page,
    /// ghost padding, slide sizing, indicators, and the translate offset.
    /// The current page is clamped to the nearest valid index.
    pub fn relayout(&self) {
        let (document, track, plan) = {
            let mut inner = self.inner.borrow_mut();
            let width = inner.viewport.get_bounding_client_rect().width();
            let per_page =
                layout::items_per_page(width as i32, inner.breakpoint_px, inner.wide_items);
            let plan = Layout::plan(inner.real_slides, per_page);
            inner.pages = plan.pages;
            inner.current = layout::clamp_page(inner.current, plan.pages);
            (inner.document.clone(), inner.track.clone(), plan)
        };

        remove_ghosts(&track);
        append_ghosts(&document, &track, plan.padding);
        size_slides(&track, plan.items_per_page);

        let inner = self.inner.borrow();
        rebuild_indicators(&inner);
        apply_offset(&inner);
    }

    fn manual_step(&self, delta: isize) {
        self.stop();
        self.step(delta);
        self.start();
    }

    /// Index change shared by autoplay and manual navigation. Does not touch
    /// the timer.
    fn step(&self, delta: isize) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.current = layout::wrap_index(inner.current as isize + delta, inner.pages);
        }
        self.render_position();
    }

    fn render_position(&self) {
        let inner = self.inner.borrow();
        apply_offset(&inner);
        highlight_indicator(&inner);
    }

    fn wire_tick(&self) {
        let widget = self.clone();
        let tick = Closure::wrap(Box::new(move || {
            widget.step(1);
        }) as Box<dyn FnMut()>);
        self.inner.borrow_mut().tick = Some(tick);
    }

    fn wire_button(&self, button: Option<&HtmlElement>, delta: isize) {
        let Some(button) = button else {
            return;
        };
        let widget = self.clone();
        let on_click = Closure::wrap(Box::new(move |_: web_sys::Event| {
            widget.manual_step(delta);
        }) as Box<dyn FnMut(_)>);
        let _ = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }

    /// One delegated listener on the indicator container; the dots are
    /// rebuilt on every relayout, so per-dot listeners would not survive.
    fn wire_indicator_clicks(&self) {
        let Some(container) = self.inner.borrow().indicators.clone() else {
            return;
        };
        let widget = self.clone();
        let on_click = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Some(dot) = target.closest("[data-page]").ok().flatten() else {
                return;
            };
            let Some(page) = dot
                .get_attribute("data-page")
                .and_then(|p| p.parse::<usize>().ok())
            else {
                return;
            };
            widget.go_to(page);
        }) as Box<dyn FnMut(_)>);
        let _ =
            container.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }

    /// Hover pause: pointer over the viewport stops autoplay, leaving
    /// restarts it.
    fn wire_hover(&self) {
        let viewport = self.inner.borrow().viewport.clone();

        let widget = self.clone();
        let on_enter = Closure::wrap(Box::new(move |_: web_sys::Event| {
            widget.stop();
        }) as Box<dyn FnMut(_)>);
        let _ = viewport
            .add_event_listener_with_callback("pointerenter", on_enter.as_ref().unchecked_ref());
        on_enter.forget();

        let widget = self.clone();
        let on_leave = Closure::wrap(Box::new(move |_: web_sys::Event| {
            widget.start();
        }) as Box<dyn FnMut(_)>);
        let _ = viewport
            .add_event_listener_with_callback("pointerleave", on_leave.as_ref().unchecked_ref());
        on_leave.forget();
    }

    fn wire_resize(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let widget = self.clone();
        let on_resize = Closure::wrap(Box::new(move |_: web_sys::Event| {
            widget.relayout();
        }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
        on_resize.forget();
    }
}

/// Resolve one role against the widget root. Outer `None` means a required
/// element is missing and the mount must bail; inner `None` means an
/// optional element is absent.
fn find_role(root: &HtmlElement, role: Role) -> Option<Option<HtmlElement>> {
    let (selector, required) = match role {
        Role::Required(s) => (s, true),
        Role::Optional(s) => (s, false),
    };
    let found = root
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    match (found, required) {
        (Some(el), _) => Some(Some(el)),
        (None, true) => None,
        (None, false) => Some(None),
    }
}

fn remove_ghosts(track: &HtmlElement) {
    let selector = format!(".{GHOST_CLASS}");
    while let Ok(Some(ghost)) = track.query_selector(&selector) {
        ghost.remove();
    }
}

fn append_ghosts(document: &Document, track: &HtmlElement, count: usize) {
    for _ in 0..count {
        if let Ok(ghost) = document.create_element("div") {
            ghost.set_class_name(GHOST_CLASS);
            let _ = ghost.set_attribute("aria-hidden", "true");
            let _ = track.append_child(&ghost);
        }
    }
}

fn size_slides(track: &HtmlElement, items_per_page: usize) {
    let children = track.children();
    let basis = format!("0 0 {:.4}%", 100.0 / items_per_page as f64);
    for i in 0..children.length() {
        let Some(slide) = children
            .item(i)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let _ = slide.style().set_property("flex", &basis);
    }
}

fn rebuild_indicators(inner: &Inner) {
    let Some(container) = inner.indicators.as_ref() else {
        return;
    };
    container.set_inner_html("");
    for page in 0..inner.pages {
        if let Ok(dot) = inner.document.create_element("button") {
            dot.set_class_name(if page == inner.current {
                "carousel-dot active"
            } else {
                "carousel-dot"
            });
            let _ = dot.set_attribute("type", "button");
            let _ = dot.set_attribute("data-page", &page.to_string());
            let _ = dot.set_attribute("aria-label", &format!("Go to slide {}", page + 1));
            let _ = container.append_child(&dot);
        }
    }
}

fn highlight_indicator(inner: &Inner) {
    let Some(container) = inner.indicators.as_ref() else {
        return;
    };
    let dots = container.children();
    for i in 0..dots.length() {
        let Some(dot) = dots.item(i) else {
            continue;
        };
        let _ = if i as usize == inner.current {
            dot.class_list().add_1("active")
        } else {
            dot.class_list().remove_1("active")
        };
    }
}

/// The track moves as one block: a single whole-pixel translate per page.
fn apply_offset(inner: &Inner) {
    let page_width = inner.viewport.get_bounding_client_rect().width();
    let offset = layout::page_offset_px(inner.current, page_width);
    let _ = inner
        .track
        .style()
        .set_property("transform", &format!("translateX(-{offset}px)"));
}

/// Swap any slide image that fails to load for a neutral placeholder
/// visual instead of showing a broken image.
fn patch_missing_images(track: &HtmlElement) {
    let Ok(images) = track.query_selector_all("img") else {
        return;
    };
    for i in 0..images.length() {
        let Some(img) = images
            .item(i)
            .and_then(|node| node.dyn_into::<HtmlImageElement>().ok())
        else {
            continue;
        };
        let handle = img.clone();
        let on_error = Closure::wrap(Box::new(move |_: web_sys::Event| {
            // Guard against the fallback itself erroring into a loop.
            if handle.get_attribute("data-img-fallback").is_some() {
                return;
            }
            let _ = handle.set_attribute("data-img-fallback", "1");
            handle.set_src(IMAGE_FALLBACK);
        }) as Box<dyn FnMut(_)>);
        let _ = img.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
        on_error.forget();
    }
}
