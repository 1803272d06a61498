//! The two concrete carousel configurations.

use super::{CarouselSpec, Role};

/// Testimonial slider: the full control surface is mandatory. Any missing
/// piece leaves the widget inert.
pub fn testimonial_spec() -> CarouselSpec {
    CarouselSpec {
        root: ".testimonial-carousel",
        viewport: Role::Required(".testimonial-viewport"),
        track: Role::Required(".testimonial-track"),
        prev: Role::Required(".testimonial-prev"),
        next: Role::Required(".testimonial-next"),
        indicators: Role::Required(".testimonial-indicators"),
        breakpoint_px: 768,
        wide_items: 3,
        interval_ms: 5_000,
        patch_missing_images: false,
    }
}

/// Clinic gallery: only the track is mandatory; buttons and indicators are
/// optional enhancements, and the root doubles as the viewport when no
/// dedicated one exists. Photo slides tolerate missing images.
pub fn clinic_spec() -> CarouselSpec {
    CarouselSpec {
        root: ".clinic-carousel",
        viewport: Role::Optional(".clinic-viewport"),
        track: Role::Required(".clinic-track"),
        prev: Role::Optional(".clinic-prev"),
        next: Role::Optional(".clinic-next"),
        indicators: Role::Optional(".clinic-indicators"),
        breakpoint_px: 768,
        wide_items: 4,
        interval_ms: 4_500,
        patch_missing_images: true,
    }
}
