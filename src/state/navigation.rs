//! Navigation-related state types.

/// Viewport width above which the mobile menu cannot stay open.
///
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Scroll offset past which the header switches to its emphasized style.
///
pub const HEADER_EMPHASIS_THRESHOLD: f64 = 50.0;

/// Specifying the header treatment for a scroll position.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HeaderTreatment {
    Resting,
    Emphasized,
}

impl HeaderTreatment {
    /// Treatment for the given scroll offset. Exactly at the threshold the
    /// header is still resting.
    ///
    pub fn for_scroll(scroll_y: f64) -> HeaderTreatment {
        if scroll_y > HEADER_EMPHASIS_THRESHOLD {
            HeaderTreatment::Emphasized
        } else {
            HeaderTreatment::Resting
        }
    }
}
