//! View math shared by the sections: staggered entrance delays, card tilt and
//! the navigation bar's scrolled state.

pub const TILT_DAMPING: f64 = 20.0;
pub const SCROLLED_OFFSET: f64 = 50.0;

/// Transition delay in milliseconds for the `index`-th item of a staggered
/// group.
pub fn stagger_delay_ms(index: usize, step_ms: u32, offset_ms: u32) -> u32 {
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    offset_ms.saturating_add(index.saturating_mul(step_ms))
}

/// Inline style for an element that fades and slides into place once its
/// section has been revealed.
pub fn reveal_style(visible: bool, hidden_transform: &str, delay_ms: u32, duration_ms: u32) -> String {
    let (opacity, transform) = if visible {
        (1, "translate(0, 0)")
    } else {
        (0, hidden_transform)
    };
    format!(
        "opacity: {opacity}; transform: {transform}; \
         transition: opacity {duration_ms}ms ease-out {delay_ms}ms, \
         transform {duration_ms}ms ease-out {delay_ms}ms;"
    )
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    /// Rotation for a pointer at (`x`, `y`) relative to the top-left of a
    /// `width` x `height` card.
    pub fn from_pointer(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            rotate_x: (y - height / 2.0) / TILT_DAMPING,
            rotate_y: (width / 2.0 - x) / TILT_DAMPING,
        }
    }

    pub fn style(&self) -> String {
        format!(
            "transform: rotateX({:.2}deg) rotateY({:.2}deg); transition: transform 0.1s ease-out;",
            self.rotate_x, self.rotate_y
        )
    }
}

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_OFFSET
}
