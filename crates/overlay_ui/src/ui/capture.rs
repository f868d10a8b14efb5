//! Input capture declarations
//!
//! Every control declares which input categories it intercepts and whether
//! that input is withheld from the host application underneath the overlay.

use bitflags::bitflags;

bitflags! {
    /// Bitmask describing what input a control intercepts
    ///
    /// The flags combine freely. `FILTER` makes a control participate in hit
    /// testing for notification purposes only: it receives the event but the
    /// search continues past it, so controls (and the host) beneath still see
    /// the input. `DO_NOT_BLOCK` is orthogonal to dispatch order: the control
    /// may handle the event, but the host application receives it as well.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CaptureType: u32 {
        /// Observe input without blocking it from anything beneath
        const FILTER = 1 << 0;
        /// Intercept pointer movement and button events
        const MOUSE = 1 << 1;
        /// Intercept scroll wheel events
        const MOUSE_WHEEL = 1 << 2;
        /// Never withhold the event from the host application
        const DO_NOT_BLOCK = 1 << 3;
    }
}

impl CaptureType {
    /// Captures nothing; the control is transparent to interaction
    pub const NONE: CaptureType = CaptureType::empty();

    /// Whether the control handles pointer movement/button events
    pub fn captures_mouse(&self) -> bool {
        self.contains(CaptureType::MOUSE)
    }

    /// Whether the control handles wheel events
    pub fn captures_wheel(&self) -> bool {
        self.contains(CaptureType::MOUSE_WHEEL)
    }

    /// Whether the control is notification-only (pass-through)
    pub fn is_filter(&self) -> bool {
        self.contains(CaptureType::FILTER)
    }

    /// Whether input resolved to this control is withheld from the host
    pub fn blocks_host(&self) -> bool {
        !self.contains(CaptureType::DO_NOT_BLOCK)
    }
}

impl Default for CaptureType {
    fn default() -> Self {
        CaptureType::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_combinations() {
        let capture = CaptureType::MOUSE | CaptureType::MOUSE_WHEEL;
        assert!(capture.captures_mouse());
        assert!(capture.captures_wheel());
        assert!(!capture.is_filter());
        assert!(capture.blocks_host());
    }

    #[test]
    fn test_do_not_block_is_orthogonal() {
        let capture = CaptureType::MOUSE | CaptureType::DO_NOT_BLOCK;
        assert!(capture.captures_mouse());
        assert!(!capture.blocks_host());
    }

    #[test]
    fn test_none_captures_nothing() {
        assert!(!CaptureType::NONE.captures_mouse());
        assert!(!CaptureType::NONE.captures_wheel());
        assert!(!CaptureType::NONE.is_filter());
    }
}
