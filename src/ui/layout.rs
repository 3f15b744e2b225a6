//! Responsive sizing from the terminal dimensions.

/// Terminal width breakpoints for responsive layouts
pub mod breakpoints {
    /// Extra small terminal (< 60 columns)
    pub const XS_WIDTH: u16 = 60;
    /// Below this the editor screens stack their panes vertically
    pub const SPLIT_WIDTH: u16 = 100;
    /// Below this the navbar drops screen titles and keeps hotkeys
    pub const NAV_FULL_WIDTH: u16 = 90;
}

/// Terminal dimensions plus proportional sizing helpers.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext {
    pub width: u16,
    pub height: u16,
}

impl LayoutContext {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Width as a percentage of the terminal, minimum 1.
    pub fn percent_width(&self, percentage: u16) -> u16 {
        ((self.width as u32 * percentage as u32) / 100).max(1) as u16
    }

    /// Proportional width clamped to `[min, max]`.
    pub fn bounded_width(&self, percentage: u16, min: u16, max: u16) -> u16 {
        self.percent_width(percentage).clamp(min, max)
    }

    pub fn is_extra_small(&self) -> bool {
        self.width < breakpoints::XS_WIDTH
    }

    /// Statement and editor go on top of each other instead of side by side.
    pub fn should_stack_panels(&self) -> bool {
        self.width < breakpoints::SPLIT_WIDTH
    }

    pub fn compact_nav(&self) -> bool {
        self.width < breakpoints::NAV_FULL_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_width() {
        let ctx = LayoutContext::new(200, 40);
        assert_eq!(ctx.bounded_width(30, 20, 50), 50);
        assert_eq!(LayoutContext::new(40, 20).bounded_width(30, 20, 50), 20);
    }

    #[test]
    fn test_stacking_breakpoint() {
        assert!(LayoutContext::new(80, 30).should_stack_panels());
        assert!(!LayoutContext::new(140, 30).should_stack_panels());
    }
}
