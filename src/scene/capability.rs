//! Capability - Can this environment render the scene at all?
//!
//! Checked once after mount. A `false` answer is not an error: the
//! placeholder simply stays.

use crossterm::tty::IsTty;

pub trait Capability {
    fn is_interactive(&self) -> bool;
}

/// Always interactive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interactive;

impl Capability for Interactive {
    fn is_interactive(&self) -> bool {
        true
    }
}

/// Never interactive.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl Capability for NonInteractive {
    fn is_interactive(&self) -> bool {
        false
    }
}

/// Interactive when stdout is a terminal that is not `TERM=dumb`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalCapability;

impl Capability for TerminalCapability {
    fn is_interactive(&self) -> bool {
        let dumb = std::env::var("TERM").is_ok_and(|term| term == "dumb");
        std::io::stdout().is_tty() && !dumb
    }
}

impl<F: Fn() -> bool> Capability for F {
    fn is_interactive(&self) -> bool {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_fixed_capabilities() {
        assert!(Interactive.is_interactive());
        assert!(!NonInteractive.is_interactive());
    }

    #[test]
    fn test_closure_capability() {
        let capability: Rc<dyn Capability> = Rc::new(|| true);
        assert!(capability.is_interactive());
    }
}
