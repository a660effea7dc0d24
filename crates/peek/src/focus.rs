//! Stacking and visibility coordination with the host's windows
//!
//! A peek window is not permanently topmost. It turns stay-on-top on while the host's
//! main window is in the foreground and off as soon as a host dialog or another
//! application takes over. Independently it hides while every host window is hidden
//! or minimized.

/// Who owns the window that just became the foreground window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForegroundKind {
    HostMain,
    HostDialog,
    /// Any peek window, including this one
    Peek,
    Foreign,
}

/// Stay-on-top flag of one peek window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackingPolicy {
    topmost: bool,
}

impl StackingPolicy {
    pub fn new(topmost: bool) -> Self {
        Self { topmost }
    }

    pub fn is_topmost(&self) -> bool {
        self.topmost
    }

    /// Update for a foreground change; `Some(flag)` when the flag must change
    pub fn on_foreground(&mut self, kind: ForegroundKind) -> Option<bool> {
        let wanted = match kind {
            ForegroundKind::HostMain => true,
            ForegroundKind::HostDialog | ForegroundKind::Foreign => false,
            ForegroundKind::Peek => return None,
        };
        if wanted == self.topmost {
            return None;
        }
        self.topmost = wanted;
        Some(wanted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostWindowState {
    pub visible: bool,
    pub minimized: bool,
}

impl HostWindowState {
    pub fn is_showing(&self) -> bool {
        self.visible && !self.minimized
    }
}

pub fn any_host_window_visible<I>(states: I) -> bool
where
    I: IntoIterator<Item = HostWindowState>,
{
    states.into_iter().any(|state| state.is_showing())
}

/// Source of the host's top-level window states
pub trait HostWindows {
    fn states(&self) -> Vec<HostWindowState>;
}

impl HostWindows for Vec<HostWindowState> {
    fn states(&self) -> Vec<HostWindowState> {
        self.clone()
    }
}

/// Visibility of one peek window, derived from the host windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilitySync {
    visible: bool,
}

impl VisibilitySync {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Recompute from `hosts`; `Some(visible)` when the peek must be shown or hidden
    pub fn recompute(&mut self, hosts: &dyn HostWindows) -> Option<bool> {
        let visible = any_host_window_visible(hosts.states());
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOWN: HostWindowState = HostWindowState { visible: true, minimized: false };
    const MINIMIZED: HostWindowState = HostWindowState { visible: true, minimized: true };
    const HIDDEN: HostWindowState = HostWindowState { visible: false, minimized: false };

    #[test]
    fn host_main_turns_topmost_on_and_dialogs_turn_it_off() {
        let mut policy = StackingPolicy::default();
        assert_eq!(policy.on_foreground(ForegroundKind::HostMain), Some(true));
        assert_eq!(policy.on_foreground(ForegroundKind::HostMain), None);
        assert_eq!(policy.on_foreground(ForegroundKind::HostDialog), Some(false));
        assert!(!policy.is_topmost());
        assert_eq!(policy.on_foreground(ForegroundKind::HostMain), Some(true));
        assert_eq!(policy.on_foreground(ForegroundKind::Foreign), Some(false));
    }

    #[test]
    fn peek_focus_leaves_flag_alone() {
        let mut policy = StackingPolicy::new(true);
        assert_eq!(policy.on_foreground(ForegroundKind::Peek), None);
        assert!(policy.is_topmost());

        let mut policy = StackingPolicy::new(false);
        assert_eq!(policy.on_foreground(ForegroundKind::Peek), None);
        assert!(!policy.is_topmost());
    }

    #[test]
    fn any_showing_window_keeps_peek_visible() {
        assert!(any_host_window_visible([HIDDEN, MINIMIZED, SHOWN]));
        assert!(!any_host_window_visible([HIDDEN, MINIMIZED]));
        assert!(!any_host_window_visible([]));
    }

    #[test]
    fn visibility_reports_only_changes() {
        let mut sync = VisibilitySync::new(true);
        assert_eq!(sync.recompute(&vec![SHOWN]), None);
        assert_eq!(sync.recompute(&vec![MINIMIZED]), Some(false));
        assert_eq!(sync.recompute(&vec![MINIMIZED, HIDDEN]), None);
        assert!(!sync.is_visible());
        assert_eq!(sync.recompute(&vec![MINIMIZED, SHOWN]), Some(true));
    }
}
