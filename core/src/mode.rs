pub const DOCK_Z_INDEX: i32 = 9_999_999;
pub const LIGHTBOX_Z_INDEX: i32 = 10_000_000;
pub const DRAG_OVERLAY_Z_INDEX: i32 = 10_000_001;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    Hidden,
    Inline,
    Dock,
    Lightbox,
}

impl DisplayMode {
    /// Absent and unknown attribute values mean inline.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("hidden") => Self::Hidden,
            Some("dock") => Self::Dock,
            Some("lightbox") => Self::Lightbox,
            _ => Self::Inline,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Inline => "inline",
            Self::Dock => "dock",
            Self::Lightbox => "lightbox",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeChange {
    pub previous: Option<DisplayMode>,
    pub mode: DisplayMode,
    /// Whether the change came from inside the widget (click, escape, drag)
    /// rather than an external attribute write.
    pub internal: bool,
}

/// Side effects a mode change asks the presentation layer to perform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModePlan {
    pub enter_dock: bool,
    pub dock_animate: bool,
    /// Dock positions go stale while the page scrolls; snap to the current
    /// geometry before animating back into flow.
    pub resync_dock_first: bool,
    pub animate_to_inline: bool,
    pub schedule_style_clear: bool,
    pub acquire_scroll_lock: bool,
    pub release_scroll_lock: bool,
    pub trap_focus: bool,
    pub release_focus: bool,
}

pub fn plan_transition(
    previous: Option<DisplayMode>,
    next: DisplayMode,
) -> ModePlan {
    let mut plan = ModePlan::default();
    if previous == Some(DisplayMode::Lightbox) {
        plan.release_scroll_lock = true;
        plan.release_focus = true;
    }
    match next {
        DisplayMode::Dock => {
            plan.enter_dock = true;
            plan.dock_animate = matches!(
                previous,
                Some(DisplayMode::Inline) | Some(DisplayMode::Lightbox)
            );
        }
        DisplayMode::Inline => {
            if previous == Some(DisplayMode::Dock) {
                plan.resync_dock_first = true;
                plan.animate_to_inline = true;
            }
            plan.schedule_style_clear = true;
        }
        DisplayMode::Lightbox => {
            plan.acquire_scroll_lock = true;
            plan.trap_focus = true;
        }
        DisplayMode::Hidden => {}
    }
    plan
}

/// Tracks the active mode and the was-hidden flag. Mode writes are
/// last-write-wins; a repeated write is a no-op and emits nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModeMachine {
    mode: Option<DisplayMode>,
    was_hidden: bool,
}

impl ModeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode.unwrap_or(DisplayMode::Inline)
    }

    pub fn raw_mode(&self) -> Option<DisplayMode> {
        self.mode
    }

    pub fn was_hidden(&self) -> bool {
        self.was_hidden
    }

    pub fn set_mode(&mut self, next: DisplayMode, internal: bool) -> Option<(ModeChange, ModePlan)> {
        let previous = self.mode;
        if previous == Some(next) {
            return None;
        }
        let plan = plan_transition(previous, next);
        self.mode = Some(next);
        match next {
            DisplayMode::Hidden => self.was_hidden = true,
            DisplayMode::Inline | DisplayMode::Dock => self.was_hidden = false,
            DisplayMode::Lightbox => {}
        }
        Some((
            ModeChange {
                previous,
                mode: next,
                internal,
            },
            plan,
        ))
    }

    /// Where a click on the widget takes it.
    pub fn click_target(&self) -> DisplayMode {
        match self.mode() {
            DisplayMode::Hidden => DisplayMode::Inline,
            _ => self.restore_target(),
        }
    }

    /// Where escape from the lightbox takes it.
    pub fn restore_target(&self) -> DisplayMode {
        if self.was_hidden {
            DisplayMode::Hidden
        } else {
            DisplayMode::Inline
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_set_reports_unset_previous() {
        let mut machine = ModeMachine::new();
        let (change, _) = machine.set_mode(DisplayMode::Dock, false).unwrap();
        assert_eq!(change.previous, None);
        assert_eq!(change.mode, DisplayMode::Dock);
        assert!(!change.internal);
    }

    #[test]
    fn repeated_set_is_silent() {
        let mut machine = ModeMachine::new();
        let _ = machine.set_mode(DisplayMode::Dock, false);
        assert!(machine.set_mode(DisplayMode::Dock, false).is_none());
    }

    #[test]
    fn dock_from_hidden_does_not_animate() {
        let mut machine = ModeMachine::new();
        let _ = machine.set_mode(DisplayMode::Hidden, false);
        let (_, plan) = machine.set_mode(DisplayMode::Dock, false).unwrap();
        assert!(plan.enter_dock);
        assert!(!plan.dock_animate);
    }

    #[test]
    fn dock_from_inline_animates() {
        let mut machine = ModeMachine::new();
        let _ = machine.set_mode(DisplayMode::Inline, false);
        let (_, plan) = machine.set_mode(DisplayMode::Dock, false).unwrap();
        assert!(plan.dock_animate);
    }

    #[test]
    fn leaving_lightbox_releases_lock_and_focus() {
        let mut machine = ModeMachine::new();
        let _ = machine.set_mode(DisplayMode::Lightbox, false);
        let (_, plan) = machine.set_mode(DisplayMode::Dock, false).unwrap();
        assert!(plan.release_scroll_lock);
        assert!(plan.release_focus);
    }

    #[test]
    fn inline_after_dock_resyncs_then_animates() {
        let mut machine = ModeMachine::new();
        let _ = machine.set_mode(DisplayMode::Dock, false);
        let (_, plan) = machine.set_mode(DisplayMode::Inline, false).unwrap();
        assert!(plan.resync_dock_first);
        assert!(plan.animate_to_inline);
        assert!(plan.schedule_style_clear);
    }

    #[test]
    fn hidden_flag_tracks_mode_history() {
        let mut machine = ModeMachine::new();
        let _ = machine.set_mode(DisplayMode::Hidden, false);
        assert!(machine.was_hidden());
        assert_eq!(machine.click_target(), DisplayMode::Inline);
        let _ = machine.set_mode(DisplayMode::Inline, true);
        assert!(!machine.was_hidden());
        assert_eq!(machine.restore_target(), DisplayMode::Inline);
    }

    #[test]
    fn lightbox_preserves_hidden_flag() {
        let mut machine = ModeMachine::new();
        let _ = machine.set_mode(DisplayMode::Hidden, false);
        let _ = machine.set_mode(DisplayMode::Lightbox, false);
        assert_eq!(machine.restore_target(), DisplayMode::Hidden);
    }
}
