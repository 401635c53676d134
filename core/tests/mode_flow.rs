use dockbox_core::{DisplayMode, LockOwner, ModeChange, ModeMachine, ModePlan, ScrollLock};

/// Minimal stand-in for the presentation layer: records emitted changes and
/// drives the scroll-lock latch the way the widget does.
struct Harness {
    machine: ModeMachine,
    lock: ScrollLock,
    changes: Vec<ModeChange>,
}

impl Harness {
    fn new() -> Self {
        Self {
            machine: ModeMachine::new(),
            lock: ScrollLock::new(),
            changes: Vec::new(),
        }
    }

    fn set_mode(&mut self, next: DisplayMode, internal: bool) -> Option<ModePlan> {
        let (change, plan) = self.machine.set_mode(next, internal)?;
        if plan.release_scroll_lock {
            self.lock.release(LockOwner::Lightbox);
        }
        if plan.acquire_scroll_lock {
            self.lock.acquire(LockOwner::Lightbox);
        }
        self.changes.push(change);
        Some(plan)
    }

    fn click(&mut self) {
        let target = self.machine.click_target();
        let _ = self.set_mode(target, true);
    }

    fn escape(&mut self) {
        if self.machine.mode() == DisplayMode::Lightbox {
            let target = self.machine.restore_target();
            let _ = self.set_mode(target, true);
        }
    }
}

#[test]
fn first_set_emits_exactly_one_change_with_unset_previous() {
    let mut harness = Harness::new();
    let _ = harness.set_mode(DisplayMode::Dock, false);
    assert_eq!(harness.changes.len(), 1);
    let change = harness.changes[0];
    assert_eq!(change.previous, None);
    assert_eq!(change.mode, DisplayMode::Dock);

    // a repeated write stays silent
    assert!(harness.set_mode(DisplayMode::Dock, false).is_none());
    assert_eq!(harness.changes.len(), 1);
}

#[test]
fn hidden_click_dock_lightbox_escape_lands_inline() {
    let mut harness = Harness::new();

    let _ = harness.set_mode(DisplayMode::Hidden, false);
    assert!(harness.machine.was_hidden());

    harness.click();
    assert_eq!(harness.machine.mode(), DisplayMode::Inline);
    assert!(!harness.machine.was_hidden());

    let plan = harness.set_mode(DisplayMode::Dock, false).unwrap();
    assert!(plan.enter_dock);
    assert!(plan.dock_animate);

    let plan = harness.set_mode(DisplayMode::Lightbox, false).unwrap();
    assert!(plan.acquire_scroll_lock);
    assert!(plan.trap_focus);
    assert!(harness.lock.is_engaged());

    harness.escape();
    assert_eq!(harness.machine.mode(), DisplayMode::Inline);
    assert!(!harness.lock.is_engaged());

    let modes: Vec<DisplayMode> = harness.changes.iter().map(|change| change.mode).collect();
    assert_eq!(
        modes,
        vec![
            DisplayMode::Hidden,
            DisplayMode::Inline,
            DisplayMode::Dock,
            DisplayMode::Lightbox,
            DisplayMode::Inline,
        ]
    );
    assert!(harness.changes[1].internal);
    assert!(!harness.changes[2].internal);
    assert!(harness.changes[4].internal);
}

#[test]
fn escape_returns_to_hidden_when_never_shown_inline() {
    let mut harness = Harness::new();
    let _ = harness.set_mode(DisplayMode::Hidden, false);
    let _ = harness.set_mode(DisplayMode::Lightbox, false);
    harness.escape();
    assert_eq!(harness.machine.mode(), DisplayMode::Hidden);
}

#[test]
fn dock_to_inline_plan_resyncs_before_animating() {
    let mut harness = Harness::new();
    let _ = harness.set_mode(DisplayMode::Dock, false);
    let plan = harness.set_mode(DisplayMode::Inline, false).unwrap();
    assert!(plan.resync_dock_first);
    assert!(plan.animate_to_inline);
    assert!(plan.schedule_style_clear);
}

#[test]
fn lightbox_to_dock_releases_the_lock() {
    let mut harness = Harness::new();
    let _ = harness.set_mode(DisplayMode::Lightbox, false);
    assert!(harness.lock.is_engaged());
    let plan = harness.set_mode(DisplayMode::Dock, false).unwrap();
    assert!(plan.release_scroll_lock);
    assert!(!harness.lock.is_engaged());
}
