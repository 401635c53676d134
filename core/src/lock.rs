/// Who is holding the page scroll lock. A single-owner latch, not a
/// ref-count: lightbox and drag never hold it at the same time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockOwner {
    Lightbox,
    Drag,
}

#[derive(Debug, Default)]
pub struct ScrollLock {
    owner: Option<LockOwner>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> Option<LockOwner> {
        self.owner
    }

    pub fn is_engaged(&self) -> bool {
        self.owner.is_some()
    }

    /// Returns true when the latch newly engaged. Re-acquiring as the same
    /// owner or while another owner holds it changes nothing.
    pub fn acquire(&mut self, owner: LockOwner) -> bool {
        if self.owner.is_some() {
            return false;
        }
        self.owner = Some(owner);
        true
    }

    /// Returns true when the latch disengaged. Only the holder can release.
    pub fn release(&mut self, owner: LockOwner) -> bool {
        if self.owner != Some(owner) {
            return false;
        }
        self.owner = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_and_release_round_trip() {
        let mut lock = ScrollLock::new();
        assert!(lock.acquire(LockOwner::Lightbox));
        assert!(lock.is_engaged());
        assert!(!lock.acquire(LockOwner::Lightbox));
        assert!(lock.release(LockOwner::Lightbox));
        assert!(!lock.is_engaged());
    }

    #[test]
    fn only_the_holder_releases() {
        let mut lock = ScrollLock::new();
        assert!(lock.acquire(LockOwner::Drag));
        assert!(!lock.release(LockOwner::Lightbox));
        assert!(lock.is_engaged());
        assert!(!lock.acquire(LockOwner::Lightbox));
        assert!(lock.release(LockOwner::Drag));
    }
}
