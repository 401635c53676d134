use std::cell::RefCell;

use dockbox_core::{LockOwner, ScrollLock};

thread_local! {
    static LOCK: RefCell<ScrollLock> = RefCell::new(ScrollLock::new());
}

pub(crate) fn acquire(owner: LockOwner) {
    let engaged = LOCK.with(|lock| lock.borrow_mut().acquire(owner));
    if engaged {
        set_body_locked(true);
    }
}

pub(crate) fn release(owner: LockOwner) {
    let released = LOCK.with(|lock| lock.borrow_mut().release(owner));
    if released {
        set_body_locked(false);
    }
}

fn set_body_locked(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    let style = body.style();
    if locked {
        let _ = style.set_property("height", "100%");
        let _ = style.set_property("overflow", "hidden");
    } else {
        let _ = style.remove_property("height");
        let _ = style.remove_property("overflow");
    }
}
