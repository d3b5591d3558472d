use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::dom::ElementHandle;

pub type SharedScrollLock<E> = Rc<RefCell<ScrollLock<E>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LockHolder {
    Lightbox,
    MediaModal,
}

pub struct ScrollLock<E: ElementHandle> {
    body: E,
    holders: BTreeSet<LockHolder>,
}

impl<E: ElementHandle> ScrollLock<E> {
    pub fn new(body: E) -> Self {
        Self {
            body,
            holders: BTreeSet::new(),
        }
    }

    pub fn acquire(&mut self, holder: LockHolder) {
        let was_free = self.holders.is_empty();
        self.holders.insert(holder);
        if was_free {
            self.body.set_style("overflow", "hidden");
        }
    }

    pub fn release(&mut self, holder: LockHolder) {
        if !self.holders.remove(&holder) {
            return;
        }
        if self.holders.is_empty() {
            self.body.clear_style("overflow");
        }
    }

    pub fn is_locked(&self) -> bool {
        !self.holders.is_empty()
    }

    pub fn shared(body: E) -> SharedScrollLock<E> {
        Rc::new(RefCell::new(Self::new(body)))
    }
}
