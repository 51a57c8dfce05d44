//! Observer list for committed slide changes.

use serde::{Deserialize, Serialize};

use crate::slide::Slide;

/// Handle returned by [`Observers::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObserverId(pub u32);

/// Payload of the `change` notification.
#[derive(Debug, Clone, Copy)]
pub struct SlideChange<'a> {
    pub index: usize,
    pub slide: &'a Slide,
}

type Callback = Box<dyn FnMut(&SlideChange<'_>)>;

#[derive(Default)]
pub struct Observers {
    next_id: u32,
    entries: Vec<(ObserverId, Callback)>,
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl Observers {
    pub fn subscribe(&mut self, f: impl FnMut(&SlideChange<'_>) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, Box::new(f)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        self.entries.len() != before
    }

    /// Call every observer in registration order.
    pub fn notify(&mut self, change: &SlideChange<'_>) {
        for (_, f) in self.entries.iter_mut() {
            f(change);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notifies_in_order_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut obs = Observers::default();

        let a = {
            let seen = seen.clone();
            obs.subscribe(move |c| seen.borrow_mut().push(("a", c.index)))
        };
        {
            let seen = seen.clone();
            obs.subscribe(move |c| seen.borrow_mut().push(("b", c.index)));
        }

        let slide = Slide::image("x.jpg");
        obs.notify(&SlideChange {
            index: 2,
            slide: &slide,
        });
        assert!(obs.unsubscribe(a));
        assert!(!obs.unsubscribe(a));
        obs.notify(&SlideChange {
            index: 0,
            slide: &slide,
        });

        assert_eq!(*seen.borrow(), vec![("a", 2), ("b", 2), ("b", 0)]);
        assert_eq!(obs.len(), 1);
    }
}
