use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::event::Event;

/// Anything that wants to hear about events.
pub trait Observer {
    fn on_notify(&mut self, event: &Event);
}

type ObserverSlot = Weak<RefCell<dyn Observer>>;

/// One-to-many synchronous event fan-out.
///
/// Observers are held weakly: the subject never keeps one alive, and dropped
/// observers are pruned lazily. The observer list is snapshotted before each
/// notification, so registrations made while notifying apply from the next
/// call onwards.
#[derive(Default)]
pub struct Subject {
    observers: RefCell<Vec<ObserverSlot>>,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Registering the same observer twice is a no-op.
    pub fn add_observer<O: Observer + 'static>(&self, observer: &Rc<RefCell<O>>) {
        let shared: Rc<RefCell<dyn Observer>> = observer.clone();
        let slot = Rc::downgrade(&shared);

        let mut observers = self.observers.borrow_mut();
        observers.retain(|o| o.strong_count() > 0);
        if observers.iter().any(|o| same_observer(o, &slot)) {
            tracing::warn!("observer already registered; ignoring duplicate");
            return;
        }
        observers.push(slot);
    }

    /// Unregister an observer. Unknown observers are ignored.
    pub fn remove_observer<O: Observer + 'static>(&self, observer: &Rc<RefCell<O>>) {
        let shared: Rc<RefCell<dyn Observer>> = observer.clone();
        let slot = Rc::downgrade(&shared);

        let mut observers = self.observers.borrow_mut();
        if let Some(index) = observers.iter().position(|o| same_observer(o, &slot)) {
            observers.remove(index);
        }
    }

    /// Deliver `event` to every live observer in registration order.
    pub fn notify(&self, event: &Event) {
        let snapshot: Vec<Rc<RefCell<dyn Observer>>> = {
            let mut observers = self.observers.borrow_mut();
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };

        tracing::trace!(kind = ?event.kind(), observers = snapshot.len(), "notify");

        for observer in snapshot {
            match observer.try_borrow_mut() {
                Ok(mut observer) => observer.on_notify(event),
                Err(_) => {
                    tracing::warn!(kind = ?event.kind(), "observer busy during notify; skipped")
                }
            }
        }
    }

    /// Number of registered observers that are still alive.
    pub fn len(&self) -> usize {
        self.observers
            .borrow()
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn same_observer(a: &ObserverSlot, b: &ObserverSlot) -> bool {
    std::ptr::addr_eq(a.as_ptr(), b.as_ptr())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyengine_common::Key;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<Event>,
    }

    impl Observer for Recorder {
        fn on_notify(&mut self, event: &Event) {
            self.seen.push(*event);
        }
    }

    struct Tagged {
        tag: u32,
        log: Rc<RefCell<Vec<u32>>>,
    }

    impl Observer for Tagged {
        fn on_notify(&mut self, _event: &Event) {
            self.log.borrow_mut().push(self.tag);
        }
    }

    #[test]
    fn notify_reaches_every_observer() {
        let subject = Subject::new();
        let a = Rc::new(RefCell::new(Recorder::default()));
        let b = Rc::new(RefCell::new(Recorder::default()));
        subject.add_observer(&a);
        subject.add_observer(&b);

        subject.notify(&Event::KeyDown(Key::W));

        assert_eq!(a.borrow().seen, vec![Event::KeyDown(Key::W)]);
        assert_eq!(b.borrow().seen, vec![Event::KeyDown(Key::W)]);
    }

    #[test]
    fn duplicate_add_notifies_once() {
        let subject = Subject::new();
        let a = Rc::new(RefCell::new(Recorder::default()));
        subject.add_observer(&a);
        subject.add_observer(&a);
        assert_eq!(subject.len(), 1);

        subject.notify(&Event::WindowCreated);
        subject.notify(&Event::WindowClosed);

        assert_eq!(a.borrow().seen.len(), 2);
    }

    #[test]
    fn notification_follows_registration_order() {
        let subject = Subject::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let observers: Vec<_> = (0..4)
            .map(|tag| {
                Rc::new(RefCell::new(Tagged {
                    tag,
                    log: log.clone(),
                }))
            })
            .collect();
        for o in &observers {
            subject.add_observer(o);
        }

        subject.notify(&Event::WindowCreated);
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn remove_observer_stops_delivery() {
        let subject = Subject::new();
        let a = Rc::new(RefCell::new(Recorder::default()));
        let b = Rc::new(RefCell::new(Recorder::default()));
        subject.add_observer(&a);
        subject.add_observer(&b);
        subject.remove_observer(&a);

        subject.notify(&Event::WindowClosed);

        assert!(a.borrow().seen.is_empty());
        assert_eq!(b.borrow().seen.len(), 1);
    }

    #[test]
    fn removing_unknown_observer_is_silent() {
        let subject = Subject::new();
        let a = Rc::new(RefCell::new(Recorder::default()));
        subject.remove_observer(&a);
        assert!(subject.is_empty());
    }

    #[test]
    fn dropped_observers_are_pruned() {
        let subject = Subject::new();
        let a = Rc::new(RefCell::new(Recorder::default()));
        {
            let temporary = Rc::new(RefCell::new(Recorder::default()));
            subject.add_observer(&temporary);
            subject.add_observer(&a);
            assert_eq!(subject.len(), 2);
        }
        assert_eq!(subject.len(), 1);

        subject.notify(&Event::WindowCreated);
        assert_eq!(a.borrow().seen.len(), 1);
    }

    #[test]
    fn subject_does_not_keep_observers_alive() {
        let subject = Subject::new();
        let a = Rc::new(RefCell::new(Recorder::default()));
        subject.add_observer(&a);
        assert_eq!(Rc::strong_count(&a), 1);
    }

    #[test]
    fn busy_observer_is_skipped_not_panicking() {
        let subject = Subject::new();
        let a = Rc::new(RefCell::new(Recorder::default()));
        subject.add_observer(&a);

        let _held = a.borrow_mut();
        subject.notify(&Event::WindowCreated);
    }
}
