//! Window-level capture listener lifecycle
//!
//! `CaptureSlot::install` always removes the previous registration before
//! adding a new one, so at most one listener is active per slot no matter
//! how often the editor is re-initialised.

use std::rc::Rc;

use super::KeyInput;
use crate::error::EditorError;

/// Handler invoked for every captured key event. Returning `true` means the
/// event was handled and must be suppressed.
pub type KeyHandler = Rc<dyn Fn(&KeyInput) -> bool>;

/// Something that can carry a capture-phase key listener (the browser window,
/// or an in-memory fake in tests)
pub trait CaptureTarget {
    type Registration;

    fn register(&self, handler: KeyHandler) -> Result<Self::Registration, EditorError>;

    fn unregister(&self, registration: Self::Registration);
}

pub struct CaptureSlot<T: CaptureTarget> {
    target: T,
    active: Option<T::Registration>,
}

impl<T: CaptureTarget> CaptureSlot<T> {
    pub fn new(target: T) -> Self {
        Self { target, active: None }
    }

    /// Replace any installed listener with `handler`
    pub fn install(&mut self, handler: KeyHandler) -> Result<(), EditorError> {
        if self.uninstall() {
            log::debug!("replaced previous key capture listener");
        }
        let registration = self.target.register(handler)?;
        self.active = Some(registration);
        log::info!("key capture listener installed");
        Ok(())
    }

    /// Remove the installed listener, if any
    pub fn uninstall(&mut self) -> bool {
        match self.active.take() {
            Some(registration) => {
                self.target.unregister(registration);
                true
            }
            None => false,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.active.is_some()
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

impl<T: CaptureTarget> Drop for CaptureSlot<T> {
    fn drop(&mut self) {
        self.uninstall();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// In-memory target that dispatches to every registered handler
    #[derive(Clone, Default)]
    pub struct FakeTarget {
        handlers: Rc<RefCell<Vec<(usize, KeyHandler)>>>,
        next: Rc<RefCell<usize>>,
    }

    impl FakeTarget {
        pub fn listener_count(&self) -> usize {
            self.handlers.borrow().len()
        }

        /// Returns how many handlers claimed the event
        pub fn fire(&self, input: &KeyInput) -> usize {
            let handlers: Vec<KeyHandler> =
                self.handlers.borrow().iter().map(|(_, h)| Rc::clone(h)).collect();
            handlers.iter().filter(|h| h(input)).count()
        }
    }

    impl CaptureTarget for FakeTarget {
        type Registration = usize;

        fn register(&self, handler: KeyHandler) -> Result<usize, EditorError> {
            let id = {
                let mut next = self.next.borrow_mut();
                *next += 1;
                *next
            };
            self.handlers.borrow_mut().push((id, handler));
            Ok(id)
        }

        fn unregister(&self, registration: usize) {
            self.handlers.borrow_mut().retain(|(id, _)| *id != registration);
        }
    }
}
