use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use anyhow::Result;

/// Handle returned by `CallbackList::register`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CallbackId(u64);

type Callback<U> = Box<dyn FnMut(&mut U) -> Result<()>>;

/// Ordered list of per-frame UI callbacks.
///
/// Callbacks run in registration order. A callback that returns `Err` or panics is logged
/// and the remaining callbacks still run.
pub struct CallbackList<U> {
    entries: Vec<(CallbackId, Callback<U>)>,
    next: u64,
}

impl<U> CallbackList<U> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next: 0,
        }
    }

    pub fn register(&mut self, f: impl FnMut(&mut U) -> Result<()> + 'static) -> CallbackId {
        let id = CallbackId(self.next);
        self.next += 1;
        self.entries.push((id, Box::new(f)));
        id
    }

    /// Returns `false` if `id` is not registered.
    pub fn unregister(&mut self, id: CallbackId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(e, _)| *e != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every callback against `ui`. Returns the number that failed.
    pub fn invoke_all(&mut self, ui: &mut U) -> usize {
        let mut failed = 0;
        for (id, cb) in &mut self.entries {
            match catch_unwind(AssertUnwindSafe(|| cb(&mut *ui))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    failed += 1;
                    log::warn!("ui callback {:?} failed: {e:#}", id);
                }
                Err(payload) => {
                    failed += 1;
                    log::error!("ui callback {:?} panicked: {}", id, panic_message(&*payload));
                }
            }
        }
        failed
    }
}

impl<U> Default for CallbackList<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> fmt::Debug for CallbackList<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackList")
            .field("len", &self.entries.len())
            .finish()
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    #[test]
    fn runs_in_registration_order() {
        let mut list = CallbackList::<Vec<u32>>::new();
        list.register(|v| {
            v.push(1);
            Ok(())
        });
        list.register(|v| {
            v.push(2);
            Ok(())
        });

        let mut out = Vec::new();
        assert_eq!(list.invoke_all(&mut out), 0);
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn failures_are_isolated() {
        let mut list = CallbackList::<Vec<u32>>::new();
        list.register(|_| bail!("broken widget"));
        list.register(|_| panic!("boom"));
        list.register(|v| {
            v.push(3);
            Ok(())
        });

        let mut out = Vec::new();
        assert_eq!(list.invoke_all(&mut out), 2);
        assert_eq!(out, vec![3]);

        // Still usable next frame.
        assert_eq!(list.invoke_all(&mut out), 2);
        assert_eq!(out, vec![3, 3]);
    }

    #[test]
    fn unregister_unknown_returns_false() {
        let mut list = CallbackList::<()>::new();
        let id = list.register(|_| Ok(()));
        assert!(list.unregister(id));
        assert!(!list.unregister(id));
        assert!(list.is_empty());
    }
}
