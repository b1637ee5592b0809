//! Deferred field injection.
//!
//! A hook runs once per render and may return a modified line (typically with extra
//! fields computed at emit time). While it runs it is *firing*: the line it
//! receives has no hook attached, and any render on this thread that reaches the
//! same hook again renders without invoking it. Once the hook returns it is
//! *armed* again and reattached to the result.

use super::Line;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

type HookFn = dyn Fn(Line) -> Line + Send + Sync;

/// A shareable `Fn(Line) -> Line`.
#[derive(Clone)]
pub struct Hook(Arc<HookFn>);

thread_local! {
    static FIRING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

impl Hook {
    #[must_use]
    pub fn new(f: impl Fn(Line) -> Line + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    fn id(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<()>() as usize
    }

    /// True while this hook is running on the current thread.
    #[must_use]
    pub fn is_firing(&self) -> bool {
        let id = self.id();
        FIRING.with(|firing| firing.borrow().contains(&id))
    }

    /// Runs the hook against `line` with the hook detached, then reattaches it.
    /// A re-entrant call for a hook that is already firing leaves `line` as is.
    pub(crate) fn fire(&self, mut line: Line) -> Line {
        if self.is_firing() {
            line.hook = None;
            return line;
        }

        line.hook = None;
        let result = {
            let _firing = Firing::enter(self.id());
            (self.0)(line)
        };
        Line {
            hook: Some(self.clone()),
            ..result
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook(..)")
    }
}

/// Marks a hook as firing for as long as it lives, including during unwinding.
struct Firing(usize);

impl Firing {
    fn enter(id: usize) -> Self {
        FIRING.with(|firing| firing.borrow_mut().push(id));
        Self(id)
    }
}

impl Drop for Firing {
    fn drop(&mut self) {
        FIRING.with(|firing| {
            let mut firing = firing.borrow_mut();
            if let Some(pos) = firing.iter().rposition(|id| *id == self.0) {
                firing.remove(pos);
            }
        });
    }
}
