//! Navigation host
//!
//! Ordered stack of live fragments plus the current-location index. The root
//! fragment (index 0) can never be popped, and the location always points at
//! a live entry once the stack is non-empty.
//!
//! Transition ordering on the way up is deliberate: the fragment coming back
//! into focus runs its display hook *before* the removed fragment is
//! destroyed, so the removed fragment's resources are still valid during the
//! transition and the new top never observes a half-torn-down sibling.

use trellis_core::Bundle;
use trellis_widgets::{WidgetId, WidgetStore};

use crate::destination::{Destination, Resolved};
use crate::fragment::Fragment;
use crate::scope::Scope;

struct Entry {
    fragment: Box<dyn Fragment>,
    root: Option<WidgetId>,
    scope: Scope,
}

/// Owner of the fragment stack
pub struct NavigationHost {
    stack: Vec<Entry>,
    current: usize,
}

impl NavigationHost {
    /// Create a host and immediately navigate to the root destination.
    ///
    /// # Panics
    ///
    /// Panics if `root` resolves to an existing stack entry; there is
    /// nothing on the stack yet, so that is a malformed destination.
    pub fn new(root: &dyn Destination, ui: &mut WidgetStore) -> Self {
        let mut host = Self {
            stack: Vec::new(),
            current: 0,
        };
        host.navigate_to(root, None, ui);
        host
    }

    /// Navigate to a destination. A destination resolving to the already
    /// active fragment is a no-op. A new fragment is attached and its view
    /// tree built; a fragment already on the stack is moved to the top
    /// without re-initialization. The previous top's leave hook runs before
    /// the new top's display hook.
    ///
    /// # Panics
    ///
    /// Panics if the destination resolves to a stack index that does not
    /// exist (a wiring bug in the destination).
    pub fn navigate_to(
        &mut self,
        destination: &dyn Destination,
        arguments: Option<&Bundle>,
        ui: &mut WidgetStore,
    ) {
        let resolved = destination.resolve(self, arguments);
        let mut previous = if self.stack.is_empty() {
            None
        } else {
            Some(self.current)
        };

        match resolved {
            Resolved::New(fragment) => {
                let mut entry = Entry {
                    fragment,
                    root: None,
                    scope: Scope::new(),
                };
                entry.fragment.on_attached();
                entry.root = Some(entry.fragment.create_view(ui, &mut entry.scope));
                self.stack.push(entry);
            }
            Resolved::Existing(index) => {
                assert!(
                    index < self.stack.len(),
                    "destination resolved to an index outside the navigation stack"
                );
                if Some(index) == previous {
                    // Re-navigation to the active fragment
                    return;
                }
                let entry = self.stack.remove(index);
                self.stack.push(entry);
                if let Some(p) = previous.as_mut() {
                    if *p > index {
                        *p -= 1;
                    }
                }
            }
        }

        if let Some(p) = previous {
            self.stack[p].fragment.on_leave();
        }
        self.current = self.stack.len() - 1;
        self.stack[self.current].fragment.on_display();
        tracing::debug!(location = self.current, depth = self.stack.len(), "navigated");
    }

    /// Pop the active fragment and return to the one below it. A no-op at
    /// the root, reported as false.
    ///
    /// The new top's display hook runs first; only then is the removed
    /// fragment destroyed and its widget tree released.
    pub fn navigate_up(&mut self, ui: &mut WidgetStore) -> bool {
        if self.current == 0 {
            return false;
        }
        let Some(mut removed) = self.stack.pop() else {
            return false;
        };
        self.current -= 1;
        self.stack[self.current].fragment.on_display();

        removed.fragment.on_destroy();
        if let Some(root) = removed.root.take() {
            ui.release(root);
        }
        if removed.scope.is_used() {
            removed.scope.clear();
        }
        tracing::debug!(location = self.current, "navigated up");
        true
    }

    /// Remove and return the top fragment without running any lifecycle
    /// hooks. Returns `None` at the root. The caller takes over the
    /// fragment; its widget tree stays in the store.
    pub fn pop_stack(&mut self) -> Option<Box<dyn Fragment>> {
        if self.current == 0 {
            return None;
        }
        let entry = self.stack.pop()?;
        if self.current >= self.stack.len() {
            // Location must keep indexing a live entry
            self.current = self.stack.len() - 1;
        }
        Some(entry.fragment)
    }

    /// The currently active fragment
    pub fn active(&self) -> &dyn Fragment {
        &*self.stack[self.current].fragment
    }

    pub fn active_mut(&mut self) -> &mut dyn Fragment {
        &mut *self.stack[self.current].fragment
    }

    /// Root widget of the currently active fragment
    pub fn active_root(&self) -> Option<WidgetId> {
        self.stack[self.current].root
    }

    /// First fragment of a concrete type anywhere on the stack
    pub fn find<T: Fragment + 'static>(&self) -> Option<&T> {
        self.stack
            .iter()
            .find_map(|entry| entry.fragment.as_any().downcast_ref::<T>())
    }

    /// Stack index of the first fragment of a concrete type
    pub fn find_index<T: Fragment + 'static>(&self) -> Option<usize> {
        self.stack
            .iter()
            .position(|entry| entry.fragment.as_any().is::<T>())
    }

    /// Number of fragments on the stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Index of the active fragment
    pub fn location(&self) -> usize {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use trellis_widgets::NativeHandle;

    type Log = Arc<Mutex<Vec<String>>>;

    struct TestFragment {
        name: &'static str,
        log: Log,
    }

    impl TestFragment {
        fn boxed(name: &'static str, log: &Log) -> Box<dyn Fragment> {
            Box::new(TestFragment {
                name,
                log: log.clone(),
            })
        }

        fn record(&self, hook: &str) {
            self.log.lock().unwrap().push(format!("{}:{hook}", self.name));
        }
    }

    impl Fragment for TestFragment {
        fn create_view(&mut self, ui: &mut WidgetStore, _scope: &mut Scope) -> WidgetId {
            self.record("create");
            ui.adopt(NativeHandle(0xF0))
        }

        fn on_attached(&mut self) {
            self.record("attach");
        }

        fn on_display(&mut self) {
            self.record("display");
        }

        fn on_leave(&mut self) {
            self.record("leave");
        }

        fn on_destroy(&mut self) {
            self.record("destroy");
        }
    }

    struct OtherFragment {
        log: Log,
    }

    impl Fragment for OtherFragment {
        fn create_view(&mut self, ui: &mut WidgetStore, _scope: &mut Scope) -> WidgetId {
            self.log.lock().unwrap().push("other:create".to_string());
            ui.adopt(NativeHandle(0xF1))
        }
    }

    fn log() -> Log {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn taken(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    fn new_fragment(name: &'static str, log: &Log) -> impl Destination {
        let log = log.clone();
        move |_: &NavigationHost, _: Option<&Bundle>| Resolved::New(TestFragment::boxed(name, &log))
    }

    #[test]
    fn test_root_navigation() {
        let mut ui = WidgetStore::new();
        let events = log();
        let host = NavigationHost::new(&new_fragment("root", &events), &mut ui);

        assert_eq!(host.depth(), 1);
        assert_eq!(host.location(), 0);
        assert_eq!(
            taken(&events),
            vec!["root:attach", "root:create", "root:display"]
        );
    }

    #[test]
    fn test_navigate_to_and_up_ordering() {
        let mut ui = WidgetStore::new();
        let events = log();
        let mut host = NavigationHost::new(&new_fragment("root", &events), &mut ui);
        taken(&events);

        host.navigate_to(&new_fragment("d2", &events), None, &mut ui);
        assert_eq!(host.depth(), 2);
        assert_eq!(host.location(), 1);
        assert_eq!(
            taken(&events),
            vec!["d2:attach", "d2:create", "root:leave", "d2:display"]
        );

        assert!(host.navigate_up(&mut ui));
        assert_eq!(host.depth(), 1);
        assert_eq!(host.location(), 0);
        // Display of the uncovered fragment strictly before destroy.
        assert_eq!(taken(&events), vec!["root:display", "d2:destroy"]);
    }

    #[test]
    fn test_navigate_up_at_root_is_noop() {
        let mut ui = WidgetStore::new();
        let events = log();
        let mut host = NavigationHost::new(&new_fragment("root", &events), &mut ui);
        taken(&events);

        assert!(!host.navigate_up(&mut ui));
        assert_eq!(host.depth(), 1);
        assert_eq!(host.location(), 0);
        assert!(taken(&events).is_empty());
    }

    #[test]
    fn test_renavigation_to_active_is_noop() {
        let mut ui = WidgetStore::new();
        let events = log();
        let mut host = NavigationHost::new(&new_fragment("root", &events), &mut ui);
        taken(&events);

        let same = |host: &NavigationHost, _: Option<&Bundle>| {
            Resolved::Existing(host.location())
        };
        host.navigate_to(&same, None, &mut ui);

        assert_eq!(host.depth(), 1);
        assert!(taken(&events).is_empty());
    }

    #[test]
    fn test_existing_fragment_moves_to_top_without_reinit() {
        let mut ui = WidgetStore::new();
        let events = log();
        let mut host = NavigationHost::new(&new_fragment("root", &events), &mut ui);
        host.navigate_to(&new_fragment("d2", &events), None, &mut ui);
        host.navigate_to(&new_fragment("d3", &events), None, &mut ui);
        taken(&events);

        // Find-or-create policy lives in the destination.
        let back_to_d2 =
            |_: &NavigationHost, _: Option<&Bundle>| Resolved::Existing(1);
        host.navigate_to(&back_to_d2, None, &mut ui);

        assert_eq!(host.depth(), 3);
        assert_eq!(host.location(), 2);
        // No attach/create on reuse, just the leave/display pair.
        assert_eq!(taken(&events), vec!["d3:leave", "d2:display"]);
    }

    #[test]
    fn test_find_by_type() {
        let mut ui = WidgetStore::new();
        let events = log();
        let mut host = NavigationHost::new(&new_fragment("root", &events), &mut ui);

        let other = {
            let log = events.clone();
            move |_: &NavigationHost, _: Option<&Bundle>| {
                Resolved::New(Box::new(OtherFragment { log: log.clone() }) as Box<dyn Fragment>)
            }
        };
        host.navigate_to(&other, None, &mut ui);

        assert_eq!(host.find_index::<TestFragment>(), Some(0));
        assert_eq!(host.find_index::<OtherFragment>(), Some(1));
        assert_eq!(host.find::<TestFragment>().unwrap().name, "root");
    }

    #[test]
    fn test_pop_stack() {
        let mut ui = WidgetStore::new();
        let events = log();
        let mut host = NavigationHost::new(&new_fragment("root", &events), &mut ui);
        host.navigate_to(&new_fragment("d2", &events), None, &mut ui);
        taken(&events);

        let popped = host.pop_stack().expect("top fragment");
        assert!(popped.as_any().is::<TestFragment>());
        assert_eq!(host.depth(), 1);
        assert_eq!(host.location(), 0);
        // Raw pop: no lifecycle hooks fire.
        assert!(taken(&events).is_empty());

        assert!(host.pop_stack().is_none());
    }

    #[test]
    fn test_navigation_arguments_reach_destination() {
        let mut ui = WidgetStore::new();
        let events = log();
        let mut host = NavigationHost::new(&new_fragment("root", &events), &mut ui);

        let seen = Arc::new(Mutex::new(None));
        let seen_clone = seen.clone();
        let log = events.clone();
        let with_args = move |_: &NavigationHost, arguments: Option<&Bundle>| {
            let title = arguments
                .and_then(|bundle| bundle.opt::<String>("title").cloned());
            *seen_clone.lock().unwrap() = title;
            Resolved::New(TestFragment::boxed("d2", &log))
        };

        let bundle = Bundle::new().with("title", "settings".to_string());
        host.navigate_to(&with_args, Some(&bundle), &mut ui);

        assert_eq!(seen.lock().unwrap().as_deref(), Some("settings"));
    }

    #[test]
    #[should_panic(expected = "outside the navigation stack")]
    fn test_malformed_destination_panics() {
        let mut ui = WidgetStore::new();
        let events = log();
        let mut host = NavigationHost::new(&new_fragment("root", &events), &mut ui);

        let broken = |_: &NavigationHost, _: Option<&Bundle>| Resolved::Existing(9);
        host.navigate_to(&broken, None, &mut ui);
    }
}
