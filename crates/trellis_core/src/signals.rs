//! Signal dispatch graph
//!
//! Signals are emission points owned by widgets (or created free-standing);
//! handlers subscribe to them and are invoked on every emission. Both live in
//! a single [`SignalGraph`] arena, so a handler's back-reference to its signal
//! is a generational [`SignalId`] rather than an owning pointer: once the
//! signal's owner removes it, the remembered id goes stale and
//! [`reconnect`](SignalGraph::reconnect) simply fails instead of keeping the
//! signal alive.
//!
//! Emission is synchronous and single-threaded. Handlers receive the graph
//! back as their first argument, which lets them disconnect themselves (or
//! other handlers) in the middle of an emission; the registry snapshot taken
//! before dispatch makes that safe.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::bundle::Bundle;

new_key_type! {
    /// Unique identifier for a signal
    pub struct SignalId;

    /// Unique identifier for a handler
    pub struct HandlerId;
}

/// Handler callback type. The graph is passed back in so the callback can
/// mutate connections mid-emission.
pub type HandlerFn<T> = Box<dyn FnMut(&mut SignalGraph<T>, &T) + Send>;

/// Derives a handler context from the optional argument bundle of an
/// event-style signal emission.
pub type TranslateFn<T> = Box<dyn Fn(Option<&Bundle>) -> T + Send>;

/// Where a signal's per-emission context comes from
enum ContextSource<T> {
    /// Fixed owner value, cloned for every emission
    Owner(T),
    /// Derived from the emission's argument bundle
    Translate(TranslateFn<T>),
}

struct SignalSlot<T> {
    context: ContextSource<T>,
    /// Registered handlers, set semantics (no duplicates)
    handlers: Vec<HandlerId>,
}

struct Disposable {
    disconnect_after: u32,
    used: u32,
}

struct HandlerSlot<T> {
    /// Taken out of the slot while the callback runs, so a nested emission
    /// cannot re-enter the same handler.
    callback: Option<HandlerFn<T>>,
    /// Last signal this handler was connected to. Kept across disconnects so
    /// the connection can be re-established without naming the target again.
    signal: Option<SignalId>,
    connected: bool,
    disposable: Option<Disposable>,
}

/// Arena owning every signal and handler, generic over the context type
/// delivered to handlers.
pub struct SignalGraph<T> {
    signals: SlotMap<SignalId, SignalSlot<T>>,
    handlers: SlotMap<HandlerId, HandlerSlot<T>>,
}

impl<T: Clone> SignalGraph<T> {
    pub fn new() -> Self {
        Self {
            signals: SlotMap::with_key(),
            handlers: SlotMap::with_key(),
        }
    }

    /// Create a signal with a fixed owner context, passed to every handler
    /// on emission.
    pub fn add_signal(&mut self, owner: T) -> SignalId {
        self.signals.insert(SignalSlot {
            context: ContextSource::Owner(owner),
            handlers: Vec::new(),
        })
    }

    /// Create an event-style signal whose context is derived from the
    /// argument bundle at emission time.
    pub fn add_event<F>(&mut self, translate: F) -> SignalId
    where
        F: Fn(Option<&Bundle>) -> T + Send + 'static,
    {
        self.signals.insert(SignalSlot {
            context: ContextSource::Translate(Box::new(translate)),
            handlers: Vec::new(),
        })
    }

    /// Remove a signal. Its handlers survive, but their remembered signal id
    /// is now stale, so reconnecting them fails.
    pub fn remove_signal(&mut self, signal: SignalId) -> bool {
        let Some(slot) = self.signals.remove(signal) else {
            return false;
        };
        for handler in slot.handlers {
            if let Some(h) = self.handlers.get_mut(handler) {
                h.connected = false;
            }
        }
        tracing::debug!(?signal, "signal removed");
        true
    }

    /// Create an unconnected handler. Use [`connect`](Self::connect) to
    /// register it with a signal.
    pub fn create_handler<F>(&mut self, callback: F) -> HandlerId
    where
        F: FnMut(&mut SignalGraph<T>, &T) + Send + 'static,
    {
        self.handlers.insert(HandlerSlot {
            callback: Some(Box::new(callback)),
            signal: None,
            connected: false,
            disposable: None,
        })
    }

    /// Connect a handler to a signal. Returns false if the handler is
    /// already registered with this signal, or if either id is dead.
    ///
    /// A handler belongs to at most one registry at a time: connecting it to
    /// a different signal removes it from the previous one first. Connecting
    /// a disposable handler resets its use counter.
    pub fn connect(&mut self, signal: SignalId, handler: HandlerId) -> bool {
        if !self.signals.contains_key(signal) || !self.handlers.contains_key(handler) {
            return false;
        }
        if self.is_registered(signal, handler) {
            return false;
        }
        self.unregister(handler);

        let slot = &mut self.handlers[handler];
        slot.signal = Some(signal);
        slot.connected = true;
        if let Some(disposable) = slot.disposable.as_mut() {
            disposable.used = 0;
        }
        self.signals[signal].handlers.push(handler);
        true
    }

    /// Build an anonymous handler around `callback` and connect it,
    /// returning the handler so it can be disconnected or reconnected later.
    pub fn connect_fn<F>(&mut self, signal: SignalId, callback: F) -> HandlerId
    where
        F: FnMut(&mut SignalGraph<T>, &T) + Send + 'static,
    {
        let handler = self.create_handler(callback);
        self.connect(signal, handler);
        handler
    }

    /// Connect a *disposable* handler: it disconnects itself after
    /// `disconnect_after` invocations. Reconnecting it resets the counter.
    pub fn connect_disposable<F>(
        &mut self,
        signal: SignalId,
        disconnect_after: u32,
        callback: F,
    ) -> HandlerId
    where
        F: FnMut(&mut SignalGraph<T>, &T) + Send + 'static,
    {
        let handler = self.handlers.insert(HandlerSlot {
            callback: Some(Box::new(callback)),
            signal: None,
            connected: false,
            disposable: Some(Disposable {
                disconnect_after,
                used: 0,
            }),
        });
        self.connect(signal, handler);
        handler
    }

    /// Disconnect a handler from its signal. Disconnecting a handler that is
    /// not connected is a no-op that still reports success; only a dead
    /// handler id returns false.
    ///
    /// The remembered signal is kept, so [`reconnect`](Self::reconnect) can
    /// restore the exact connection later.
    pub fn disconnect(&mut self, handler: HandlerId) -> bool {
        if !self.handlers.contains_key(handler) {
            return false;
        }
        self.unregister(handler);
        true
    }

    /// Reconnect a handler to the last signal it was connected to. Fails if
    /// the handler was never connected, is still connected, or the signal has
    /// since been removed.
    pub fn reconnect(&mut self, handler: HandlerId) -> bool {
        let Some(slot) = self.handlers.get(handler) else {
            return false;
        };
        let Some(signal) = slot.signal else {
            return false;
        };
        if !self.signals.contains_key(signal) {
            return false;
        }
        self.connect(signal, handler)
    }

    /// Whether the handler is currently registered with a live signal
    pub fn is_connected(&self, handler: HandlerId) -> bool {
        self.handlers
            .get(handler)
            .is_some_and(|slot| slot.connected)
    }

    /// The signal a handler is connected to, or was last connected to
    pub fn last_signal(&self, handler: HandlerId) -> Option<SignalId> {
        self.handlers.get(handler).and_then(|slot| slot.signal)
    }

    /// Destroy a handler slot outright. A connected handler is disconnected
    /// first.
    pub fn remove_handler(&mut self, handler: HandlerId) -> bool {
        if !self.handlers.contains_key(handler) {
            return false;
        }
        self.unregister(handler);
        self.handlers.remove(handler).is_some()
    }

    /// Emit a signal with no argument bundle.
    pub fn emit(&mut self, signal: SignalId) {
        self.emit_with(signal, None);
    }

    /// Emit a signal, deriving the handler context from `arguments` for
    /// event-style signals. Emitting with zero handlers, or emitting a dead
    /// signal id, is a no-op.
    pub fn emit_with(&mut self, signal: SignalId, arguments: Option<&Bundle>) {
        let Some(slot) = self.signals.get(signal) else {
            return;
        };
        let context = match &slot.context {
            ContextSource::Owner(owner) => owner.clone(),
            ContextSource::Translate(translate) => translate(arguments),
        };
        // Snapshot before dispatch: handlers may mutate the registry from
        // inside their callbacks.
        let snapshot: SmallVec<[HandlerId; 8]> = slot.handlers.iter().copied().collect();
        tracing::trace!(?signal, handlers = snapshot.len(), "emit");

        for handler in snapshot {
            // Skip handlers that were disconnected earlier in this emission.
            if !self.is_registered(signal, handler) {
                continue;
            }
            let Some(mut callback) = self
                .handlers
                .get_mut(handler)
                .and_then(|slot| slot.callback.take())
            else {
                continue;
            };
            callback(&mut *self, &context);
            if let Some(slot) = self.handlers.get_mut(handler) {
                slot.callback = Some(callback);
            }
            self.finish_invocation(handler);
        }
    }

    /// Disconnect every handler registered with `signal`, returning how many
    /// were newly disconnected. Idempotent: a second call returns 0.
    pub fn clear_handlers(&mut self, signal: SignalId) -> usize {
        let Some(slot) = self.signals.get_mut(signal) else {
            return 0;
        };
        let drained: Vec<HandlerId> = slot.handlers.drain(..).collect();
        for handler in &drained {
            if let Some(h) = self.handlers.get_mut(*handler) {
                h.connected = false;
            }
        }
        drained.len()
    }

    /// Number of handlers registered with `signal`
    pub fn handler_count(&self, signal: SignalId) -> usize {
        self.signals
            .get(signal)
            .map_or(0, |slot| slot.handlers.len())
    }

    /// Whether the signal id refers to a live signal
    pub fn contains_signal(&self, signal: SignalId) -> bool {
        self.signals.contains_key(signal)
    }

    /// Number of live signals
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Whether the graph has no signals
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    fn is_registered(&self, signal: SignalId, handler: HandlerId) -> bool {
        self.handlers
            .get(handler)
            .is_some_and(|slot| slot.connected && slot.signal == Some(signal))
    }

    /// Remove the handler from whichever registry currently holds it.
    fn unregister(&mut self, handler: HandlerId) {
        let Some(slot) = self.handlers.get(handler) else {
            return;
        };
        if !slot.connected {
            return;
        }
        if let Some(signal) = slot.signal {
            if let Some(sig) = self.signals.get_mut(signal) {
                sig.handlers.retain(|h| *h != handler);
            }
        }
        self.handlers[handler].connected = false;
    }

    /// Bump the disposable counter after a completed invocation and
    /// auto-disconnect once the limit is reached. A handler that already
    /// disconnected itself inside its callback is left alone.
    fn finish_invocation(&mut self, handler: HandlerId) {
        let should_disconnect = match self.handlers.get_mut(handler) {
            Some(slot) if slot.connected => match slot.disposable.as_mut() {
                Some(disposable) => {
                    disposable.used += 1;
                    disposable.used >= disposable.disconnect_after
                }
                None => false,
            },
            _ => false,
        };
        if should_disconnect {
            self.disconnect(handler);
        }
    }
}

impl<T: Clone> Default for SignalGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}
