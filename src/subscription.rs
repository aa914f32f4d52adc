//! Subscription handles and the per-execution lifecycle.
//!
//! A [`Subscription`] is created fresh for every call to `subscribe` and is the
//! only thing that knows whether that execution is still running. It moves
//! through exactly one transition, [`Lifecycle::Live`] to
//! [`Lifecycle::Terminated`], triggered by whichever of `complete`, `error` or
//! [`dispose`](SubscriptionLike::dispose) happens first.
//!
//! Disposal composes through `pipe` chains by delegation: a subscriber
//! function registers the subscription of the layer it wraps with
//! [`Subscription::register`], and disposing the outer handle disposes the
//! registered one.

use std::{
  any::Any,
  cell::Cell,
  fmt::{Debug, Formatter},
  rc::Rc,
};

use crate::rc::{MutRc, RcDeref, RcDerefMut};

/// The two states of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
  #[default]
  Live,
  Terminated,
}

/// Anything that can be polled for liveness and asked to stop.
///
/// Both methods take `&self` so a handle can be disposed from inside the
/// callbacks it guards.
pub trait SubscriptionLike {
  /// Whether the execution is still running.
  fn active(&self) -> bool;

  /// Request early termination. Calling it again has no effect.
  fn dispose(&self);
}

struct State {
  lifecycle: Lifecycle,
  delegate: Option<Rc<dyn SubscriptionLike>>,
  // Set when the delegate is itself a `Subscription`, to walk delegate chains.
  link: Option<Subscription>,
}

impl Default for State {
  fn default() -> Self { State { lifecycle: Lifecycle::Live, delegate: None, link: None } }
}

/// Handle onto the state of a single execution.
///
/// Clones share the same state: disposing any clone disposes the execution.
#[derive(Clone, Default)]
pub struct Subscription(MutRc<State>);

impl Subscription {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// The state of this handle, ignoring any registered delegate.
  #[inline]
  pub fn lifecycle(&self) -> Lifecycle { self.0.rc_deref().lifecycle }

  /// Whether this handle itself is still [`Lifecycle::Live`].
  ///
  /// Unlike [`active`](SubscriptionLike::active) this ignores the delegate.
  /// Observers gate emission on it, so a terminal notification forwarded from
  /// an upstream layer that has just terminated still reaches the consumer.
  #[inline]
  pub fn is_live(&self) -> bool { self.lifecycle() == Lifecycle::Live }

  /// Whether a delegate has been registered.
  pub fn has_delegate(&self) -> bool { self.0.rc_deref().delegate.is_some() }

  /// Register the subscription of a wrapped layer so that disposing `self`
  /// disposes it too.
  ///
  /// The first registration wins. Any later registration, or a registration
  /// on an already terminated handle, disposes `inner` right away and returns
  /// `false`. Registering a handle with itself, or with a handle whose
  /// delegate chain already leads back here, is ignored.
  pub fn register(&self, inner: impl SubscriptionLike + 'static) -> bool {
    let link = (&inner as &dyn Any).downcast_ref::<Self>().cloned();
    if link.as_ref().is_some_and(|linked| linked.reaches(self)) {
      tracing::debug!("registration would close a delegate cycle, ignoring it");
      return false;
    }
    let rejected = {
      let mut state = self.0.rc_deref_mut();
      if state.lifecycle == Lifecycle::Terminated {
        tracing::debug!("registration on a terminated subscription, disposing it");
        Some(inner)
      } else if state.delegate.is_some() {
        tracing::debug!("redundant inner subscription registered, disposing it");
        Some(inner)
      } else {
        state.delegate = Some(Rc::new(inner));
        state.link = link;
        None
      }
    };
    match rejected {
      Some(inner) => {
        inner.dispose();
        false
      }
      None => true,
    }
  }

  /// Move to [`Lifecycle::Terminated`] and dispose the delegate.
  ///
  /// Returns `true` only for the call that performed the transition.
  pub(crate) fn terminate(&self) -> bool {
    let delegate = {
      let mut state = self.0.rc_deref_mut();
      if state.lifecycle == Lifecycle::Terminated {
        return false;
      }
      state.lifecycle = Lifecycle::Terminated;
      state.link = None;
      state.delegate.take()
    };
    tracing::trace!("subscription terminated");
    if let Some(delegate) = delegate {
      delegate.dispose();
    }
    true
  }

  /// Whether `target` is this handle or sits anywhere on its delegate chain.
  fn reaches(&self, target: &Subscription) -> bool {
    let mut current = Some(self.clone());
    while let Some(handle) = current {
      if handle.same_as(target) {
        return true;
      }
      current = handle.0.rc_deref().link.clone();
    }
    false
  }

  /// Whether both handles refer to the same execution.
  #[inline]
  pub fn same_as(&self, other: &Subscription) -> bool { self.0.ptr_eq(&other.0) }

  /// Dispose this subscription when the returned guard goes out of scope.
  ///
  /// **Attention:** if the guard is not bound to a variable it is dropped,
  /// and the subscription disposed, immediately.
  pub fn dispose_on_drop(self) -> SubscriptionGuard<Self> { SubscriptionGuard::new(self) }
}

impl SubscriptionLike for Subscription {
  fn active(&self) -> bool {
    if !self.is_live() {
      return false;
    }
    let delegate = self.0.rc_deref().delegate.clone();
    delegate.is_none_or(|d| d.active()) && self.is_live()
  }

  #[inline]
  fn dispose(&self) { self.terminate(); }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let state = self.0.rc_deref();
    f.debug_struct("Subscription")
      .field("lifecycle", &state.lifecycle)
      .field("has_delegate", &state.delegate.is_some())
      .finish()
  }
}

/// A one-shot cleanup closure that can be registered like any other
/// subscription.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// let ticker = Observable::<u32, ()>::new(|observer| {
///   observer.subscribe(Teardown::new(|| println!("timer cancelled")));
/// });
/// ticker.subscribe(|_| {}).dispose();
/// ```
pub struct Teardown<F: FnOnce()>(Cell<Option<F>>);

impl<F: FnOnce()> Teardown<F> {
  pub fn new(f: F) -> Self { Teardown(Cell::new(Some(f))) }
}

impl<F: FnOnce()> SubscriptionLike for Teardown<F> {
  fn active(&self) -> bool {
    let f = self.0.take();
    let active = f.is_some();
    self.0.set(f);
    active
  }

  fn dispose(&self) {
    if let Some(f) = self.0.take() {
      f();
    }
  }
}

impl<T: SubscriptionLike + ?Sized> SubscriptionLike for Box<T> {
  #[inline]
  fn active(&self) -> bool { (**self).active() }

  #[inline]
  fn dispose(&self) { (**self).dispose() }
}

/// Disposes the wrapped subscription when dropped.
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: SubscriptionLike>(T);

impl<T: SubscriptionLike> SubscriptionGuard<T> {
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(subscription) }

  #[inline]
  pub fn subscription(&self) -> &T { &self.0 }
}

impl<T: SubscriptionLike> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.dispose() }
}
