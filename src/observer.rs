//! The two sides of a subscription's callbacks.
//!
//! [`Subscriber`] is what a consumer hands to `subscribe`: a `next` callback
//! plus optional `error` and `complete` callbacks. It is resolved once, at
//! subscribe time, into an [`Observer`], the handle a subscriber function uses
//! to emit. The observer gates every call on the subscription's lifecycle so
//! that a consumer sees values in order, followed by at most one terminal
//! notification.

use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  rc::Rc,
};

use crate::{
  error::Fault,
  subscription::{Subscription, SubscriptionLike},
};

type NextFn<Item> = Box<dyn Fn(Item)>;
type ErrorFn<Err> = Box<dyn FnOnce(Err)>;
type CompleteFn = Box<dyn FnOnce()>;
type StartFn = Box<dyn FnOnce(Subscription)>;

// ============================================================================
// Subscriber - consumer configuration
// ============================================================================

/// Callbacks a consumer subscribes with.
///
/// `next` is required. A missing `error` callback means errors are never
/// swallowed: receiving one raises [`Fault::UnhandledError`]. A missing
/// `complete` callback ignores completion.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// let subscriber = Subscriber::new(|v: i32| println!("value {}", v))
///   .on_error(|e: String| eprintln!("failed: {}", e))
///   .on_complete(|| println!("done"));
///
/// Observable::create(|o| {
///   o.next(1);
///   o.complete();
///   Ok(())
/// })
/// .subscribe_with(subscriber);
/// ```
pub struct Subscriber<Item, Err> {
  next: NextFn<Item>,
  error: Option<ErrorFn<Err>>,
  complete: Option<CompleteFn>,
  start: Option<StartFn>,
}

impl<Item, Err> Subscriber<Item, Err> {
  pub fn new(next: impl Fn(Item) + 'static) -> Self {
    Subscriber { next: Box::new(next), error: None, complete: None, start: None }
  }

  pub fn on_error(mut self, error: impl FnOnce(Err) + 'static) -> Self {
    self.error = Some(Box::new(error));
    self
  }

  pub fn on_complete(mut self, complete: impl FnOnce() + 'static) -> Self {
    self.complete = Some(Box::new(complete));
    self
  }

  /// Receive the subscription before the source starts emitting.
  ///
  /// `subscribe` only returns its handle once a synchronous producer has
  /// finished, so this is the way to dispose from inside `next` while such a
  /// producer is still emitting.
  pub fn on_start(mut self, start: impl FnOnce(Subscription) + 'static) -> Self {
    self.start = Some(Box::new(start));
    self
  }

  /// Register the subscription created for this subscriber with `downstream`
  /// before the source starts emitting.
  ///
  /// Operators use this so that disposing the downstream subscription reaches
  /// the source even while a synchronous producer is still inside its
  /// emission loop. Replaces any [`on_start`](Self::on_start) hook.
  pub fn chain<T, E>(self, downstream: &Observer<T, E>) -> Self
  where
    T: 'static,
    E: 'static,
  {
    let downstream = downstream.clone();
    self.on_start(move |subscription| downstream.subscribe(subscription))
  }

  /// Resolve the configured callbacks into an observer driving `subscription`.
  ///
  /// Returns the [`on_start`](Self::on_start) hook, if any, for the caller to
  /// run before emission starts.
  pub(crate) fn into_observer(
    self,
    subscription: Subscription,
  ) -> (Observer<Item, Err>, Option<StartFn>)
  where
    Item: 'static,
    Err: Debug + 'static,
  {
    let Subscriber { next, error, complete, start } = self;
    let error = error.unwrap_or_else(|| {
      Box::new(|e: Err| Fault::UnhandledError(format!("{:?}", e)).raise())
    });
    let observer = Observer(Rc::new(ObserverCore {
      subscription,
      next,
      error: RefCell::new(Some(error)),
      complete: RefCell::new(complete),
    }));
    (observer, start)
  }
}

impl<Item, Err> Debug for Subscriber<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscriber")
      .field("on_error", &self.error.is_some())
      .field("on_complete", &self.complete.is_some())
      .field("on_start", &self.start.is_some())
      .finish()
  }
}

// ============================================================================
// Observer - producer-facing handle
// ============================================================================

struct ObserverCore<Item, Err> {
  subscription: Subscription,
  next: NextFn<Item>,
  error: RefCell<Option<ErrorFn<Err>>>,
  complete: RefCell<Option<CompleteFn>>,
}

/// The emitting side of one subscription.
///
/// Handed to a subscriber function once per `subscribe` call. Clones share
/// the same subscription, so a producer may keep one around and emit later.
pub struct Observer<Item, Err>(Rc<ObserverCore<Item, Err>>);

impl<Item, Err> Clone for Observer<Item, Err> {
  #[inline]
  fn clone(&self) -> Self { Observer(self.0.clone()) }
}

impl<Item, Err> Observer<Item, Err> {
  /// Deliver a value. Dropped once the subscription has terminated.
  pub fn next(&self, value: Item) {
    if self.0.subscription.is_live() {
      (self.0.next)(value);
    } else {
      tracing::trace!("next after termination dropped");
    }
  }

  /// Terminate with an error.
  ///
  /// The subscription is terminated before the consumer's handler runs.
  /// Calling this on a subscription that has already terminated is a
  /// contract violation and raises [`Fault::ErrorAfterTermination`].
  #[track_caller]
  pub fn error(&self, err: Err) {
    if !self.0.subscription.is_live() {
      Fault::ErrorAfterTermination.raise();
    }
    let handler = self.0.error.borrow_mut().take();
    self.0.subscription.terminate();
    if let Some(handler) = handler {
      handler(err);
    }
  }

  /// Terminate normally. A no-op once the subscription has terminated.
  pub fn complete(&self) {
    if !self.0.subscription.is_live() {
      return;
    }
    let handler = self.0.complete.borrow_mut().take();
    self.0.subscription.terminate();
    if let Some(handler) = handler {
      handler();
    }
  }

  /// Register the subscription of the layer this subscriber function wraps,
  /// so disposal of this subscription reaches it. Only the first registration
  /// is kept; later ones are disposed immediately.
  pub fn subscribe(&self, inner: impl SubscriptionLike + 'static) {
    self.0.subscription.register(inner);
  }

  /// Whether values sent now would still be delivered.
  #[inline]
  pub fn active(&self) -> bool { self.0.subscription.is_live() }
}

impl<Item, Err> Debug for Observer<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Observer").field("subscription", &self.0.subscription).finish()
  }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
  use std::cell::{Cell, RefCell};

  use super::*;

  struct Probe {
    values: Rc<RefCell<Vec<i32>>>,
    errors: Rc<RefCell<Vec<&'static str>>>,
    completes: Rc<Cell<usize>>,
  }

  fn probe() -> (Probe, Subscriber<i32, &'static str>) {
    let probe = Probe {
      values: Rc::new(RefCell::new(vec![])),
      errors: Rc::new(RefCell::new(vec![])),
      completes: Rc::new(Cell::new(0)),
    };
    let values = probe.values.clone();
    let errors = probe.errors.clone();
    let completes = probe.completes.clone();
    let subscriber = Subscriber::new(move |v| values.borrow_mut().push(v))
      .on_error(move |e| errors.borrow_mut().push(e))
      .on_complete(move || completes.set(completes.get() + 1));
    (probe, subscriber)
  }

  #[rxlite_macro::test]
  fn next_then_complete() {
    let (probe, subscriber) = probe();
    let subscription = Subscription::new();
    let (observer, _) = subscriber.into_observer(subscription.clone());

    observer.next(1);
    observer.next(2);
    observer.complete();
    observer.next(3);
    observer.complete();

    assert_eq!(*probe.values.borrow(), vec![1, 2]);
    assert_eq!(probe.completes.get(), 1);
    assert!(probe.errors.borrow().is_empty());
    assert!(!subscription.active());
  }

  #[rxlite_macro::test]
  fn error_terminates() {
    let (probe, subscriber) = probe();
    let subscription = Subscription::new();
    let (observer, _) = subscriber.into_observer(subscription.clone());

    observer.next(1);
    observer.error("boom");
    observer.next(2);
    observer.complete();

    assert_eq!(*probe.values.borrow(), vec![1]);
    assert_eq!(*probe.errors.borrow(), vec!["boom"]);
    assert_eq!(probe.completes.get(), 0);
    assert!(!subscription.active());
  }

  #[rxlite_macro::test]
  #[should_panic(expected = "error emitted after the subscription terminated")]
  fn error_after_complete_is_a_fault() {
    let (_probe, subscriber) = probe();
    let (observer, _) = subscriber.into_observer(Subscription::new());
    observer.complete();
    observer.error("late");
  }

  #[rxlite_macro::test]
  #[should_panic(expected = "error emitted after the subscription terminated")]
  fn error_after_dispose_is_a_fault() {
    let (_probe, subscriber) = probe();
    let subscription = Subscription::new();
    let (observer, _) = subscriber.into_observer(subscription.clone());
    subscription.dispose();
    observer.error("late");
  }

  #[rxlite_macro::test]
  #[should_panic(expected = "unhandled observable error: \"boom\"")]
  fn missing_error_handler_raises() {
    let (observer, _) = Subscriber::<i32, &str>::new(|_| {}).into_observer(Subscription::new());
    observer.error("boom");
  }

  #[rxlite_macro::test]
  fn terminated_before_handlers_run() {
    let subscription = Subscription::new();
    let seen = Rc::new(Cell::new(None));
    let c_seen = seen.clone();
    let c_subscription = subscription.clone();
    let (observer, _) = Subscriber::<i32, ()>::new(|_| {})
      .on_complete(move || c_seen.set(Some(c_subscription.active())))
      .into_observer(subscription);
    observer.complete();
    assert_eq!(seen.get(), Some(false));
  }

  #[rxlite_macro::test]
  fn reentrant_emission_is_gated() {
    let values = Rc::new(RefCell::new(vec![]));
    let slot: Rc<RefCell<Option<Observer<i32, ()>>>> = Rc::new(RefCell::new(None));
    let c_values = values.clone();
    let c_slot = slot.clone();
    let (observer, _) = Subscriber::new(move |v: i32| {
      c_values.borrow_mut().push(v);
      let observer = c_slot.borrow().clone();
      if let Some(observer) = observer {
        if v < 3 {
          observer.next(v + 1);
        } else {
          observer.complete();
          observer.next(100);
        }
      }
    })
    .into_observer(Subscription::new());
    *slot.borrow_mut() = Some(observer.clone());

    observer.next(0);
    assert_eq!(*values.borrow(), vec![0, 1, 2, 3]);
    assert!(!observer.active());
  }

  #[rxlite_macro::test]
  fn chain_registers_with_downstream() {
    let downstream_subscription = Subscription::new();
    let (downstream, _) =
      Subscriber::<u8, ()>::new(|_| {}).into_observer(downstream_subscription.clone());
    let upstream_subscription = Subscription::new();
    let (_, start) = Subscriber::<i32, ()>::new(|_| {})
      .chain(&downstream)
      .into_observer(upstream_subscription.clone());

    if let Some(start) = start {
      start(upstream_subscription.clone());
    }
    assert!(downstream_subscription.has_delegate());
    downstream_subscription.dispose();
    assert!(!upstream_subscription.active());
  }
}
