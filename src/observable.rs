//! The cold [`Observable`].
//!
//! An observable is only a description of how to produce a sequence: it wraps
//! one subscriber function and nothing else. Each call to `subscribe` creates
//! a fresh [`Subscription`] and [`Observer`] and runs the subscriber function
//! synchronously with them, so two subscriptions never share state.

use std::{
  fmt::{Debug, Formatter},
  rc::Rc,
};

use crate::{
  observer::{Observer, Subscriber},
  subscription::Subscription,
};

mod create;
pub use create::*;
mod pipe;
pub use pipe::*;

type SubscriberFn<Item, Err> = Rc<dyn Fn(Observer<Item, Err>)>;

/// A lazy, reusable description of a push-based sequence.
///
/// Cloning is cheap and yields the same description.
pub struct Observable<Item, Err> {
  subscriber: SubscriberFn<Item, Err>,
}

impl<Item, Err> Clone for Observable<Item, Err> {
  #[inline]
  fn clone(&self) -> Self { Observable { subscriber: self.subscriber.clone() } }
}

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// param `subscriber`: the function called every time the observable is
  /// subscribed to. It receives an [`Observer`] on which values can be
  /// `next`ed, an `error` raised, or `complete` signalled, and on which it may
  /// register the subscription of whatever it wraps.
  pub fn new(subscriber: impl Fn(Observer<Item, Err>) + 'static) -> Self {
    Observable { subscriber: Rc::new(subscriber) }
  }
}

impl<Item: 'static, Err: Debug + 'static> Observable<Item, Err> {
  /// Subscribe with only a `next` callback.
  ///
  /// Errors are not swallowed: without a handler an error raises
  /// [`Fault::UnhandledError`](crate::error::Fault::UnhandledError).
  #[inline]
  pub fn subscribe(&self, next: impl Fn(Item) + 'static) -> Subscription {
    self.subscribe_with(Subscriber::new(next))
  }

  /// Subscribe with all three callbacks.
  pub fn subscribe_all(
    &self,
    next: impl Fn(Item) + 'static,
    error: impl FnOnce(Err) + 'static,
    complete: impl FnOnce() + 'static,
  ) -> Subscription {
    self.subscribe_with(Subscriber::new(next).on_error(error).on_complete(complete))
  }

  /// Start one independent execution.
  pub fn subscribe_with(&self, subscriber: Subscriber<Item, Err>) -> Subscription {
    let subscription = Subscription::new();
    let (observer, start) = subscriber.into_observer(subscription.clone());
    if let Some(start) = start {
      start(subscription.clone());
    }
    tracing::trace!("subscribe");
    (self.subscriber)(observer);
    subscription
  }
}

impl<Item, Err> Debug for Observable<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str("Observable") }
}
