use std::fmt::{Debug, Formatter};

use crate::{
  error::Fault,
  observable::Observable,
  observer::Observer,
  subscription::{Subscription, SubscriptionLike},
};

/// The emitter handed to an [`Observable::create`] producer.
///
/// Every call is gated by the producer's own [`Subscription`], which the
/// producer can poll or dispose through [`subscription`](Self::subscription),
/// e.g. to stop an emission loop early.
pub struct SubscriberObserver<Item, Err> {
  observer: Observer<Item, Err>,
  subscription: Subscription,
}

impl<Item, Err> Clone for SubscriberObserver<Item, Err> {
  fn clone(&self) -> Self {
    SubscriberObserver { observer: self.observer.clone(), subscription: self.subscription.clone() }
  }
}

impl<Item, Err> SubscriberObserver<Item, Err> {
  #[inline]
  pub fn next(&self, value: Item) {
    if self.subscription.is_live() {
      self.observer.next(value);
    }
  }

  /// Terminate with an error. Raises [`Fault::ErrorAfterTermination`] if this
  /// execution already ended.
  #[track_caller]
  pub fn error(&self, err: Err) {
    if !self.subscription.is_live() {
      Fault::ErrorAfterTermination.raise();
    }
    self.observer.error(err);
    self.subscription.dispose();
  }

  pub fn complete(&self) {
    if self.subscription.is_live() {
      self.observer.complete();
      self.subscription.dispose();
    }
  }

  /// The liveness handle of this execution.
  #[inline]
  pub fn subscription(&self) -> &Subscription { &self.subscription }
}

impl<Item, Err> Debug for SubscriberObserver<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SubscriberObserver").field("subscription", &self.subscription).finish()
  }
}

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Bridge an imperative, callback-style producer into an observable.
  ///
  /// `on_subscribe` runs synchronously, once per subscription. A returned
  /// `Err(e)` goes to the consumer's observer, even if the producer already
  /// disposed its own subscription. It is a [`Fault::ErrorAfterTermination`]
  /// only once the consumer's side has terminated, i.e. after `complete`, an
  /// earlier `error` or a consumer `dispose`.
  ///
  /// ```rust
  /// use std::{cell::RefCell, rc::Rc};
  ///
  /// use rxlite::prelude::*;
  ///
  /// let received = Rc::new(RefCell::new(vec![]));
  /// let c_received = received.clone();
  ///
  /// Observable::<i32, String>::create(|o| {
  ///   for i in 0..10 {
  ///     if !o.subscription().active() {
  ///       break;
  ///     }
  ///     o.next(i);
  ///   }
  ///   o.complete();
  ///   Ok(())
  /// })
  /// .subscribe(move |v| c_received.borrow_mut().push(v));
  ///
  /// assert_eq!(received.borrow().len(), 10);
  /// ```
  pub fn create<F>(on_subscribe: F) -> Self
  where
    F: Fn(SubscriberObserver<Item, Err>) -> Result<(), Err> + 'static,
  {
    Observable::new(move |observer: Observer<Item, Err>| {
      let subscription = Subscription::new();
      observer.subscribe(subscription.clone());

      let emitter =
        SubscriberObserver { observer: observer.clone(), subscription: subscription.clone() };
      if let Err(err) = on_subscribe(emitter) {
        tracing::trace!("producer failed synchronously");
        observer.error(err);
        subscription.dispose();
      }
    })
  }
}
