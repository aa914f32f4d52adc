//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

pub use crate::{
  error::Fault,
  observable::{BoxedTransformer, Observable, SubscriberObserver},
  observer::{Observer, Subscriber},
  pipe,
  subscription::{Lifecycle, Subscription, SubscriptionGuard, SubscriptionLike, Teardown},
};
