//! # rxlite: cold observables
//!
//! A minimal, single-threaded push-sequence core in the style of Reactive
//! Extensions. An [`Observable`] produces nothing until it is subscribed, every
//! subscription runs its own isolated execution, and termination is a one-shot
//! event: a consumer sees values in the order they were emitted, then at most
//! one `error` or `complete`.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! let numbers = Observable::<i32, String>::create(|o| {
//!   for i in 0..10 {
//!     o.next(i);
//!   }
//!   o.complete();
//!   Ok(())
//! });
//!
//! let subscription = numbers.subscribe_all(
//!   |v| println!("Value: {}", v),
//!   |e| eprintln!("Error: {}", e),
//!   || println!("Done"),
//! );
//! assert!(!subscription.active());
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Immutable, reusable description of a sequence |
//! | [`Observer`] | Emitting handle given to a subscriber function |
//! | [`Subscriber`] | Consumer callbacks resolved at subscribe time |
//! | [`Subscription`] | Liveness and cancellation handle of one execution |
//!
//! Operators such as `map` or `filter` are not part of this crate. They are
//! ordinary functions `Observable<A, E> -> Observable<B, E>` composed with
//! [`Observable::pipe`] or the [`pipe!`] macro; see the `pipeline` demo.
//!
//! ## Contract violations
//!
//! Emitting `error` on a subscription that already ended, or delivering an
//! error to a subscriber with no error handler, raises a
//! [`Fault`](error::Fault) panic instead of being silently dropped.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscriber`]: observer::Subscriber
//! [`Subscription`]: subscription::Subscription

pub mod error;
pub mod observable;
pub mod observer;
pub mod prelude;
pub mod rc;
pub mod subscription;

pub use prelude::*;
