//! Contract violations.
//!
//! Ordinary stream errors travel through the `Err` type parameter and reach
//! the consumer exactly once. A [`Fault`] is different: it means a producer or
//! consumer broke the observable contract, and it is raised as a panic at the
//! call site that broke it instead of being delivered downstream.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
  /// `error` was called on a subscription that had already terminated, either
  /// by an earlier `error`/`complete` or by `dispose`.
  #[error("observable contract violated: error emitted after the subscription terminated")]
  ErrorAfterTermination,

  /// An error reached a subscriber that was configured without an error
  /// handler. Holds the `Debug` rendering of the error value.
  #[error("unhandled observable error: {0}")]
  UnhandledError(String),
}

impl Fault {
  /// Log the fault and unwind from the offending call.
  #[track_caller]
  pub fn raise(self) -> ! {
    tracing::error!(fault = %self, "observable fault");
    panic!("{}", self)
  }
}
