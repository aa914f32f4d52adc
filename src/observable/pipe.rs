//! Composition of observable transformers.
//!
//! A transformer is any `FnOnce(Observable<A, E>) -> Observable<B, F>`.
//! Composition never subscribes: it only builds the description that a later
//! `subscribe` runs.

use crate::observable::Observable;

/// A type-erased transformer that keeps the item and error types, for stage
/// lists assembled at runtime.
pub type BoxedTransformer<Item, Err> =
  Box<dyn FnOnce(Observable<Item, Err>) -> Observable<Item, Err>>;

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Apply one stage. `source.pipe(f).pipe(g)` is `g(f(source))`.
  ///
  /// ```rust
  /// use rxlite::prelude::*;
  ///
  /// fn tagged(source: Observable<i32, ()>) -> Observable<String, ()> {
  ///   Observable::new(move |downstream: Observer<String, ()>| {
  ///     let (d_next, d_complete) = (downstream.clone(), downstream.clone());
  ///     source.subscribe_with(
  ///       Subscriber::new(move |v: i32| d_next.next(format!("#{}", v)))
  ///         .on_complete(move || d_complete.complete())
  ///         .chain(&downstream),
  ///     );
  ///   })
  /// }
  ///
  /// let tags = Observable::<i32, ()>::create(|o| {
  ///   o.next(7);
  ///   o.complete();
  ///   Ok(())
  /// })
  /// .pipe(tagged);
  /// tags.subscribe(|t| assert_eq!(t, "#7"));
  /// ```
  #[inline]
  pub fn pipe<R>(self, stage: impl FnOnce(Self) -> R) -> R { stage(self) }

  /// Apply `stage` if present, otherwise return `self` unchanged.
  #[inline]
  pub fn pipe_opt(self, stage: Option<impl FnOnce(Self) -> Self>) -> Self {
    match stage {
      Some(stage) => stage(self),
      None => self,
    }
  }

  /// Fold a runtime list of stages left to right. `None` entries are skipped,
  /// so optional or conditional stages can sit in the list as placeholders.
  pub fn pipe_all<I>(self, stages: I) -> Self
  where
    I: IntoIterator<Item = Option<BoxedTransformer<Item, Err>>>,
  {
    stages.into_iter().flatten().fold(self, |source, stage| stage(source))
  }
}

/// Fold any number of stages left to right.
///
/// `pipe!(source, f, g, h)` expands to `source.pipe(f).pipe(g).pipe(h)`, so
/// every stage is type-checked against the output of the one before it.
#[macro_export]
macro_rules! pipe {
  ($source:expr $(,)?) => {
    $source
  };
  ($source:expr, $($stage:expr),+ $(,)?) => {
    $source$(.pipe($stage))+
  };
}
