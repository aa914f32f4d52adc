//! Operators built outside the crate, the way a downstream library would:
//! subscribe upstream with forwarding callbacks and chain the upstream
//! subscription into the downstream observer.

#![allow(dead_code)]

use std::{
  cell::{Cell, RefCell},
  fmt::Debug,
  rc::Rc,
};

use rxlite::prelude::*;

/// Emit every item of `items`, then complete. Stops early once disposed.
pub fn from_iter<T, E, I>(items: I) -> Observable<T, E>
where
  T: 'static,
  E: 'static,
  I: IntoIterator<Item = T> + Clone + 'static,
{
  Observable::create(move |o| {
    for item in items.clone() {
      if !o.subscription().active() {
        break;
      }
      o.next(item);
    }
    o.complete();
    Ok(())
  })
}

pub fn map<A, B, E, F>(f: F) -> impl Fn(Observable<A, E>) -> Observable<B, E>
where
  A: 'static,
  B: 'static,
  E: Debug + 'static,
  F: Fn(A) -> B + 'static,
{
  let f = Rc::new(f);
  move |source| {
    let f = f.clone();
    Observable::new(move |downstream: Observer<B, E>| {
      let f = f.clone();
      let (d_next, d_error, d_complete) =
        (downstream.clone(), downstream.clone(), downstream.clone());
      source.subscribe_with(
        Subscriber::new(move |v: A| d_next.next(f(v)))
          .on_error(move |e| d_error.error(e))
          .on_complete(move || d_complete.complete())
          .chain(&downstream),
      );
    })
  }
}

pub fn filter<A, E, F>(predicate: F) -> impl Fn(Observable<A, E>) -> Observable<A, E>
where
  A: 'static,
  E: Debug + 'static,
  F: Fn(&A) -> bool + 'static,
{
  let predicate = Rc::new(predicate);
  move |source| {
    let predicate = predicate.clone();
    Observable::new(move |downstream: Observer<A, E>| {
      let predicate = predicate.clone();
      let (d_next, d_error, d_complete) =
        (downstream.clone(), downstream.clone(), downstream.clone());
      source.subscribe_with(
        Subscriber::new(move |v: A| {
          if predicate(&v) {
            d_next.next(v);
          }
        })
        .on_error(move |e| d_error.error(e))
        .on_complete(move || d_complete.complete())
        .chain(&downstream),
      );
    })
  }
}

/// Forward the first `count` items, then complete and release the source.
pub fn take<A, E>(count: usize) -> impl Fn(Observable<A, E>) -> Observable<A, E>
where
  A: 'static,
  E: Debug + 'static,
{
  move |source| {
    Observable::new(move |downstream: Observer<A, E>| {
      if count == 0 {
        downstream.complete();
        return;
      }
      let seen = Rc::new(Cell::new(0));
      let (d_next, d_error, d_complete) =
        (downstream.clone(), downstream.clone(), downstream.clone());
      source.subscribe_with(
        Subscriber::new(move |v: A| {
          seen.set(seen.get() + 1);
          d_next.next(v);
          if seen.get() == count {
            d_next.complete();
          }
        })
        .on_error(move |e| d_error.error(e))
        .on_complete(move || d_complete.complete())
        .chain(&downstream),
      );
    })
  }
}

/// Everything one subscription observed, in delivery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<T, E> {
  Next(T),
  Error(E),
  Complete,
}

/// Records every callback a subscription receives.
pub struct Recorder<T, E> {
  events: Rc<RefCell<Vec<Event<T, E>>>>,
}

impl<T: Clone + 'static, E: Clone + 'static> Recorder<T, E> {
  pub fn new() -> Self { Recorder { events: Rc::new(RefCell::new(vec![])) } }

  pub fn subscriber(&self) -> Subscriber<T, E> {
    let (c_next, c_error, c_complete) =
      (self.events.clone(), self.events.clone(), self.events.clone());
    Subscriber::new(move |v| c_next.borrow_mut().push(Event::Next(v)))
      .on_error(move |e| c_error.borrow_mut().push(Event::Error(e)))
      .on_complete(move || c_complete.borrow_mut().push(Event::Complete))
  }

  pub fn events(&self) -> Vec<Event<T, E>> { self.events.borrow().clone() }

  pub fn values(&self) -> Vec<T> {
    self
      .events
      .borrow()
      .iter()
      .filter_map(|e| match e {
        Event::Next(v) => Some(v.clone()),
        _ => None,
      })
      .collect()
  }

  pub fn completions(&self) -> usize {
    self.events.borrow().iter().filter(|e| matches!(e, Event::Complete)).count()
  }

  pub fn errors(&self) -> Vec<E> {
    self
      .events
      .borrow()
      .iter()
      .filter_map(|e| match e {
        Event::Error(e) => Some(e.clone()),
        _ => None,
      })
      .collect()
  }
}
