//! Example: Operators as Plain Functions
//!
//! The crate ships no operators. This example writes `map` and `filter` as
//! ordinary transformers and composes them with `pipe!`, then shows that
//! disposing the consumer's subscription stops the producer mid-loop.

use std::{cell::RefCell, fmt::Debug, rc::Rc};

use rxlite::prelude::*;

// ==================================================================================
// 1. Operators
// ==================================================================================

fn map<A, B, E>(f: impl Fn(A) -> B + 'static) -> impl FnOnce(Observable<A, E>) -> Observable<B, E>
where
  A: 'static,
  B: 'static,
  E: Debug + 'static,
{
  let f = Rc::new(f);
  move |source| {
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

fn filter<A, E>(
  predicate: impl Fn(&A) -> bool + 'static,
) -> impl FnOnce(Observable<A, E>) -> Observable<A, E>
where
  A: 'static,
  E: Debug + 'static,
{
  let predicate = Rc::new(predicate);
  move |source| {
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

// ==================================================================================
// 2. A producer
// ==================================================================================

fn counter(limit: i32) -> Observable<i32, String> {
  Observable::create(move |o| {
    for i in 0..limit {
      if !o.subscription().active() {
        println!("[counter] disposed after {} values", i);
        break;
      }
      o.next(i);
    }
    o.complete();
    Ok(())
  })
}

fn main() {
  // ==================================================================================
  // 3. Compose and subscribe
  // ==================================================================================

  let labels = pipe!(
    counter(10),
    filter(|x: &i32| x % 2 == 0),
    map(|x: i32| x * 2),
    map(|x: i32| format!("Next: {}", x)),
  );

  labels.subscribe_all(
    |line| println!("{}", line),
    |e| eprintln!("Error: {}", e),
    || println!("Completed"),
  );

  // ==================================================================================
  // 4. Dispose from inside `next`
  // ==================================================================================

  let handle: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
  let (c_handle, s_handle) = (handle.clone(), handle.clone());
  let subscription = counter(1_000_000).pipe(filter(|x: &i32| x % 2 == 0)).subscribe_with(
    Subscriber::new(move |x: i32| {
      println!("Got {}", x);
      if x == 2 {
        let subscription = c_handle.borrow().clone();
        if let Some(subscription) = subscription {
          subscription.dispose();
        }
      }
    })
    .on_complete(|| println!("never printed"))
    .on_start(move |s| *s_handle.borrow_mut() = Some(s)),
  );
  println!("active after dispose: {}", subscription.active());
}
