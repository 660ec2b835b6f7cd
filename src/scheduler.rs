//! Cooperative scheduling of the mission and the gripper.
//!
//! Both activities run on one executor and only hand over control at their
//! polling waits. [`race`] polls them side by side and finishes as soon as
//! the primary activity does. The background activity is dropped wherever it
//! is suspended: no cleanup runs and it does not get to finish its cycle.
//!
//! No locks are needed. Each actuator belongs to exactly one side: the
//! mission drives the wheels and reads the surface sensor, the gripper task
//! drives the jaw and watches the bay.
//!
//! ```
//! use std::time::Duration;
//! use trailgrip::{hardware::{mock::{MockClock, MockTicker}, Ticker}, scheduler::race};
//!
//! let ticker = MockTicker::new(MockClock::new());
//! let out = embassy_futures::block_on(race(
//!     async {
//!         ticker.sleep(Duration::from_millis(30)).await;
//!         7
//!     },
//!     async {
//!         loop {
//!             ticker.sleep(Duration::from_millis(10)).await;
//!         }
//!     },
//! ));
//! assert_eq!(out, 7);
//! ```

use std::future::Future;

use embassy_futures::select::{Either, select};
use log::{debug, warn};

/// Runs `primary` and `background` together and returns the primary's output
/// once it completes, dropping `background`.
///
/// If `background` completes first the primary simply keeps running alone.
pub async fn race<P, B>(primary: P, background: B) -> P::Output
where
    P: Future,
    B: Future<Output = ()>,
{
    let mut primary = core::pin::pin!(primary);
    match select(primary.as_mut(), background).await {
        Either::First(out) => {
            debug!("primary finished, background cancelled");
            out
        }
        Either::Second(()) => {
            warn!("background task ended before the primary");
            primary.await
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, time::Duration};

    use embassy_futures::block_on;

    use super::*;
    use crate::hardware::{
        Ticker,
        mock::{MockClock, MockTicker},
    };

    const TICK: Duration = Duration::from_millis(10);

    #[test]
    fn primary_completion_cancels_background() {
        let ticker = MockTicker::new(MockClock::new());
        let background_steps = Cell::new(0);

        let out = block_on(race(
            async {
                for _ in 0..3 {
                    ticker.sleep(TICK).await;
                }
                "done"
            },
            async {
                loop {
                    background_steps.set(background_steps.get() + 1);
                    ticker.sleep(TICK).await;
                }
            },
        ));

        assert_eq!(out, "done");
        let steps = background_steps.get();
        assert!(steps >= 3, "background only ran {} times", steps);

        // Nothing runs after the race returns.
        block_on(ticker.sleep(TICK));
        assert_eq!(background_steps.get(), steps);
    }

    #[test]
    fn activities_interleave_at_waits() {
        let ticker = MockTicker::new(MockClock::new());
        let log = std::cell::RefCell::new(Vec::new());

        block_on(race(
            async {
                for i in 0..3 {
                    log.borrow_mut().push(('p', i));
                    ticker.sleep(TICK).await;
                }
            },
            async {
                let mut i = 0;
                loop {
                    log.borrow_mut().push(('b', i));
                    i += 1;
                    ticker.sleep(TICK).await;
                }
            },
        ));

        assert_eq!(
            log.into_inner(),
            vec![('p', 0), ('b', 0), ('p', 1), ('b', 1), ('p', 2), ('b', 2)]
        );
    }

    #[test]
    fn finished_background_leaves_primary_running() {
        let ticker = MockTicker::new(MockClock::new());
        let out = block_on(race(
            async {
                for _ in 0..5 {
                    ticker.sleep(TICK).await;
                }
                ticker.clock().now_ms()
            },
            async {},
        ));
        assert_eq!(out, 50);
    }
}
