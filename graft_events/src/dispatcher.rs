// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a dispatch sequence and honor stop outcomes.
//!
//! Entries are processed in the order [`Listeners::route`](crate::Listeners::route)
//! emits them (target, then bubbling ancestors, then window). [`Outcome::Stop`]
//! aborts propagation immediately. Default prevention is independent of
//! propagation and is recorded on the [`Event`].
//!
//! ## Minimal example
//!
//! ```
//! use graft_events::dispatcher;
//! use graft_events::{Dispatch, Event, EventKind, EventTarget, ListenerTag, Outcome, Phase};
//!
//! let entry = |owner: u32| Dispatch {
//!     owner,
//!     tag: ListenerTag(0),
//!     scope: EventTarget::Window,
//!     current: EventTarget::Window,
//!     phase: Phase::Target,
//! };
//! let seq = vec![entry(1), entry(2), entry(3)];
//!
//! let mut ev = Event::new(EventKind::HashChange, EventTarget::Window);
//! let mut seen = Vec::new();
//! let stopped = dispatcher::run(&seq, &mut ev, |d, e| {
//!     seen.push(d.owner);
//!     e.prevent_default();
//!     if d.owner == 2 { Outcome::Stop } else { Outcome::Continue }
//! });
//!
//! assert!(stopped);
//! assert!(ev.is_default_prevented());
//! assert_eq!(seen, vec![1, 2]);
//! ```

use crate::types::{Dispatch, Event, Outcome};

/// Run a handler over a dispatch sequence.
///
/// - [`Outcome::Continue`]: keep going.
/// - [`Outcome::Stop`]: skip every later entry.
///
/// Returns `true` if propagation was stopped.
pub fn run<O>(
    seq: &[Dispatch<O>],
    event: &mut Event,
    mut handler: impl FnMut(&Dispatch<O>, &mut Event) -> Outcome,
) -> bool {
    for d in seq {
        if handler(d, event) == Outcome::Stop {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EventKind, EventTarget, ListenerTag, Phase};
    use alloc::vec;
    use alloc::vec::Vec;

    fn mk_seq() -> Vec<Dispatch<u32>> {
        [(1, Phase::Target), (2, Phase::Bubble), (3, Phase::Bubble)]
            .into_iter()
            .map(|(owner, phase)| Dispatch {
                owner,
                tag: ListenerTag(0),
                scope: EventTarget::Window,
                current: EventTarget::Window,
                phase,
            })
            .collect()
    }

    fn click() -> Event {
        Event::new(EventKind::Click, EventTarget::Window)
    }

    #[test]
    fn continue_through_all() {
        let seq = mk_seq();
        let mut seen = Vec::new();
        let stopped = run(&seq, &mut click(), |d, _| {
            seen.push(d.owner);
            Outcome::Continue
        });
        assert!(!stopped);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn stop_in_target_skips_bubble() {
        let seq = mk_seq();
        let mut seen = Vec::new();
        let stopped = run(&seq, &mut click(), |d, _| {
            seen.push(d.owner);
            if d.phase == Phase::Target {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        assert!(stopped);
        assert_eq!(seen, vec![1]);
    }

    #[test]
    fn prevent_default_does_not_stop_propagation() {
        let seq = mk_seq();
        let mut ev = click();
        let mut seen = Vec::new();
        let stopped = run(&seq, &mut ev, |d, e| {
            seen.push(d.owner);
            if d.owner == 2 {
                e.prevent_default();
            }
            Outcome::Continue
        });
        assert!(!stopped);
        assert!(ev.is_default_prevented());
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn empty_sequence_is_not_stopped() {
        let seq: Vec<Dispatch<u32>> = Vec::new();
        assert!(!run(&seq, &mut click(), |_, _| Outcome::Stop));
    }
}
