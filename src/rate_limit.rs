use dashmap::DashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use crate::clock::Clock;

// Rate limit entry - tracks successful fetches per user inside one window
#[derive(Debug, Clone)]
pub struct UserCounter {
    pub count: u32,
    // Some(due) while a reset is pending for this user
    pub reset_at: Option<u64>,
    pub last_seen: u64,
}

impl UserCounter {
    fn new(now: u64) -> Self {
        Self {
            count: 0,
            reset_at: None,
            last_seen: now,
        }
    }

    pub fn window_armed(&self) -> bool {
        self.reset_at.is_some()
    }

    // Applies the reset if `due` is still the pending one
    fn reset_if_due(&mut self, due: u64) -> bool {
        if self.reset_at == Some(due) {
            self.count = 0;
            self.reset_at = None;
            true
        } else {
            false
        }
    }
}

/// Point-in-time view of a user's counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub count: u32,
    pub window_armed: bool,
}

/// Per-user quota of successful fetches over a rolling window.
///
/// `allow` arms a one-shot reset the first time a user is seen in a window;
/// pending resets live in a min-heap keyed by due time and are applied on
/// every access and by [`RateLimiter::sweep`].
pub struct RateLimiter {
    counters: DashMap<String, UserCounter>,
    resets: Mutex<BinaryHeap<Reverse<(u64, String)>>>,
    limit: AtomicU32,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            counters: DashMap::new(),
            resets: Mutex::new(BinaryHeap::new()),
            limit: AtomicU32::new(limit),
            window,
            clock,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit.load(Ordering::Relaxed)
    }

    // Takes effect on the next decision
    pub fn set_limit(&self, limit: u32) {
        self.limit.store(limit, Ordering::Relaxed);
    }

    /// Decides whether `user` may fetch now. Never touches `count`.
    pub fn allow(&self, user: &str) -> bool {
        let now = self.clock.now();
        self.run_due_resets(now);

        let mut entry = self
            .counters
            .entry(user.to_string())
            .or_insert_with(|| UserCounter::new(now));
        entry.last_seen = now;

        if entry.count >= self.limit() {
            tracing::debug!(user, count = entry.count, "quota exhausted");
            return false;
        }

        self.arm(&mut entry, user, now);
        true
    }

    /// Charges one successful fetch against `user`'s quota.
    ///
    /// A fetch that outlived its window lands in a disarmed counter; arming
    /// it here guarantees the charge is reset again later.
    pub fn consume(&self, user: &str) {
        let now = self.clock.now();
        let mut entry = self
            .counters
            .entry(user.to_string())
            .or_insert_with(|| UserCounter::new(now));
        entry.count += 1;
        entry.last_seen = now;
        self.arm(&mut entry, user, now);
    }

    pub fn counter(&self, user: &str) -> Option<CounterSnapshot> {
        self.run_due_resets(self.clock.now());
        self.counters.get(user).map(|entry| CounterSnapshot {
            count: entry.count,
            window_armed: entry.window_armed(),
        })
    }

    pub fn tracked_users(&self) -> usize {
        self.counters.len()
    }

    /// Applies every reset whose due time has passed. Returns how many fired.
    pub fn sweep(&self) -> usize {
        self.run_due_resets(self.clock.now())
    }

    // Drops counters that carry no state and have been idle for `idle_for`
    pub fn evict_idle(&self, idle_for: Duration) -> usize {
        let now = self.clock.now();
        let idle_nanos = idle_for.as_nanos() as u64;
        let before = self.counters.len();
        self.counters.retain(|_, counter| {
            counter.window_armed()
                || counter.count > 0
                || now.saturating_sub(counter.last_seen) < idle_nanos
        });
        before.saturating_sub(self.counters.len())
    }

    // Schedules the window reset unless one is already pending
    fn arm(&self, counter: &mut UserCounter, user: &str, now: u64) {
        if counter.reset_at.is_none() {
            let due = now.saturating_add(self.window.as_nanos() as u64);
            counter.reset_at = Some(due);
            self.lock_resets().push(Reverse((due, user.to_string())));
        }
    }

    fn run_due_resets(&self, now: u64) -> usize {
        // pop under the heap lock, apply after releasing it
        let due: Vec<(u64, String)> = {
            let mut resets = self.lock_resets();
            let mut due = Vec::new();
            while let Some(Reverse((at, _))) = resets.peek() {
                if *at > now {
                    break;
                }
                if let Some(Reverse(item)) = resets.pop() {
                    due.push(item);
                }
            }
            due
        };

        let mut fired = 0;
        for (at, user) in due {
            if let Some(mut entry) = self.counters.get_mut(&user) {
                if entry.reset_if_due(at) {
                    tracing::debug!(user = %user, "rate window reset");
                    fired += 1;
                }
            }
        }
        fired
    }

    fn lock_resets(&self) -> std::sync::MutexGuard<'_, BinaryHeap<Reverse<(u64, String)>>> {
        self.resets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
