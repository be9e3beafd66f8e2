use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Refers to one scheduled task. Handles are never reused by the timeline that issued them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskHandle(u64);

#[derive(Clone, Debug, PartialEq)]
struct ScheduledTask<K> {
    handle: TaskHandle,
    kind: K,
    due: Duration,
    period: Option<Duration>,
}

/// Virtual clock with one-shot and repeating tasks that can be cancelled at any time.
///
/// Nothing fires on its own: the owner moves time forward and pulls due tasks with [`Timeline::pop_due`].
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline<K> {
    now: Duration,
    next_handle: u64,
    tasks: Vec<ScheduledTask<K>>,
}

impl<K: Copy> Timeline<K> {
    /// Shortest accepted period, a zero period would fire forever.
    pub const MIN_PERIOD: Duration = Duration::from_millis(1);

    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_handle: 0,
            tasks: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule_once(&mut self, kind: K, delay: Duration) -> TaskHandle {
        self.push(kind, delay, None)
    }

    pub fn schedule_repeating(&mut self, kind: K, period: Duration) -> TaskHandle {
        let period = period.max(Self::MIN_PERIOD);
        self.push(kind, period, Some(period))
    }

    /// Returns whether the task was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.handle != handle);
        let cancelled = self.tasks.len() != before;
        if cancelled {
            log::trace!("cancelled task {:?}", handle);
        }
        cancelled
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|task| task.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Cancels every task. The clock and the handle sequence keep going.
    pub fn clear(&mut self) {
        if !self.tasks.is_empty() {
            log::trace!("cancelled {} pending tasks", self.tasks.len());
        }
        self.tasks.clear();
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.tasks.iter().map(|task| task.due).min()
    }

    /// Takes the earliest task due at or before `until` and moves the clock to its deadline.
    ///
    /// Ties go to the task scheduled first. Repeating tasks stay scheduled for their next period.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TaskHandle, K)> {
        let (index, _) = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= until)
            .min_by_key(|(_, task)| (task.due, task.handle))?;

        let ScheduledTask {
            handle,
            kind,
            due,
            period,
        } = self.tasks[index];
        self.now = self.now.max(due);

        // a repeating task whose next deadline overflows the clock is done
        match period.and_then(|period| due.checked_add(period)) {
            Some(next) => self.tasks[index].due = next,
            None => {
                self.tasks.swap_remove(index);
            }
        }

        let fired = (handle, kind);

        log::trace!("task {:?} fired at {:?}", fired.0, self.now);
        Some(fired)
    }

    /// Moves the clock forward without firing anything.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn push(&mut self, kind: K, delay: Duration, period: Option<Duration>) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.tasks.push(ScheduledTask {
            handle,
            kind,
            due: self.now.saturating_add(delay),
            period,
        });
        handle
    }
}

impl<K: Copy> Default for Timeline<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn drain(timeline: &mut Timeline<char>, until: Duration) -> Vec<char> {
        let mut fired = Vec::new();
        while let Some((_, kind)) = timeline.pop_due(until) {
            fired.push(kind);
        }
        timeline.advance_to(until);
        fired
    }

    #[test]
    fn tasks_fire_in_deadline_order() {
        let mut timeline = Timeline::new();
        timeline.schedule_once('b', ms(300));
        timeline.schedule_once('a', ms(100));
        timeline.schedule_once('c', ms(300));

        assert_eq!(drain(&mut timeline, ms(299)), vec!['a']);
        assert_eq!(drain(&mut timeline, ms(300)), vec!['b', 'c']);
        assert_eq!(timeline.pending_count(), 0);
    }

    #[test]
    fn one_shot_fires_exactly_at_its_deadline() {
        let mut timeline = Timeline::new();
        timeline.advance_to(ms(1_000));
        timeline.schedule_once('x', ms(500));

        assert!(drain(&mut timeline, ms(1_499)).is_empty());
        assert_eq!(drain(&mut timeline, ms(1_500)), vec!['x']);
    }

    #[test]
    fn repeating_task_fires_once_per_period() {
        let mut timeline = Timeline::new();
        let handle = timeline.schedule_repeating('t', ms(1_000));

        assert_eq!(drain(&mut timeline, ms(3_500)), vec!['t', 't', 't']);
        assert!(timeline.is_pending(handle));
        assert_eq!(timeline.next_due(), Some(ms(4_000)));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut timeline = Timeline::new();
        let handle = timeline.schedule_once('x', ms(10));

        assert!(timeline.cancel(handle));
        assert!(!timeline.cancel(handle));
        assert!(drain(&mut timeline, ms(100)).is_empty());
    }

    #[test]
    fn handles_are_not_reused_after_clear() {
        let mut timeline = Timeline::new();
        let old = timeline.schedule_once('x', ms(10));
        timeline.clear();
        let new = timeline.schedule_once('y', ms(10));

        assert_ne!(old, new);
        assert!(!timeline.is_pending(old));
        assert!(timeline.is_pending(new));
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut timeline = Timeline::new();
        timeline.schedule_repeating('z', Duration::ZERO);

        assert_eq!(drain(&mut timeline, ms(3)).len(), 3);
    }

    #[test]
    fn repeating_task_stops_at_the_end_of_the_clock() {
        let mut timeline = Timeline::new();
        let handle = timeline.schedule_repeating('r', Duration::MAX / 2);

        assert_eq!(drain(&mut timeline, Duration::MAX), vec!['r', 'r']);
        assert!(!timeline.is_pending(handle));
        assert_eq!(timeline.now(), Duration::MAX);
    }
}
