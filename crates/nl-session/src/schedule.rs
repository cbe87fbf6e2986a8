//! Scheduled session transitions.
//!
//! The trainer's UX pacing ("advance 400 ms after a correct answer")
//! is modeled as a time-ordered queue of tasks instead of fire-and-
//! forget timers. Every task captures the session generation current
//! at scheduling time; a task whose generation has since changed is
//! discarded when it comes due, so a reset or restart can never be
//! mutated by a stale timer.

/// What a due task does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskAction {
    /// Resolve the current slot's aftermath and move to the next one.
    Advance,
    /// Request playback of the current slot's pitch.
    PlayCurrent,
}

/// A transition scheduled for a fixed point on the caller's clock.
#[derive(Clone, Copy, Debug)]
struct ScheduledTask {
    fire_at: u64,
    generation: u32,
    action: TaskAction,
}

/// Time-ordered queue of pending transitions.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: Vec<ScheduledTask>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Schedule an action at `fire_at`, tagged with `generation`.
    pub fn push(&mut self, fire_at: u64, generation: u32, action: TaskAction) {
        // Insert sorted by fire time; equal times keep insertion order.
        let pos = self
            .tasks
            .partition_point(|t| t.fire_at <= fire_at);
        self.tasks.insert(pos, ScheduledTask { fire_at, generation, action });
    }

    /// Remove and return the actions of all tasks due at `now`, in
    /// fire order. Due tasks from other generations are removed but
    /// not returned.
    pub fn pop_due(&mut self, now: u64, generation: u32) -> Vec<TaskAction> {
        let mut due = Vec::new();
        while let Some(task) = self.tasks.first() {
            if task.fire_at > now {
                break;
            }
            let task = self.tasks.remove(0);
            if task.generation == generation {
                due.push(task.action);
            }
        }
        due
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_in_time_order() {
        let mut queue = TaskQueue::new();
        queue.push(300, 0, TaskAction::PlayCurrent);
        queue.push(100, 0, TaskAction::Advance);
        queue.push(200, 0, TaskAction::PlayCurrent);

        assert_eq!(queue.pop_due(250, 0), vec![TaskAction::Advance, TaskAction::PlayCurrent]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(300, 0), vec![TaskAction::PlayCurrent]);
        assert!(queue.is_empty());
    }

    #[test]
    fn nothing_due_before_fire_time() {
        let mut queue = TaskQueue::new();
        queue.push(500, 0, TaskAction::Advance);
        assert!(queue.pop_due(499, 0).is_empty());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut queue = TaskQueue::new();
        queue.push(100, 0, TaskAction::Advance);
        queue.push(100, 1, TaskAction::PlayCurrent);

        // Generation moved on to 1: the generation-0 advance is
        // dropped, not fired.
        assert_eq!(queue.pop_due(100, 1), vec![TaskAction::PlayCurrent]);
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_fire_times_keep_insertion_order() {
        let mut queue = TaskQueue::new();
        queue.push(100, 0, TaskAction::Advance);
        queue.push(100, 0, TaskAction::PlayCurrent);
        assert_eq!(
            queue.pop_due(100, 0),
            vec![TaskAction::Advance, TaskAction::PlayCurrent]
        );
    }
}
