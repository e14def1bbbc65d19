//! Async task lifecycle bookkeeping.
//!
//! Each in-flight provider call is a task. The runtime sends `TaskStarted`
//! when it spawns one and `TaskCompleted` with the result event when it
//! finishes; the reducer keeps per-kind state. "Is this flow loading" is
//! simply "is its task running", so completion clears the loading indicator
//! on every branch.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SessionFetch,
    SignIn,
    SignUp,
    SignOut,
    PasswordReset,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in the app state, mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub session_fetch: TaskState,
    pub sign_in: TaskState,
    pub sign_up: TaskState,
    pub sign_out: TaskState,
    pub password_reset: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::SessionFetch => &self.session_fetch,
            TaskKind::SignIn => &self.sign_in,
            TaskKind::SignUp => &self.sign_up,
            TaskKind::SignOut => &self.sign_out,
            TaskKind::PasswordReset => &self.password_reset,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SessionFetch => &mut self.session_fetch,
            TaskKind::SignIn => &mut self.sign_in,
            TaskKind::SignUp => &mut self.sign_up,
            TaskKind::SignOut => &mut self.sign_out,
            TaskKind::PasswordReset => &mut self.password_reset,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.session_fetch.is_running()
            || self.sign_in.is_running()
            || self.sign_up.is_running()
            || self.sign_out.is_running()
            || self.password_reset.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_ignores_stale_ids() {
        let mut state = TaskState::default();
        state.on_started(&TaskStarted { id: TaskId(1) });
        assert!(state.is_running());

        assert!(!state.finish_if_active(TaskId(0)));
        assert!(state.is_running());

        assert!(state.finish_if_active(TaskId(1)));
        assert!(!state.is_running());
    }
}
