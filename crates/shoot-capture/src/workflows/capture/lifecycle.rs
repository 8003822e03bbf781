use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::domain::SessionStatus;
use super::session::ShootSession;

impl ShootSession {
    /// `in_progress -> paused`; any other state is left as-is.
    pub fn pause(mut self) -> Self {
        match self.status {
            SessionStatus::InProgress => {
                self.status = SessionStatus::Paused;
                info!(session_id = %self.id, "capture session paused");
            }
            other => self.ignore_transition("pause", other),
        }
        self
    }

    /// `paused -> in_progress`; any other state is left as-is.
    pub fn resume(mut self) -> Self {
        match self.status {
            SessionStatus::Paused => {
                self.status = SessionStatus::InProgress;
                info!(session_id = %self.id, "capture session resumed");
            }
            other => self.ignore_transition("resume", other),
        }
        self
    }

    /// Mark the session completed. Callers gate this with `validate_completion`.
    pub fn complete(self) -> Self {
        self.complete_at(Utc::now())
    }

    pub fn complete_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.status = SessionStatus::Completed;
        self.completed_at = Some(completed_at);
        info!(session_id = %self.id, shots = self.shots.len(), "capture session completed");
        self
    }

    /// Abandon an open session. Completed or cancelled sessions are left as-is.
    pub fn cancel(self) -> Self {
        self.cancel_at(Utc::now())
    }

    pub fn cancel_at(mut self, cancelled_at: DateTime<Utc>) -> Self {
        match self.status {
            SessionStatus::InProgress | SessionStatus::Paused => {
                self.status = SessionStatus::Cancelled;
                self.completed_at = Some(cancelled_at);
                info!(session_id = %self.id, "capture session cancelled");
            }
            other => self.ignore_transition("cancel", other),
        }
        self
    }

    fn ignore_transition(&self, transition: &'static str, status: SessionStatus) {
        debug!(
            session_id = %self.id,
            transition,
            status = status.label(),
            "lifecycle transition ignored"
        );
    }
}
