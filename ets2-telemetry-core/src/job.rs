//! Job lifecycle tracker
//!
//! The host has no "job finished" event: a job ends when its configuration
//! arrives empty, or when it is cancelled or delivered. The tracker remembers
//! whether a job is active so the end of one can be turned into an edge.

/// Whether a job is currently active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobState {
    #[default]
    Idle,
    OnJob,
}

#[derive(Debug, Clone, Default)]
pub struct JobTracker {
    state: JobState,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn is_on_job(&self) -> bool {
        self.state == JobState::OnJob
    }

    /// Feed a `job` configuration event
    ///
    /// Returns `true` when the event ended an active job, i.e. on the
    /// `OnJob -> Idle` transition.
    pub fn on_job_configuration(&mut self, has_attributes: bool) -> bool {
        match (self.state, has_attributes) {
            (JobState::Idle, true) => {
                self.state = JobState::OnJob;
                log::debug!("Job started");
                false
            }
            (JobState::OnJob, false) => {
                self.state = JobState::Idle;
                log::debug!("Job finished");
                true
            }
            _ => false,
        }
    }

    /// Force the tracker idle after a cancellation or delivery
    ///
    /// Returns whether a job was active.
    pub fn finish(&mut self) -> bool {
        let was_on_job = self.is_on_job();
        self.state = JobState::Idle;
        was_on_job
    }
}
