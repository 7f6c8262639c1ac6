use crate::domain::ports::{BoxedJob, JobHandle, JobQueue};

/// Job queue backed by the Tokio runtime. Jobs run on the current runtime's
/// worker pool; completion is observable through the returned handle only.
#[derive(Default)]
pub struct TokioJobQueue;

impl TokioJobQueue {
    pub fn new() -> Self {
        Self
    }
}

impl JobQueue for TokioJobQueue {
    fn submit(&self, job: BoxedJob) -> JobHandle {
        JobHandle::new(tokio::spawn(job))
    }
}
