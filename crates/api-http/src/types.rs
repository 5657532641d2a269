//! Shared handler state

use jobs_core::application::JobService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<JobService>,
}

impl AppState {
    pub fn new(jobs: Arc<JobService>) -> Self {
        Self { jobs }
    }
}
