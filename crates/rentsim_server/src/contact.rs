//! Where accepted contact submissions go
//!
//! Storage and notification are outside this service; the sink trait is the
//! seam where a mailer or a queue would plug in.

use std::sync::Arc;
#[cfg(test)]
use std::sync::Mutex;
use std::time::Duration;

use crate::error::ApiResult;
use crate::models::ContactSubmission;

/// Receives every contact submission that passed validation
pub trait ContactSink: Send + Sync {
    fn deliver(&self, submission: &ContactSubmission) -> ApiResult<()>;
}

/// Default sink: records the submission in the service log
pub struct LogContactSink;

impl ContactSink for LogContactSink {
    fn deliver(&self, submission: &ContactSubmission) -> ApiResult<()> {
        tracing::info!(
            id = %submission.id,
            city = submission.city.as_deref().unwrap_or("-"),
            "Contact request received from {} <{}>",
            submission.name,
            submission.email
        );
        Ok(())
    }
}

/// Keeps submissions in memory
#[cfg(test)]
#[derive(Default)]
pub struct MemoryContactSink {
    submissions: Mutex<Vec<ContactSubmission>>,
}

#[cfg(test)]
impl MemoryContactSink {
    pub fn submissions(&self) -> Vec<ContactSubmission> {
        self.submissions
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl ContactSink for MemoryContactSink {
    fn deliver(&self, submission: &ContactSubmission) -> ApiResult<()> {
        self.submissions.lock()?.push(submission.clone());
        Ok(())
    }
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub contact_sink: Arc<dyn ContactSink>,
    /// Simulated processing time before a contact request is acknowledged
    pub contact_delay: Duration,
}

impl AppState {
    pub fn new(contact_sink: Arc<dyn ContactSink>, contact_delay: Duration) -> Self {
        Self {
            contact_sink,
            contact_delay,
        }
    }
}
