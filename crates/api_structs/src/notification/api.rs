use crate::dtos::NotificationJobDTO;
use mailhorn_domain::{JobStatus, NotificationJob, Trigger, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationJobResponse {
    pub job: NotificationJobDTO,
}

impl NotificationJobResponse {
    pub fn new(job: NotificationJob) -> Self {
        Self {
            job: NotificationJobDTO::new(&job),
        }
    }
}

pub mod emit_notifications {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub tenant_id: ID,
        pub trigger: Trigger,
        pub booking_id: ID,
        /// Amount in minor units for payment flavoured triggers,
        /// rendered through `${amount}`
        pub amount_cents: Option<i64>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub jobs: Vec<NotificationJobDTO>,
    }

    impl APIResponse {
        pub fn new(jobs: Vec<NotificationJob>) -> Self {
            Self {
                jobs: jobs.iter().map(NotificationJobDTO::new).collect(),
            }
        }
    }
}

pub mod process_due_jobs {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Defaults to the configured dispatch batch size
        pub batch_size: Option<usize>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub processed: usize,
        pub sent: usize,
        pub retried: usize,
        pub dead: usize,
    }
}

pub mod get_job {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub job_id: ID,
    }

    pub type APIResponse = NotificationJobResponse;
}

pub mod list_jobs {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub tenant_id: ID,
        pub status: Option<JobStatus>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub jobs: Vec<NotificationJobDTO>,
    }

    impl APIResponse {
        pub fn new(jobs: Vec<NotificationJob>) -> Self {
            Self {
                jobs: jobs.iter().map(NotificationJobDTO::new).collect(),
            }
        }
    }
}

pub mod count_due_jobs {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub due: i64,
    }
}
