use crate::dtos::DispatchResultDTO;
use adslot_domain::DispatchReport;
use serde::{Deserialize, Serialize};

pub mod send_due_reminders {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub results: Vec<DispatchResultDTO>,
    }

    impl APIResponse {
        pub fn new(report: DispatchReport) -> Self {
            Self {
                results: report
                    .results
                    .into_iter()
                    .map(DispatchResultDTO::new)
                    .collect(),
            }
        }
    }
}
