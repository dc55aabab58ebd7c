use crate::dtos::MessageTemplateDTO;
use mailhorn_domain::{Channel, MessageTemplate, Trigger, ID};
use serde::{Deserialize, Serialize};

/// Response for template authoring endpoints. Besides the template
/// itself it carries the well formed placeholders the renderer does
/// not support, so authoring tooling can warn about them.
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub template: MessageTemplateDTO,
    pub unsupported_placeholders: Vec<String>,
}

impl TemplateResponse {
    pub fn new(template: MessageTemplate, unsupported_placeholders: Vec<String>) -> Self {
        Self {
            template: MessageTemplateDTO::new(&template),
            unsupported_placeholders,
        }
    }
}

pub mod create_template {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub tenant_id: ID,
        pub trigger: Trigger,
        pub channel: Channel,
        pub name: String,
        pub subject: Option<String>,
        pub body: String,
    }

    pub type APIResponse = TemplateResponse;
}

pub mod update_template {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub template_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: Option<String>,
        pub subject: Option<String>,
        pub body: Option<String>,
        pub enabled: Option<bool>,
    }

    pub type APIResponse = TemplateResponse;
}

pub mod delete_template {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub template_id: ID,
    }

    pub type APIResponse = TemplateResponse;
}

pub mod get_template {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub template_id: ID,
    }

    pub type APIResponse = TemplateResponse;
}

pub mod list_templates {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub tenant_id: ID,
        pub trigger: Option<Trigger>,
        pub channel: Option<Channel>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub templates: Vec<MessageTemplateDTO>,
    }

    impl APIResponse {
        pub fn new(templates: Vec<MessageTemplate>) -> Self {
            Self {
                templates: templates.iter().map(MessageTemplateDTO::new).collect(),
            }
        }
    }
}

pub mod preview_template {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub template_id: ID,
    }

    /// Sample context overrides. Every field is optional; omitted
    /// fields fall back to a fixed sample customer and booking.
    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub customer_name: Option<String>,
        pub service_name: Option<String>,
        pub staff_name: Option<String>,
        pub start_ts: Option<i64>,
        pub amount_cents: Option<i64>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub subject: Option<String>,
        pub body: String,
    }
}
