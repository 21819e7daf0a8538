use super::{Resource, Response, SingleResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookAttributes {
    pub name: String,
    pub url: String,
    pub enabled: bool,
    pub event_types: Vec<String>,
}

pub type Webhook = Resource<WebhookAttributes>;
pub type WebhooksResponse = Response<WebhookAttributes>;
pub type WebhookResponse = SingleResponse<WebhookAttributes>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookDeliveryAttributes {
    pub delivery_state: String,
    pub created_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

pub type WebhookDelivery = Resource<WebhookDeliveryAttributes>;
pub type WebhookDeliveriesResponse = Response<WebhookDeliveryAttributes>;
