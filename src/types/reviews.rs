use super::{Resource, Response, SingleResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerReviewAttributes {
    pub rating: u8,
    pub title: String,
    pub body: String,
    pub reviewer_nickname: String,
    pub created_date: String,
    pub territory: String,
}

pub type CustomerReview = Resource<CustomerReviewAttributes>;
pub type CustomerReviewsResponse = Response<CustomerReviewAttributes>;
pub type CustomerReviewResponse = SingleResponse<CustomerReviewAttributes>;
