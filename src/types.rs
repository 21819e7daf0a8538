//! App Store Connect resource model
//!
//! Every JSON:API document returned by App Store Connect has the same outer shape:
//! a `data` member (a single resource or an array of them) and a `links` member. The
//! generic [`Response`] and [`SingleResponse`] envelopes cover most endpoints; the
//! handful of documents that do not fit them (relationship linkages, pre-release
//! versions) get their own structs in the submodules.

use serde::{Deserialize, Serialize};

pub mod apps;
pub mod common;
pub mod results;
pub mod reviews;
pub mod signing;
pub mod testflight;
pub mod users;
pub mod webhooks;

pub use apps::*;
pub use common::*;
pub use results::*;
pub use reviews::*;
pub use signing::*;
pub use testflight::*;
pub use users::*;
pub use webhooks::*;

/// Pagination and navigation links attached to a document.
///
/// Only `next` drives pagination. An absent or empty `next` means the walk is done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

impl Links {
    pub fn with_next(next: impl Into<String>) -> Self {
        Self {
            next: Some(next.into()),
            ..Self::default()
        }
    }

    /// The `next` cursor, if present and non-empty.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| !next.is_empty())
    }
}

/// A JSON:API resource object with typed attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Default"))]
pub struct Resource<A> {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    #[serde(default)]
    pub attributes: A,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<serde_json::Value>,
}

impl<A> Resource<A> {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>, attributes: A) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            attributes,
            relationships: None,
        }
    }
}

/// List document: `data` is an array of resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Default"))]
pub struct Response<A> {
    #[serde(default)]
    pub data: Vec<Resource<A>>,
    #[serde(default)]
    pub links: Links,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<A> Default for Response<A> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            links: Links::default(),
            meta: None,
        }
    }
}

impl<A> Response<A> {
    pub fn new(data: Vec<Resource<A>>, links: Links) -> Self {
        Self {
            data,
            links,
            meta: None,
        }
    }
}

/// Single-resource document: `data` is one resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Default"))]
pub struct SingleResponse<A> {
    pub data: Resource<A>,
    #[serde(default)]
    pub links: Links,
}

/// A document whose `data` is a single value that can be lifted into a list.
pub trait SingleResource {
    type Data;

    fn data(&self) -> &Self::Data;

    fn resource_links(&self) -> Option<&Links> {
        None
    }
}

/// A list document that can be built from items plus links.
pub trait ListResource: Sized {
    type Item;

    fn from_items(items: Vec<Self::Item>, links: Option<Links>) -> Self;
}

impl<A> SingleResource for SingleResponse<A> {
    type Data = Resource<A>;

    fn data(&self) -> &Resource<A> {
        &self.data
    }

    fn resource_links(&self) -> Option<&Links> {
        Some(&self.links)
    }
}

impl<A> ListResource for Response<A> {
    type Item = Resource<A>;

    fn from_items(items: Vec<Resource<A>>, links: Option<Links>) -> Self {
        Self::new(items, links.unwrap_or_default())
    }
}
