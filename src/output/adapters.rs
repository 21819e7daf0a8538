//! Adapter registrars
//!
//! Higher-level registrations built on the primitives in [`super::registry`]. Each
//! one is atomic: when more than one type is involved, every key is checked with
//! [`OutputRegistry::ensure_types_available`] before the first insert.
//!
//! The shape requirements on source and target types are trait bounds, so a
//! mismatched pairing is rejected by the compiler rather than at startup.

use super::format::{compact_whitespace, format_attribute_map};
use super::registry::{rows_handler, Headers, OutputRegistry, RegistryKey, Rows};
use crate::error::OutputError;
use crate::types::{ListResource, ResourceData, Response, SingleResource, SingleResponse};
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;

/// Standard two-column rows for an `(id, state)` pair.
pub fn id_state_rows(id: &str, state: &str) -> (Headers, Rows) {
    (
        vec!["ID".to_string(), "State".to_string()],
        vec![vec![id.to_string(), state.to_string()]],
    )
}

/// Standard two-column rows for an `(id, deleted)` pair.
pub fn id_deleted_rows(id: &str, deleted: bool) -> (Headers, Rows) {
    (
        vec!["ID".to_string(), "Deleted".to_string()],
        vec![vec![id.to_string(), deleted.to_string()]],
    )
}

/// Lift a single-resource document into its list form.
fn lift_to_list<S, L>(single: &S) -> L
where
    S: SingleResource,
    L: ListResource<Item = S::Data>,
    S::Data: Clone,
{
    L::from_items(vec![single.data().clone()], single.resource_links().cloned())
}

impl OutputRegistry {
    /// Render a relationship document that points at exactly one resource.
    pub fn register_single_linkage_rows<T>(&mut self)
    where
        T: SingleResource<Data = ResourceData> + Any,
    {
        self.register_rows(|value: &T| {
            let data = value.data();
            (
                vec!["Type".to_string(), "ID".to_string()],
                vec![vec![data.resource_type.clone(), data.id.clone()]],
            )
        });
    }

    /// Render a result that reduces to an id and a state string.
    pub fn register_id_state_rows<T, E, R>(&mut self, extract: E, rows: R)
    where
        T: Any,
        E: Fn(&T) -> (String, String) + Send + Sync + 'static,
        R: Fn(&str, &str) -> (Headers, Rows) + Send + Sync + 'static,
    {
        self.register_rows(move |value: &T| {
            let (id, state) = extract(value);
            rows(&id, &state)
        });
    }

    /// Render a result that reduces to an id and a flag, such as a deletion outcome.
    pub fn register_id_bool_rows<T, E, R>(&mut self, extract: E, rows: R)
    where
        T: Any,
        E: Fn(&T) -> (String, bool) + Send + Sync + 'static,
        R: Fn(&str, bool) -> (Headers, Rows) + Send + Sync + 'static,
    {
        self.register_rows(move |value: &T| {
            let (id, flag) = extract(value);
            rows(&id, flag)
        });
    }

    /// Render `Response<A>` as `ID` plus the flattened attribute map.
    pub fn register_response_data_rows<A>(&mut self)
    where
        A: Serialize + 'static,
    {
        self.register_rows_err(|response: &Response<A>| {
            let rows = response
                .data
                .iter()
                .map(|item| {
                    let attributes = serde_json::to_value(&item.attributes)?;
                    Ok::<_, OutputError>(vec![
                        item.id.clone(),
                        compact_whitespace(&format_attribute_map(&attributes)),
                    ])
                })
                .collect::<Result<Rows, OutputError>>()?;
            Ok((vec!["ID".to_string(), "Attributes".to_string()], rows))
        });
    }

    /// Register `SingleResponse<A>` using the row function written for `Response<A>`.
    pub fn register_single_resource_rows_adapter<A, F>(&mut self, rows: F)
    where
        A: Clone + 'static,
        F: Fn(&Response<A>) -> (Headers, Rows) + Send + Sync + 'static,
    {
        self.register_single_to_list_rows_adapter::<SingleResponse<A>, Response<A>, _>(rows);
    }

    /// Register both `Response<A>` and `SingleResponse<A>` with one row function.
    pub fn register_rows_with_single_resource_adapter<A, F>(&mut self, rows: F)
    where
        A: Clone + 'static,
        F: Fn(&Response<A>) -> (Headers, Rows) + Send + Sync + 'static,
    {
        self.register_rows_with_single_to_list_adapter::<SingleResponse<A>, Response<A>, _>(rows);
    }

    /// Register `S` by lifting its `data` into a one-element `L` and delegating.
    pub fn register_single_to_list_rows_adapter<S, L, F>(&mut self, rows: F)
    where
        S: SingleResource + Any,
        S::Data: Clone,
        L: ListResource<Item = S::Data> + 'static,
        F: Fn(&L) -> (Headers, Rows) + Send + Sync + 'static,
    {
        self.register_rows(move |single: &S| rows(&lift_to_list::<S, L>(single)));
    }

    /// Register both the list type `L` and the single type `S` with `L`'s row function.
    pub fn register_rows_with_single_to_list_adapter<S, L, F>(&mut self, rows: F)
    where
        S: SingleResource + Any,
        S::Data: Clone,
        L: ListResource<Item = S::Data> + Any,
        F: Fn(&L) -> (Headers, Rows) + Send + Sync + 'static,
    {
        let list_key = RegistryKey::of::<L>();
        let single_key = RegistryKey::of::<S>();
        self.ensure_types_available(&[list_key, single_key]);

        let rows = Arc::new(rows);
        let list_rows = Arc::clone(&rows);
        self.insert_rows(list_key, rows_handler(move |list: &L| Ok(list_rows(list))));
        self.insert_rows(
            single_key,
            rows_handler(move |single: &S| Ok(rows(&lift_to_list::<S, L>(single)))),
        );
    }
}
