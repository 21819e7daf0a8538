//! Output registry
//!
//! Maps concrete response types to the handler that renders them. A type lives in
//! at most one of the two maps: `rows` handlers project a value into a single
//! table, `direct` handlers drive the render callback themselves and may emit
//! several tables. Every registrar checks availability in both maps before it
//! inserts anything, so a failed registration leaves the registry untouched.
//!
//! Registration happens once from static call sites, so conflicts are programming
//! errors and panic.

use crate::error::OutputError;
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub type Headers = Vec<String>;
pub type Rows = Vec<Vec<String>>;

/// Callback that writes one table.
pub type RenderFn<'a> = dyn FnMut(&[String], &[Vec<String>]) + 'a;

pub(crate) type RowsHandler =
    Arc<dyn Fn(&dyn Any) -> Result<(Headers, Rows), OutputError> + Send + Sync>;
pub(crate) type DirectHandler =
    Arc<dyn Fn(&dyn Any, &mut RenderFn<'_>) -> Result<(), OutputError> + Send + Sync>;

/// Identity of a concrete response type.
///
/// Equality and hashing use the `TypeId` alone; the name is for messages.
#[derive(Debug, Clone, Copy)]
pub struct RegistryKey {
    id: TypeId,
    name: &'static str,
}

impl RegistryKey {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn from_parts(id: TypeId, name: &'static str) -> Self {
        Self { id, name }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for RegistryKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RegistryKey {}

impl Hash for RegistryKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Downcast a handler argument to the type it was registered for.
pub(crate) fn downcast<T: Any>(value: &dyn Any) -> Result<&T, OutputError> {
    value
        .downcast_ref::<T>()
        .ok_or(OutputError::HandlerType {
            expected: std::any::type_name::<T>(),
        })
}

#[derive(Clone, Default)]
pub struct OutputRegistry {
    rows: HashMap<RegistryKey, RowsHandler>,
    direct: HashMap<RegistryKey, DirectHandler>,
}

impl OutputRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in row extractor.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        super::rows::register_builtin(&mut registry);
        registry
    }

    /// Register a rows handler that cannot fail.
    pub fn register_rows<T, F>(&mut self, rows: F)
    where
        T: Any,
        F: Fn(&T) -> (Headers, Rows) + Send + Sync + 'static,
    {
        self.register_rows_err::<T, _>(move |value: &T| Ok(rows(value)));
    }

    /// Register a rows handler that may fail.
    pub fn register_rows_err<T, F>(&mut self, rows: F)
    where
        T: Any,
        F: Fn(&T) -> Result<(Headers, Rows), OutputError> + Send + Sync + 'static,
    {
        let key = RegistryKey::of::<T>();
        self.ensure_type_available(key);
        self.insert_rows(key, rows_handler(rows));
    }

    /// Register a handler that renders through the callback itself.
    pub fn register_direct<T, F>(&mut self, render: F)
    where
        T: Any,
        F: Fn(&T, &mut RenderFn<'_>) -> Result<(), OutputError> + Send + Sync + 'static,
    {
        let key = RegistryKey::of::<T>();
        self.ensure_type_available(key);
        let handler: DirectHandler = Arc::new(move |value: &dyn Any, callback: &mut RenderFn<'_>| {
            render(downcast::<T>(value)?, callback)
        });
        self.direct.insert(key, handler);
    }

    /// Panic unless every key is distinct and absent from both maps.
    ///
    /// Multi-type registrations call this before inserting anything.
    pub fn ensure_types_available(&self, keys: &[RegistryKey]) {
        let mut seen = HashSet::with_capacity(keys.len());
        for key in keys {
            if !seen.insert(*key) {
                panic!("output registry: duplicate registration: {}", key);
            }
            self.ensure_type_available(*key);
        }
    }

    pub fn ensure_type_available(&self, key: RegistryKey) {
        if self.is_registered(&key) {
            panic!("output registry: duplicate registration: {}", key);
        }
    }

    pub fn is_registered(&self, key: &RegistryKey) -> bool {
        self.rows.contains_key(key) || self.direct.contains_key(key)
    }

    pub fn contains_rows(&self, key: &RegistryKey) -> bool {
        self.rows.contains_key(key)
    }

    pub fn contains_direct(&self, key: &RegistryKey) -> bool {
        self.direct.contains_key(key)
    }

    /// Number of registered types across both maps.
    pub fn len(&self) -> usize {
        self.rows.len() + self.direct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn rows_handler(&self, key: &RegistryKey) -> Option<&RowsHandler> {
        self.rows.get(key)
    }

    pub(crate) fn direct_handler(&self, key: &RegistryKey) -> Option<&DirectHandler> {
        self.direct.get(key)
    }

    /// Insert without availability checks; callers check first.
    pub(crate) fn insert_rows(&mut self, key: RegistryKey, handler: RowsHandler) {
        self.rows.insert(key, handler);
    }

    #[cfg(test)]
    pub(crate) fn insert_direct_unchecked(&mut self, key: RegistryKey, handler: DirectHandler) {
        self.direct.insert(key, handler);
    }
}

impl fmt::Debug for OutputRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows: Vec<_> = self.rows.keys().map(RegistryKey::name).collect();
        let mut direct: Vec<_> = self.direct.keys().map(RegistryKey::name).collect();
        rows.sort_unstable();
        direct.sort_unstable();
        f.debug_struct("OutputRegistry")
            .field("rows", &rows)
            .field("direct", &direct)
            .finish()
    }
}

pub(crate) fn rows_handler<T, F>(rows: F) -> RowsHandler
where
    T: Any,
    F: Fn(&T) -> Result<(Headers, Rows), OutputError> + Send + Sync + 'static,
{
    Arc::new(move |value: &dyn Any| rows(downcast::<T>(value)?))
}
