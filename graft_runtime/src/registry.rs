// Copyright 2025 the Graft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior registry.
//!
//! Behaviors are registered by name into a [`RegistryBuilder`] once, at
//! startup, and frozen into a [`Registry`] that the runtime owns.

use core::fmt;

use hashbrown::HashMap;
use thiserror::Error;

use crate::behavior::Behavior;
use crate::behaviors;

/// Creates a fresh behavior value for one container.
pub type Factory = Box<dyn Fn() -> Box<dyn Behavior>>;

/// Registration failure. These indicate wiring bugs and should fail fast.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A behavior with this name is already registered.
    #[error("behavior `{0}` is already registered")]
    DuplicateName(String),
    /// Behavior names must be non-empty.
    #[error("behavior name is empty")]
    EmptyName,
}

/// Collects behavior registrations.
///
/// ```
/// use graft_runtime::{Registry, RegistryError, behaviors::FilterableList};
///
/// let registry = Registry::builder()
///     .register("people-list", || Box::new(FilterableList::default()))?
///     .build();
/// assert!(registry.contains("people-list"));
///
/// let dup = Registry::builder()
///     .register("x", || Box::new(FilterableList::default()))?
///     .register("x", || Box::new(FilterableList::default()));
/// assert_eq!(dup.unwrap_err(), RegistryError::DuplicateName("x".into()));
/// # Ok::<(), RegistryError>(())
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    factories: HashMap<String, Factory>,
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("names", &sorted_names(&self.factories))
            .finish_non_exhaustive()
    }
}

impl RegistryBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder preloaded with every built-in behavior.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut builder = Self::new();
        for (name, factory) in behaviors::builtin() {
            builder.factories.insert(name.into(), factory);
        }
        builder
    }

    /// Registers `factory` under `name`.
    pub fn register<F>(mut self, name: impl Into<String>, factory: F) -> Result<Self, RegistryError>
    where
        F: Fn() -> Box<dyn Behavior> + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.factories.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        self.factories.insert(name, Box::new(factory));
        Ok(self)
    }

    /// Freezes the registrations.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            factories: self.factories,
        }
    }
}

/// An immutable name-to-factory table.
#[derive(Default)]
pub struct Registry {
    factories: HashMap<String, Factory>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &sorted_names(&self.factories))
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Starts a new registration.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A registry holding exactly the built-in behaviors.
    #[must_use]
    pub fn builtin() -> Self {
        RegistryBuilder::with_builtin().build()
    }

    /// Returns `true` if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Number of registered behaviors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        sorted_names(&self.factories)
    }

    /// Instantiates the behavior registered as `name`.
    #[must_use]
    pub fn instantiate(&self, name: &str) -> Option<Box<dyn Behavior>> {
        self.factories.get(name).map(|factory| factory())
    }
}

fn sorted_names(factories: &HashMap<String, Factory>) -> Vec<&str> {
    let mut names: Vec<&str> = factories.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}
