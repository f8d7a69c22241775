//! Registry of category predicates and entry callbacks.
//!
//! Game logic overrides classification here at startup. The registry is
//! bundled into an immutable [`CategoryTable`] that bodies consult every
//! tick.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;
use thiserror::Error;

use super::{Category, Situation, default_predicate};
use crate::movement::Movable;

/// Classification predicate for one category.
pub type CategoryLogic = Arc<dyn Fn(&Situation) -> bool + Send + Sync>;

/// Side effect run when a body enters a category.
pub type CategoryCallback = Arc<dyn Fn(&mut Movable) + Send + Sync>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CategoryError {
    #[error("{0} classification is hard-wired and cannot be redefined")]
    Undefinable(Category),
    #[error("{0} classification has already been redefined")]
    RedefinitionCollision(Category),
}

#[derive(Resource, Clone, Default)]
pub struct CategoryRegistry {
    logic: HashMap<Category, CategoryLogic>,
    callbacks: Vec<(Category, CategoryCallback)>,
}

impl fmt::Debug for CategoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut overridden: Vec<Category> = self.logic.keys().copied().collect();
        overridden.sort();
        f.debug_struct("CategoryRegistry")
            .field("overridden", &overridden)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the classification predicate of `category`. Each category
    /// accepts a single override; LOCKED, STATIC and UNKNOWN accept none.
    pub fn redefine_logic<F>(&mut self, category: Category, logic: F) -> Result<(), CategoryError>
    where
        F: Fn(&Situation) -> bool + Send + Sync + 'static,
    {
        if category.is_hardwired() {
            return Err(CategoryError::Undefinable(category));
        }
        if self.logic.contains_key(&category) {
            return Err(CategoryError::RedefinitionCollision(category));
        }
        self.logic.insert(category, Arc::new(logic));
        info!("Redefined {} classification", category);
        Ok(())
    }

    /// Add a callback run on entry to `category`, after any earlier ones.
    pub fn redefine_callback<F>(&mut self, category: Category, callback: F)
    where
        F: Fn(&mut Movable) + Send + Sync + 'static,
    {
        self.callbacks.push((category, Arc::new(callback)));
    }

    pub fn is_redefined(&self, category: Category) -> bool {
        self.logic.contains_key(&category)
    }

    /// Effective predicates: defaults overlaid with overrides.
    pub fn bundle_logic(&self) -> [CategoryLogic; Category::COUNT] {
        Category::ALL.map(|category| match self.logic.get(&category) {
            Some(logic) => logic.clone(),
            None => Arc::new(default_predicate(category)) as CategoryLogic,
        })
    }

    /// Entry callbacks per category: built-in hooks first, then registered
    /// ones in registration order.
    pub fn bundle_callbacks(&self) -> [Vec<CategoryCallback>; Category::COUNT] {
        Category::ALL.map(|category| {
            let mut hooks = default_callbacks(category);
            hooks.extend(
                self.callbacks
                    .iter()
                    .filter(|(c, _)| *c == category)
                    .map(|(_, callback)| callback.clone()),
            );
            hooks
        })
    }

    pub fn bundle(&self) -> CategoryTable {
        CategoryTable {
            logic: self.bundle_logic(),
            callbacks: self.bundle_callbacks(),
        }
    }
}

fn default_callbacks(category: Category) -> Vec<CategoryCallback> {
    match category {
        Category::Flying => {
            let clear: CategoryCallback = Arc::new(|body: &mut Movable| body.clear_fly_request());
            vec![clear]
        }
        _ => Vec::new(),
    }
}

/// Frozen predicate and callback table handed to bodies each tick.
#[derive(Resource, Clone)]
pub struct CategoryTable {
    logic: [CategoryLogic; Category::COUNT],
    callbacks: [Vec<CategoryCallback>; Category::COUNT],
}

impl Default for CategoryTable {
    fn default() -> Self {
        CategoryRegistry::default().bundle()
    }
}

impl fmt::Debug for CategoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let callbacks: Vec<usize> = self.callbacks.iter().map(Vec::len).collect();
        f.debug_struct("CategoryTable")
            .field("callbacks", &callbacks)
            .finish_non_exhaustive()
    }
}

impl CategoryTable {
    pub fn is_satisfied(&self, category: Category, situation: &Situation) -> bool {
        (self.logic[category.index()])(situation)
    }

    pub fn callbacks(&self, category: Category) -> &[CategoryCallback] {
        &self.callbacks[category.index()]
    }

    /// Highest-precedence category whose predicate holds.
    pub fn classify(&self, situation: &Situation) -> Category {
        Category::ALL
            .into_iter()
            .find(|c| self.is_satisfied(*c, situation))
            .unwrap_or(Category::Unknown)
    }
}
