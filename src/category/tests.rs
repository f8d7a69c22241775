//! Category domain: unit tests for the registry and default predicates.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bevy::prelude::*;

use super::{Category, CategoryError, CategoryRegistry, CategoryTable, Situation};
use crate::movement::{Movable, MovementTuning};

fn body() -> Movable {
    Movable::new(0.5, &MovementTuning::default()).unwrap()
}

#[test]
fn test_precedence_follows_declaration_order() {
    assert!(Category::Locked < Category::Contemplating);
    assert!(Category::Warping < Category::Flying);
    assert!(Category::Flying < Category::Rising);
    assert!(Category::Falling < Category::Sliding);
    assert!(Category::Sliding < Category::Static);
    assert!(Category::Static < Category::Unknown);
    for (i, category) in Category::ALL.iter().enumerate() {
        assert_eq!(category.index(), i);
    }
}

#[test]
fn test_hardwired_categories_reject_redefinition() {
    let mut registry = CategoryRegistry::new();
    for category in [Category::Locked, Category::Static, Category::Unknown] {
        assert_eq!(
            registry.redefine_logic(category, |_| true),
            Err(CategoryError::Undefinable(category))
        );
    }
}

#[test]
fn test_second_redefinition_collides() {
    let mut registry = CategoryRegistry::new();
    assert_eq!(registry.redefine_logic(Category::Contemplating, |_| true), Ok(()));
    assert!(registry.is_redefined(Category::Contemplating));
    assert_eq!(
        registry.redefine_logic(Category::Contemplating, |_| false),
        Err(CategoryError::RedefinitionCollision(Category::Contemplating))
    );
}

#[test]
fn test_bundle_overlays_overrides_on_defaults() {
    let mut registry = CategoryRegistry::new();
    registry
        .redefine_logic(Category::Contemplating, |s: &Situation| s.damage == 7)
        .unwrap();
    let table = registry.bundle();

    let calm = Situation::default();
    let focused = Situation {
        damage: 7,
        ..Situation::default()
    };
    assert!(!table.is_satisfied(Category::Contemplating, &calm));
    assert!(table.is_satisfied(Category::Contemplating, &focused));

    // Untouched categories keep their defaults.
    let grounded = Situation {
        grounded: true,
        ..Situation::default()
    };
    assert!(table.is_satisfied(Category::Static, &grounded));
    assert!(!CategoryTable::default().is_satisfied(Category::Contemplating, &focused));
}

#[test]
fn test_classify_picks_highest_precedence() {
    let table = CategoryTable::default();
    let s = Situation {
        damage: 1,
        velocity: Vec2::new(0.0, -2.0),
        move_input: 1,
        ..Situation::default()
    };
    assert_eq!(table.classify(&s), Category::Stunned);

    let idle = Situation {
        velocity: Vec2::new(0.0, 0.0),
        grounded: false,
        ..Situation::default()
    };
    assert_eq!(table.classify(&idle), Category::Unknown);
}

#[test]
fn test_default_predicates() {
    let table = CategoryTable::default();
    let mut s = Situation {
        velocity: Vec2::new(0.5, 0.0),
        grounded: true,
        ..Situation::default()
    };
    assert!(table.is_satisfied(Category::Sliding, &s));
    assert!(!table.is_satisfied(Category::Static, &s));

    s.has_jumped = true;
    s.action_released = true;
    assert!(!table.is_satisfied(Category::Jumping, &s));

    s.fly_requested = true;
    assert!(table.is_satisfied(Category::Flying, &s));
    s.damage = 1;
    assert!(!table.is_satisfied(Category::Flying, &s));

    let mut flying = Situation {
        action: Category::Flying,
        ..Situation::default()
    };
    assert!(table.is_satisfied(Category::Flying, &flying));
    flying.flight_cancelled = true;
    assert!(!table.is_satisfied(Category::Flying, &flying));

    assert!(!table.is_satisfied(Category::Contemplating, &s));
    assert!(!table.is_satisfied(Category::Unknown, &s));
}

#[test]
fn test_callbacks_run_in_registration_order_after_defaults() {
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut registry = CategoryRegistry::new();
    for tag in ["first", "second"] {
        let order = order.clone();
        registry.redefine_callback(Category::Flying, move |body: &mut Movable| {
            // The built-in hook has already cleared the request.
            assert!(!body.fly_requested());
            order.lock().unwrap().push(tag);
        });
    }
    let table = registry.bundle();
    assert_eq!(table.callbacks(Category::Flying).len(), 3);
    assert!(table.callbacks(Category::Walking).is_empty());

    let mut body = body();
    body.request_flight();
    for callback in table.callbacks(Category::Flying) {
        callback(&mut body);
    }
    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn test_cloned_registry_keeps_callbacks() {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut registry = CategoryRegistry::new();
    let counter = hits.clone();
    registry.redefine_callback(Category::Static, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let table = registry.clone().bundle();
    let mut body = body();
    for callback in table.callbacks(Category::Static) {
        callback(&mut body);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
