//! Movement domain: messages exchanged with game logic.

use bevy::prelude::*;

use crate::category::Category;

/// Commands from game logic to a movable body.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum MovementCommand {
    StartTurn(Entity),
    EndTurn(Entity),
    TakeDamage { entity: Entity, amount: i32 },
    RequestFlight(Entity),
    CancelFlight(Entity),
    ArmWarp { entity: Entity, target: Vec2 },
}

impl MovementCommand {
    pub fn entity(&self) -> Entity {
        match *self {
            MovementCommand::StartTurn(entity)
            | MovementCommand::EndTurn(entity)
            | MovementCommand::RequestFlight(entity)
            | MovementCommand::CancelFlight(entity) => entity,
            MovementCommand::TakeDamage { entity, .. } | MovementCommand::ArmWarp { entity, .. } => {
                entity
            }
        }
    }
}

/// Emitted whenever a body's category changes.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryChanged {
    pub entity: Entity,
    pub from: Category,
    pub to: Category,
}
