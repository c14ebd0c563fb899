//! Actor-side combat and damage intake.
//!
//! Agents damage actors through [`apply_damage`]; actors answer with weapons
//! resolved once per tick by [`resolve_weapons`], whose hits reach agents
//! through the [`effect_for`] table.
//!
//! # Core Functions
//!
//! - `effect_for`: weapon kind × archetype lookup (most pairings do nothing)
//! - `acquire_target`: nearest agent inside range, aim arc and line of sight
//! - `resolve_weapons`: cooldown gating, facing snap and effect application
//! - `apply_damage`: damage intake with invulnerability and event reporting

mod damage;
mod effects;
mod resolve;

pub use damage::apply_damage;
pub use effects::{WeaponEffect, effect_for};
pub use resolve::{acquire_target, resolve_weapons};
