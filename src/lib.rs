//! Protocell - pressure-driven metabolic process simulation

pub mod chemistry;
pub mod core;
pub mod ecs;
pub mod entity;
pub mod simulation;
