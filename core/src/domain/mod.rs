//! Domain model: entities and their lifecycle rules.

pub mod entities;
