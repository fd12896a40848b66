// Service module exports

pub mod availability;
pub mod database;
pub mod persistence;
pub mod planner;
pub mod roster;
pub mod settings;
