// Module exports for models

pub mod activity;
pub mod event;
pub mod group;
pub mod interpreter;
pub mod position;
pub mod settings;
