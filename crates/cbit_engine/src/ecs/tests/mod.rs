//! Cross-module ECS tests

mod camera_integration;
mod world_integration;
