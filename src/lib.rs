// src/lib.rs

pub mod constants;
pub mod curriculum;
pub mod database;
pub mod exposure;
pub mod models;
pub mod progress;
pub mod repository;
