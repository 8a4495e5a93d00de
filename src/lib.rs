pub mod admin;
pub mod config;
pub mod db;
pub mod display;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod seed;
