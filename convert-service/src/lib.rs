pub mod config;
pub mod converter;
pub mod handlers;
pub mod middleware;
pub mod startup;
