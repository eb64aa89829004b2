pub mod category;
pub mod config;
mod connection;
pub mod error;
pub mod game;
pub mod game_factory;
pub mod metrics;
mod routes;
pub mod startup;
mod websocket;
pub mod word_source;
