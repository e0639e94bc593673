//! HTTP account service for the Tic Tac Toe game: registration, login and
//! liveness endpoints over a SeaORM-backed `users` table.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod password;
pub mod repository;
pub mod router;
pub mod schemas;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;
