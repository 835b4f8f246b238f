//! Persistence, services and command line plumbing around the pricing engine.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;
