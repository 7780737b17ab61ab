//! Integration tests for the todo backend.
//!
//! `api` drives the full router against the in-memory store and always runs.
//! `postgres` needs a reachable database configured through the usual
//! POSTGRES_* variables. Run with: cargo test --test integration -- --ignored

mod api;
mod postgres;
