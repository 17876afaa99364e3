//! Kino Core
//!
//! Core types shared by the Kino generation client crates.
//!
//! This crate contains:
//! - Domain types: generation jobs, their kinds, statuses and typed inputs
//! - DTOs: request and response bodies exchanged with the job service

pub mod domain;
pub mod dto;
