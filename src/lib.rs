//! League Auction API - backend for a local cricket league
//!
//! This crate provides the REST API for the league, enabling:
//! - Player registration per season, with photo upload
//! - Team owner and staff accounts with cookie sessions
//! - The live auction: selling players to teams, corrections and unassignment
//! - Public and owner views of player lists and team rosters

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
