//! # Omok Server Library
//!
//! Authoritative server for a two-player Omok (five-in-a-row) match. It holds
//! the one shared match, decides which moves are legal, and reconciles the
//! post-game rematch decision between the two seated players.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Match State
//! The server owns the only copy of the board, the side to move and the
//! result. Clients submit moves and receive snapshots; they never mutate
//! state themselves.
//!
//! ### Session Management
//! Joining hands out an opaque token and a seat: black if free, then white,
//! otherwise spectator. Quitting frees the seat for the next joiner.
//!
//! ### Rematch Consensus
//! Once a match ends, it is replaced by a fresh one only after the current
//! holders of both seats have asked for it.
//!
//! ## Architecture Design
//!
//! ### One Lock, Whole Operations
//! Match, sessions, rematch votes and chat live in a single aggregate behind
//! a single mutex. Every request, reads included, runs completely inside
//! that lock, so compound checks such as "is this token seated and is it its
//! turn" can never interleave with another request's mutation.
//!
//! ### Task per Connection
//! The TCP listener spawns one task per connection. Tasks only do framing
//! and I/O; all decisions go through the arbiter.
//!
//! ## Module Organization
//!
//! - `game`: the match state machine (board, turn, result, reset)
//! - `session`: token issuance and the seat table
//! - `restart`: rematch votes keyed by current seat occupants
//! - `chat`: bounded chat transcript
//! - `arbiter`: request validation and the shared, locked aggregate
//! - `config`: command line and server settings
//! - `network`: TCP listener and per-connection request loop
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::config::ServerConfig;
//! use server::network::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = Server::bind(&ServerConfig::default()).await?;
//!     server.run().await;
//!     Ok(())
//! }
//! ```

pub mod arbiter;
pub mod chat;
pub mod config;
pub mod game;
pub mod network;
pub mod restart;
pub mod session;
