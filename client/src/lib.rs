//! # Omok Terminal Client
//!
//! A line-oriented client for the Omok session server. It joins once, keeps
//! the returned token for every later request, and redraws the board in the
//! terminal whenever the shared state changes.
//!
//! ## Module Organization
//!
//! ### Network Module (`network`)
//! - `Connection`: one TCP stream with typed request helpers
//! - `Client`: the interactive loop over stdin and a state poll
//!
//! ### Game Module (`game`)
//! Local view of the session: own token and seat, the last snapshot, and
//! the message from the most recent request.
//!
//! ### Input Module (`input`)
//! Parses typed commands such as `m 7 7` or `c hello`. Malformed input is
//! reported locally and never reaches the server.
//!
//! ### Rendering Module (`rendering`)
//! Text board with indices, the status line, restart votes and chat tail.
//!
//! ## Usage Example
//!
//! ```no_run
//! use client::network::Connection;
//!
//! # async fn demo() -> Result<(), shared::FrameError> {
//! let mut connection = Connection::connect("127.0.0.1:6000").await?;
//! let joined = connection.join("alice").await?;
//! println!("{:?}", joined);
//! # Ok(())
//! # }
//! ```
//!
//! The server stays authoritative: the client never predicts moves, it only
//! renders what the server reports.

pub mod game;
pub mod input;
pub mod network;
pub mod rendering;
