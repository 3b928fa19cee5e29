//! Treasure Hunt: a single-player geographic game played over a chat.
//!
//! A treasure is hidden at a random point inside a bounding rectangle. The
//! player shares their location and is told, with some deliberate noise,
//! how far away they are, until they come within the tolerance or run out
//! of attempts.
//!
//! # Core Concepts
//!
//! - **State**: Each game phase implements the `State` trait and decides
//!   its own transitions
//! - **Geo**: Pure distance, sampling and containment helpers
//! - **PollLoop**: Turns a stream of updates into ordered, exactly-once
//!   deliveries to the current phase
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use treasure_hunt::config::GameConfig;
//! use treasure_hunt::core::State;
//! use treasure_hunt::game::GameState;
//! use treasure_hunt::poll::{PollCursor, PollLoop};
//! use treasure_hunt::transport::memory::{RecordingNotifier, ScriptedSource};
//! use treasure_hunt::transport::{InboundMessage, Update};
//!
//! let mut source = ScriptedSource::new();
//! source.push_batch(vec![Update {
//!     sequence: 1,
//!     message: Some(InboundMessage::text(101, "hunt")),
//! }]);
//!
//! let mut poll = PollLoop::new(
//!     GameState::intro("42", Arc::new(GameConfig::default())),
//!     source,
//!     RecordingNotifier::new(),
//!     StdRng::seed_from_u64(1),
//!     PollCursor::new(100),
//!     Duration::from_secs(5),
//! );
//!
//! poll.start().unwrap();
//! poll.poll_once().unwrap();
//! assert_eq!(poll.current().name(), "Hunt");
//! ```

pub mod config;
pub mod core;
pub mod game;
pub mod geo;
pub mod poll;
pub mod transport;

// Re-export commonly used types
pub use config::GameConfig;
pub use self::core::{State, TransitionLog};
pub use game::GameState;
pub use geo::{BoundingRectangle, Coordinate};
pub use poll::{PollCursor, PollLoop};
pub use transport::{InboundMessage, Notifier, TransportError, Update, UpdateSource};
