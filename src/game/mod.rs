//! The treasure hunt phases.
//!
//! A session starts in [`Intro`]. Typing the start keyword hides a treasure
//! and moves to [`Hunt`]; finding it moves back to the same `Intro`. Losing
//! does not leave the hunt: the player may keep guessing.

use crate::config::GameConfig;
use crate::core::State;
use crate::transport::{InboundMessage, Notifier, TransportError};
use rand::Rng;
use std::sync::Arc;

mod hunt;
mod intro;

pub use hunt::{Hunt, DEBUG_KEYWORD};
pub use intro::{Intro, START_KEYWORD};

/// The current phase of a chat's game.
#[derive(Clone, Debug, PartialEq)]
pub enum GameState {
    Intro(Intro),
    Hunt(Hunt),
}

impl GameState {
    /// The phase a fresh session begins in.
    ///
    /// `config` must have passed [`GameConfig::validated`]; an inverted or
    /// non-finite rectangle or noise band panics when a hunt starts.
    pub fn intro(chat: impl Into<String>, config: Arc<GameConfig>) -> Self {
        Self::Intro(Intro::new(chat, config))
    }
}

impl State for GameState {
    fn name(&self) -> &str {
        match self {
            Self::Intro(_) => "Intro",
            Self::Hunt(_) => "Hunt",
        }
    }

    fn enter<N: Notifier + ?Sized>(&self, notifier: &mut N) -> Result<(), TransportError> {
        match self {
            Self::Intro(intro) => intro.enter(notifier),
            Self::Hunt(hunt) => hunt.enter(notifier),
        }
    }

    fn process_message<N: Notifier + ?Sized, R: Rng + ?Sized>(
        &mut self,
        message: &InboundMessage,
        notifier: &mut N,
        rng: &mut R,
    ) -> Result<Option<Self>, TransportError> {
        match self {
            Self::Intro(intro) => intro.process_message(message, notifier, rng),
            Self::Hunt(hunt) => hunt.process_message(message, notifier, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::memory::RecordingNotifier;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn names_identify_phases() {
        let intro = GameState::intro("1", Arc::new(GameConfig::default()));
        assert_eq!(intro.name(), "Intro");

        let mut notifier = RecordingNotifier::new();
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = intro.clone();
        let hunt = state
            .process_message(&InboundMessage::text(1, "hunt"), &mut notifier, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(hunt.name(), "Hunt");
        assert_ne!(hunt, intro);
    }

    #[test]
    fn round_trip_returns_to_the_spawning_intro() {
        let config = Arc::new(GameConfig::default());
        let mut state = GameState::intro("1", config);
        let original = state.clone();
        let mut notifier = RecordingNotifier::new();
        let mut rng = StdRng::seed_from_u64(11);

        let mut hunt = state
            .process_message(&InboundMessage::text(1, "hunt"), &mut notifier, &mut rng)
            .unwrap()
            .unwrap();
        let GameState::Hunt(inner) = &hunt else {
            panic!("Expected Hunt");
        };
        let found = InboundMessage::location(2, inner.target());

        let back = hunt
            .process_message(&found, &mut notifier, &mut rng)
            .unwrap();
        assert_eq!(back, Some(original));
    }

    #[test]
    fn neither_phase_reacts_to_time() {
        let config = Arc::new(GameConfig::default());
        let mut notifier = RecordingNotifier::new();
        let mut rng = StdRng::seed_from_u64(11);

        let mut intro = GameState::intro("1", config);
        assert!(intro.process_time(&mut notifier).unwrap().is_none());

        let mut hunt = intro
            .process_message(&InboundMessage::text(1, "hunt"), &mut notifier, &mut rng)
            .unwrap()
            .unwrap();
        notifier.clear();
        assert!(hunt.process_time(&mut notifier).unwrap().is_none());
        assert!(notifier.sent().is_empty());
    }
}
