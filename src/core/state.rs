//! The contract every game phase implements.
//!
//! A phase owns its own data and decides, for each inbound message or clock
//! tick, whether to stay put or hand over to a new phase. The driver only
//! ever looks at the returned value, never at which phase it is holding.

use crate::transport::{InboundMessage, Notifier, TransportError};
use rand::Rng;
use std::fmt::Debug;

/// Trait for game phases.
///
/// `process_message` and `process_time` return `Ok(Some(next))` to request a
/// transition and `Ok(None)` to stay. Replies go out through the notifier;
/// transport failures propagate to the caller untouched.
///
/// # Example
///
/// ```rust
/// use rand::Rng;
/// use treasure_hunt::core::State;
/// use treasure_hunt::transport::{InboundMessage, Notifier, TransportError};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Door {
///     Closed,
///     Open,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "Closed",
///             Self::Open => "Open",
///         }
///     }
///
///     fn enter<N: Notifier + ?Sized>(&self, notifier: &mut N) -> Result<(), TransportError> {
///         notifier.send_text(self.name())
///     }
///
///     fn process_message<N: Notifier + ?Sized, R: Rng + ?Sized>(
///         &mut self,
///         message: &InboundMessage,
///         _notifier: &mut N,
///         _rng: &mut R,
///     ) -> Result<Option<Self>, TransportError> {
///         Ok(match self {
///             Self::Closed if message.text_contains("open") => Some(Self::Open),
///             _ => None,
///         })
///     }
/// }
/// ```
pub trait State: Clone + PartialEq + Debug {
    /// Get the phase's name for logging.
    fn name(&self) -> &str;

    /// Announce the phase. Called once, right after it becomes current.
    fn enter<N: Notifier + ?Sized>(&self, notifier: &mut N) -> Result<(), TransportError>;

    /// React to one player message.
    fn process_message<N: Notifier + ?Sized, R: Rng + ?Sized>(
        &mut self,
        message: &InboundMessage,
        notifier: &mut N,
        rng: &mut R,
    ) -> Result<Option<Self>, TransportError>;

    /// React to a clock tick.
    ///
    /// Default implementation never transitions.
    fn process_time<N: Notifier + ?Sized>(
        &mut self,
        _notifier: &mut N,
    ) -> Result<Option<Self>, TransportError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Transcript(Vec<String>);

    impl Notifier for Transcript {
        fn send_text(&mut self, body: &str) -> Result<(), TransportError> {
            self.0.push(body.to_string());
            Ok(())
        }

        fn send_location(&mut self, location: Coordinate) -> Result<(), TransportError> {
            self.0.push(format!("{},{}", location.latitude, location.longitude));
            Ok(())
        }
    }

    #[derive(Clone, PartialEq, Debug)]
    enum Counter {
        Counting(u32),
        Done,
    }

    impl State for Counter {
        fn name(&self) -> &str {
            match self {
                Self::Counting(_) => "Counting",
                Self::Done => "Done",
            }
        }

        fn enter<N: Notifier + ?Sized>(&self, notifier: &mut N) -> Result<(), TransportError> {
            notifier.send_text(self.name())
        }

        fn process_message<N: Notifier + ?Sized, R: Rng + ?Sized>(
            &mut self,
            _message: &InboundMessage,
            _notifier: &mut N,
            _rng: &mut R,
        ) -> Result<Option<Self>, TransportError> {
            match self {
                Self::Counting(n) if *n > 1 => {
                    *n -= 1;
                    Ok(None)
                }
                Self::Counting(_) => Ok(Some(Self::Done)),
                Self::Done => Ok(None),
            }
        }
    }

    #[test]
    fn process_message_can_mutate_in_place() {
        let mut state = Counter::Counting(2);
        let mut notifier = Transcript::default();
        let mut rng = StdRng::seed_from_u64(0);
        let msg = InboundMessage::text(1, "tick");

        assert_eq!(state.process_message(&msg, &mut notifier, &mut rng).unwrap(), None);
        assert_eq!(state, Counter::Counting(1));
        assert_eq!(
            state.process_message(&msg, &mut notifier, &mut rng).unwrap(),
            Some(Counter::Done)
        );
    }

    #[test]
    fn default_process_time_never_transitions() {
        let mut state = Counter::Counting(1);
        let mut notifier = Transcript::default();
        assert_eq!(state.process_time(&mut notifier).unwrap(), None);
        assert!(notifier.0.is_empty());
    }

    #[test]
    fn enter_speaks_through_notifier() {
        let mut notifier = Transcript::default();
        Counter::Done.enter(&mut notifier).unwrap();
        assert_eq!(notifier.0, vec!["Done".to_string()]);
    }
}
