//! Landing page animations
//!
//! The guided-tour banner types its messages one character at a time and
//! rotates to the next message on a slower timer. The generation showcase
//! cycles through a fixed set of showcase agents. Both are driven by
//! [`ScopedTicker`]s and stop when dropped.

use crate::config::LandingConfig;
use crate::ticker::ScopedTicker;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Guided-tour messages, in display order
pub const TOUR_MESSAGES: [&str; 4] = [
    "Our process starts with Expert Generation, creating agents fine-tuned for your industry.",
    "Workflow Intelligence enables agents to execute complex, multi-step tasks at incredible speed.",
    "Our Governance Hub provides real-time visibility and immutable audit logs for complete control.",
    "Ready to build your agentic workforce? Access the platform to begin.",
];

/// Types a rotating list of messages
#[derive(Debug, Clone)]
pub struct Typewriter {
    messages: Vec<String>,
    index: usize,
    typed: usize,
}

impl Typewriter {
    #[must_use]
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
            index: 0,
            typed: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn message_index(&self) -> usize {
        self.index
    }

    /// Full text of the current message
    #[must_use]
    pub fn current(&self) -> &str {
        self.messages.get(self.index).map_or("", String::as_str)
    }

    /// Portion typed so far
    #[must_use]
    pub fn displayed(&self) -> &str {
        let current = self.current();
        let end = current
            .char_indices()
            .nth(self.typed)
            .map_or(current.len(), |(i, _)| i);
        &current[..end]
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.typed >= self.current().chars().count()
    }

    /// Type one more character. Returns `false` once the message is done.
    pub fn type_next(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.typed += 1;
        true
    }

    /// Move to the next message and restart typing.
    pub fn advance_message(&mut self) {
        if !self.messages.is_empty() {
            self.index = (self.index + 1) % self.messages.len();
        }
        self.typed = 0;
    }
}

/// Tour banner: message rotation plus typing, both on tickers
#[derive(Debug)]
pub struct TourBanner {
    state: Arc<Mutex<Typewriter>>,
    _rotation: ScopedTicker,
    _typing: ScopedTicker,
}

impl TourBanner {
    /// Start both timers with the standard tour messages.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(config: &LandingConfig) -> Self {
        Self::with_messages(config, TOUR_MESSAGES)
    }

    #[must_use]
    pub fn with_messages<I, S>(config: &LandingConfig, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let state = Arc::new(Mutex::new(Typewriter::new(messages)));

        let rotation_state = Arc::clone(&state);
        let rotation = ScopedTicker::spawn(config.tour_message_interval(), move || {
            rotation_state.lock().advance_message();
        });

        let typing_state = Arc::clone(&state);
        let typing = ScopedTicker::spawn(config.tour_typing_interval(), move || {
            typing_state.lock().type_next();
        });

        Self {
            state,
            _rotation: rotation,
            _typing: typing,
        }
    }

    /// Currently displayed text
    #[must_use]
    pub fn text(&self) -> String {
        self.state.lock().displayed().to_string()
    }

    #[must_use]
    pub fn message_index(&self) -> usize {
        self.state.lock().message_index()
    }
}

/// A showcase agent on the landing animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowcaseAgent {
    pub name: &'static str,
    pub role: &'static str,
    /// Hex accent colour
    pub color: &'static str,
}

pub const SHOWCASE_AGENTS: [ShowcaseAgent; 4] = [
    ShowcaseAgent {
        name: "Cognito",
        role: "Cognitive Process Automation",
        color: "#00f5d4",
    },
    ShowcaseAgent {
        name: "Synapse",
        role: "Customer Intent Analysis",
        color: "#ff2e63",
    },
    ShowcaseAgent {
        name: "Lex",
        role: "Natural Language Understanding",
        color: "#a143ff",
    },
    ShowcaseAgent {
        name: "Cygnus",
        role: "Supply Chain Logistics AI",
        color: "#fce38a",
    },
];

/// Orbit ring geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orbit {
    /// Diameter, px
    pub size: u32,
    /// Seconds per revolution
    pub duration_secs: u32,
}

pub const ORBITS: [Orbit; 4] = [
    Orbit { size: 140, duration_secs: 20 },
    Orbit { size: 190, duration_secs: 25 },
    Orbit { size: 240, duration_secs: 30 },
    Orbit { size: 290, duration_secs: 35 },
];

/// Orbit for the showcase agent at `index`; odd indices spin in reverse.
#[must_use]
pub fn orbit_for(index: usize) -> (Orbit, bool) {
    (ORBITS[index % ORBITS.len()], index % 2 == 1)
}

#[derive(Debug, Default)]
struct ShowcaseState {
    active: AtomicU64,
    transitions: AtomicU64,
}

/// Rotating showcase of generated agents
#[derive(Debug)]
pub struct GenerationShowcase {
    state: Arc<ShowcaseState>,
    _ticker: ScopedTicker,
}

impl GenerationShowcase {
    /// Start rotating at the configured interval.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(config: &LandingConfig) -> Self {
        let state = Arc::new(ShowcaseState::default());
        let ticker_state = Arc::clone(&state);
        let count = SHOWCASE_AGENTS.len() as u64;
        let ticker = ScopedTicker::spawn(config.showcase_interval(), move || {
            let next = (ticker_state.active.load(Ordering::Relaxed) + 1) % count;
            ticker_state.active.store(next, Ordering::Relaxed);
            ticker_state.transitions.fetch_add(1, Ordering::Relaxed);
        });
        Self {
            state,
            _ticker: ticker,
        }
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        usize::try_from(self.state.active.load(Ordering::Relaxed)).unwrap_or(0)
    }

    #[must_use]
    pub fn active(&self) -> ShowcaseAgent {
        SHOWCASE_AGENTS[self.active_index() % SHOWCASE_AGENTS.len()]
    }

    /// Rotations so far
    #[must_use]
    pub fn transitions(&self) -> u64 {
        self.state.transitions.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typewriter_types_and_rotates() {
        let mut tw = Typewriter::new(["ab", "héllo"]);
        assert_eq!(tw.displayed(), "");
        assert!(tw.type_next());
        assert_eq!(tw.displayed(), "a");
        assert!(tw.type_next());
        assert!(!tw.type_next());
        assert!(tw.is_complete());

        tw.advance_message();
        tw.type_next();
        tw.type_next();
        assert_eq!(tw.displayed(), "hé");

        tw.advance_message();
        assert_eq!(tw.message_index(), 0);
        assert_eq!(tw.displayed(), "");
    }

    #[test]
    fn empty_typewriter_is_inert() {
        let mut tw = Typewriter::new(Vec::<String>::new());
        assert!(!tw.type_next());
        tw.advance_message();
        assert_eq!(tw.displayed(), "");
    }

    #[test]
    fn orbit_assignment() {
        assert_eq!(orbit_for(0), (ORBITS[0], false));
        assert_eq!(orbit_for(3), (ORBITS[3], true));
        assert_eq!(orbit_for(5).0.size, 190);
    }
}
