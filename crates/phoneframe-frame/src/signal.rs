//! Signals reported by the page script
//!
//! Wire form is a short string: `load:<probe>`, `heartbeat:<probe>` or
//! `error`, where `<probe>` is `present`, `empty` or `opaque`.

use serde::{Deserialize, Serialize};

use crate::error::FrameError;

/// What the page script could see of the embedded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentProbe {
    /// Document readable and has content
    Present,
    /// Document readable but blank
    Empty,
    /// Cross-origin read denied
    Opaque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSignal {
    /// The frame fired its `load` event
    Load(ContentProbe),
    /// The frame fired its `error` event
    Error,
    /// Periodic check while the page is shown
    Heartbeat(ContentProbe),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadOutcome {
    Success,
    Failure,
}

impl FrameSignal {
    /// Reduce the signal to a load observation. `None` means unknown:
    /// nothing can be concluded and the previous state stands.
    pub fn observation(&self) -> Option<LoadOutcome> {
        match self {
            FrameSignal::Load(ContentProbe::Present | ContentProbe::Opaque) => {
                Some(LoadOutcome::Success)
            }
            FrameSignal::Load(ContentProbe::Empty) => Some(LoadOutcome::Failure),
            FrameSignal::Error => Some(LoadOutcome::Failure),
            FrameSignal::Heartbeat(ContentProbe::Present) => Some(LoadOutcome::Success),
            FrameSignal::Heartbeat(ContentProbe::Empty | ContentProbe::Opaque) => None,
        }
    }

    pub fn is_heartbeat(&self) -> bool {
        matches!(self, FrameSignal::Heartbeat(_))
    }
}

impl ContentProbe {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentProbe::Present => "present",
            ContentProbe::Empty => "empty",
            ContentProbe::Opaque => "opaque",
        }
    }
}

impl std::str::FromStr for ContentProbe {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "present" => Ok(ContentProbe::Present),
            "empty" => Ok(ContentProbe::Empty),
            "opaque" => Ok(ContentProbe::Opaque),
            _ => Err(FrameError::UnknownSignal(s.to_string())),
        }
    }
}

impl std::fmt::Display for FrameSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameSignal::Load(probe) => write!(f, "load:{}", probe.as_str()),
            FrameSignal::Error => write!(f, "error"),
            FrameSignal::Heartbeat(probe) => write!(f, "heartbeat:{}", probe.as_str()),
        }
    }
}

impl std::str::FromStr for FrameSignal {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (kind, probe) = match s.split_once(':') {
            Some((kind, probe)) => (kind, Some(probe)),
            None => (s, None),
        };

        match (kind.to_lowercase().as_str(), probe) {
            ("error", None) => Ok(FrameSignal::Error),
            ("load", Some(probe)) => Ok(FrameSignal::Load(probe.parse()?)),
            ("heartbeat", Some(probe)) => Ok(FrameSignal::Heartbeat(probe.parse()?)),
            _ => Err(FrameError::UnknownSignal(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signals() {
        assert_eq!("error".parse::<FrameSignal>(), Ok(FrameSignal::Error));
        assert_eq!(
            "load:opaque".parse::<FrameSignal>(),
            Ok(FrameSignal::Load(ContentProbe::Opaque))
        );
        assert_eq!(
            "Heartbeat:present".parse::<FrameSignal>(),
            Ok(FrameSignal::Heartbeat(ContentProbe::Present))
        );

        for bad in ["", "load", "load:maybe", "error:empty", "unload:present"] {
            assert!(bad.parse::<FrameSignal>().is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_observations() {
        use ContentProbe::*;

        assert_eq!(FrameSignal::Load(Present).observation(), Some(LoadOutcome::Success));
        assert_eq!(FrameSignal::Load(Opaque).observation(), Some(LoadOutcome::Success));
        assert_eq!(FrameSignal::Load(Empty).observation(), Some(LoadOutcome::Failure));
        assert_eq!(FrameSignal::Error.observation(), Some(LoadOutcome::Failure));
        assert_eq!(
            FrameSignal::Heartbeat(Present).observation(),
            Some(LoadOutcome::Success)
        );
        assert_eq!(FrameSignal::Heartbeat(Opaque).observation(), None);
        assert_eq!(FrameSignal::Heartbeat(Empty).observation(), None);
    }

    #[test]
    fn test_display_matches_wire_form() {
        let signal = FrameSignal::Heartbeat(ContentProbe::Empty);
        assert_eq!(signal.to_string(), "heartbeat:empty");
        assert_eq!(signal.to_string().parse::<FrameSignal>(), Ok(signal));
    }
}
