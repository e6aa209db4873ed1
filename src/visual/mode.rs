//! Primitive selection: exactly one of the four primitives is visible at a time.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Mode {
    Tesseract,
    HyperSphereCloud,
    TimeCube,
    TimeSphereCloud,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::Tesseract,
        Mode::HyperSphereCloud,
        Mode::TimeCube,
        Mode::TimeSphereCloud,
    ];

    /// Map a mode-switch symbol (`t`, `s`, `c`, `u`, any case) to a mode
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            't' => Some(Mode::Tesseract),
            's' => Some(Mode::HyperSphereCloud),
            'c' => Some(Mode::TimeCube),
            'u' => Some(Mode::TimeSphereCloud),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Mode::Tesseract => 't',
            Mode::HyperSphereCloud => 's',
            Mode::TimeCube => 'c',
            Mode::TimeSphereCloud => 'u',
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Tesseract => "Tesseract",
            Mode::HyperSphereCloud => "HyperSphereCloud",
            Mode::TimeCube => "TimeCube",
            Mode::TimeSphereCloud => "TimeSphereCloud",
        };
        f.write_str(name)
    }
}

/// Accepts the single-letter symbol or the full name (case-insensitive)
impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(key), None) = (chars.next(), chars.next()) {
            return Mode::from_key(key).ok_or_else(|| format!("unknown mode '{}'", s));
        }
        Mode::ALL
            .into_iter()
            .find(|mode| mode.to_string().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown mode '{}' (expected t, s, c or u)", s))
    }
}

/// Current primitive selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSwitch {
    active: Mode,
}

impl ModeSwitch {
    pub fn new(initial: Mode) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> Mode {
        self.active
    }

    pub fn is_visible(&self, mode: Mode) -> bool {
        self.active == mode
    }

    /// Show `mode`, hiding the previous primitive. Returns whether anything changed.
    pub fn select(&mut self, mode: Mode) -> bool {
        let changed = self.active != mode;
        self.active = mode;
        changed
    }

    /// Handle a mode-switch symbol. Unknown symbols leave the selection alone.
    pub fn handle_key(&mut self, key: char) -> bool {
        match Mode::from_key(key) {
            Some(mode) => self.select(mode),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible_count(switch: &ModeSwitch) -> usize {
        Mode::ALL.iter().filter(|m| switch.is_visible(**m)).count()
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Mode::from_key('t'), Some(Mode::Tesseract));
        assert_eq!(Mode::from_key('S'), Some(Mode::HyperSphereCloud));
        assert_eq!(Mode::from_key('c'), Some(Mode::TimeCube));
        assert_eq!(Mode::from_key('u'), Some(Mode::TimeSphereCloud));
        assert_eq!(Mode::from_key('x'), None);
        for mode in Mode::ALL {
            assert_eq!(Mode::from_key(mode.key()), Some(mode));
        }
    }

    #[test]
    fn test_exactly_one_visible_after_any_switch() {
        let mut switch = ModeSwitch::new(Mode::Tesseract);
        assert_eq!(visible_count(&switch), 1);

        for key in ['s', 'c', 'q', 'u', 'u', '7', 't', 'C'] {
            switch.handle_key(key);
            assert_eq!(visible_count(&switch), 1, "after key {:?}", key);
        }
        assert_eq!(switch.active(), Mode::TimeCube);
    }

    #[test]
    fn test_unknown_key_keeps_current() {
        let mut switch = ModeSwitch::new(Mode::HyperSphereCloud);
        assert!(!switch.handle_key('z'));
        assert_eq!(switch.active(), Mode::HyperSphereCloud);
    }

    #[test]
    fn test_reselect_reports_no_change() {
        let mut switch = ModeSwitch::new(Mode::TimeCube);
        assert!(!switch.select(Mode::TimeCube));
        assert!(switch.select(Mode::Tesseract));
    }

    #[test]
    fn test_parse_symbols_and_names() {
        assert_eq!("u".parse::<Mode>(), Ok(Mode::TimeSphereCloud));
        assert_eq!("timecube".parse::<Mode>(), Ok(Mode::TimeCube));
        assert_eq!("HyperSphereCloud".parse::<Mode>(), Ok(Mode::HyperSphereCloud));
        assert!("x".parse::<Mode>().is_err());
        assert!("cube".parse::<Mode>().is_err());
    }
}
