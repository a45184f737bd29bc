use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RobotColor {
    /// Used for ids the palette has never seen.
    pub const FALLBACK: RobotColor = RobotColor { r: 0x6B, g: 0x72, b: 0x80 };

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            r: rng.gen(),
            g: rng.gen(),
            b: rng.gen(),
        }
    }

    /// Wraps `text` in a 24-bit ANSI foreground color.
    pub fn paint(&self, text: &str) -> String {
        format!("\x1b[38;2;{};{};{}m{}\x1b[0m", self.r, self.g, self.b, text)
    }
}

impl fmt::Display for RobotColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// One color per agent id, fixed for the lifetime of a replay session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotPalette {
    colors: BTreeMap<String, RobotColor>,
}

impl RobotPalette {
    pub fn assign<I, S, R>(agent_ids: I, rng: &mut R) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        R: Rng,
    {
        let mut colors = BTreeMap::new();
        for id in agent_ids {
            colors
                .entry(id.into())
                .or_insert_with(|| RobotColor::random(rng));
        }
        Self { colors }
    }

    pub fn color_of(&self, agent_id: &str) -> RobotColor {
        self.colors
            .get(agent_id)
            .copied()
            .unwrap_or(RobotColor::FALLBACK)
    }

    pub fn contains(&self, agent_id: &str) -> bool {
        self.colors.contains_key(agent_id)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, RobotColor)> {
        self.colors.iter().map(|(id, color)| (id.as_str(), *color))
    }
}
