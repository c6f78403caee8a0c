use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::types::Level;

/// An sRGB colour with alpha, written as `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Error type for colour parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColourError {
    #[error("Invalid colour {0:?}: expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidLength(String),

    #[error("Invalid colour {0:?}: not a hexadecimal value")]
    InvalidHex(String),

    #[error("Unknown colour strategy: {0}")]
    UnknownStrategy(String),

    #[error("Interpolation strategy needs both an inactive and an active colour")]
    InterpolationColoursMissing,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    /// Moves each channel `factor` of the way towards `other`.
    /// `factor` is clamped to `0.0..=1.0`; channels are truncated.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn interpolate(self, other: Self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let channel = |from: u8, to: u8| (f32::from(from) + factor * (f32::from(to) - f32::from(from))) as u8;
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: channel(self.a, other.a),
        }
    }
}

impl FromStr for Rgba {
    type Err = ColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.is_ascii() {
            return Err(ColourError::InvalidHex(s.to_owned()));
        }

        let byte = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| ColourError::InvalidHex(s.to_owned()));
        // "f" stands for "ff" in the short form
        let nibble = |digit: &str| byte(digit).map(|value| value * 0x11);

        match hex.len() {
            3 => Ok(Self::rgb(nibble(&hex[0..1])?, nibble(&hex[1..2])?, nibble(&hex[2..3])?)),
            6 => Ok(Self::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
            8 => Ok(Self::new(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                byte(&hex[6..8])?,
            )),
            _ => Err(ColourError::InvalidLength(s.to_owned())),
        }
    }
}

impl Serialize for Rgba {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// GitLab's activity palette, indexed by level
pub const GITLAB_PALETTE: [Rgba; 5] = [
    Rgba::rgb(0xec, 0xec, 0xef), // white smoke
    Rgba::rgb(0xd2, 0xdc, 0xff), // lavender
    Rgba::rgb(0x79, 0x92, 0xf5), // cornflower blue
    Rgba::rgb(0x4e, 0x65, 0xcd), // royal blue
    Rgba::rgb(0x30, 0x34, 0x70), // dark slate blue
];

/// How a day cell's fill colour is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ColourStrategy {
    /// Fixed colour per contribution level
    #[default]
    Gitlab,
    /// Blend from `inactive` to `active` by `count / (count + average)`,
    /// where `average` is the mean count per day of the whole calendar
    Interpolation { inactive: Rgba, active: Rgba },
}

impl ColourStrategy {
    /// Builds a strategy from loose string settings, e.g. query parameters.
    ///
    /// # Errors
    /// Returns `ColourError::UnknownStrategy` for an unrecognised name,
    /// `ColourError::InterpolationColoursMissing` if interpolation lacks a
    /// colour, or a parse error for a malformed colour.
    pub fn from_settings(
        name: Option<&str>,
        inactive: Option<&str>,
        active: Option<&str>,
    ) -> Result<Self, ColourError> {
        match name.map(str::trim) {
            None | Some("gitlab") => Ok(Self::Gitlab),
            Some("interpolation") => match (inactive, active) {
                (Some(inactive), Some(active)) => Ok(Self::Interpolation {
                    inactive: inactive.parse()?,
                    active:   active.parse()?,
                }),
                _ => Err(ColourError::InterpolationColoursMissing),
            },
            Some(other) => Err(ColourError::UnknownStrategy(other.to_owned())),
        }
    }

    /// Fill colour for a day with `count` contributions at `level`
    #[allow(clippy::cast_precision_loss)]
    pub fn colour_for(&self, level: Level, count: u32, average_count: f32) -> Rgba {
        match *self {
            Self::Gitlab => GITLAB_PALETTE[usize::from(level.get())],
            Self::Interpolation { inactive, active } => {
                let count = count as f32;
                let divisor = count + average_count;
                let factor = if divisor > 0.0 { count / divisor } else { 0.0 };
                inactive.interpolate(active, factor)
            },
        }
    }
}
