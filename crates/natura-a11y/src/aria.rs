//! ARIA Support
//!
//! The roles and states natura widgets read and write.

use crate::A11yError;

/// Roles that make an element a live region without `aria-live`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    Status,
    Alert,
    Log,
}

impl AriaRole {
    /// Parse a `role` value; roles without live semantics give `None`
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "status" => Self::Status,
            "alert" => Self::Alert,
            "log" => Self::Log,
            _ => return None,
        })
    }

    /// Attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Alert => "alert",
            Self::Log => "log",
        }
    }

    /// Politeness implied by the role
    pub fn implicit_live_mode(&self) -> LiveRegionMode {
        match self {
            Self::Status | Self::Log => LiveRegionMode::Polite,
            Self::Alert => LiveRegionMode::Assertive,
        }
    }

    /// Whether the role implies `aria-atomic="true"`
    pub fn implicit_atomic(&self) -> bool {
        matches!(self, Self::Status | Self::Alert)
    }
}

/// Live region mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiveRegionMode {
    #[default]
    Off,
    Polite,
    Assertive,
}

impl LiveRegionMode {
    /// Parse an `aria-live` value
    pub fn parse(s: &str) -> Result<Self, A11yError> {
        match s.trim() {
            "off" => Ok(Self::Off),
            "polite" => Ok(Self::Polite),
            "assertive" => Ok(Self::Assertive),
            other => Err(A11yError::InvalidLiveMode(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// Live region relevant values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveRelevant {
    Additions,
    Removals,
    Text,
    All,
}

impl LiveRelevant {
    /// Tokens of an `aria-relevant` value; unknown tokens are skipped
    pub fn parse_list(s: &str) -> Vec<Self> {
        s.split_whitespace()
            .filter_map(|token| match token {
                "additions" => Some(Self::Additions),
                "removals" => Some(Self::Removals),
                "text" => Some(Self::Text),
                "all" => Some(Self::All),
                _ => None,
            })
            .collect()
    }
}

/// `"true"` / `"false"` for boolean ARIA states
#[inline]
pub fn aria_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
