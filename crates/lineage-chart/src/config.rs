//! Chart options

use lineage_graph::MAX_GENERATIONS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which relatives a chart shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Parents, grandparents and so on
    #[default]
    Ancestor,
    /// Spouses, children, grandchildren and so on
    Descendant,
    /// Ancestors and descendants around one person
    Hourglass,
    /// Grandparents, parents, siblings, spouses and children
    Family,
}

impl ChartType {
    /// Every chart type
    pub const ALL: [ChartType; 4] = [
        ChartType::Ancestor,
        ChartType::Descendant,
        ChartType::Hourglass,
        ChartType::Family,
    ];

    /// Storage tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Ancestor => "ancestor",
            ChartType::Descendant => "descendant",
            ChartType::Hourglass => "hourglass",
            ChartType::Family => "family",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Ancestor => "Ancestor Chart",
            ChartType::Descendant => "Descendant Chart",
            ChartType::Hourglass => "Hourglass Chart",
            ChartType::Family => "Family Group Chart",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown chart type: {}", s))
    }
}

/// Which way generations run across the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Generation numbers increase downwards
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    /// Generation numbers increase rightwards
    #[serde(rename = "LR")]
    LeftToRight,
    /// Generation numbers increase upwards
    #[serde(rename = "BT")]
    BottomToTop,
    /// Generation numbers increase leftwards
    #[serde(rename = "RL")]
    RightToLeft,
}

impl Direction {
    /// Every direction
    pub const ALL: [Direction; 4] = [
        Direction::TopToBottom,
        Direction::LeftToRight,
        Direction::BottomToTop,
        Direction::RightToLeft,
    ];

    /// Short tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TopToBottom => "TB",
            Direction::LeftToRight => "LR",
            Direction::BottomToTop => "BT",
            Direction::RightToLeft => "RL",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Direction::TopToBottom => "Top to Bottom",
            Direction::LeftToRight => "Left to Right",
            Direction::BottomToTop => "Bottom to Top",
            Direction::RightToLeft => "Right to Left",
        }
    }

    /// Whether generations stack along the Y axis
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::TopToBottom | Direction::BottomToTop)
    }

    /// Whether generations run against the reading direction of the axis
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::BottomToTop | Direction::RightToLeft)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown direction: {}", s))
    }
}

/// Options for building a chart
///
/// # Examples
///
/// ```
/// use lineage_chart::{ChartConfig, ChartType, Direction};
///
/// let config = ChartConfig::default();
/// assert_eq!(config.chart_type, ChartType::Ancestor);
/// assert_eq!(config.direction, Direction::TopToBottom);
/// assert_eq!(config.generations, 4);
///
/// let config = ChartConfig::descendant(2);
/// assert_eq!(config.chart_type, ChartType::Descendant);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart type
    #[serde(rename = "type", default)]
    pub chart_type: ChartType,

    /// Layout direction
    #[serde(default)]
    pub direction: Direction,

    /// Depth bound in generations from the focal person
    /// Default: 4
    #[serde(default = "default_generations")]
    pub generations: u32,

    /// Include photo urls
    #[serde(default = "default_true")]
    pub show_photos: bool,

    /// Include formatted birth/death dates and the living flag
    #[serde(default = "default_true")]
    pub show_dates: bool,

    /// Include birth/death place names
    #[serde(default)]
    pub show_places: bool,
}

fn default_generations() -> u32 {
    4
}

fn default_true() -> bool {
    true
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Ancestor,
            direction: Direction::TopToBottom,
            generations: default_generations(),
            show_photos: true,
            show_dates: true,
            show_places: false,
        }
    }
}

impl ChartConfig {
    /// Ancestor chart with a depth bound
    pub fn ancestor(generations: u32) -> Self {
        Self {
            generations,
            ..Self::default()
        }
    }

    /// Descendant chart with a depth bound
    pub fn descendant(generations: u32) -> Self {
        Self {
            chart_type: ChartType::Descendant,
            generations,
            ..Self::default()
        }
    }

    /// Hourglass chart with a depth bound
    pub fn hourglass(generations: u32) -> Self {
        Self {
            chart_type: ChartType::Hourglass,
            generations,
            ..Self::default()
        }
    }

    /// Family group chart
    pub fn family() -> Self {
        Self {
            chart_type: ChartType::Family,
            ..Self::default()
        }
    }

    /// Depth bound actually used, capped at [`MAX_GENERATIONS`]
    pub fn effective_generations(&self) -> u32 {
        self.generations.min(MAX_GENERATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!("Hourglass".parse::<ChartType>(), Ok(ChartType::Hourglass));
        assert_eq!("rl".parse::<Direction>(), Ok(Direction::RightToLeft));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_axes() {
        assert!(Direction::TopToBottom.is_vertical() && !Direction::TopToBottom.is_reversed());
        assert!(Direction::BottomToTop.is_vertical() && Direction::BottomToTop.is_reversed());
        assert!(!Direction::LeftToRight.is_vertical() && !Direction::LeftToRight.is_reversed());
        assert!(!Direction::RightToLeft.is_vertical() && Direction::RightToLeft.is_reversed());
    }

    #[test]
    fn test_config_wire_shape() {
        let config: ChartConfig =
            serde_json::from_str(r#"{"type":"family","direction":"LR"}"#).unwrap();
        assert_eq!(config.chart_type, ChartType::Family);
        assert_eq!(config.direction, Direction::LeftToRight);
        assert_eq!(config.generations, 4);
        assert!(config.show_photos);
        assert!(!config.show_places);
    }

    #[test]
    fn test_generations_capped() {
        assert_eq!(ChartConfig::ancestor(1_000).effective_generations(), MAX_GENERATIONS);
        assert_eq!(ChartConfig::ancestor(2).effective_generations(), 2);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ChartType::Family.label(), "Family Group Chart");
        assert_eq!(Direction::BottomToTop.label(), "Bottom to Top");
    }
}
