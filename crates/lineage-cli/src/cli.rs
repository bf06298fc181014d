//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use lineage_chart::{ChartType, Direction};
use lineage_domain::{CalendarSystem, PersonId};
use std::path::PathBuf;

/// Lineage - family tree relationships, charts and calendars.
#[derive(Debug, Parser)]
#[command(name = "lineage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON dataset to read
    #[arg(short, long, global = true, env = "LINEAGE_DATA")]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (ids or bare values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Name how one person is related to another
    Describe(DescribeArgs),

    /// Build a chart around a person
    Chart(ChartArgs),

    /// Show a person with their immediate family
    Person(PersonArgs),

    /// List ancestors by generation
    Ancestors(GenerationsArgs),

    /// List descendants by generation
    Descendants(GenerationsArgs),

    /// Convert, parse and format dates
    Calendar(CalendarArgs),

    /// Normalize a place name
    Place(PlaceArgs),

    /// Show a person's life events in date order
    Timeline(PersonArgs),

    /// Find people who may be duplicates of a person
    Matches(PersonArgs),

    /// Search people by name
    Search(SearchArgs),
}

/// Arguments for the describe command.
#[derive(Debug, Args)]
pub struct DescribeArgs {
    /// Person the relationship is seen from
    pub from: PersonId,

    /// Person being described
    pub to: PersonId,

    /// Maximum path length in hops
    #[arg(short, long)]
    pub max_depth: Option<usize>,

    /// Also show the path that was found
    #[arg(short, long)]
    pub path: bool,
}

/// Arguments for the chart command.
#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Focal person
    pub id: PersonId,

    /// Chart type (ancestor, descendant, hourglass, family)
    #[arg(short = 't', long = "type")]
    pub chart_type: Option<ChartType>,

    /// Direction (TB, LR, BT, RL)
    #[arg(long)]
    pub direction: Option<Direction>,

    /// Generations to include
    #[arg(short, long)]
    pub generations: Option<u32>,

    /// Leave out photo urls
    #[arg(long)]
    pub no_photos: bool,

    /// Leave out dates
    #[arg(long)]
    pub no_dates: bool,

    /// Include birth and death places
    #[arg(long)]
    pub places: bool,

    /// Include box positions and edge anchors
    #[arg(short, long)]
    pub layout: bool,
}

/// Arguments for the person command.
#[derive(Debug, Args)]
pub struct PersonArgs {
    /// Person id
    pub id: PersonId,
}

/// Arguments for the ancestors and descendants commands.
#[derive(Debug, Args)]
pub struct GenerationsArgs {
    /// Person id
    pub id: PersonId,

    /// Generations to walk
    #[arg(short, long)]
    pub generations: Option<u32>,
}

/// Arguments for calendar tools.
#[derive(Debug, Args)]
pub struct CalendarArgs {
    #[command(subcommand)]
    pub action: CalendarAction,
}

/// Calendar actions.
#[derive(Debug, Subcommand)]
pub enum CalendarAction {
    /// Convert a stored date between calendars
    Convert {
        /// Date in the source calendar's storage format
        date: String,
        /// Source calendar
        #[arg(long, value_parser = parse_calendar, default_value = "gregorian")]
        from: CalendarSystem,
        /// Target calendar
        #[arg(long, value_parser = parse_calendar)]
        to: CalendarSystem,
    },

    /// Read a date as a person would type it
    Parse {
        /// Free-text date
        input: String,
    },

    /// Render a stored date for reading
    Format {
        /// Stored date
        date: String,
        /// Calendar the date is in
        #[arg(long, value_parser = parse_calendar, default_value = "gregorian")]
        calendar: CalendarSystem,
        /// Mark the date as approximate
        #[arg(short, long)]
        approximate: bool,
    },
}

/// Arguments for the place command.
#[derive(Debug, Args)]
pub struct PlaceArgs {
    /// Free-text place name
    pub name: String,
}

/// Arguments for the search command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text to look for in names
    pub query: String,

    /// Maximum number of results
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,

    /// Results to skip
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Do not search maiden names
    #[arg(long)]
    pub no_maiden: bool,
}

fn parse_calendar(s: &str) -> Result<CalendarSystem, String> {
    CalendarSystem::parse(s).ok_or_else(|| format!("Unknown calendar: {}", s))
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_command() {
        let cli = Cli::parse_from(["lineage", "--data", "tree.json", "describe", "3", "7", "--path"]);
        assert_eq!(cli.data, Some(PathBuf::from("tree.json")));
        match cli.command {
            Command::Describe(args) => {
                assert_eq!(args.from, PersonId::new(3));
                assert_eq!(args.to, PersonId::new(7));
                assert!(args.path);
                assert!(args.max_depth.is_none());
            }
            _ => panic!("Expected Describe command"),
        }
    }

    #[test]
    fn test_chart_command() {
        let cli = Cli::parse_from([
            "lineage", "chart", "12", "--type", "hourglass", "--direction", "rl", "-g", "2", "--places",
            "--layout",
        ]);
        match cli.command {
            Command::Chart(args) => {
                assert_eq!(args.id, PersonId::new(12));
                assert_eq!(args.chart_type, Some(ChartType::Hourglass));
                assert_eq!(args.direction, Some(Direction::RightToLeft));
                assert_eq!(args.generations, Some(2));
                assert!(args.places && args.layout);
                assert!(!args.no_photos);
            }
            _ => panic!("Expected Chart command"),
        }
    }

    #[test]
    fn test_calendar_aliases() {
        let cli = Cli::parse_from(["lineage", "calendar", "convert", "2024-04-23", "--to", "jewish"]);
        match cli.command {
            Command::Calendar(CalendarArgs {
                action: CalendarAction::Convert { from, to, .. },
            }) => {
                assert_eq!(from, CalendarSystem::Gregorian);
                assert_eq!(to, CalendarSystem::Hebrew);
            }
            _ => panic!("Expected calendar convert"),
        }
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(Cli::try_parse_from(["lineage", "chart", "1", "--type", "pie"]).is_err());
        assert!(Cli::try_parse_from(["lineage", "calendar", "format", "x", "--calendar", "mayan"]).is_err());
        assert!(Cli::try_parse_from(["lineage", "person", "abc"]).is_err());
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from(["lineage", "search", "moss", "-l", "5", "--no-maiden"]);
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.query, "moss");
                assert_eq!(args.limit, 5);
                assert_eq!(args.offset, 0);
                assert!(args.no_maiden);
            }
            _ => panic!("Expected Search command"),
        }
        assert!(matches!(
            Cli::parse_from(["lineage", "timeline", "4"]).command,
            Command::Timeline(PersonArgs { id }) if id == PersonId::new(4)
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["lineage", "place", "Paris, France", "--format", "json", "--no-color"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
    }
}
