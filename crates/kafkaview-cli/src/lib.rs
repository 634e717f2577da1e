//! Shared CLI definitions for kafkaview.
//!
//! Used by the main application and by the build script (manpage) and
//! gen_docs binary (command-line-options markdown).

use clap::{CommandFactory, Parser, ValueEnum};

/// Strategy used by the backend to pick which records to stream.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PollingModeArg {
    /// Follow the topic live, newest records first
    Tailing,
    /// The most recent records of each partition
    Latest,
    /// The oldest retained records of each partition
    Earliest,
    /// Records starting at --offset
    FromOffset,
    /// Records up to --offset
    ToOffset,
    /// Records starting at --timestamp
    FromTimestamp,
    /// Records up to --timestamp
    ToTimestamp,
}

impl PollingModeArg {
    /// Wire name understood by the backend (e.g. "FROM_OFFSET").
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Tailing => "TAILING",
            Self::Latest => "LATEST",
            Self::Earliest => "EARLIEST",
            Self::FromOffset => "FROM_OFFSET",
            Self::ToOffset => "TO_OFFSET",
            Self::FromTimestamp => "FROM_TIMESTAMP",
            Self::ToTimestamp => "TO_TIMESTAMP",
        }
    }

    pub fn needs_offset(&self) -> bool {
        matches!(self, Self::FromOffset | Self::ToOffset)
    }

    pub fn needs_timestamp(&self) -> bool {
        matches!(self, Self::FromTimestamp | Self::ToTimestamp)
    }
}

/// Command-line arguments for kafkaview
#[derive(Clone, Parser, Debug)]
#[command(
    name = "kafkaview",
    version,
    about = "Browse Kafka topic messages through a Kafka UI backend",
    long_about = include_str!("../long_about.txt")
)]
pub struct Args {
    /// Cluster name as known by the backend. When only one name is given it is
    /// the topic, and the cluster comes from connection.default_cluster
    #[arg(required_unless_present = "generate_config", value_name = "CLUSTER")]
    pub cluster: Option<String>,

    /// Topic to read messages from
    #[arg(value_name = "TOPIC")]
    pub topic: Option<String>,

    /// Base URL of the backend (overrides connection.base_url)
    #[arg(long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// Polling mode (default from messages.default_mode)
    #[arg(long = "mode", value_enum)]
    pub mode: Option<PollingModeArg>,

    /// Maximum number of records per request (default from messages.default_limit)
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<u32>,

    /// Restrict to these partitions (comma-separated)
    #[arg(long = "partitions", value_delimiter = ',', value_name = "P")]
    pub partitions: Vec<i32>,

    /// Deserializer used for record keys
    #[arg(long = "key-serde", value_name = "NAME")]
    pub key_serde: Option<String>,

    /// Deserializer used for record values
    #[arg(long = "value-serde", value_name = "NAME")]
    pub value_serde: Option<String>,

    /// Free-text filter applied by the backend
    #[arg(long = "filter", value_name = "TEXT")]
    pub filter: Option<String>,

    /// Id of a filter registered on the backend
    #[arg(long = "smart-filter-id", value_name = "ID")]
    pub smart_filter_id: Option<String>,

    /// Offset bound for --mode from-offset / to-offset
    #[arg(long = "offset", value_name = "OFFSET")]
    pub offset: Option<i64>,

    /// Timestamp bound (epoch millis) for --mode from-timestamp / to-timestamp
    #[arg(long = "timestamp", value_name = "MILLIS")]
    pub timestamp: Option<i64>,

    /// Restore feed parameters from a URL query string (e.g. "mode=EARLIEST&limit=50").
    /// Explicit options take precedence over values found here.
    #[arg(long = "query", value_name = "QUERY")]
    pub query: Option<String>,

    /// Filters, sort and page for the printed table as a URL query string
    /// (e.g. "key=order&partition=0,1&sortBy=offset&sortDirection=desc&page=2")
    #[arg(long = "table-query", value_name = "QUERY")]
    pub table_query: Option<String>,

    /// Number of requests to issue, continuing from the server cursor each time
    #[arg(long = "pages", default_value_t = 1, value_name = "N")]
    pub pages: u32,

    /// Enable debug logging
    #[arg(long = "debug", action)]
    pub debug: bool,

    /// Generate default configuration file at the config location and exit
    #[arg(long = "generate-config", action)]
    pub generate_config: bool,

    /// Overwrite an existing configuration file (used with --generate-config)
    #[arg(long = "force", requires = "generate_config", action)]
    pub force: bool,
}

impl Args {
    /// Resolve `(cluster, topic)` from the positional arguments.
    pub fn target(&self, default_cluster: Option<&str>) -> Option<(String, String)> {
        match (&self.cluster, &self.topic) {
            (Some(cluster), Some(topic)) => Some((cluster.clone(), topic.clone())),
            (Some(topic), None) => default_cluster.map(|c| (c.to_string(), topic.clone())),
            _ => None,
        }
    }
}

/// Escape `|` and newlines for use in markdown table cells.
fn escape_table_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\n', '\r'], " ")
}

/// Render command-line options as markdown.
///
/// Used by the gen_docs binary; output is written to stdout.
pub fn render_options_markdown() -> String {
    let mut cmd = Args::command();
    cmd.build();

    let mut out = String::from("# Command Line Options\n\n");

    out.push_str("## Usage\n\n```\n");
    let usage = cmd.render_usage();
    out.push_str(&usage.to_string());
    out.push_str("\n```\n\n");

    out.push_str("## Options\n\n");
    out.push_str("| Option | Description |\n");
    out.push_str("|--------|-------------|\n");

    for arg in cmd.get_arguments() {
        let id = arg.get_id().as_ref().to_string();
        if id == "help" || id == "version" {
            continue;
        }

        let placeholder: String = arg
            .get_value_names()
            .map(|names| {
                names
                    .iter()
                    .map(|n: &clap::builder::Str| format!("<{}>", n.as_ref() as &str))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        let option_str = if arg.is_positional() {
            if arg.is_required_set() {
                placeholder
            } else {
                format!("[{placeholder}]")
            }
        } else {
            let mut parts = Vec::new();
            if let Some(s) = arg.get_short() {
                parts.push(format!("-{s}"));
            }
            if let Some(l) = arg.get_long() {
                parts.push(format!("--{l}"));
            }
            let op = parts.join(", ");
            if !arg.get_action().takes_values() || placeholder.is_empty() {
                op
            } else {
                format!("{op} {placeholder}")
            }
        };

        let help = arg
            .get_help()
            .map(|h| escape_table_cell(&h.to_string()))
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!("| `{option_str}` | {help} |\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(PollingModeArg::Tailing.wire_name(), "TAILING");
        assert_eq!(PollingModeArg::FromOffset.wire_name(), "FROM_OFFSET");
        assert_eq!(PollingModeArg::ToTimestamp.wire_name(), "TO_TIMESTAMP");
    }

    #[test]
    fn test_bounds() {
        assert!(PollingModeArg::ToOffset.needs_offset());
        assert!(!PollingModeArg::ToOffset.needs_timestamp());
        assert!(PollingModeArg::FromTimestamp.needs_timestamp());
        assert!(!PollingModeArg::Latest.needs_offset());
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "kafkaview",
            "local",
            "orders",
            "--mode",
            "from-offset",
            "--offset",
            "42",
            "--partitions",
            "0,2",
        ])
        .unwrap();
        assert_eq!(args.cluster.as_deref(), Some("local"));
        assert_eq!(args.topic.as_deref(), Some("orders"));
        assert_eq!(args.mode, Some(PollingModeArg::FromOffset));
        assert_eq!(args.offset, Some(42));
        assert_eq!(args.partitions, vec![0, 2]);
        assert_eq!(args.pages, 1);
    }

    #[test]
    fn test_generate_config_needs_no_topic() {
        let args = Args::try_parse_from(["kafkaview", "--generate-config"]).unwrap();
        assert!(args.generate_config);
        assert!(args.topic.is_none());
    }

    #[test]
    fn test_target_uses_default_cluster() {
        let args = Args::try_parse_from(["kafkaview", "orders"]).unwrap();
        assert_eq!(args.target(None), None);
        assert_eq!(
            args.target(Some("local")),
            Some(("local".to_string(), "orders".to_string()))
        );

        let args = Args::try_parse_from(["kafkaview", "prod", "orders"]).unwrap();
        assert_eq!(
            args.target(Some("local")),
            Some(("prod".to_string(), "orders".to_string()))
        );
        assert!(Args::try_parse_from(["kafkaview"]).is_err());
    }

    #[test]
    fn test_options_markdown_lists_flags() {
        let md = render_options_markdown();
        assert!(md.contains("--table-query"));
        assert!(md.contains("--mode"));
        assert!(!md.contains("`--help`"));
    }
}
