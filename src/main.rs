use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use secrecy::SecretString;
use ttrss_client::{FeedCredentials, RpcChannel};
use ttrss_core::{walk, FeedTreeNode, WalkControl};
use ttrss_settings::ConnInfo;

/// Command-line client for a Tiny Tiny RSS server.
#[derive(Debug, Parser)]
#[command(name = "ttrss", version)]
struct Cli {
    /// Server base URL (overrides settings and TTRSS_URL)
    #[arg(long, global = true)]
    url: Option<String>,
    /// Login name
    #[arg(long, global = true)]
    user: Option<String>,
    /// Login password
    #[arg(long, global = true)]
    password: Option<String>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Write log events to stderr as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the credentials open a session
    Login,
    /// Print the category/feed tree
    Tree {
        /// Include categories without feeds
        #[arg(long)]
        include_empty: bool,
        /// Only print feeds whose last update failed
        #[arg(long)]
        errors_only: bool,
        /// Print the tree as JSON
        #[arg(long, conflicts_with = "errors_only")]
        json: bool,
    },
    /// Subscribe to a feed
    Subscribe {
        feed_url: String,
        /// Target category id (0 = uncategorized)
        #[arg(long, default_value_t = ttrss_core::ids::category::UNCATEGORIZED, allow_negative_numbers = true)]
        category: i64,
        /// HTTP user for a protected feed
        #[arg(long, requires = "feed_password")]
        feed_user: Option<String>,
        /// HTTP password for a protected feed
        #[arg(long, requires = "feed_user")]
        feed_password: Option<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });
    let logs = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        logs.json().init();
    } else {
        logs.compact().init();
    }

    let conn = resolve_conn(&cli)?;
    let mut channel = RpcChannel::http(&conn)?;
    let _ = channel
        .login(&conn)
        .with_context(|| format!("cannot open a session at {}", conn.host_url))?;

    match cli.command {
        Command::Login => {
            println!("logged in to {} as {}", channel.endpoint(), conn.user);
            Ok(ExitCode::SUCCESS)
        }
        Command::Tree {
            include_empty,
            errors_only,
            json,
        } => {
            let tree = channel.get_feed_tree(include_empty)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            } else {
                for line in render_tree(&tree, errors_only) {
                    println!("{line}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Subscribe {
            feed_url,
            category,
            feed_user,
            feed_password,
        } => {
            let credentials = feed_user
                .as_deref()
                .zip(feed_password.as_deref())
                .map(|(user, password)| FeedCredentials { user, password });
            let sub = channel.subscribe_to_feed(&feed_url, category, credentials)?;
            println!("{}", sub.outcome);
            Ok(if sub.subscribed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn resolve_conn(cli: &Cli) -> anyhow::Result<ConnInfo> {
    let mut conn = ttrss_settings::load_conn_info().context("failed to load settings")?;
    if let Some(url) = &cli.url {
        conn.host_url.clone_from(url);
    }
    if let Some(user) = &cli.user {
        conn.user.clone_from(user);
    }
    if let Some(password) = &cli.password {
        conn.password = SecretString::from(password.clone());
    }
    tracing::debug!(?conn, "connection settings resolved");
    Ok(conn)
}

/// Render `tree` one node per line, indented by depth. With `errors_only`,
/// categories with no failing feed below them are skipped and only failing
/// feeds are listed.
fn render_tree(tree: &FeedTreeNode, errors_only: bool) -> Vec<String> {
    let mut lines = Vec::new();
    // Unvisited children left at each open category level.
    let mut pending: Vec<usize> = Vec::new();
    let result = walk(tree, |node| {
        let depth = pending.len();
        if let Some(left) = pending.last_mut() {
            *left -= 1;
        }
        let skip = errors_only && node.is_category() && !subtree_has_error(node);
        if node.is_category() && !skip && !node.children.is_empty() {
            pending.push(node.children.len());
        }
        while pending.last() == Some(&0) {
            let _ = pending.pop();
        }

        let indent = "  ".repeat(depth);
        if node.is_category() {
            if !errors_only {
                lines.push(format!("{indent}{} [{}]", node.name, node.id));
            }
        } else if node.has_error() {
            lines.push(format!("{indent}{} ({}): {}", node.name, node.id, node.last_error));
        } else if !errors_only {
            lines.push(format!("{indent}{} ({})", node.name, node.id));
        }

        if skip {
            WalkControl::SkipSubtree
        } else {
            WalkControl::<std::convert::Infallible>::Continue
        }
    });
    if let Err(e) = result {
        tracing::warn!(error = %e, "tree walk stopped early");
    }
    lines
}

fn subtree_has_error(node: &FeedTreeNode) -> bool {
    node.has_error() || node.children.iter().any(subtree_has_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FeedTreeNode {
        FeedTreeNode::category(
            0,
            "/",
            vec![
                FeedTreeNode::category(
                    1,
                    "Tech",
                    vec![
                        FeedTreeNode::feed(10, "LWN"),
                        FeedTreeNode::category(2, "Rust", vec![FeedTreeNode::feed(11, "TWiR")]),
                    ],
                ),
                FeedTreeNode::category(3, "Empty", vec![]),
                FeedTreeNode::feed(12, "Broken").with_error("HTTP 404"),
            ],
        )
    }

    #[test]
    fn renders_indented_by_depth() {
        let lines = render_tree(&sample(), false);
        assert_eq!(
            lines,
            [
                "/ [0]",
                "  Tech [1]",
                "    LWN (10)",
                "    Rust [2]",
                "      TWiR (11)",
                "  Empty [3]",
                "  Broken (12): HTTP 404",
            ]
        );
    }

    #[test]
    fn errors_only_lists_failing_feeds() {
        let lines = render_tree(&sample(), true);
        assert_eq!(lines, ["  Broken (12): HTTP 404"]);
    }

    #[test]
    fn errors_only_on_clean_tree_is_empty() {
        let tree = FeedTreeNode::category(0, "/", vec![FeedTreeNode::feed(1, "ok")]);
        assert!(render_tree(&tree, true).is_empty());
    }

    #[test]
    fn tree_json_excludes_errors_only() {
        assert!(Cli::try_parse_from(["ttrss", "tree", "--json", "--errors-only"]).is_err());
        let cli = Cli::try_parse_from(["ttrss", "--log-json", "tree", "--json"]).unwrap();
        assert!(cli.log_json);
        assert!(matches!(cli.command, Command::Tree { json: true, .. }));
    }

    #[test]
    fn subscribe_credentials_require_each_other() {
        let err = Cli::try_parse_from(["ttrss", "subscribe", "https://x", "--feed-user", "u"]);
        assert!(err.is_err());
        let cli = Cli::try_parse_from([
            "ttrss", "--url", "http://h", "subscribe", "https://x", "--category", "4",
            "--feed-user", "u", "--feed-password", "p",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://h"));
        assert!(matches!(cli.command, Command::Subscribe { category: 4, .. }));
    }
}
