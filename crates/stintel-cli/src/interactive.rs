//! Line-oriented shell: searches and table navigation read from stdin while
//! dashboard requests resolve in the background.

use stintel_dashboard::{Dashboard, TableId};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::DashboardView;

const HELP: &str = "\
Type a company name to search.
  :next funding|competitors   next table page
  :prev funding|competitors   previous table page
  :show                       print the dashboard
  :help                       this message
  :quit                       exit";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Search(String),
    Next(TableId),
    Previous(TableId),
    Show,
    Help,
    Quit,
    Invalid(String),
}

impl ShellCommand {
    pub(crate) fn parse(line: &str) -> Self {
        let Some(rest) = line.trim_start().strip_prefix(':') else {
            // Untrimmed on purpose: the backend receives the name as typed.
            return Self::Search(line.to_owned());
        };

        let mut words = rest.split_whitespace();
        let verb = words.next().unwrap_or_default();
        let arg = words.next();
        match (verb, arg) {
            ("next" | "n", Some(table)) => table.parse().map_or_else(Self::Invalid, Self::Next),
            ("prev" | "p", Some(table)) => {
                table.parse().map_or_else(Self::Invalid, Self::Previous)
            }
            ("next" | "n" | "prev" | "p", None) => {
                Self::Invalid(format!(":{verb} needs a table (funding|competitors)"))
            }
            ("show" | "s", _) => Self::Show,
            ("help" | "h" | "?", _) => Self::Help,
            ("quit" | "q" | "exit", _) => Self::Quit,
            _ => Self::Invalid(format!("unknown command ':{verb}'; try :help")),
        }
    }
}

pub(crate) async fn run_interactive(mut dashboard: Dashboard) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                // Whitespace-only lines still go through search validation.
                if line.is_empty() {
                    continue;
                }
                match ShellCommand::parse(&line) {
                    ShellCommand::Quit => break,
                    ShellCommand::Help => println!("{HELP}"),
                    ShellCommand::Show => print!("{}", DashboardView(&dashboard.snapshot())),
                    ShellCommand::Invalid(message) => println!("{message}"),
                    ShellCommand::Search(name) => match dashboard.submit_search(&name) {
                        Ok(()) => println!("Searching for '{}'...", name.trim()),
                        Err(err) => println!("Error: {err}"),
                    },
                    ShellCommand::Next(table) => {
                        if dashboard.next_page(table) {
                            print!("{}", DashboardView(&dashboard.snapshot()));
                        } else {
                            println!("Already on the last page");
                        }
                    }
                    ShellCommand::Previous(table) => {
                        if dashboard.previous_page(table) {
                            print!("{}", DashboardView(&dashboard.snapshot()));
                        } else {
                            println!("Already on the first page");
                        }
                    }
                }
            }
            Some(event) = dashboard.next_event(), if dashboard.is_busy() => {
                tracing::debug!(source = %event.source, commit = ?event.commit, "request resolved");
                if event.commit.is_applied() && !dashboard.is_busy() {
                    print!("{}", DashboardView(&dashboard.snapshot()));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_search_kept_verbatim() {
        assert_eq!(
            ShellCommand::parse("  Acme Corp "),
            ShellCommand::Search("  Acme Corp ".to_owned())
        );
    }

    #[test]
    fn navigation_commands_parse_tables() {
        assert_eq!(
            ShellCommand::parse(":next funding"),
            ShellCommand::Next(TableId::Funding)
        );
        assert_eq!(
            ShellCommand::parse(":p competitors"),
            ShellCommand::Previous(TableId::Competitors)
        );
    }

    #[test]
    fn navigation_without_table_is_invalid() {
        assert!(matches!(ShellCommand::parse(":next"), ShellCommand::Invalid(_)));
        assert!(matches!(ShellCommand::parse(":next team"), ShellCommand::Invalid(_)));
    }

    #[test]
    fn control_commands() {
        assert_eq!(ShellCommand::parse(":show"), ShellCommand::Show);
        assert_eq!(ShellCommand::parse(":q"), ShellCommand::Quit);
        assert_eq!(ShellCommand::parse(":help"), ShellCommand::Help);
        assert!(matches!(ShellCommand::parse(":bogus"), ShellCommand::Invalid(_)));
    }
}
