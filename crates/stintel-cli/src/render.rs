//! Plain-text rendering of a dashboard snapshot.

use std::fmt::{self, Display, Formatter};

use stintel_core::{
    Article, ConsumerSentiment, NewsAnalysis, Quote, SentimentSummary, StartupProfile,
    NOT_AVAILABLE,
};
use stintel_dashboard::{ComponentError, FetchState, Page, SearchPhase, Snapshot};

const GAUGE_WIDTH: usize = 20;

pub(crate) struct DashboardView<'a>(pub &'a Snapshot<'a>);

impl Display for DashboardView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let snap = self.0;

        match snap.phase {
            SearchPhase::Searching => writeln!(f, "Searching for '{}'...", snap.input.trim())?,
            SearchPhase::Idle if snap.error.is_none() => {
                writeln!(f, "Enter a company name to search.")?;
            }
            _ => {}
        }
        if let Some(err) = snap.error {
            writeln!(f, "Error: {err}")?;
        }

        let Some(profile) = snap.profile else {
            return Ok(());
        };

        write_header(f, profile)?;

        writeln!(f)?;
        writeln!(f, "Funding Rounds")?;
        write_table(f, snap.funding.as_ref(), "No funding rounds data available")?;

        writeln!(f)?;
        writeln!(f, "Top Competitors")?;
        write_table(f, snap.competitors.as_ref(), "No competitors data available")?;

        writeln!(f)?;
        writeln!(f, "Key Team Members")?;
        match snap.team.as_ref().filter(|p| !p.rows.is_empty()) {
            Some(team) => write_grid(f, team)?,
            None => writeln!(f, "  No team members data available")?,
        }

        if let Some(news) = snap.news {
            writeln!(f)?;
            write_news(f, news)?;
        }
        if let Some(consumer) = snap.consumer_sentiment {
            writeln!(f)?;
            write_consumer(f, consumer)?;
        }

        if !profile.source_url.trim().is_empty() {
            writeln!(f)?;
            writeln!(f, "Data sourced from {}", profile.source_url)?;
        }
        Ok(())
    }
}

fn write_header(f: &mut Formatter<'_>, profile: &StartupProfile) -> fmt::Result {
    writeln!(f, "{}", profile.name)?;
    writeln!(
        f,
        "  Industry: {}  |  Location: {}  |  Website: {}",
        or_na(&profile.industry),
        or_na(&profile.location),
        profile.website_link().unwrap_or(NOT_AVAILABLE)
    )?;
    writeln!(
        f,
        "  Employees: {}  |  Revenue: {}  |  Employee growth: {}",
        or_na(&profile.employees),
        or_na(&profile.revenue),
        percent_or_na(&profile.employee_growth)
    )?;
    writeln!(
        f,
        "  Valuation: {}  |  Total funding: {}",
        or_na(&profile.valuation),
        or_na(&profile.funding)
    )
}

fn write_table(f: &mut Formatter<'_>, page: Option<&Page>, empty_label: &str) -> fmt::Result {
    let Some(page) = page.filter(|p| !p.rows.is_empty()) else {
        return writeln!(f, "  {empty_label}");
    };

    write_grid(f, page)?;
    writeln!(
        f,
        "  {}   {} prev | next {}",
        page.range_label,
        if page.has_previous { "<" } else { " " },
        if page.has_next { ">" } else { " " }
    )
}

/// Header, rule and rows, each column padded to its widest cell.
fn write_grid(f: &mut Formatter<'_>, page: &Page) -> fmt::Result {
    let widths: Vec<usize> = page
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            page.rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    write_row(f, page.headers.iter().copied(), &widths)?;
    write_row(
        f,
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().iter().map(String::as_str),
        &widths,
    )?;
    for row in &page.rows {
        write_row(f, row.iter().map(String::as_str), &widths)?;
    }
    Ok(())
}

fn write_row<'c>(
    f: &mut Formatter<'_>,
    cells: impl Iterator<Item = &'c str>,
    widths: &[usize],
) -> fmt::Result {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(f, "  {}", line.join("  ").trim_end())
}

fn write_news(f: &mut Formatter<'_>, state: &FetchState<NewsAnalysis>) -> fmt::Result {
    writeln!(f, "News Sentiment")?;
    let Some(news) = write_fetch_status(f, state)? else {
        return Ok(());
    };

    write_summary(f, "Company", &news.company)?;
    write_summary(f, "Industry", &news.industry)?;
    if let Some(updated) = news.last_updated.as_deref() {
        writeln!(f, "  Last updated: {updated}")?;
    }
    Ok(())
}

fn write_summary(f: &mut Formatter<'_>, label: &str, summary: &SentimentSummary) -> fmt::Result {
    writeln!(
        f,
        "  {label:<9}{} {:>5.2}  {}",
        gauge(summary.gauge_percent()),
        summary.average_sentiment,
        summary.prediction
    )?;
    if summary.articles.is_empty() {
        return writeln!(f, "    No articles");
    }
    for article in &summary.articles {
        write_article(f, article)?;
    }
    Ok(())
}

fn write_article(f: &mut Formatter<'_>, article: &Article) -> fmt::Result {
    let score = article
        .sentiment
        .combined
        .map_or_else(|| "n/a".to_owned(), |s| format!("{s:.2}"));
    let date = article.published_date().map_or_else(
        || article.published_at.clone(),
        |d| d.format("%b %-d, %Y").to_string(),
    );
    writeln!(
        f,
        "    - [{} {score}] {}",
        article.badge().label(),
        article.title
    )?;
    let meta: Vec<&str> = [article.source.as_str(), date.as_str()]
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect();
    if !meta.is_empty() {
        writeln!(f, "      {}", meta.join(" | "))?;
    }
    if !article.url.trim().is_empty() {
        writeln!(f, "      {}", article.url)?;
    }
    Ok(())
}

fn write_consumer(f: &mut Formatter<'_>, state: &FetchState<ConsumerSentiment>) -> fmt::Result {
    writeln!(f, "Consumer Sentiment")?;
    let Some(consumer) = write_fetch_status(f, state)? else {
        return Ok(());
    };

    writeln!(
        f,
        "  Overall  {} {:>5.2}  ({} mentions)",
        gauge(consumer.gauge_percent()),
        consumer.average_scores.combined,
        consumer.total_mentions
    )?;
    let shares = consumer.distribution_shares();
    writeln!(
        f,
        "  Positive {:.1}%  |  Neutral {:.1}%  |  Negative {:.1}%",
        shares.positive, shares.neutral, shares.negative
    )?;
    if !consumer.common_themes.is_empty() {
        writeln!(f, "  Themes: {}", consumer.common_themes.join(", "))?;
    }
    write_quotes(f, "Positive quotes", &consumer.representative_quotes.positive)?;
    write_quotes(f, "Negative quotes", &consumer.representative_quotes.negative)
}

fn write_quotes(f: &mut Formatter<'_>, label: &str, quotes: &[Quote]) -> fmt::Result {
    if quotes.is_empty() {
        return Ok(());
    }
    writeln!(f, "  {label}:")?;
    for quote in quotes {
        write!(f, "    \"{}\" ({:.2}", quote.text, quote.score)?;
        if !quote.source.trim().is_empty() {
            write!(f, ", {}", quote.source)?;
        }
        writeln!(f, ")")?;
    }
    Ok(())
}

/// Writes the loading or error line; returns the loaded value otherwise.
fn write_fetch_status<'s, T>(
    f: &mut Formatter<'_>,
    state: &'s FetchState<T>,
) -> Result<Option<&'s T>, fmt::Error> {
    match state {
        FetchState::Idle => Ok(None),
        FetchState::Loading => {
            writeln!(f, "  Loading...")?;
            Ok(None)
        }
        FetchState::Failed(err) => {
            write_component_error(f, err)?;
            Ok(None)
        }
        FetchState::Success(value) => Ok(Some(value)),
    }
}

fn write_component_error(f: &mut Formatter<'_>, err: &ComponentError) -> fmt::Result {
    writeln!(f, "  Error: {err}")
}

/// `[#####---------------] 25%` for a fraction in `[0, 1]`.
pub(crate) fn gauge(fraction: f64) -> String {
    let fraction = fraction.clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = (fraction * GAUGE_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled),
        fraction * 100.0
    )
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

fn percent_or_na(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() || value == NOT_AVAILABLE {
        NOT_AVAILABLE.to_owned()
    } else {
        format!("{value}%")
    }
}

#[cfg(test)]
mod tests {
    use stintel_dashboard::{Column, DatasetId, PaginatedTable};

    use super::*;

    fn profile() -> StartupProfile {
        serde_json::from_value(serde_json::json!({
            "name": "Acme Corp",
            "industry": "Software",
            "employee_growth": "14",
            "source_url": "https://growjo.com/company/acmecorp",
            "team_members": [{ "name": "Ada King", "role": "CEO",
                               "employee_url": "https://growjo.com/employee/ada-king" }]
        }))
        .unwrap()
    }

    fn snapshot<'a>(profile: Option<&'a StartupProfile>) -> Snapshot<'a> {
        Snapshot {
            phase: if profile.is_some() {
                SearchPhase::Succeeded
            } else {
                SearchPhase::Idle
            },
            input: "Acme Corp",
            error: None,
            profile,
            news: None,
            consumer_sentiment: None,
            funding: profile.map(|p| {
                stintel_dashboard::funding_table().page(&p.funding_rounds)
            }),
            competitors: profile.map(|p| {
                stintel_dashboard::competitor_table().page(&p.competitors)
            }),
            team: profile.map(|p| stintel_dashboard::team_page(&p.team_members)),
        }
    }

    #[test]
    fn gauge_endpoints() {
        assert_eq!(gauge(0.0), format!("[{}]   0%", "-".repeat(20)));
        assert_eq!(gauge(0.5), format!("[{}{}]  50%", "#".repeat(10), "-".repeat(10)));
        assert_eq!(gauge(1.0), format!("[{}] 100%", "#".repeat(20)));
    }

    #[test]
    fn empty_datasets_print_placeholders_and_footer() {
        let profile = profile();
        let out = DashboardView(&snapshot(Some(&profile))).to_string();
        assert!(out.contains("No funding rounds data available"));
        assert!(out.contains("No competitors data available"));
        assert!(out.contains("Employee growth: 14%"));
        let roster = out
            .lines()
            .find(|l| l.contains("Ada King"))
            .expect("roster row");
        assert!(roster.trim_start().starts_with("AK"));
        assert!(roster.ends_with("CEO   https://growjo.com/employee/ada-king"));
        assert!(!out.contains("No team members data available"));
        assert!(out.ends_with("Data sourced from https://growjo.com/company/acmecorp\n"));
    }

    #[test]
    fn idle_prompts_for_input() {
        let out = DashboardView(&snapshot(None)).to_string();
        assert_eq!(out, "Enter a company name to search.\n");
    }

    #[test]
    fn failed_panel_shows_only_its_error() {
        let profile = profile();
        let failed = FetchState::Failed(ComponentError::Backend("rate limited".to_owned()));
        let mut snap = snapshot(Some(&profile));
        snap.news = Some(&failed);
        let out = DashboardView(&snap).to_string();
        assert!(out.contains("News Sentiment\n  Error: rate limited\n"));
        assert!(!out.contains("Consumer Sentiment"));
    }

    #[test]
    fn table_lines_are_aligned_with_range_label() {
        let rows = vec![
            serde_json::json!({ "a": "x", "b": "longer value" }),
            serde_json::json!({ "a": "yy" }),
        ];
        let mut table = PaginatedTable::new(vec![Column::new("a", "A"), Column::new("b", "B")]);
        table.bind(DatasetId(1), rows.len());
        let page = table.page(&rows);

        struct TableOnly(Page);
        impl Display for TableOnly {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write_table(f, Some(&self.0), "empty")
            }
        }
        let out = TableOnly(page).to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "  A   B");
        assert_eq!(lines[2], "  x   longer value");
        assert_eq!(lines[3], "  yy  N/A");
        assert!(lines[4].starts_with("  1-2 of 2"));
    }
}
