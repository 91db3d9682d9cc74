//! Column layouts for the profile's tabular sections.

use std::num::NonZeroUsize;

use stintel_core::{Competitor, FundingRound, TeamMember, NOT_AVAILABLE};

use crate::pagination::{Column, Page, PaginatedTable, TableRow};

/// Which paginated table a navigation intent targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    Funding,
    Competitors,
}

impl std::str::FromStr for TableId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "funding" | "funding_rounds" => Ok(Self::Funding),
            "competitors" | "competitor" => Ok(Self::Competitors),
            other => Err(format!("unknown table '{other}' (expected funding|competitors)")),
        }
    }
}

impl TableRow for FundingRound {
    fn field(&self, key: &str) -> Option<String> {
        match key {
            "date" => self.date.clone(),
            "amount" => self.amount.clone(),
            "round" => self.round.clone(),
            "lead_investor" => self.lead_investor.clone(),
            "article_link" => self.article_link.clone(),
            _ => None,
        }
    }
}

impl TableRow for Competitor {
    fn field(&self, key: &str) -> Option<String> {
        match key {
            "name" => self.name.clone(),
            "revenue" => self.revenue.clone(),
            "employees" => self.employees.clone(),
            "growth" => self.growth.clone(),
            "funding" => self.funding.clone(),
            "valuation" => self.valuation.clone(),
            _ => None,
        }
    }
}

impl TableRow for TeamMember {
    fn field(&self, key: &str) -> Option<String> {
        match key {
            "name" => Some(self.name.clone()),
            "role" => Some(self.role.clone()),
            "linkedin_url" => self.linkedin_url.clone(),
            "employee_url" => self.employee_url.clone(),
            _ => None,
        }
    }
}

#[must_use]
pub fn funding_columns() -> Vec<Column<FundingRound>> {
    vec![
        Column::new("date", "Date"),
        Column::new("amount", "Amount"),
        Column::new("round", "Round"),
        Column::new("lead_investor", "Lead Investor"),
        Column::rendered("article_link", "Details", render_article_link),
    ]
}

#[must_use]
pub fn competitor_columns() -> Vec<Column<Competitor>> {
    vec![
        Column::new("name", "Competitor Name"),
        Column::new("revenue", "Revenue"),
        Column::new("employees", "Employees"),
        Column::new("growth", "Growth %"),
        Column::new("funding", "Funding"),
        Column::new("valuation", "Valuation"),
    ]
}

#[must_use]
pub fn team_columns() -> Vec<Column<TeamMember>> {
    vec![
        Column::rendered("initials", "", TeamMember::initials),
        Column::new("name", "Team Member"),
        Column::new("role", "Role"),
        Column::rendered("profile", "Profile", render_profile_link),
    ]
}

/// The roster is not paginated: every member lands on one page.
#[must_use]
pub fn team_page(members: &[TeamMember]) -> Page {
    let page_size = NonZeroUsize::new(members.len()).unwrap_or(NonZeroUsize::MIN);
    PaginatedTable::new(team_columns())
        .with_page_size(page_size)
        .page(members)
}

#[must_use]
pub fn funding_table() -> PaginatedTable<FundingRound> {
    PaginatedTable::new(funding_columns())
}

#[must_use]
pub fn competitor_table() -> PaginatedTable<Competitor> {
    PaginatedTable::new(competitor_columns())
}

fn render_article_link(round: &FundingRound) -> String {
    round
        .article_link()
        .map_or_else(|| NOT_AVAILABLE.to_owned(), str::to_owned)
}

fn render_profile_link(member: &TeamMember) -> String {
    member
        .profile_link()
        .map_or_else(|| NOT_AVAILABLE.to_owned(), str::to_owned)
}
