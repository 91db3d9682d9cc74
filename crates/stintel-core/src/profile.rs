//! The company profile returned by the backend's search endpoint.

use serde::{Deserialize, Serialize};

/// Placeholder the backend writes for values it could not scrape.
pub const NOT_AVAILABLE: &str = "N/A";

/// Complete result of a company search.
///
/// Scalar metrics are kept as the display strings the backend reports
/// (`"$12.5M"`, `"120"`, `"N/A"`); the dashboard never does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupProfile {
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub employees: String,
    #[serde(default)]
    pub revenue: String,
    /// Employee growth in percent, without the `%` sign.
    #[serde(default)]
    pub employee_growth: String,
    #[serde(default)]
    pub valuation: String,
    #[serde(default)]
    pub funding: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub funding_rounds: Vec<FundingRound>,
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
}

impl StartupProfile {
    /// Website link, or `None` when the backend had nothing usable.
    #[must_use]
    pub fn website_link(&self) -> Option<&str> {
        present(&self.website)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRound {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(default)]
    pub lead_investor: Option<String>,
    /// Press link for the round; `"N/A"` on the wire means there is none.
    #[serde(default)]
    pub article_link: Option<String>,
}

impl FundingRound {
    /// The article link with the `"N/A"` sentinel folded into `None`.
    #[must_use]
    pub fn article_link(&self) -> Option<&str> {
        self.article_link.as_deref().and_then(present)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub revenue: Option<String>,
    #[serde(default)]
    pub employees: Option<String>,
    /// Growth in percent, without the `%` sign.
    #[serde(default)]
    pub growth: Option<String>,
    #[serde(default)]
    pub funding: Option<String>,
    #[serde(default)]
    pub valuation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub employee_url: Option<String>,
}

impl TeamMember {
    /// The link a member card opens: `LinkedIn` first, then the employee page.
    #[must_use]
    pub fn profile_link(&self) -> Option<&str> {
        self.linkedin_url
            .as_deref()
            .and_then(present)
            .or_else(|| self.employee_url.as_deref().and_then(present))
    }

    /// First letter of every word in the name, e.g. `"Ada King"` -> `"AK"`.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

/// Returns `value` unless it is blank or the `"N/A"` sentinel.
fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(linkedin: Option<&str>, employee: Option<&str>) -> TeamMember {
        TeamMember {
            name: "Ada Lovelace King".to_string(),
            role: "CTO".to_string(),
            linkedin_url: linkedin.map(str::to_string),
            employee_url: employee.map(str::to_string),
        }
    }

    #[test]
    fn deserializes_backend_profile_payload() {
        let body = serde_json::json!({
            "name": "Acme Corp",
            "industry": "Software",
            "location": "Austin, TX",
            "website": "https://acme.example",
            "employees": "120",
            "revenue": "$12.5M",
            "employee_growth": "14",
            "valuation": "N/A",
            "funding": "$30M",
            "source_url": "https://growjo.com/company/acmecorp",
            "funding_rounds": [
                {
                    "date": "2023-04-01",
                    "amount": "$20M",
                    "round": "Series B",
                    "lead_investor": "Sequoia",
                    "article_link": "N/A"
                }
            ],
            "competitors": [
                {
                    "name": "Globex",
                    "revenue": "$40M",
                    "employees": "300",
                    "growth": "5",
                    "funding": "$80M",
                    "valuation": "$400M"
                }
            ],
            "team_members": [
                {
                    "name": "Ada King",
                    "role": "CEO",
                    "linkedin_url": null,
                    "employee_url": "https://growjo.com/employee/ada-king"
                }
            ]
        });

        let profile: StartupProfile = serde_json::from_value(body).expect("valid profile");
        assert_eq!(profile.name, "Acme Corp");
        assert_eq!(profile.industry, "Software");
        assert_eq!(profile.funding_rounds.len(), 1);
        assert_eq!(profile.funding_rounds[0].article_link(), None);
        assert_eq!(profile.competitors[0].name.as_deref(), Some("Globex"));
        assert_eq!(
            profile.team_members[0].profile_link(),
            Some("https://growjo.com/employee/ada-king")
        );
    }

    #[test]
    fn missing_sequences_default_to_empty() {
        let profile: StartupProfile =
            serde_json::from_value(serde_json::json!({ "name": "Tiny" })).unwrap();
        assert!(profile.funding_rounds.is_empty());
        assert!(profile.competitors.is_empty());
        assert!(profile.team_members.is_empty());
        assert!(profile.industry.is_empty());
        assert_eq!(profile.website_link(), None);
    }

    #[test]
    fn article_link_present_when_real_url() {
        let round = FundingRound {
            date: None,
            amount: None,
            round: None,
            lead_investor: None,
            article_link: Some("https://news.example/acme-series-b".to_string()),
        };
        assert_eq!(
            round.article_link(),
            Some("https://news.example/acme-series-b")
        );
    }

    #[test]
    fn profile_link_prefers_linkedin() {
        let m = member(
            Some("https://linkedin.com/in/ada"),
            Some("https://growjo.com/employee/ada"),
        );
        assert_eq!(m.profile_link(), Some("https://linkedin.com/in/ada"));
    }

    #[test]
    fn profile_link_falls_back_to_employee_page() {
        let m = member(None, Some("https://growjo.com/employee/ada"));
        assert_eq!(m.profile_link(), Some("https://growjo.com/employee/ada"));
    }

    #[test]
    fn profile_link_none_when_both_missing() {
        assert_eq!(member(Some(""), None).profile_link(), None);
    }

    #[test]
    fn initials_take_first_letter_of_each_word() {
        assert_eq!(member(None, None).initials(), "ALK");
    }
}
