//! In-memory search and filtering over already fetched leads.
//!
//! Nothing here touches the store. Predicates are pure and never fail: a
//! value that does not exist on any lead simply matches nothing.

use std::collections::BTreeSet;

use entities::Lead;

/// A categorical filter: either everything or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Exact(String),
}

impl Selection {
    /// Sentinel string that selects everything.
    pub const ALL: &'static str = "all";

    /// Parses a dropdown value, treating [`Selection::ALL`] as no restriction.
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Exact(value.to_string())
        }
    }

    /// Returns true if the field value passes this selection.
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(expected) => expected == value,
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Option<&str>> for Selection {
    fn from(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_default()
    }
}

/// Search term plus status, source and temperature selections, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct LeadQuery {
    /// Case-insensitive substring matched against name, company, email and
    /// assignee. Empty matches everything.
    pub search: String,
    pub status: Selection,
    pub source: Selection,
    pub temperature: Selection,
}

impl LeadQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<Selection>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<Selection>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_temperature(mut self, temperature: impl Into<Selection>) -> Self {
        self.temperature = temperature.into();
        self
    }

    /// Returns true if the lead passes every predicate.
    pub fn matches(&self, lead: &Lead) -> bool {
        matches_search(lead, &self.search.to_lowercase()) && self.matches_categories(lead)
    }

    /// Returns the leads that pass, in input order.
    pub fn apply(&self, leads: &[Lead]) -> Vec<Lead> {
        let needle = self.search.to_lowercase();
        leads
            .iter()
            .filter(|lead| matches_search(lead, &needle) && self.matches_categories(lead))
            .cloned()
            .collect()
    }

    fn matches_categories(&self, lead: &Lead) -> bool {
        self.status.admits(lead.status.as_str())
            && self.source.admits(&lead.source)
            && self.temperature.admits(lead.temperature.as_str())
    }
}

fn matches_search(lead: &Lead, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [&lead.name, &lead.company, &lead.email, &lead.assigned_to]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Lead fields that feed filter dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadField {
    Status,
    Source,
    Temperature,
    Group,
    AssignedTo,
}

impl LeadField {
    /// Returns the field's wire string on a lead.
    pub fn value<'a>(&self, lead: &'a Lead) -> &'a str {
        match self {
            Self::Status => lead.status.as_str(),
            Self::Source => &lead.source,
            Self::Temperature => lead.temperature.as_str(),
            Self::Group => &lead.group,
            Self::AssignedTo => &lead.assigned_to,
        }
    }
}

/// Distinct non-empty values of a field across the given leads.
pub fn distinct_values(leads: &[Lead], field: LeadField) -> BTreeSet<String> {
    leads
        .iter()
        .map(|lead| field.value(lead))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use entities::{LeadStatus, NewLead, Temperature};

    use super::*;

    fn lead(name: &str, status: LeadStatus, source: &str) -> Lead {
        NewLead::new(name, "Tech Corp", format!("{}@techcorp.com", name.to_lowercase()))
            .with_status(status)
            .with_source(source)
            .into_lead(Utc::now())
    }

    fn sample() -> Vec<Lead> {
        vec![
            lead("A", LeadStatus::New, "Web"),
            lead("B", LeadStatus::New, "Referral"),
            lead("C", LeadStatus::Qualified, "Web"),
        ]
    }

    #[test]
    fn test_status_and_source_combine_with_and() {
        let leads = sample();
        let result = LeadQuery::new()
            .with_status("New")
            .with_source("Web")
            .apply(&leads);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "A");
    }

    #[test]
    fn test_all_sentinel_matches_everything() {
        let leads = sample();
        let query = LeadQuery::new()
            .with_status(Selection::ALL)
            .with_source(Selection::ALL)
            .with_temperature(Selection::ALL);
        assert_eq!(query.apply(&leads).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let mut leads = sample();
        leads[1].assigned_to = "Sarah Manager".to_string();
        leads[2].company = "Global Industries".to_string();

        let by_assignee = LeadQuery::new().with_search("sarah").apply(&leads);
        assert_eq!(by_assignee.len(), 1);
        assert_eq!(by_assignee[0].name, "B");

        let by_company = LeadQuery::new().with_search("GLOBAL").apply(&leads);
        assert_eq!(by_company.len(), 1);
        assert_eq!(by_company[0].name, "C");

        let by_email = LeadQuery::new().with_search("@techcorp").apply(&leads);
        assert_eq!(by_email.len(), 3);
    }

    #[test]
    fn test_unknown_value_matches_nothing() {
        let leads = sample();
        assert!(LeadQuery::new().with_status("Bogus").apply(&leads).is_empty());
        assert!(!LeadQuery::new()
            .with_temperature("hot")
            .matches(&leads[0]));
    }

    #[test]
    fn test_temperature_selection() {
        let mut leads = sample();
        leads[0].temperature = Temperature::Hot;

        let hot = LeadQuery::new().with_temperature("Hot").apply(&leads);
        assert_eq!(hot.len(), 1);
        assert_eq!(hot[0].name, "A");
    }

    #[test]
    fn test_selection_from_optional() {
        assert_eq!(Selection::from(None), Selection::All);
        assert_eq!(
            Selection::from(Some("Web")),
            Selection::Exact("Web".to_string())
        );
    }

    #[test]
    fn test_distinct_values_skip_empty() {
        let mut leads = sample();
        leads[1].source = String::new();

        let sources = distinct_values(&leads, LeadField::Source);
        assert_eq!(sources.into_iter().collect::<Vec<_>>(), vec!["Web"]);

        let statuses = distinct_values(&leads, LeadField::Status);
        assert_eq!(
            statuses.into_iter().collect::<Vec<_>>(),
            vec!["New", "Qualified"]
        );

        assert!(distinct_values(&[], LeadField::Group).is_empty());
    }
}
