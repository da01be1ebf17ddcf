use chrono::{DateTime, Utc};
use std::fmt;

/// Lifecycle flag as reported by the service: code 1 is active,
/// anything else (including absent) is inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Active,
    Inactive,
}

impl TicketStatus {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => TicketStatus::Active,
            _ => TicketStatus::Inactive,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::Active => write!(f, "Active"),
            TicketStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// A single help-desk ticket. Snapshots fetched from the remote
/// service; never mutated, only replaced wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: i64,
    pub number: String,
    pub category: Option<String>,
    pub title: String,
    pub description: String,
    pub requester: Option<String>,
    pub assignee: Option<String>,
    pub status: TicketStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub assigned_at: Option<DateTime<Utc>>,
}

/// One page of the ticket listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketPage {
    pub tickets: Vec<Ticket>,
    /// Zero-based page index echoed by the server.
    pub number: u32,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_one_is_active() {
        assert_eq!(TicketStatus::from_code(Some(1)), TicketStatus::Active);
    }

    #[test]
    fn status_other_codes_are_inactive() {
        for code in [Some(0), Some(2), Some(-1), None] {
            assert_eq!(TicketStatus::from_code(code), TicketStatus::Inactive);
        }
    }

    #[test]
    fn status_labels() {
        assert_eq!(TicketStatus::Active.to_string(), "Active");
        assert_eq!(TicketStatus::Inactive.to_string(), "Inactive");
    }
}
