use serde::{Deserialize, Serialize};

/// Moderation state of a voice. New submissions always start out `Pending`;
/// only an authenticated admin moves them anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    Approved,
    Rejected,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Approved => "APPROVED",
            Status::Rejected => "REJECTED",
        }
    }

    /// Parse the wire spelling. Returns `None` for anything else,
    /// including `"all"` — callers treat that as "no status filter".
    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "PENDING" => Some(Status::Pending),
            "APPROVED" => Some(Status::Approved),
            "REJECTED" => Some(Status::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing order. `Newest` is `created_at` descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    Newest,
    Oldest,
}

impl Sort {
    /// Lenient parse matching the route behavior: anything that is not
    /// exactly `oldest` falls back to `newest`.
    pub fn parse(s: &str) -> Sort {
        if s == "oldest" { Sort::Oldest } else { Sort::Newest }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for s in [Status::Pending, Status::Approved, Status::Rejected] {
            assert_eq!(Status::parse(s.as_str()), Some(s));
        }
    }

    #[test]
    fn status_rejects_unknown() {
        assert_eq!(Status::parse("all"), None);
        assert_eq!(Status::parse("approved"), None);
        assert_eq!(Status::parse(""), None);
    }

    #[test]
    fn status_serde_spelling() {
        let json = serde_json::to_string(&Status::Approved).unwrap();
        assert_eq!(json, "\"APPROVED\"");
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Status::Approved);
    }

    #[test]
    fn sort_defaults_to_newest() {
        assert_eq!(Sort::parse("oldest"), Sort::Oldest);
        assert_eq!(Sort::parse("newest"), Sort::Newest);
        assert_eq!(Sort::parse("sideways"), Sort::Newest);
    }
}
