//! Created/updated stamps shared by every record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Actor recorded for rows created outside an authenticated request.
pub const SYSTEM_ACTOR: &str = "SYSTEM";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl Audit {
    /// Build the stamps from a row's audit columns.
    pub(crate) fn new(
        created_at: DateTime<Utc>,
        created_by: String,
        updated_at: Option<DateTime<Utc>>,
        updated_by: Option<String>,
    ) -> Self {
        Self {
            created_at,
            created_by,
            updated_at,
            updated_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn fresh_row_is_not_updated() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let audit = Audit::new(created, SYSTEM_ACTOR.to_string(), None, None);
        assert_eq!(audit.created_by, "SYSTEM");
        assert_eq!(audit.updated_at, None);
        assert_eq!(audit.updated_by, None);
    }

    #[test]
    fn update_stamps_are_kept() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let audit = Audit::new(
            created,
            "alice".to_string(),
            Some(updated),
            Some("bob".to_string()),
        );
        assert_eq!(audit.updated_at, Some(updated));
        assert_eq!(audit.updated_by.as_deref(), Some("bob"));
    }
}
