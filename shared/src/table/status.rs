//! Table status and order state

use crate::error::ValidationError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Table Status
// ============================================================================

/// Service-cycle stage of a table
///
/// `idle → cooking → prepared → billing → payment → idle`
///
/// Hosts newer than this client may report stages it does not know about;
/// those are kept verbatim in [`TableStatus::Other`] instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub enum TableStatus {
    #[default]
    Idle,
    Cooking,
    Prepared,
    Billing,
    Payment,
    /// Unrecognised status string
    Other(String),
}

impl TableStatus {
    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => "idle",
            Self::Cooking => "cooking",
            Self::Prepared => "prepared",
            Self::Billing => "billing",
            Self::Payment => "payment",
            Self::Other(raw) => raw,
        }
    }

    /// Billing or payment stage (the bill is on the table)
    pub fn is_billing_stage(&self) -> bool {
        matches!(self, Self::Billing | Self::Payment)
    }
}

impl From<&str> for TableStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "idle" => Self::Idle,
            "cooking" => Self::Cooking,
            "prepared" => Self::Prepared,
            "billing" => Self::Billing,
            "payment" => Self::Payment,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for TableStatus {
    fn from(raw: String) -> Self {
        match Self::from(raw.as_str()) {
            Self::Other(_) => Self::Other(raw),
            known => known,
        }
    }
}

impl From<TableStatus> for String {
    fn from(status: TableStatus) -> Self {
        match status {
            TableStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Order State
// ============================================================================

/// Approval stage of the order attached to a table
///
/// Closed set. The host also writes `declined` after a decline (the cycle
/// is over, so it reads as `none`) and `prepared` once the kitchen is done
/// (the order is still the accepted one, so it reads as `accepted`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    #[default]
    None,
    Pending,
    Accepted,
}

impl OrderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }

    /// An order is attached to the table
    pub fn has_order(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl FromStr for OrderState {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "none" | "declined" => Ok(Self::None),
            "pending" => Ok(Self::Pending),
            "accepted" | "prepared" => Ok(Self::Accepted),
            other => Err(ValidationError::UnknownOrderState(other.to_string())),
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_parse() {
        assert_eq!(TableStatus::from("idle"), TableStatus::Idle);
        assert_eq!(TableStatus::from("cooking"), TableStatus::Cooking);
        assert_eq!(TableStatus::from("prepared"), TableStatus::Prepared);
        assert_eq!(TableStatus::from("billing"), TableStatus::Billing);
        assert_eq!(TableStatus::from("payment"), TableStatus::Payment);
    }

    #[test]
    fn test_unknown_status_is_kept_verbatim() {
        let status = TableStatus::from("cleaning".to_string());
        assert_eq!(status, TableStatus::Other("cleaning".to_string()));
        assert_eq!(status.as_str(), "cleaning");
        assert_eq!(String::from(status), "cleaning");
    }

    #[test]
    fn test_billing_stage() {
        assert!(TableStatus::Billing.is_billing_stage());
        assert!(TableStatus::Payment.is_billing_stage());
        assert!(!TableStatus::Prepared.is_billing_stage());
        assert!(!TableStatus::Other("billing ".into()).is_billing_stage());
    }

    #[test]
    fn test_order_state_host_markers() {
        assert_eq!("declined".parse::<OrderState>().unwrap(), OrderState::None);
        assert_eq!("prepared".parse::<OrderState>().unwrap(), OrderState::Accepted);
        assert_eq!("pending".parse::<OrderState>().unwrap(), OrderState::Pending);
    }

    #[test]
    fn test_order_state_rejects_unknown() {
        let err = "cancelled".parse::<OrderState>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownOrderState("cancelled".into()));
    }

    #[test]
    fn test_status_serializes_as_wire_string() {
        let json = serde_json::to_string(&TableStatus::Prepared).unwrap();
        assert_eq!(json, "\"prepared\"");
        let json = serde_json::to_string(&OrderState::Accepted).unwrap();
        assert_eq!(json, "\"accepted\"");
    }
}
