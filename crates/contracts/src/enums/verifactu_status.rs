use serde::{Deserialize, Serialize};

/// State of an invoice's Verifactu (AEAT) transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifactuStatus {
    NotSent,
    Pending,
    Accepted,
    AcceptedWithErrors,
    Rejected,
    Cancelled,
}

impl VerifactuStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            VerifactuStatus::NotSent => "Not sent",
            VerifactuStatus::Pending => "Pending",
            VerifactuStatus::Accepted => "Accepted",
            VerifactuStatus::AcceptedWithErrors => "Accepted with errors",
            VerifactuStatus::Rejected => "Rejected",
            VerifactuStatus::Cancelled => "Cancelled",
        }
    }

    /// An invoice can be (re)sent while AEAT has not accepted it
    pub fn can_send(&self) -> bool {
        matches!(self, VerifactuStatus::NotSent | VerifactuStatus::Rejected)
    }

    /// Only registered invoices can be cancelled at AEAT
    pub fn can_cancel(&self) -> bool {
        matches!(self, VerifactuStatus::Accepted | VerifactuStatus::AcceptedWithErrors)
    }
}

impl Default for VerifactuStatus {
    fn default() -> Self {
        VerifactuStatus::NotSent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        assert!(VerifactuStatus::NotSent.can_send());
        assert!(VerifactuStatus::Rejected.can_send());
        assert!(!VerifactuStatus::Accepted.can_send());
        assert!(VerifactuStatus::Accepted.can_cancel());
        assert!(!VerifactuStatus::Pending.can_cancel());
    }

    #[test]
    fn test_wire_format() {
        let s: VerifactuStatus = serde_json::from_str("\"accepted_with_errors\"").unwrap();
        assert_eq!(s, VerifactuStatus::AcceptedWithErrors);
    }
}
