//! Attendance registry metrics.

use metrics::counter;

/// How a registration attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    AlreadyRegistered,
    CapacityFull,
    /// Bad input or an unknown event/participant
    Rejected,
    /// Durable store failure
    Failed,
}

impl RegistrationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::AlreadyRegistered => "already_registered",
            Self::CapacityFull => "capacity_full",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }
}

pub struct AttendanceMetrics;

impl AttendanceMetrics {
    pub fn record_registration(outcome: RegistrationOutcome) {
        counter!("attendance_registrations_total", "outcome" => outcome.as_str()).increment(1);
    }

    pub fn record_roster_removed() {
        counter!("attendance_rosters_removed_total").increment(1);
    }
}
