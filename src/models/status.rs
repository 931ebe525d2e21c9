use serde::{Deserialize, Serialize};
use std::fmt;

/// Attendance marker stored in the `Status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Present,      // P
    HalfDayLeave, // HL
    Leave,        // L
    WeekOff,      // WO
    Holiday,      // H
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Present,
        Status::HalfDayLeave,
        Status::Leave,
        Status::WeekOff,
        Status::Holiday,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Status::Present => "P",
            Status::HalfDayLeave => "HL",
            Status::Leave => "L",
            Status::WeekOff => "WO",
            Status::Holiday => "H",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Present => "Present",
            Status::HalfDayLeave => "Half Day Leave",
            Status::Leave => "Leave",
            Status::WeekOff => "Week Off",
            Status::Holiday => "Holiday",
        }
    }

    /// Convert sheet string → enum
    pub fn from_sheet_str(s: &str) -> Option<Self> {
        match s {
            "P" => Some(Status::Present),
            "HL" => Some(Status::HalfDayLeave),
            "L" => Some(Status::Leave),
            "WO" => Some(Status::WeekOff),
            "H" => Some(Status::Holiday),
            _ => None,
        }
    }

    /// Helper: convert input code from CLI or tool calls (any case, padded)
    pub fn from_code(code: &str) -> Option<Self> {
        Status::from_sheet_str(&code.trim().to_uppercase())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
