use super::entry::Entry;
use super::status::Status;

/// Per-status counters over a set of timesheet rows.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MonthSummary {
    pub present: u32,
    pub half_day_leave: u32,
    pub leave: u32,
    pub week_off: u32,
    pub holiday: u32,
}

impl MonthSummary {
    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut s = MonthSummary::default();
        for e in entries {
            match e.status {
                Status::Present => s.present += 1,
                Status::HalfDayLeave => s.half_day_leave += 1,
                Status::Leave => s.leave += 1,
                Status::WeekOff => s.week_off += 1,
                Status::Holiday => s.holiday += 1,
            }
        }
        s
    }

    pub fn count(&self, status: Status) -> u32 {
        match status {
            Status::Present => self.present,
            Status::HalfDayLeave => self.half_day_leave,
            Status::Leave => self.leave,
            Status::WeekOff => self.week_off,
            Status::Holiday => self.holiday,
        }
    }

    pub fn total(&self) -> u32 {
        Status::ALL.iter().map(|s| self.count(*s)).sum()
    }

    /// (status, count) in the fixed status order.
    pub fn per_status(&self) -> Vec<(Status, u32)> {
        Status::ALL.iter().map(|s| (*s, self.count(*s))).collect()
    }
}
