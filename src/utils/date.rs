use chrono::{Datelike, Duration, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// English month name for 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// Month number from an English name or three-letter abbreviation.
pub fn month_from_name(name: &str) -> Option<u32> {
    let n = name.trim().to_lowercase();
    if n.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|m| {
            let m = m.to_lowercase();
            m == n || (n.len() == 3 && m.starts_with(&n))
        })
        .map(|i| i as u32 + 1)
}

/// Resolve a month argument into (year, month).
///
/// Accepted: `YYYY-MM`, a month name (`july`, `Jul`) or a month number; the
/// last two take the year from `reference`.
pub fn parse_month(s: &str, reference: NaiveDate) -> Option<(i32, u32)> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Some((d.year(), d.month()));
    }

    if let Ok(m) = s.parse::<u32>() {
        return (1..=12).contains(&m).then_some((reference.year(), m));
    }

    month_from_name(s).map(|m| (reference.year(), m))
}

pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1).and_then(|d| d.pred_opt())
}

/// Monday..Sunday of the week containing `d`.
pub fn week_bounds(d: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = d.weekday().num_days_from_monday() as i64;
    let start = d - Duration::days(offset);
    (start, start + Duration::days(6))
}

/// Resolve a single period token into inclusive bounds.
fn bounds_of(p: &str, reference: NaiveDate) -> Result<(NaiveDate, NaiveDate), String> {
    match p.to_lowercase().as_str() {
        "today" => return Ok((reference, reference)),
        "week" => return Ok(week_bounds(reference)),
        "month" => {
            return month_bounds(reference.year(), reference.month())
                .ok_or_else(|| format!("Invalid period: {p}"));
        }
        _ => {}
    }

    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(dm) = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d") {
        return month_bounds(dm.year(), dm.month()).ok_or_else(|| format!("Invalid period: {p}"));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
        && let (Some(s), Some(e)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok((s, e));
    }

    Err(format!("Invalid period: {p}"))
}

fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        first_day_of_month(year, month)?,
        last_day_of_month(year, month)?,
    ))
}

/// Resolve a period expression into inclusive bounds.
///
/// - `today`, `week`, `month` (relative to `reference`)
/// - `YYYY-MM-DD`, `YYYY-MM`, `YYYY`
/// - `A:B` with any two of the above
pub fn period_bounds(p: &str, reference: NaiveDate) -> Result<(NaiveDate, NaiveDate), String> {
    let p = p.trim();

    if let Some((a, b)) = p.split_once(':') {
        let (start, _) = bounds_of(a, reference)?;
        let (_, end) = bounds_of(b, reference)?;
        if start > end {
            return Err(format!("Invalid period: {p} (start after end)"));
        }
        return Ok((start, end));
    }

    bounds_of(p, reference)
}
