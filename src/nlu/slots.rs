use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::SlotSet;

static BK_REF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(BK[-_]?[\w-]+)\b").unwrap());
static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    // Triggers are case-insensitive; the captured name is a run of
    // capitalized words, so "for Vaishak S from BOM" stops before "from".
    Regex::new(r"\b(?i:name is|this is|i am|passenger is|for)\b\s+([A-Z][A-Za-z]*(?:\s+[A-Z][A-Za-z]*)*)")
        .unwrap()
});
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2}|\d{1,2}/\d{1,2}/\d{4}|\d{1,2}-\d{1,2}-\d{4})").unwrap());
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{1,2}:\d{2}(?::\d{2})?\s*(?:am|pm)?)").unwrap());
static IATA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z]{3})\b").unwrap());
static FROM_TO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)from\s+([A-Za-z0-9\s,]+?)\s+(?:to|->|-)\s+([A-Za-z0-9\s,]+)").unwrap()
});

/// Pattern-based slot extraction. Pure and total: a slot with no match stays
/// empty, there is no failure mode.
pub fn extract(text: &str) -> SlotSet {
    let text = text.trim();
    let mut slots = SlotSet::default();

    if let Some(caps) = BK_REF_RE.captures(text) {
        slots.booking_reference = caps[1].to_string();
    }

    if let Some(caps) = NAME_RE.captures(text) {
        let name: String = caps[1].chars().take(40).collect();
        slots.passenger_name = name.trim().to_string();
    }

    if let Some(caps) = DATE_RE.captures(text) {
        slots.date = normalize_date(&caps[1]);
    }

    if let Some(caps) = TIME_RE.captures(text) {
        slots.time = normalize_time(&caps[1]);
    }

    let mut codes: Vec<&str> = Vec::new();
    for caps in IATA_RE.captures_iter(text) {
        let code = caps.get(1).unwrap().as_str();
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    if codes.len() >= 2 {
        slots.origin = codes[0].to_string();
        slots.destination = codes[1].to_string();
    } else if let Some(caps) = FROM_TO_RE.captures(text) {
        slots.origin = before_comma(&caps[1]);
        slots.destination = before_comma(&caps[2]);
    }

    slots
}

fn before_comma(s: &str) -> String {
    s.trim().split(',').next().unwrap_or("").trim().to_string()
}

/// Reparses D/M/YYYY and D-M-YYYY into ISO, interpreting the first component
/// as the day. If the parts do not form a real date the raw match is kept.
fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() == 10 && raw.as_bytes()[4] == b'-' {
        // already YYYY-MM-DD
        return raw.to_string();
    }

    let parts: Vec<&str> = raw.split(['-', '/']).collect();
    if parts.len() == 3 {
        let (y, m, d) = if parts[0].len() == 4 {
            (parts[0], parts[1], parts[2])
        } else {
            (parts[2], parts[1], parts[0])
        };
        if let (Ok(y), Ok(m), Ok(d)) = (y.parse(), m.parse(), d.parse()) {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                return date.format("%Y-%m-%d").to_string();
            }
        }
    }
    raw.to_string()
}

/// Normalizes to zero-padded 24-hour HH:MM; 12-hour forms are converted,
/// anything unparsable is kept verbatim.
fn normalize_time(raw: &str) -> String {
    let t: String = raw.trim().to_lowercase().split_whitespace().collect();

    if t.ends_with("am") || t.ends_with("pm") {
        return twelve_hour(&t).unwrap_or_else(|| raw.to_string());
    }

    let mut parts = t.split(':');
    match (
        parts.next().and_then(|p| p.parse::<u32>().ok()),
        parts.next().and_then(|p| p.parse::<u32>().ok()),
    ) {
        (Some(hh), Some(mm)) => format!("{hh:02}:{mm:02}"),
        _ => raw.to_string(),
    }
}

fn twelve_hour(t: &str) -> Option<String> {
    let pm = t.ends_with("pm");
    let body = &t[..t.len() - 2];
    let (h, m) = body.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if !(1..=12).contains(&h) || m > 59 {
        return None;
    }
    let h = match (pm, h) {
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, 12) => 0,
        (false, h) => h,
    };
    Some(format!("{h:02}:{m:02}"))
}
