use chrono::{DateTime, Duration, Utc};

/// Reference time for rendering: either absolute or an offset from the
/// newest ingested sample (`T`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeExpr {
    Relative(Duration),
    Absolute(DateTime<Utc>),
}

impl TimeExpr {
    pub fn resolve(&self, newest_sample: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            TimeExpr::Relative(d) => newest_sample + *d,
            TimeExpr::Absolute(dt) => *dt,
        }
    }
}

/// Accepts `T`, `T+10m`, `T-5s` or an RFC 3339 timestamp.
pub fn parse_time(s: &str) -> Result<TimeExpr, String> {
    let s = s.trim();

    if s.to_lowercase().starts_with('t') {
        let rest = s[1..].trim();
        if rest.is_empty() {
            return Ok(TimeExpr::Relative(Duration::zero()));
        }
        let (neg, rest) = match rest.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, rest.strip_prefix('+').unwrap_or(rest)),
        };
        let dur = parse_duration(rest)?;
        return Ok(TimeExpr::Relative(if neg { -dur } else { dur }));
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| TimeExpr::Absolute(dt.with_timezone(&Utc)))
        .map_err(|e| e.to_string())
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim())
        .map_err(|e| e.to_string())
        .and_then(|d| Duration::from_std(d).map_err(|e| e.to_string()))
}
