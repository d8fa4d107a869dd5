use chrono::NaiveTime;

/// Parses a session slot such as `10:00 AM - 11:30 AM` and checks that it
/// ends after it starts.
pub fn parse_time_range(value: &str) -> Result<(NaiveTime, NaiveTime), String> {
    let (start, end) = value
        .split_once('-')
        .ok_or_else(|| "Time must look like 10:00 AM - 11:00 AM".to_string())?;
    let start = parse_clock(start)?;
    let end = parse_clock(end)?;
    if end <= start {
        return Err("End time must be after start time".to_string());
    }
    Ok((start, end))
}

fn parse_clock(value: &str) -> Result<NaiveTime, String> {
    let value = value.trim().to_ascii_uppercase();
    NaiveTime::parse_from_str(&value, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(&value, "%H:%M"))
        .map_err(|_| format!("'{value}' is not a valid time"))
}

pub fn format_time_range(start: NaiveTime, end: NaiveTime) -> String {
    format!("{} - {}", start.format("%I:%M %p"), end.format("%I:%M %p"))
}
