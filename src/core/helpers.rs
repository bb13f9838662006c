use chrono::{DateTime, Utc};
use uuid::Uuid;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Compact age such as `42s`, `5m`, `3h` or `2d`. Future times read as `0s`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let s = (now - then).num_seconds().max(0);
    if s < 60 {
        return format!("{}s", s);
    }
    let m = s / 60;
    if m < 60 {
        return format!("{}m", m);
    }
    let h = m / 60;
    if h < 24 {
        return format!("{}h", h);
    }
    format!("{}d", h / 24)
}

/// Up to two upper-cased initials, `U` for an empty name.
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split(' ')
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase();
    if initials.is_empty() {
        "U".to_string()
    } else {
        initials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn time_ago_picks_the_largest_whole_unit() {
        let now = Utc::now();
        assert_eq!(time_ago(now - Duration::seconds(59), now), "59s");
        assert_eq!(time_ago(now - Duration::seconds(60), now), "1m");
        assert_eq!(time_ago(now - Duration::minutes(90), now), "1h");
        assert_eq!(time_ago(now - Duration::hours(49), now), "2d");
        assert_eq!(time_ago(now + Duration::hours(1), now), "0s");
    }

    #[test]
    fn initials_from_first_two_words() {
        assert_eq!(initials("ChefMia"), "C");
        assert_eq!(initials("art by lex"), "AB");
        assert_eq!(initials(""), "U");
    }
}
