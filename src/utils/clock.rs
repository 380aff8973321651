use chrono::Utc;
use chrono_tz::Asia::Jakarta;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Current time in the business time zone (Asia/Jakarta).
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().with_timezone(&Jakarta).fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_jakarta_offset() {
        // Jakarta has no daylight saving; always UTC+7.
        assert_eq!(now().offset().local_minus_utc(), 7 * 3600);
    }
}
