use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};
use tracing::warn;

/// Wall-clock time in the server's local zone, without an offset.
///
/// Falls back to UTC when the local reading cannot be represented.
pub fn local_now() -> PrimitiveDateTime {
    let local = Local::now().naive_local();
    naive_to_primitive(local).unwrap_or_else(|| {
        warn!(
            target = "masthead::clock",
            local = %local,
            "local clock reading out of range; stamping in UTC"
        );
        let utc = OffsetDateTime::now_utc();
        PrimitiveDateTime::new(utc.date(), utc.time())
    })
}

pub fn naive_to_primitive(naive: NaiveDateTime) -> Option<PrimitiveDateTime> {
    let month = Month::try_from(u8::try_from(naive.month()).ok()?).ok()?;
    let day = u8::try_from(naive.day()).ok()?;
    let date = Date::from_calendar_date(naive.year(), month, day).ok()?;

    let hour = u8::try_from(naive.hour()).ok()?;
    let minute = u8::try_from(naive.minute()).ok()?;
    let second = u8::try_from(naive.second()).ok()?;
    let time = Time::from_hms(hour, minute, second).ok()?;

    Some(PrimitiveDateTime::new(date, time))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn converts_naive_chrono_reading() {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 5)
            .and_then(|date| date.and_hms_opt(15, 45, 9))
            .expect("valid naive datetime");

        assert_eq!(
            naive_to_primitive(naive),
            Some(datetime!(2024-01-05 15:45:09))
        );
    }

    #[test]
    fn leap_second_is_truncated() {
        let naive = NaiveDate::from_ymd_opt(2016, 12, 31)
            .and_then(|date| date.and_hms_milli_opt(23, 59, 59, 1_500))
            .expect("leap second representation");

        assert_eq!(
            naive_to_primitive(naive),
            Some(datetime!(2016-12-31 23:59:59))
        );
    }
}
