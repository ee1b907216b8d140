use time::OffsetDateTime;

/// Build timestamps stored in `cooked_information`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookedInfo {
    /// `YYYYMMDD`
    pub version_timestamp: String,
    /// Epoch seconds with one decimal.
    pub cooked_timestamp_utc: String,
    /// `YYYY-MM-DD HH:MM UTC`
    pub cooked_datetime_utc: String,
}

impl CookedInfo {
    pub fn now() -> Self {
        Self::at(OffsetDateTime::now_utc())
    }

    pub fn at(when: OffsetDateTime) -> Self {
        let t = when.to_offset(time::UtcOffset::UTC);
        let (year, month, day) = (t.year(), u8::from(t.month()), t.day());
        let seconds = t.unix_timestamp_nanos() as f64 / 1e9;
        Self {
            version_timestamp: format!("{year:04}{month:02}{day:02}"),
            cooked_timestamp_utc: format!("{seconds:.1}"),
            cooked_datetime_utc: format!(
                "{year:04}-{month:02}-{day:02} {:02}:{:02} UTC",
                t.hour(),
                t.minute()
            ),
        }
    }

    /// `(key, value)` rows in storage order.
    pub fn rows(&self) -> [(&'static str, &str); 3] {
        [
            ("version_timestamp", self.version_timestamp.as_str()),
            ("cooked_timestamp_utc", self.cooked_timestamp_utc.as_str()),
            ("cooked_datetime_utc", self.cooked_datetime_utc.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        // 2024-03-05 07:08:09.3 UTC
        let when = OffsetDateTime::from_unix_timestamp_nanos(1_709_622_489_300_000_000).unwrap();
        let info = CookedInfo::at(when);
        assert_eq!(info.version_timestamp, "20240305");
        assert_eq!(info.cooked_timestamp_utc, "1709622489.3");
        assert_eq!(info.cooked_datetime_utc, "2024-03-05 07:08 UTC");
    }

    #[test]
    fn test_offset_normalized_to_utc() {
        let when = OffsetDateTime::from_unix_timestamp(1_709_622_489)
            .unwrap()
            .to_offset(time::UtcOffset::from_hms(8, 0, 0).unwrap());
        let info = CookedInfo::at(when);
        assert_eq!(info.cooked_datetime_utc, "2024-03-05 07:08 UTC");
    }

    #[test]
    fn test_rows_order() {
        let info = CookedInfo::at(OffsetDateTime::UNIX_EPOCH);
        let keys: Vec<&str> = info.rows().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "version_timestamp",
                "cooked_timestamp_utc",
                "cooked_datetime_utc"
            ]
        );
        assert_eq!(info.rows()[0].1, "19700101");
        assert_eq!(info.rows()[1].1, "0.0");
    }
}
