//! Unit tests for local projection of server-side temporal values

#[cfg(test)]
mod temporal_tests {
    use graphwire::{
        wire::{DateTime, Time},
        DateTimeWrapper, DecodeError, TimeWrapper, TimezoneInfo,
    };

    fn time(hour: i8, minute: i8) -> Time {
        Time {
            hour,
            minute,
            sec: 0,
            microsec: 0,
        }
    }

    #[test]
    fn test_local_time_applies_offset() {
        let test_cases = vec![
            (time(14, 30), 3 * 3600, (17, 30)),
            (time(1, 0), -2 * 3600, (23, 0)),
            (time(23, 45), 30 * 60, (0, 15)),
            (time(9, 5), 0, (9, 5)),
        ];
        for (utc, offset, (hour, minute)) in test_cases {
            let wrapper = TimeWrapper::new(utc, TimezoneInfo::new(offset, "fixed"));
            let local = wrapper.local_time().unwrap();
            assert_eq!((local.hour, local.minute), (hour, minute), "offset {}", offset);
            assert_eq!(wrapper.raw_time(), &utc);
        }
    }

    #[test]
    fn test_local_time_with_zone_name() {
        let wrapper = TimeWrapper::new(time(12, 0), TimezoneInfo::default());
        let test_cases = vec![
            ("UTC", (12, 0)),
            ("+05:30", (17, 30)),
            ("UTC-03", (9, 0)),
            ("GMT+0100", (13, 0)),
        ];
        for (zone, (hour, minute)) in test_cases {
            let local = wrapper.local_time_with_zone_name(zone).unwrap();
            assert_eq!((local.hour, local.minute), (hour, minute), "zone {}", zone);
        }

        assert!(matches!(
            wrapper.local_time_with_zone_name("Mars/Olympus"),
            Err(DecodeError::UnsupportedValueType(_))
        ));
    }

    #[test]
    fn test_local_datetime_rolls_the_calendar() {
        let utc = DateTime {
            year: 2024,
            month: 2,
            day: 28,
            hour: 23,
            minute: 30,
            sec: 15,
            microsec: 42,
        };
        let wrapper = DateTimeWrapper::new(utc, TimezoneInfo::new(3600, "+01:00"));
        let local = wrapper.local_datetime().unwrap();
        assert_eq!((local.year, local.month, local.day), (2024, 2, 29));
        assert_eq!((local.hour, local.minute, local.sec, local.microsec), (0, 30, 15, 42));

        let west = wrapper.local_datetime_with_offset(-24 * 3600).unwrap();
        assert_eq!((west.month, west.day, west.hour), (2, 27, 23));
    }

    #[test]
    fn test_invalid_time_fields_are_rejected() {
        let wrapper = TimeWrapper::new(time(25, 0), TimezoneInfo::default());
        assert!(matches!(
            wrapper.local_time(),
            Err(DecodeError::UnsupportedValueType(_))
        ));
    }
}
