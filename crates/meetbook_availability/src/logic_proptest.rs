#[cfg(test)]
mod tests {
    use crate::logic::{AvailabilityEngine, AvailabilityPolicy};
    use chrono::{Duration, NaiveDate, NaiveTime};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Helper function to build a date from a day offset relative to 2020-01-01
    fn date_from_offset(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
    }

    // Helper function to build a policy with a whole-hour working window
    fn policy(start_hour: u32, end_hour: u32, weekday: f64, weekend: f64, slot: f64) -> AvailabilityPolicy {
        AvailabilityPolicy::new(
            NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
            weekday,
            weekend,
            slot,
        )
        .unwrap()
    }

    proptest! {
        // Test that every offered slot lies inside the working window
        #[test]
        fn test_slots_within_working_hours(
            day_offset in 0..3650i64,
            start_hour in 0..12u32,
            end_hour in 13..=23u32,
            slot_p in 0.0..=1.0f64,
            seed in any::<u64>(),
        ) {
            let policy = policy(start_hour, end_hour, 0.7, 0.3, slot_p);
            let engine = AvailabilityEngine::new(policy.clone());
            let slots = engine.generate_time_slots(date_from_offset(day_offset), &mut StdRng::seed_from_u64(seed));

            for slot in &slots {
                prop_assert!(slot.start >= policy.work_start());
                prop_assert!(slot.end <= policy.work_end());
                prop_assert_eq!(slot.duration().num_minutes(), 60);
            }
        }

        // Test that slots are strictly ordered and never overlap
        #[test]
        fn test_slots_sorted_and_disjoint(
            day_offset in 0..3650i64,
            seed in any::<u64>(),
        ) {
            let engine = AvailabilityEngine::default();
            let slots = engine.generate_time_slots(date_from_offset(day_offset), &mut StdRng::seed_from_u64(seed));

            for pair in slots.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
        }

        // Test that the date list is consecutive and exactly as long as the window
        #[test]
        fn test_dates_consecutive(
            day_offset in 0..3650i64,
            window in 0..120u32,
            weekday_p in 0.0..=1.0f64,
            weekend_p in 0.0..=1.0f64,
            seed in any::<u64>(),
        ) {
            let engine = AvailabilityEngine::new(policy(9, 17, weekday_p, weekend_p, 0.7));
            let today = date_from_offset(day_offset);
            let dates = engine.generate_available_dates(today, window, &mut StdRng::seed_from_u64(seed));

            prop_assert_eq!(dates.len(), window as usize);
            for (i, info) in dates.iter().enumerate() {
                prop_assert_eq!(info.date, today + Duration::days(i as i64));
            }
        }

        // Test that weekends never produce slots, whatever the policy says
        #[test]
        fn test_weekends_never_have_slots(
            weeks in 0..520i64,
            sunday in any::<bool>(),
            slot_p in 0.0..=1.0f64,
            seed in any::<u64>(),
        ) {
            // 2020-01-04 is a Saturday.
            let saturday = NaiveDate::from_ymd_opt(2020, 1, 4).unwrap() + Duration::weeks(weeks);
            let day = if sunday { saturday + Duration::days(1) } else { saturday };
            let engine = AvailabilityEngine::new(policy(9, 17, 1.0, 1.0, slot_p));

            prop_assert!(engine.generate_time_slots(day, &mut StdRng::seed_from_u64(seed)).is_empty());
        }
    }
}
