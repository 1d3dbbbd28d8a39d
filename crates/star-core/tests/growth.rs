// File: crates/star-core/tests/growth.rs
// Purpose: Growth rates and spike flagging.

use chrono::NaiveDate;
use star_core::growth::{growth_rates, growth_series, spike_threshold, spikes, SPIKE_FLOOR};
use star_core::{analyze, Series, StarRecord, DEFAULT_SPIKE_MULTIPLIER};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn series(points: &[(NaiveDate, u64)]) -> Series {
    Series::new(points.iter().map(|&(d, c)| StarRecord::new(d, c)).collect()).unwrap()
}

#[test]
fn steady_growth_has_no_spikes() {
    let s = series(&[(day(2020, 1, 1), 0), (day(2020, 6, 1), 50), (day(2021, 1, 1), 500)]);
    let points = analyze(&s, 2.5);

    assert_eq!(points.len(), 2);
    assert!((points[0].growth_rate - 50.0 / 152.0).abs() < 1e-9);
    assert!((points[1].growth_rate - 450.0 / 214.0).abs() < 1e-9);
    assert!((spike_threshold(&points, 2.5) - 3.04).abs() < 0.01);
    assert_eq!(points.iter().map(|p| p.is_spike).collect::<Vec<_>>(), vec![false, false]);
}

#[test]
fn sudden_jump_is_flagged() {
    let d0 = day(2023, 1, 1);
    let s = series(&[
        (d0, 0),
        (d0 + chrono::Days::new(10), 10),
        (d0 + chrono::Days::new(20), 20),
        (d0 + chrono::Days::new(30), 30),
        (d0 + chrono::Days::new(31), 500),
    ]);
    let points = analyze(&s, DEFAULT_SPIKE_MULTIPLIER);
    let flagged: Vec<_> = spikes(&points).map(|p| p.date).collect();
    assert_eq!(flagged, vec![d0 + chrono::Days::new(31)]);
    assert_eq!(points[3].count, 500);
}

#[test]
fn rates_never_negative_and_spikes_clear_both_bars() {
    let s = series(&[
        (day(2022, 1, 1), 300),
        (day(2022, 1, 2), 100),
        (day(2022, 1, 3), 104),
        (day(2022, 2, 3), 110),
        (day(2022, 2, 4), 180),
    ]);
    for mult in [0.0, 0.5, 1.0, 2.5, 10.0] {
        let points = analyze(&s, mult);
        let threshold = spike_threshold(&points, mult);
        for p in &points {
            assert!(p.growth_rate >= 0.0);
            if p.is_spike {
                assert!(p.growth_rate > SPIKE_FLOOR && p.growth_rate > threshold);
            }
        }
    }
}

#[test]
fn floor_suppresses_tiny_rates() {
    // Mean is tiny, so only the absolute floor keeps the slow interval quiet.
    let s = series(&[(day(2022, 1, 1), 0), (day(2022, 12, 1), 1), (day(2023, 1, 1), 2)]);
    let points = analyze(&s, 0.1);
    assert!(points.iter().all(|p| !p.is_spike));
}

#[test]
fn single_record_has_no_intervals() {
    let s = series(&[(day(2024, 1, 1), 7)]);
    assert!(growth_rates(&s).is_empty());
    assert!(growth_series(&analyze(&s, 2.5)).is_none());
}

#[test]
fn growth_view_is_plottable() {
    let s = series(&[(day(2024, 1, 1), 0), (day(2024, 1, 11), 100), (day(2024, 1, 21), 150)]);
    let view = growth_series(&analyze(&s, 2.5)).unwrap();
    assert_eq!(view.records(), &[StarRecord::new(day(2024, 1, 11), 10), StarRecord::new(day(2024, 1, 21), 5)]);
}
