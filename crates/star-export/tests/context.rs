// File: crates/star-export/tests/context.rs
// Purpose: Progress reporting through a bounded channel nobody is draining.

use star_export::ExportContext;

#[test]
fn final_progress_survives_a_full_channel() {
    let (mut ctx, progress) = ExportContext::with_progress(2);
    for pct in (10..=100).step_by(10) {
        ctx.report(pct);
    }
    let seen: Vec<u8> = progress.try_iter().collect();
    assert_eq!(seen, vec![20, 100]);
    assert_eq!(ctx.last_reported(), Some(100));
}

#[test]
fn intermediate_values_are_dropped_and_never_go_backwards() {
    let (mut ctx, progress) = ExportContext::with_progress(3);
    for pct in [5, 40, 30, 60, 70, 250] {
        ctx.report(pct);
    }
    let seen: Vec<u8> = progress.try_iter().collect();
    assert_eq!(seen, vec![40, 40, 100]);
}

#[test]
fn silent_context_still_tracks_the_last_value() {
    let mut ctx = ExportContext::silent();
    ctx.report(30);
    ctx.report(10);
    assert_eq!(ctx.last_reported(), Some(30));
}
