// File: crates/star-core/tests/schedule.rs
// Purpose: Page planning under a request budget.

use star_core::schedule::total_pages;
use star_core::{plan_pages, SampleMode};

#[test]
fn small_total_fetches_every_page() {
    let plan = plan_pages(250, 100, 30);
    assert_eq!(plan.mode, SampleMode::Exact);
    assert_eq!(plan.pages, vec![1, 2, 3]);
    assert_eq!(plan.total_pages, 3);
}

#[test]
fn two_page_budget_picks_both_ends() {
    let plan = plan_pages(350, 100, 2);
    assert_eq!(plan.total_pages, 4);
    assert_eq!(plan.mode, SampleMode::Estimated);
    assert_eq!(plan.pages, vec![1, 4]);
}

#[test]
fn budget_of_one_fetches_first_page() {
    let plan = plan_pages(10_000, 100, 1);
    assert_eq!(plan.mode, SampleMode::Estimated);
    assert_eq!(plan.pages, vec![1]);

    // zero budget is treated as one
    assert_eq!(plan_pages(10_000, 100, 0).pages, vec![1]);
}

#[test]
fn plans_respect_budget_and_endpoints() {
    for total in [0u64, 1, 99, 100, 101, 2_999, 3_000, 3_001, 12_345, 400_000] {
        for budget in [1u32, 2, 3, 7, 30, 64] {
            let plan = plan_pages(total, 100, budget);
            let pages = total_pages(total, 100);
            assert!(plan.len() <= budget as usize, "total={total} budget={budget}: {:?}", plan.pages);
            assert!(plan.pages.windows(2).all(|w| w[0] < w[1]), "not strictly increasing: {:?}", plan.pages);
            if pages > 1 && budget > 1 {
                assert_eq!(plan.pages.first(), Some(&1));
                assert_eq!(plan.pages.last(), Some(&pages));
            }
            assert!(plan.pages.iter().all(|&p| p >= 1 && p <= pages.max(1)));
        }
    }
}

#[test]
fn page_count_rounds_up() {
    assert_eq!(total_pages(0, 100), 0);
    assert_eq!(total_pages(1, 100), 1);
    assert_eq!(total_pages(100, 100), 1);
    assert_eq!(total_pages(101, 100), 2);
    assert_eq!(total_pages(5, 0), 0);
}
