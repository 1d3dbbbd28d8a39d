// File: crates/star-core/src/schedule.rs
// Summary: Page-request planning under a fixed request budget.

use crate::types::SampleMode;

/// Ordered list of 1-based page indices to request, plus the reconstruction mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagePlan {
    pub pages: Vec<u32>,
    pub mode: SampleMode,
    pub total_pages: u32,
}

impl PagePlan {
    pub fn len(&self) -> usize { self.pages.len() }
    pub fn is_empty(&self) -> bool { self.pages.is_empty() }
}

/// `ceil(total_count / page_size)`; zero page size plans nothing.
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 { return 0; }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Decide which pages to fetch.
///
/// When every page fits in `budget` the plan is `1..=total_pages` (exact mode).
/// Otherwise `budget` indices are spread evenly with
/// `page(i) = floor(i / (budget - 1) * (total_pages - 1)) + 1`, which always
/// includes the first and the last page. Duplicates are removed; because both
/// endpoints are distinct whenever `total_pages > 1`, deduplication never
/// leaves fewer than two pages for a budget of two or more.
pub fn plan_pages(total_count: u64, page_size: u32, budget: u32) -> PagePlan {
    let budget = budget.max(1);
    let total = total_pages(total_count, page_size);

    if total <= budget {
        tracing::debug!(total_pages = total, budget, "planning exact fetch");
        return PagePlan { pages: (1..=total).collect(), mode: SampleMode::Exact, total_pages: total };
    }

    let pages = if budget == 1 {
        vec![1]
    } else {
        let span = f64::from(total - 1);
        let steps = f64::from(budget - 1);
        let mut pages: Vec<u32> = (0..budget)
            .map(|i| ((f64::from(i) / steps) * span).floor() as u32 + 1)
            .collect();
        // Monotone in i, so adjacent duplicates are the only kind.
        pages.dedup();
        pages
    };

    tracing::debug!(total_pages = total, budget, planned = pages.len(), "planning sampled fetch");
    PagePlan { pages, mode: SampleMode::Estimated, total_pages: total }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_plans_nothing() {
        let plan = plan_pages(0, 100, 30);
        assert!(plan.is_empty());
        assert_eq!(plan.mode, SampleMode::Exact);
    }

    #[test]
    fn last_index_never_overshoots() {
        for total in [31u64 * 100, 1_000 * 100, 4_567 * 100 + 3] {
            let plan = plan_pages(total, 100, 30);
            assert_eq!(*plan.pages.last().unwrap(), plan.total_pages);
        }
    }
}
