//! Pagination window calculation.

/// Number of page buttons shown around the current page.
const WINDOW_SIZE: u32 = 5;

/// Pages shown on each side of the current page.
const WINDOW_RADIUS: u32 = 2;

/// One entry of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    /// A selectable page number.
    Page(u32),
    /// Placeholder for one or more elided pages.
    Ellipsis,
}

/// Computes the pagination bar for `current_page` of `total_pages`.
///
/// - `total_pages == 0` yields an empty window.
/// - Up to five pages are listed in full.
/// - Otherwise the window is `current ± 2`, widened to five pages while
///   the current page is near the start. Page 1 and the last page are
///   always present, with an ellipsis wherever pages are skipped.
///
/// `current_page` is clamped into `1..=total_pages` first.
#[must_use]
pub fn compute_window(current_page: u32, total_pages: u32) -> Vec<PageEntry> {
    if total_pages == 0 {
        return Vec::new();
    }
    if total_pages <= WINDOW_SIZE {
        return (1..=total_pages).map(PageEntry::Page).collect();
    }

    let current = current_page.clamp(1, total_pages);
    let start = current.saturating_sub(WINDOW_RADIUS).max(1);
    let end = if current <= WINDOW_RADIUS.saturating_add(1) {
        WINDOW_SIZE.min(total_pages)
    } else {
        current.saturating_add(WINDOW_RADIUS).min(total_pages)
    };

    let mut entries = Vec::new();
    if start > 1 {
        entries.push(PageEntry::Page(1));
        if start > 2 {
            entries.push(PageEntry::Ellipsis);
        }
    }
    entries.extend((start..=end).map(PageEntry::Page));
    if end < total_pages {
        if end < total_pages.saturating_sub(1) {
            entries.push(PageEntry::Ellipsis);
        }
        entries.push(PageEntry::Page(total_pages));
    }
    entries
}

#[cfg(test)]
mod tests {
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use PageEntry::{Ellipsis, Page};

    #[test]
    fn test_zero_total_is_empty() {
        // Arrange & Act & Assert
        assert!(compute_window(1, 0).is_empty());
    }

    #[test]
    fn test_small_totals_list_every_page() {
        // Arrange & Act & Assert
        for total in 1..=5 {
            for current in 1..=total {
                let expected: Vec<PageEntry> = (1..=total).map(Page).collect();
                assert_eq!(compute_window(current, total), expected);
            }
        }
    }

    #[test]
    fn test_first_page_of_ten() {
        // Arrange & Act
        let window = compute_window(1, 10);

        // Assert
        assert_eq!(
            window,
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_last_page_of_five_hundred() {
        // Arrange & Act
        let window = compute_window(500, 500);

        // Assert
        assert_eq!(window, vec![Page(1), Ellipsis, Page(498), Page(499), Page(500)]);
    }

    #[test]
    fn test_middle_page() {
        // Arrange & Act
        let window = compute_window(50, 100);

        // Assert
        assert_eq!(
            window,
            vec![
                Page(1),
                Ellipsis,
                Page(48),
                Page(49),
                Page(50),
                Page(51),
                Page(52),
                Ellipsis,
                Page(100),
            ]
        );
    }

    #[test]
    fn test_no_ellipsis_for_adjacent_anchor() {
        // Arrange & Act: window 2..=6, last page 7 follows directly
        let window = compute_window(4, 7);

        // Assert
        assert_eq!(
            window,
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        // Arrange & Act & Assert
        assert_eq!(compute_window(0, 10), compute_window(1, 10));
        assert_eq!(compute_window(900, 500), compute_window(500, 500));
    }

    #[test]
    fn test_window_always_contains_anchors_and_current() {
        // Arrange & Act & Assert
        for total in 1..=40 {
            for current in 1..=total {
                let window = compute_window(current, total);
                assert!(window.contains(&Page(1)), "({current},{total})");
                assert!(window.contains(&Page(total)), "({current},{total})");
                assert!(window.contains(&Page(current)), "({current},{total})");
            }
        }
    }

    #[test]
    fn test_pages_are_strictly_increasing() {
        // Arrange & Act & Assert
        for total in 1..=40 {
            for current in 1..=total {
                let pages: Vec<u32> = compute_window(current, total)
                    .into_iter()
                    .filter_map(|e| match e {
                        Page(n) => Some(n),
                        Ellipsis => None,
                    })
                    .collect();
                assert!(pages.windows(2).all(|w| w[0] < w[1]), "({current},{total})");
            }
        }
    }
}
