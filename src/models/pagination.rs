// src/models/pagination.rs

use serde::Serialize;

/// Page-slice envelope returned by the listing endpoints.
///
/// Link building keeps any extra query pairs (the search filter, for one)
/// attached to the previous/next URLs, so a filtered listing stays filtered
/// while paging through it.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub last_page: i64,
    pub next_page_url: Option<String>,
    pub prev_page_url: Option<String>,
}

impl<T> Paginated<T> {
    pub fn new(
        data: Vec<T>,
        total: i64,
        page: i64,
        per_page: i64,
        base_path: &str,
        extra: &[(&str, String)],
    ) -> Self {
        let last_page = if total == 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };

        let link = |p: i64| {
            let mut url = format!("{}?page={}", base_path, p);
            for (key, value) in extra {
                url.push_str(&format!("&{}={}", key, value));
            }
            url
        };

        let next_page_url = (page < last_page).then(|| link(page + 1));
        let prev_page_url = (page > 1).then(|| link(page - 1));

        Self {
            data,
            current_page: page,
            per_page,
            total,
            last_page,
            next_page_url,
            prev_page_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_has_no_prev() {
        let page = Paginated::new(vec![1, 2, 3, 4, 5], 12, 1, 5, "/api/exam-sessions", &[]);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.prev_page_url, None);
        assert_eq!(
            page.next_page_url.as_deref(),
            Some("/api/exam-sessions?page=2")
        );
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Paginated::new(vec![11, 12], 12, 3, 5, "/api/exam-sessions", &[]);
        assert_eq!(page.next_page_url, None);
        assert_eq!(
            page.prev_page_url.as_deref(),
            Some("/api/exam-sessions?page=2")
        );
    }

    #[test]
    fn links_preserve_filter() {
        let extra = [("q", "Math".to_string())];
        let page = Paginated::new(vec![1], 10, 2, 5, "/api/exam-sessions", &extra);
        assert_eq!(
            page.next_page_url.as_deref(),
            None,
            "page 2 of 10 items at 5 per page is the last page"
        );
        assert_eq!(
            page.prev_page_url.as_deref(),
            Some("/api/exam-sessions?page=1&q=Math")
        );
    }

    #[test]
    fn empty_result_is_a_single_page() {
        let page: Paginated<i64> = Paginated::new(vec![], 0, 1, 5, "/x", &[]);
        assert_eq!(page.last_page, 1);
        assert_eq!(page.next_page_url, None);
        assert_eq!(page.prev_page_url, None);
    }
}
