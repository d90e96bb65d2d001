//! Page math for search results
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

pub const PAGE_SIZE: usize = 10;

/// One page of a result set, clamped to the pages that exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    pub pages: usize,
    pub total: usize,
}

impl Page {
    /// Clamp a requested page into `1..=pages`; `None` for an empty result set
    pub fn clamp(requested: i64, total: usize) -> Option<Self> {
        if total == 0 {
            return None;
        }
        let pages = total.div_ceil(PAGE_SIZE);
        let number = usize::try_from(requested.max(1)).unwrap_or(1).min(pages);
        Some(Self {
            number,
            pages,
            total,
        })
    }

    /// Index of the first item on this page
    pub fn start(&self) -> usize {
        (self.number - 1) * PAGE_SIZE
    }

    /// Index one past the last item on this page
    pub fn end(&self) -> usize {
        (self.start() + PAGE_SIZE).min(self.total)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end().min(items.len());
        items.get(self.start()..end).unwrap_or(&[])
    }

    pub fn is_first(&self) -> bool {
        self.number == 1
    }

    pub fn is_last(&self) -> bool {
        self.number == self.pages
    }

    /// `11-20 of **23**`
    pub fn range_label(&self) -> String {
        format!("{}-{} of **{}**", self.start() + 1, self.end(), self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_of_23() {
        let page = Page::clamp(1, 23).unwrap();
        assert_eq!(page.pages, 3);
        assert_eq!(page.range_label(), "1-10 of **23**");
        assert!(page.is_first());
        assert!(!page.is_last());
    }

    #[test]
    fn test_last_page_of_23() {
        let page = Page::clamp(3, 23).unwrap();
        assert_eq!(page.range_label(), "21-23 of **23**");
        assert!(!page.is_first());
        assert!(page.is_last());
    }

    #[test]
    fn test_clamps_past_the_end() {
        assert_eq!(Page::clamp(8, 23).unwrap().number, 3);
        assert_eq!(Page::clamp(i64::MAX, 23).unwrap().number, 3);
    }

    #[test]
    fn test_clamps_before_the_start() {
        assert_eq!(Page::clamp(0, 23).unwrap().number, 1);
        assert_eq!(Page::clamp(-4, 23).unwrap().number, 1);
    }

    #[test]
    fn test_single_page_is_first_and_last() {
        let page = Page::clamp(1, 10).unwrap();
        assert_eq!(page.pages, 1);
        assert!(page.is_first() && page.is_last());
        assert_eq!(page.range_label(), "1-10 of **10**");
    }

    #[test]
    fn test_empty_has_no_pages() {
        assert!(Page::clamp(1, 0).is_none());
    }

    #[test]
    fn test_slice() {
        let items: Vec<u32> = (1..=23).collect();
        assert_eq!(Page::clamp(3, 23).unwrap().slice(&items), &[21, 22, 23]);
        assert_eq!(Page::clamp(2, 23).unwrap().slice(&items).len(), 10);
    }
}
