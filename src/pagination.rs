use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// `?page=&size=` query; `page` is zero-based.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PageRequest {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(0).max(0)
    }

    pub fn size(&self) -> i64 {
        match self.size {
            Some(s) if s > 0 => s,
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    pub fn offset(&self) -> i64 {
        self.page().saturating_mul(self.size())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub max_page: i64,
    pub total_pages: i64,
    pub total: i64,
    pub last: bool,
    pub first: bool,
    pub visible: i64,
}

impl<T> Page<T> {
    pub fn new(req: PageRequest, items: Vec<T>, total: i64) -> Self {
        let page = req.page();
        let size = req.size();
        let total_pages = total / size + i64::from(total % size != 0);
        let max_page = (total_pages - 1).max(0);
        let visible = items.len() as i64;
        Self {
            items,
            page,
            size,
            max_page,
            total_pages,
            total,
            last: page >= max_page,
            first: page == 0,
            visible,
        }
    }
}
