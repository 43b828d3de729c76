use super::schema::Record;

/// Where a requested page lands once clamped against the collection size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub total_pages: i64,
    pub page_size: i64,
    pub offset: i64,
}

impl PageWindow {
    /// Clamp `requested` into `[1, total_pages]`.
    ///
    /// An empty collection has zero pages; the window is then page 1 at
    /// offset 0, which fetches no rows.
    pub fn compute(requested: i64, count: i64, page_size: i64) -> Self {
        let count = count.max(0);
        let total_pages = (count + page_size - 1) / page_size;
        let page = requested.min(total_pages).max(1);
        Self {
            page,
            total_pages,
            page_size,
            offset: (page - 1) * page_size,
        }
    }
}

/// One fetched page of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub rows: Vec<Record>,
    pub page: i64,
    pub total_pages: i64,
    pub page_size: i64,
    pub count: i64,
}

/// Leading-integer parse: optional whitespace and sign, then digits; any
/// trailing text is ignored. `None` when no digit leads the string.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// The page a client asked for: absent, unparseable or zero means page 1.
pub fn requested_page(raw: Option<&str>) -> i64 {
    match raw.and_then(parse_leading_int) {
        Some(0) | None => 1,
        Some(page) => page,
    }
}
