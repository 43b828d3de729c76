use serde::Serialize;
use serde_json::{Map, Value};

use crate::database::models::Resource;
use crate::database::Page;

/// Navigation links for a page: next/last when a later page exists,
/// prev/first when an earlier one does.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_page: Option<String>,
}

impl PageLinks {
    pub fn for_page(base: &str, page: i64, total_pages: i64) -> Self {
        let mut links = Self::default();
        if page < total_pages {
            links.next_page = Some(format!("{}?page={}", base, page + 1));
            links.last_page = Some(format!("{}?page={}", base, total_pages));
        }
        if page > 1 {
            links.prev_page = Some(format!("{}?page={}", base, page - 1));
            links.first_page = Some(format!("{}?page=1", base));
        }
        links
    }
}

/// `{ <resource>: rows, page, totalPages, pageSize, count, links }`
pub fn page_envelope(resource: &Resource, page: Page) -> Value {
    let links = PageLinks::for_page(&resource.path(), page.page, page.total_pages);

    let mut body = Map::new();
    body.insert(
        resource.name.to_string(),
        Value::Array(page.rows.into_iter().map(Value::Object).collect()),
    );
    body.insert("page".into(), page.page.into());
    body.insert("totalPages".into(), page.total_pages.into());
    body.insert("pageSize".into(), page.page_size.into());
    body.insert("count".into(), page.count.into());
    body.insert("links".into(), serde_json::to_value(links).unwrap_or_default());
    Value::Object(body)
}

/// `/<resource>/<id>` for an id as given by the client or the store.
pub fn record_link(resource: &Resource, id: &Value) -> String {
    let id = match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    format!("{}/{}", resource.path(), id)
}
