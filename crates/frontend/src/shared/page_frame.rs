//! PageFrame: standard root wrapper for every page rendered inside a tab.
//!
//! Guarantees two metadata attributes on the root DOM element:
//!   - `id`                 : `"{entity}--{category}"`, e.g. `"a001_dispute--list"`
//!   - `data-page-category` : one of the PAGE_CAT_* constants

use leptos::prelude::*;

/// List of records: table with filters/pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Detail view for a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Dashboard / reports view.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// System page (test report).
pub const PAGE_CAT_SYSTEM: &str = "system";

/// Root wrapper that sets standard metadata on every tab page.
#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`.
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants.
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
