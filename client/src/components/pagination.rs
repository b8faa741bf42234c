//! Previous/next pager for list pages.

use leptos::prelude::*;

/// Pager bound to a 1-based `page` signal.
///
/// Hidden when everything fits on one page.
#[component]
pub fn Pagination(page: RwSignal<u32>, total_pages: Signal<u64>) -> impl IntoView {
    let at_first = move || page.get() <= 1;
    let at_last = move || u64::from(page.get()) >= total_pages.get();

    view! {
        <Show when=move || { total_pages.get() > 1 }>
            <div class="pagination">
                <button
                    class="btn btn--ghost"
                    disabled=at_first
                    on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                >
                    "Previous"
                </button>
                <span class="pagination__label">
                    {move || format!("Page {} of {}", page.get(), total_pages.get())}
                </span>
                <button class="btn btn--ghost" disabled=at_last on:click=move |_| page.update(|p| *p += 1)>
                    "Next"
                </button>
            </div>
        </Show>
    }
}
