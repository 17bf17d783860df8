use leptos::prelude::*;

/// Выпадающий фильтр; пустое значение означает "All"
#[component]
pub fn FilterSelect(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    /// (значение, подпись)
    options: Vec<(&'static str, &'static str)>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="filter-field">
            <label class="filter-field__label">{label}</label>
            <select
                class="form__select"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="" selected=move || value.get().is_empty()>"All"</option>
                {options.into_iter().map(|(v, text)| {
                    view! {
                        <option value=v selected=move || value.get() == v>{text}</option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
