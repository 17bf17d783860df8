use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;

/// Ошибка загрузки. Сетевые ошибки, таймаут и 5xx показываются общим
/// текстом с кнопкой повтора; 4xx выводятся как есть.
#[component]
pub fn ErrorBanner(
    #[prop(into)] error: Signal<Option<ApiError>>,
    on_retry: Callback<()>,
) -> impl IntoView {
    move || {
        error.get().map(|err| {
            let retryable = err.is_retryable();
            view! {
                <div class="alert alert--error">
                    <span>{err.user_message()}</span>
                    {retryable.then(|| view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| on_retry.run(())
                        >
                            {icon("refresh")}
                            " Retry"
                        </Button>
                    })}
                </div>
            }
        })
    }
}
