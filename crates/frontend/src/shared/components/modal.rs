use leptos::ev;
use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;

/// Оверлей + окно с заголовком. Закрывается по клику на оверлей и по "×".
#[component]
pub fn Modal(
    #[prop(into)] title: String,
    on_close: Callback<()>,
    #[prop(optional)] wide: bool,
    children: Children,
) -> impl IntoView {
    let class = if wide { "modal modal--wide" } else { "modal" };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class=class on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        {icon("x")}
                    </Button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}

/// Подтверждение перед отправкой. Пока `busy`, кнопки заблокированы.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(into)] confirm_label: String,
    #[prop(optional)] destructive: bool,
    #[prop(into)] busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let confirm_class = if destructive {
        "button--danger"
    } else {
        ""
    };

    view! {
        <div class="modal-overlay modal-overlay--top">
            <div class="modal modal--confirm" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                </div>
                <div class="modal-body">
                    <p>{message}</p>
                </div>
                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_cancel.run(())
                        disabled=busy
                    >
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        class=confirm_class
                        on_click=move |_| on_confirm.run(())
                        disabled=busy
                    >
                        {move || if busy.get() { "Processing...".to_string() } else { confirm_label.clone() }}
                    </Button>
                </div>
            </div>
        </div>
    }
}
