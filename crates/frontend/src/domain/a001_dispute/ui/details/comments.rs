use crate::shared::components::badge::StatusBadge;
use crate::shared::date_utils::format_timestamp;
use crate::shared::icons::icon;
use contracts::domain::a001_dispute::DisputeComment;
use leptos::prelude::*;

#[component]
pub fn CommentsTimeline(#[prop(into)] comments: Signal<Vec<DisputeComment>>) -> impl IntoView {
    view! {
        <div class="detail-section">
            <h3 class="detail-section__title">
                {icon("message-square")}
                {move || format!(" Comments ({})", comments.with(Vec::len))}
            </h3>
            {move || {
                let items = comments.get();
                if items.is_empty() {
                    return view! { <p class="text-muted">"No comments yet"</p> }.into_any();
                }
                view! {
                    <ul class="timeline">
                        {items.into_iter().map(|c| {
                            let class = if c.is_internal {
                                "timeline__item timeline__item--internal"
                            } else {
                                "timeline__item"
                            };
                            view! {
                                <li class=class>
                                    <div class="timeline__header">
                                        <strong>{c.author()}</strong>
                                        {c.is_from_admin().then(|| view! { <StatusBadge variant="primary" label="Admin" /> })}
                                        {c.is_internal.then(|| view! { <StatusBadge variant="warning" label="Internal" /> })}
                                        <span class="timeline__time">{format_timestamp(&c.created_at)}</span>
                                    </div>
                                    <p class="timeline__body">{c.comment.clone()}</p>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                }
                .into_any()
            }}
        </div>
    }
}
