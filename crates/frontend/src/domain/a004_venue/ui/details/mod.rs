use crate::domain::a004_venue::api;
use crate::shared::components::badge::StatusBadge;
use crate::shared::components::error_banner::ErrorBanner;
use crate::shared::components::modal::Modal;
use crate::shared::date_utils::format_timestamp;
use crate::shared::query_cache::use_query_client;
use contracts::domain::a004_venue::Venue;
use contracts::shared::api_error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn VenueDetailsModal(id: String, on_close: Callback<()>) -> impl IntoView {
    let client = use_query_client();
    let venue = RwSignal::new(None::<Venue>);
    let error = RwSignal::new(None::<ApiError>);
    let id = StoredValue::new(id);

    let load = move || {
        let id = id.get_value();
        let key = api::detail_key(&id);
        if let Some(cached) = client.peek::<Venue>(&key) {
            venue.set(Some(cached));
        }
        spawn_local(async move {
            match client.fetch(key, api::fetch_venue(&id)).await {
                Some(Ok(v)) => {
                    venue.set(Some(v));
                    error.set(None);
                }
                Some(Err(e)) => {
                    log::error!("Failed to load venue {}: {}", id, e);
                    error.set(Some(e));
                }
                None => {}
            }
        });
    };

    Effect::new(move |_| {
        client.epoch_for(&api::venues_root());
        load();
    });

    view! {
        <Modal title="Venue details" on_close=on_close wide=true>
            <ErrorBanner error=error on_retry=Callback::new(move |_| load()) />
            {move || match venue.get() {
                None => view! { <p class="text-muted">"Loading..."</p> }.into_any(),
                Some(v) => venue_body(v).into_any(),
            }}
        </Modal>
    }
}

fn venue_body(v: Venue) -> impl IntoView {
    let status = v.status();
    let owner_email = v.owner.as_ref().and_then(|o| o.email.clone()).unwrap_or_default();
    let rows: Vec<(&'static str, String)> = vec![
        ("Address", v.direccion.clone()),
        ("Zone", v.zona.clone()),
        ("Owner", v.owner_name()),
        ("Owner email", owner_email),
        ("Surface", v.tipo_superficie.clone()),
        ("Capacity", v.capacidad.to_string()),
        ("Price / hour", format!("${:.2}", v.precio_por_hora)),
        ("Rating", v.rating_label()),
        ("Amenities", v.amenities().join(", ")),
        ("Created", format_timestamp(&v.created_at)),
    ];

    view! {
        <div class="detail-section">
            <div class="detail-section__title">
                <h3>{v.nombre.clone()}</h3>
                <StatusBadge variant=status.badge_variant() label=status.label() />
            </div>
            <div class="detail-fields">
                {rows
                    .into_iter()
                    .filter(|(_, value)| !value.is_empty())
                    .map(|(label, value)| view! {
                        <div class="detail-field">
                            <span class="detail-field__label">{label}</span>
                            <span class="detail-field__value">{value}</span>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
