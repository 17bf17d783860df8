use contracts::dashboards::d400_overview::{bar_height_percent, ChartBar};
use leptos::prelude::*;

/// Столбчатая диаграмма на CSS: высота столбца в процентах от максимума
#[component]
pub fn BarChart(
    #[prop(into)] title: String,
    #[prop(into)] bars: Signal<Vec<ChartBar>>,
    /// Подпись значения над столбцом
    format_value: fn(f64) -> String,
    #[prop(optional)] variant: &'static str,
) -> impl IntoView {
    let bar_class = if variant.is_empty() {
        "bar-chart__bar".to_string()
    } else {
        format!("bar-chart__bar bar-chart__bar--{}", variant)
    };

    view! {
        <div class="chart-card">
            <h3 class="chart-card__title">{title}</h3>
            <div class="bar-chart">
                {move || {
                    let bars = bars.get();
                    let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
                    bars.into_iter().map(|bar| {
                        let height = format!("height: {:.1}%;", bar_height_percent(bar.value, max));
                        view! {
                            <div class="bar-chart__column">
                                <span class="bar-chart__value">{format_value(bar.value)}</span>
                                <div class="bar-chart__track">
                                    <div class=bar_class.clone() style=height></div>
                                </div>
                                <span class="bar-chart__label">{bar.label}</span>
                            </div>
                        }
                    }).collect_view()
                }}
            </div>
        </div>
    }
}
