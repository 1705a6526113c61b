use chrono::{Months, NaiveDate, Utc};
use gloo_timers::future::TimeoutFuture;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use wasm_bindgen_futures::spawn_local;
use web_sys::js_sys::Math;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::config;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;
const ACCENT: RGBColor = RGBColor(30, 144, 255);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Area,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Line, ChartKind::Area, ChartKind::Bar];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::Line => "Line",
            ChartKind::Area => "Area",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeRange {
    SixMonths,
    TwelveMonths,
    TwentyFourMonths,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::SixMonths, TimeRange::TwelveMonths, TimeRange::TwentyFourMonths];

    pub fn months(self) -> u32 {
        match self {
            TimeRange::SixMonths => 6,
            TimeRange::TwelveMonths => 12,
            TimeRange::TwentyFourMonths => 24,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::SixMonths => "6 Months",
            TimeRange::TwelveMonths => "12 Months",
            TimeRange::TwentyFourMonths => "24 Months",
        }
    }
}

pub type Series = Vec<(String, f64)>;

/// Illustrative market index, one point per month ending at `end`.
/// `noise` yields values in `[0, 1)` and drifts the index upward on average.
pub fn trend_series(end: NaiveDate, months: u32, mut noise: impl FnMut() -> f64) -> Series {
    let mut value: f64 = 1_000.0;
    (0..months)
        .map(|i| {
            let label = end
                .checked_sub_months(Months::new(months - 1 - i))
                .map(|month| month.format("%b %y").to_string())
                .unwrap_or_default();
            value = (value + (noise() - 0.4) * 100.0).max(0.0);
            (label, value)
        })
        .collect()
}

/// Top of the y axis: the largest value plus 10% headroom.
pub fn y_axis_max(data: &[(String, f64)]) -> f64 {
    let max = data.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    (max * 1.1).max(1.0)
}

fn draw(canvas: HtmlCanvasElement, title: &str, kind: ChartKind, data: &[(String, f64)]) -> Result<(), String> {
    canvas.set_width(WIDTH);
    canvas.set_height(HEIGHT);

    let backend = CanvasBackend::with_canvas_object(canvas).ok_or("canvas has no 2d context")?;
    let root = backend.into_drawing_area();
    root.fill(&RGBColor(18, 22, 33)).map_err(|e| e.to_string())?;

    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .caption(title, ("sans-serif", 20).into_font().color(&WHITE))
        .x_label_area_size(36)
        .y_label_area_size(56)
        .build_cartesian_2d(0..data.len(), 0.0..y_axis_max(data))
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(RGBColor(40, 46, 60))
        .axis_style(RGBColor(90, 100, 120))
        .label_style(("sans-serif", 12).into_font().color(&RGBColor(170, 180, 200)))
        .x_labels(data.len().min(12))
        .x_label_formatter(&|x| data.get(*x).map(|(month, _)| month.clone()).unwrap_or_default())
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()
        .map_err(|e| e.to_string())?;

    let points = data.iter().enumerate().map(|(i, (_, value))| (i, *value));
    match kind {
        ChartKind::Bar => {
            chart
                .draw_series(points.map(|(i, value)| {
                    let mut bar = Rectangle::new([(i, 0.0), (i + 1, value)], ACCENT.filled());
                    bar.set_margin(0, 0, 4, 4);
                    bar
                }))
                .map_err(|e| e.to_string())?;
        }
        ChartKind::Line => {
            chart
                .draw_series(LineSeries::new(points, ACCENT.stroke_width(3)))
                .map_err(|e| e.to_string())?;
        }
        ChartKind::Area => {
            chart
                .draw_series(AreaSeries::new(points, 0.0, ACCENT.mix(0.3).filled()).border_style(ACCENT.stroke_width(2)))
                .map_err(|e| e.to_string())?;
        }
    }

    root.present().map_err(|e| e.to_string())?;
    Ok(())
}

#[derive(Properties, PartialEq)]
pub struct MarketChartProps {
    #[prop_or(AttrValue::from("Market index"))]
    pub title: AttrValue,
}

#[function_component(MarketChart)]
pub fn market_chart(props: &MarketChartProps) -> Html {
    let canvas_ref = use_node_ref();
    let kind = use_state(|| ChartKind::Line);
    let range = use_state(|| TimeRange::TwelveMonths);
    let series = use_state(Series::new);
    let loading = use_state(|| true);
    // Refreshes still in flight when the range changes are discarded.
    let generation = use_mut_ref(|| 0u64);

    {
        let series = series.clone();
        let loading = loading.clone();
        let generation = generation.clone();
        use_effect_with_deps(
            move |range: &TimeRange| {
                let months = range.months();
                *generation.borrow_mut() += 1;
                let mine = *generation.borrow();
                loading.set(true);
                spawn_local(async move {
                    TimeoutFuture::new(config::CHART_REFRESH_MS).await;
                    if *generation.borrow() != mine {
                        return;
                    }
                    log::debug!("Refreshed chart data for {} months", months);
                    series.set(trend_series(Utc::now().date_naive(), months, Math::random));
                    loading.set(false);
                });
                || ()
            },
            *range,
        );
    }

    {
        let canvas_ref = canvas_ref.clone();
        let title = props.title.clone();
        use_effect_with_deps(
            move |(kind, series, loading): &(ChartKind, Series, bool)| {
                if !*loading && !series.is_empty() {
                    if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                        if let Err(e) = draw(canvas, &title, *kind, series) {
                            log::error!("Failed to draw market chart: {}", e);
                        }
                    }
                }
                || ()
            },
            (*kind, (*series).clone(), *loading),
        );
    }

    html! {
        <div class="market-chart">
            <div class="chart-controls">
                <div class="chart-toggle">
                    { for ChartKind::ALL.iter().map(|option| {
                        let kind = kind.clone();
                        let option = *option;
                        let active = *kind == option;
                        html! {
                            <button
                                class={classes!("chart-option", active.then(|| "active"))}
                                onclick={Callback::from(move |_: MouseEvent| kind.set(option))}
                            >
                                {option.label()}
                            </button>
                        }
                    }) }
                </div>
                <div class="chart-toggle">
                    { for TimeRange::ALL.iter().map(|option| {
                        let range = range.clone();
                        let option = *option;
                        let active = *range == option;
                        html! {
                            <button
                                class={classes!("chart-option", active.then(|| "active"))}
                                onclick={Callback::from(move |_: MouseEvent| range.set(option))}
                            >
                                {option.label()}
                            </button>
                        }
                    }) }
                </div>
            </div>
            <div class="chart-canvas">
                <canvas ref={canvas_ref} width={WIDTH.to_string()} height={HEIGHT.to_string()} />
                {
                    if *loading {
                        html! { <div class="chart-loading">{"Refreshing data..."}</div> }
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn series_ends_on_the_given_month() {
        let series = trend_series(march_2024(), 3, || 0.4);
        let labels: Vec<&str> = series.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, ["Jan 24", "Feb 24", "Mar 24"]);
        assert!(series.iter().all(|(_, value)| *value == 1_000.0));
    }

    #[test]
    fn series_length_follows_the_range() {
        for range in TimeRange::ALL {
            let series = trend_series(march_2024(), range.months(), || 0.9);
            assert_eq!(series.len() as u32, range.months());
            assert!(series.windows(2).all(|w| w[0].1 < w[1].1));
        }
        assert_eq!(trend_series(march_2024(), 24, || 0.5)[0].0, "Apr 22");
    }

    #[test]
    fn index_never_goes_negative() {
        let series = trend_series(march_2024(), 24, || 0.0);
        assert!(series.iter().all(|(_, value)| *value >= 0.0));
    }

    #[test]
    fn axis_has_headroom() {
        let data = vec![("a".to_string(), 100.0), ("b".to_string(), 134.0)];
        assert!((y_axis_max(&data) - 147.4).abs() < 1e-9);
        assert_eq!(y_axis_max(&[]), 1.0);
    }
}
