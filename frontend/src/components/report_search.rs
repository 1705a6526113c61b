use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::search_filter::matches_query;
use crate::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    Report,
    Trend,
    Statistics,
    Forecast,
}

impl ContentKind {
    pub const FILTERS: [ContentKind; 4] = [
        ContentKind::Report,
        ContentKind::Trend,
        ContentKind::Statistics,
        ContentKind::Forecast,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Report => "Reports",
            ContentKind::Trend => "Trends",
            ContentKind::Statistics => "Statistics",
            ContentKind::Forecast => "Forecasts",
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Report {
    pub title: &'static str,
    pub category: &'static str,
    pub kind: ContentKind,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub published: &'static str,
    pub trending: bool,
}

pub const REPORTS: &[Report] = &[
    Report {
        title: "Global Healthcare Market Analysis 2024",
        category: "Healthcare",
        kind: ContentKind::Report,
        description: "Market size, reimbursement shifts and five-year forecasts across 30 countries.",
        tags: &["healthcare", "market analysis", "2024"],
        published: "2024-03-15",
        trending: true,
    },
    Report {
        title: "AI and Machine Learning Adoption Trends",
        category: "Technology",
        kind: ContentKind::Trend,
        description: "Where enterprises are deploying models and what they are spending.",
        tags: &["ai", "machine learning", "technology"],
        published: "2024-03-10",
        trending: true,
    },
    Report {
        title: "Renewable Energy Investment Statistics",
        category: "Energy",
        kind: ContentKind::Statistics,
        description: "Quarterly capital flows into solar, wind and storage projects.",
        tags: &["renewable energy", "investment", "statistics"],
        published: "2024-03-08",
        trending: false,
    },
    Report {
        title: "Financial Services Digital Transformation",
        category: "Finance",
        kind: ContentKind::Report,
        description: "How retail banks and insurers are rebuilding their core platforms.",
        tags: &["fintech", "digital transformation", "banking"],
        published: "2024-03-05",
        trending: false,
    },
    Report {
        title: "Electric Vehicle Market Forecast 2024-2030",
        category: "Automotive",
        kind: ContentKind::Forecast,
        description: "Unit sales, battery costs and charging build-out through 2030.",
        tags: &["electric vehicles", "automotive", "forecast"],
        published: "2024-03-01",
        trending: true,
    },
];

pub const CATEGORIES: &[&str] = &["Healthcare", "Technology", "Finance", "Energy", "Automotive", "Retail"];

pub const POPULAR_SEARCHES: &[&str] = &[
    "Healthcare market",
    "AI trends",
    "Renewable energy",
    "Financial services",
    "EV forecast",
];

/// Reports matching every term of `query` in the title, description or tags,
/// narrowed by the optional category and kind. A blank query finds nothing.
pub fn search_reports(
    reports: &'static [Report],
    query: &str,
    category: Option<&str>,
    kind: Option<ContentKind>,
) -> Vec<&'static Report> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    reports
        .iter()
        .filter(|report| category.map_or(true, |c| report.category == c))
        .filter(|report| kind.map_or(true, |k| report.kind == k))
        .filter(|report| {
            let mut fields = vec![report.title, report.description];
            fields.extend_from_slice(report.tags);
            matches_query(&fields, query)
        })
        .collect()
}

/// Puts `term` at the front of the recent list, without duplicates, keeping
/// at most `limit` entries.
pub fn remember(recent: &[String], term: &str, limit: usize) -> Vec<String> {
    let term = term.trim();
    if term.is_empty() {
        return recent.to_vec();
    }
    std::iter::once(term.to_string())
        .chain(recent.iter().filter(|r| !r.eq_ignore_ascii_case(term)).cloned())
        .take(limit)
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
enum SearchState {
    Idle,
    Searching,
    Done(Vec<&'static Report>),
}

#[function_component(ReportSearch)]
pub fn report_search() -> Html {
    let query = use_state(String::new);
    let category = use_state(|| None::<&'static str>);
    let kind = use_state(|| None::<ContentKind>);
    let state = use_state(|| SearchState::Idle);
    let recent = use_state(|| vec!["AI trends".to_string(), "Healthcare data".to_string()]);
    // Results of a search that was superseded are dropped.
    let generation = use_mut_ref(|| 0u64);

    {
        let state = state.clone();
        let recent = recent.clone();
        let generation = generation.clone();
        use_effect_with_deps(
            move |(query, category, kind): &(String, Option<&'static str>, Option<ContentKind>)| {
                *generation.borrow_mut() += 1;
                let mine = *generation.borrow();
                let pending = if query.trim().is_empty() {
                    state.set(SearchState::Idle);
                    None
                } else {
                    let (query, category, kind) = (query.clone(), *category, *kind);
                    Some(Timeout::new(config::SEARCH_DEBOUNCE_MS, move || {
                        state.set(SearchState::Searching);
                        spawn_local(async move {
                            TimeoutFuture::new(config::SEARCH_DELAY_MS).await;
                            if *generation.borrow() != mine {
                                return;
                            }
                            let found = search_reports(REPORTS, &query, category, kind);
                            log::debug!("Search {:?} found {} reports", query, found.len());
                            recent.set(remember(&recent, &query, config::RECENT_SEARCH_LIMIT));
                            state.set(SearchState::Done(found));
                        });
                    }))
                };
                move || drop(pending)
            },
            ((*query).clone(), *category, *kind),
        );
    }

    let oninput = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
        })
    };

    let pick = |term: String| {
        let query = query.clone();
        Callback::from(move |_: MouseEvent| query.set(term.clone()))
    };

    let onclear = {
        let query = query.clone();
        Callback::from(move |_: MouseEvent| query.set(String::new()))
    };

    html! {
        <div class="report-search">
            <div class="search-filter">
                <input
                    type="search"
                    class="search-input"
                    placeholder="Search market reports, statistics or industries..."
                    value={(*query).clone()}
                    {oninput}
                />
                {
                    if !query.is_empty() {
                        html! { <button class="search-clear" onclick={onclear}>{"×"}</button> }
                    } else {
                        html! {}
                    }
                }
            </div>

            <div class="search-chips">
                {
                    {
                        let active = category.is_none();
                        let category = category.clone();
                        html! {
                            <button
                                class={classes!("chip", active.then(|| "active"))}
                                onclick={Callback::from(move |_: MouseEvent| category.set(None))}
                            >{"All"}</button>
                        }
                    }
                }
                { for CATEGORIES.iter().map(|name| {
                    let active = *category == Some(*name);
                    let category = category.clone();
                    let name = *name;
                    html! {
                        <button
                            class={classes!("chip", active.then(|| "active"))}
                            onclick={Callback::from(move |_: MouseEvent| category.set(Some(name)))}
                        >{name}</button>
                    }
                }) }
            </div>
            <div class="search-chips">
                {
                    {
                        let active = kind.is_none();
                        let kind = kind.clone();
                        html! {
                            <button
                                class={classes!("chip", active.then(|| "active"))}
                                onclick={Callback::from(move |_: MouseEvent| kind.set(None))}
                            >{"All content"}</button>
                        }
                    }
                }
                { for ContentKind::FILTERS.iter().map(|option| {
                    let active = *kind == Some(*option);
                    let kind = kind.clone();
                    let option = *option;
                    html! {
                        <button
                            class={classes!("chip", active.then(|| "active"))}
                            onclick={Callback::from(move |_: MouseEvent| kind.set(Some(option)))}
                        >{option.label()}</button>
                    }
                }) }
            </div>

            {
                match &*state {
                    SearchState::Idle => html! {
                        <div class="search-suggestions">
                            <h4>{"Recent searches"}</h4>
                            { for recent.iter().map(|term| html! {
                                <button class="chip" onclick={pick(term.clone())}>{term.clone()}</button>
                            }) }
                            <h4>{"Popular"}</h4>
                            { for POPULAR_SEARCHES.iter().map(|term| html! {
                                <button class="chip" onclick={pick(term.to_string())}>{*term}</button>
                            }) }
                        </div>
                    },
                    SearchState::Searching => html! { <p class="search-status">{"Searching..."}</p> },
                    SearchState::Done(found) if found.is_empty() => html! {
                        <p class="search-status">{format!("No reports match \"{}\".", *query)}</p>
                    },
                    SearchState::Done(found) => html! {
                        <ul class="search-results">
                            { for found.iter().map(|report| html! {
                                <li class="search-result" key={report.title}>
                                    <div class="result-title">
                                        {report.title}
                                        { if report.trending { html! { <span class="result-badge">{"Trending"}</span> } } else { html! {} } }
                                    </div>
                                    <p>{report.description}</p>
                                    <span class="result-meta">
                                        {format!("{} · {} · {}", report.category, report.kind.label(), report.published)}
                                    </span>
                                </li>
                            }) }
                        </ul>
                    },
                }
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(found: &[&Report]) -> Vec<&'static str> {
        found.iter().map(|r| r.title).collect()
    }

    #[test]
    fn blank_query_finds_nothing() {
        assert!(search_reports(REPORTS, "", None, None).is_empty());
        assert!(search_reports(REPORTS, "   ", Some("Energy"), None).is_empty());
    }

    #[test]
    fn query_matches_titles_descriptions_and_tags() {
        assert_eq!(
            titles(&search_reports(REPORTS, "healthcare", None, None)),
            ["Global Healthcare Market Analysis 2024"]
        );
        assert_eq!(
            titles(&search_reports(REPORTS, "BANKING", None, None)),
            ["Financial Services Digital Transformation"]
        );
        assert_eq!(search_reports(REPORTS, "market", None, None).len(), 2);
    }

    #[test]
    fn filters_narrow_the_results() {
        assert_eq!(search_reports(REPORTS, "market", Some("Automotive"), None).len(), 1);
        assert!(search_reports(REPORTS, "market", Some("Retail"), None).is_empty());
        assert_eq!(
            titles(&search_reports(REPORTS, "2024", None, Some(ContentKind::Forecast))),
            ["Electric Vehicle Market Forecast 2024-2030"]
        );
    }

    #[test]
    fn recent_searches_are_deduplicated_and_capped() {
        let recent = vec!["AI trends".to_string(), "Healthcare data".to_string()];
        assert_eq!(remember(&recent, " ai TRENDS ", 5), ["ai TRENDS", "Healthcare data"]);
        assert_eq!(remember(&recent, "EV forecast", 2), ["EV forecast", "AI trends"]);
        assert_eq!(remember(&recent, "  ", 5), recent);
    }
}
