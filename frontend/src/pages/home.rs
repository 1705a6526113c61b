use yew::prelude::*;
use yew_hooks::use_title;
use yew_router::prelude::*;

use crate::components::counter::Counter;
use crate::components::market_chart::MarketChart;
use crate::components::newsletter::NewsletterSignup;
use crate::components::report_search::ReportSearch;
use crate::components::stats_grid::{GridVariant, Stat, StatsGrid};
use crate::config;
use crate::reveal::easing::Easing;
use crate::reveal::parser::RawValue;
use crate::Route;

const FEATURES: &[(&str, &str)] = &[
    ("Live market signals", "Pricing, hiring and funding events from 40,000 sources, deduplicated and scored as they land."),
    ("Competitor tracking", "Follow product launches, leadership moves and pricing changes across your whole category."),
    ("Analyst workspace", "Pin signals into briefs, annotate them with your team and export to slides in one click."),
    ("Enterprise controls", "SSO, audit logs and regional data residency for regulated industries."),
];

const PLATFORM_METRICS: &[Stat] = &[
    Stat::new("7800", "Active users").description("Monthly active users").trend("+12.5%"),
    Stat::new("15000", "Research reports").description("Comprehensive reports").trend("+8.2%"),
    Stat::new("42", "Industries covered").description("Global industry coverage").trend("+2"),
    Stat::new("136", "Countries").description("Worldwide data coverage").trend("+5"),
];

const MILESTONES: &[Stat] = &[
    Stat::new("2.4B", "Market data value").prefix("$").description("Total market value tracked"),
    Stat::new("500", "Enterprise clients").suffix("+").description("Fortune 500 companies"),
    Stat::new("99.9", "Uptime").suffix("%").description("Platform reliability"),
    Stat::new("24", "Support").suffix("/7").description("Round-the-clock assistance"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timeframe {
    Month,
    Quarter,
    Year,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Month, Timeframe::Quarter, Timeframe::Year];

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Month => "This Month",
            Timeframe::Quarter => "This Quarter",
            Timeframe::Year => "This Year",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Timeframe::Month => "month",
            Timeframe::Quarter => "quarter",
            Timeframe::Year => "year",
        }
    }

    pub fn metrics(self) -> &'static [Stat] {
        match self {
            Timeframe::Month => MONTH_METRICS,
            Timeframe::Quarter => QUARTER_METRICS,
            Timeframe::Year => YEAR_METRICS,
        }
    }
}

const MONTH_METRICS: &[Stat] = &[
    Stat::new("15.2", "Revenue growth").suffix("%"),
    Stat::new("1.2K", "New users"),
    Stat::new("89", "Customer satisfaction").suffix("%"),
    Stat::new("156", "New reports published"),
];

const QUARTER_METRICS: &[Stat] = &[
    Stat::new("48.7", "Revenue growth").suffix("%"),
    Stat::new("3.8K", "New users"),
    Stat::new("92", "Customer satisfaction").suffix("%"),
    Stat::new("487", "New reports published"),
];

const YEAR_METRICS: &[Stat] = &[
    Stat::new("187.3", "Revenue growth").suffix("%"),
    Stat::new("12.4K", "New users"),
    Stat::new("94", "Customer satisfaction").suffix("%"),
    Stat::new("1.8K", "New reports published"),
];

#[function_component(StatsSection)]
pub fn stats_section() -> Html {
    html! {
        <section class="stats-section">
            <Counter value={RawValue::from("15K+")} label="analysts rely on us" suffix="+" />
            <Counter value={RawValue::from("2.4B")} label="data points indexed" start_delay_ms={150} />
            <Counter value={RawValue::from("99.9%")} label="platform uptime" suffix="%" start_delay_ms={300} easing={Easing::OUT_CUBIC} />
            <Counter value={RawValue::from("1.2M")} label="saved per customer each year" prefix="$" start_delay_ms={450} />
        </section>
    }
}

#[function_component(PerformanceMetrics)]
pub fn performance_metrics() -> Html {
    html! {
        <section class="stats-group">
            <h2>{"Platform performance"}</h2>
            <p>{"Live metrics showing our reach across global markets."}</p>
            <StatsGrid stats={PLATFORM_METRICS} variant={GridVariant::Card} />
        </section>
    }
}

#[function_component(CompanyMilestones)]
pub fn company_milestones() -> Html {
    html! {
        <section class="stats-group">
            <h2>{"Trusted worldwide"}</h2>
            <p>{"Organizations of every size plan their growth on our data."}</p>
            <StatsGrid stats={MILESTONES} variant={GridVariant::Gradient} stagger_ms={300} />
        </section>
    }
}

#[function_component(GrowthMetrics)]
pub fn growth_metrics() -> Html {
    let timeframe = use_state(|| Timeframe::Month);

    html! {
        <section class="stats-group">
            <h2>{"Growth metrics"}</h2>
            <div class="timeframe-toggle">
                { for Timeframe::ALL.iter().map(|option| {
                    let active = *timeframe == *option;
                    let timeframe = timeframe.clone();
                    let option = *option;
                    html! {
                        <button
                            class={classes!("chip", active.then(|| "active"))}
                            onclick={Callback::from(move |_: MouseEvent| timeframe.set(option))}
                        >
                            {option.label()}
                        </button>
                    }
                }) }
            </div>
            // A new key remounts the grid, which cancels running counters and starts fresh ones.
            <StatsGrid key={timeframe.key()} stats={timeframe.metrics()} variant={GridVariant::Minimal} />
        </section>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    use_title(format!("{} | Market intelligence for enterprise teams", config::SITE_NAME));

    html! {
        <div class="home-page">
            <section class="hero">
                <h1>{"See your market move before it does"}</h1>
                <p class="hero-subtitle">
                    {"Marketlens turns millions of public signals into briefings your strategy team can act on the same morning."}
                </p>
                <div class="hero-actions">
                    <Link<Route> to={Route::Contact} classes="cta-button">{"Book a demo"}</Link<Route>>
                    <Link<Route> to={Route::Pricing} classes="cta-button secondary">{"See pricing"}</Link<Route>>
                </div>
            </section>

            <section class="search-section">
                <h2>{"Find the report you need"}</h2>
                <ReportSearch />
            </section>

            <StatsSection />

            <PerformanceMetrics />

            <section class="chart-section">
                <h2>{"Markets at a glance"}</h2>
                <p>{"Switch chart style and time range to explore the index."}</p>
                <MarketChart />
            </section>

            <CompanyMilestones />

            <GrowthMetrics />

            <section class="features">
                <h2>{"Everything your research team needs"}</h2>
                <div class="feature-grid">
                    { for FEATURES.iter().map(|(title, body)| html! {
                        <div class="feature-card">
                            <h3>{*title}</h3>
                            <p>{*body}</p>
                        </div>
                    }) }
                </div>
            </section>

            <NewsletterSignup />

            <style>
                {r#"
                .home-page {
                    padding-top: 74px;
                    color: var(--text, #fff);
                }
                .hero {
                    text-align: center;
                    padding: 8rem 2rem 6rem;
                    max-width: 960px;
                    margin: 0 auto;
                }
                .hero h1 {
                    font-size: 3.5rem;
                    margin-bottom: 1.5rem;
                    background: linear-gradient(45deg, #fff, #7EB2FF);
                    -webkit-background-clip: text;
                    -webkit-text-fill-color: transparent;
                }
                .hero-subtitle {
                    font-size: 1.25rem;
                    color: #999;
                    max-width: 640px;
                    margin: 0 auto 2.5rem;
                }
                .hero-actions {
                    display: flex;
                    gap: 1rem;
                    justify-content: center;
                }
                .stats-section {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
                    gap: 2rem;
                    max-width: 1100px;
                    margin: 0 auto;
                    padding: 4rem 2rem;
                }
                .counter {
                    text-align: center;
                    padding: 2rem 1rem;
                    background: rgba(30, 30, 30, 0.7);
                    border: 1px solid rgba(30, 144, 255, 0.1);
                    border-radius: 12px;
                }
                .counter-value {
                    display: block;
                    font-size: 2.75rem;
                    font-weight: 700;
                    color: #7EB2FF;
                    font-variant-numeric: tabular-nums;
                }
                .counter-label {
                    color: #999;
                }
                .counter-invalid .counter-value {
                    color: #ff6b6b;
                }
                .stats-grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
                    gap: 1.5rem;
                }
                .stats-grid-gradient .counter {
                    background: linear-gradient(135deg, rgba(30, 144, 255, 0.25), rgba(65, 105, 225, 0.05));
                }
                .stats-grid-minimal .counter {
                    background: none;
                    border: none;
                }
                .stat-description {
                    color: #888;
                    font-size: 0.85rem;
                }
                .stat-trend {
                    color: #4caf50;
                    font-size: 0.8rem;
                }
                .timeframe-toggle, .chart-controls, .chart-toggle, .search-chips {
                    display: flex;
                    flex-wrap: wrap;
                    gap: 0.5rem;
                    justify-content: center;
                    margin-bottom: 1rem;
                }
                .chip, .chart-option {
                    padding: 0.4rem 0.9rem;
                    border-radius: 999px;
                    border: 1px solid rgba(30, 144, 255, 0.3);
                    background: transparent;
                    color: #ccc;
                    cursor: pointer;
                }
                .chip.active, .chart-option.active {
                    background: #1E90FF;
                    color: #fff;
                }
                .chart-canvas {
                    position: relative;
                }
                .chart-loading {
                    position: absolute;
                    inset: 0;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    background: rgba(18, 22, 33, 0.8);
                    border-radius: 12px;
                }
                .report-search {
                    max-width: 760px;
                    margin: 0 auto;
                    text-align: left;
                }
                .search-results {
                    list-style: none;
                    padding: 0;
                }
                .search-result {
                    padding: 1rem;
                    margin-bottom: 0.75rem;
                    background: rgba(30, 30, 30, 0.7);
                    border-radius: 8px;
                }
                .result-badge {
                    margin-left: 0.5rem;
                    font-size: 0.75rem;
                    color: #7EB2FF;
                }
                .result-meta, .search-status {
                    color: #888;
                    font-size: 0.85rem;
                }
                .chart-section, .features, .newsletter, .stats-group, .search-section {
                    max-width: 1100px;
                    margin: 0 auto;
                    padding: 4rem 2rem;
                    text-align: center;
                }
                .market-chart canvas {
                    max-width: 100%;
                    border-radius: 12px;
                }
                .feature-grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
                    gap: 1.5rem;
                    text-align: left;
                }
                .feature-card {
                    padding: 1.5rem;
                    background: rgba(30, 30, 30, 0.7);
                    border: 1px solid rgba(30, 144, 255, 0.1);
                    border-radius: 12px;
                }
                .newsletter-form {
                    display: flex;
                    gap: 0.75rem;
                    justify-content: center;
                }
                .newsletter-form input {
                    padding: 0.8rem 1rem;
                    border-radius: 8px;
                    border: 1px solid rgba(255, 255, 255, 0.2);
                    background: rgba(0, 0, 0, 0.3);
                    color: #fff;
                    min-width: 260px;
                }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::parser::parse;

    #[test]
    fn every_stat_parses() {
        let groups = [PLATFORM_METRICS, MILESTONES]
            .into_iter()
            .chain(Timeframe::ALL.iter().map(|t| t.metrics()));
        for stats in groups {
            for stat in stats {
                assert!(parse(&RawValue::from(stat.value)).is_ok(), "{} does not parse", stat.value);
            }
        }
    }

    #[test]
    fn timeframes_swap_the_whole_grid() {
        let keys: Vec<&str> = Timeframe::ALL.iter().map(|t| t.key()).collect();
        assert_eq!(keys, ["month", "quarter", "year"]);
        assert_ne!(Timeframe::Month.metrics(), Timeframe::Year.metrics());
        assert!(Timeframe::ALL.iter().all(|t| t.metrics().len() == 4));
    }
}
