use yew::prelude::*;
use yew_hooks::use_title;
use yew_router::prelude::*;

use crate::config;
use crate::reveal::format::group_thousands;
use crate::Route;

pub const ANNUAL_DISCOUNT_PCT: u32 = 20;

#[derive(Clone, Copy, PartialEq)]
pub enum BillingCycle {
    Monthly,
    Annual,
}

struct Plan {
    name: &'static str,
    tagline: &'static str,
    /// Monthly list price in whole dollars, `None` for quote-only plans.
    monthly_usd: Option<u32>,
    features: &'static [&'static str],
    highlighted: bool,
}

const PLANS: &[Plan] = &[
    Plan {
        name: "Starter",
        tagline: "For a single analyst getting started",
        monthly_usd: Some(490),
        features: &[
            "5 tracked competitors",
            "Daily signal digest",
            "12 months of history",
            "Email support",
        ],
        highlighted: false,
    },
    Plan {
        name: "Professional",
        tagline: "For strategy and research teams",
        monthly_usd: Some(1490),
        features: &[
            "50 tracked competitors",
            "Real-time alerts",
            "Full history and exports",
            "Shared analyst workspace",
            "Priority support",
        ],
        highlighted: true,
    },
    Plan {
        name: "Enterprise",
        tagline: "For organisations with compliance needs",
        monthly_usd: None,
        features: &[
            "Unlimited tracking",
            "SSO and audit logs",
            "Regional data residency",
            "Dedicated success manager",
        ],
        highlighted: false,
    },
];

/// Per-month price when billed annually, rounded to whole dollars.
pub fn annual_monthly_price(monthly: u32, discount_pct: u32) -> u32 {
    let discount_pct = discount_pct.min(100);
    (monthly * (100 - discount_pct) + 50) / 100
}

pub fn price_label(monthly_usd: Option<u32>, cycle: BillingCycle) -> String {
    match (monthly_usd, cycle) {
        (None, _) => "Custom".to_string(),
        (Some(monthly), BillingCycle::Monthly) => format!("${}", group_thousands(monthly as i64)),
        (Some(monthly), BillingCycle::Annual) => format!(
            "${}",
            group_thousands(annual_monthly_price(monthly, ANNUAL_DISCOUNT_PCT) as i64)
        ),
    }
}

#[derive(Properties, PartialEq)]
struct PlanCardProps {
    index: usize,
    cycle: BillingCycle,
}

#[function_component(PlanCard)]
fn plan_card(props: &PlanCardProps) -> Html {
    let plan = &PLANS[props.index];
    let period = match (plan.monthly_usd, props.cycle) {
        (None, _) => "",
        (Some(_), BillingCycle::Monthly) => "/month",
        (Some(_), BillingCycle::Annual) => "/month, billed annually",
    };

    html! {
        <div class={classes!("pricing-card", plan.highlighted.then(|| "highlighted"))}>
            {
                if plan.highlighted {
                    html! { <div class="popular-tag">{"Most Popular"}</div> }
                } else {
                    html! {}
                }
            }
            <div class="card-header">
                <h3>{plan.name}</h3>
                <p class="tagline">{plan.tagline}</p>
                <div class="price">
                    <span class="amount">{price_label(plan.monthly_usd, props.cycle)}</span>
                    <span class="period">{period}</span>
                </div>
            </div>
            <ul>
                { for plan.features.iter().map(|f| html! { <li>{*f}</li> }) }
            </ul>
            <Link<Route> to={Route::Contact} classes="cta-button">
                { if plan.monthly_usd.is_some() { "Start free trial" } else { "Talk to sales" } }
            </Link<Route>>
        </div>
    }
}

#[function_component(Pricing)]
pub fn pricing() -> Html {
    use_title(format!("Pricing | {}", config::SITE_NAME));
    let cycle = use_state(|| BillingCycle::Monthly);

    let set_cycle = |target: BillingCycle| {
        let cycle = cycle.clone();
        Callback::from(move |_: MouseEvent| cycle.set(target))
    };

    html! {
        <div class="pricing-page">
            <section class="pricing-hero">
                <h1>{"Simple plans that scale with your team"}</h1>
                <p>{"Every plan includes a 14 day free trial. No credit card required."}</p>
                <div class="cycle-toggle">
                    <button
                        class={classes!("cycle-option", (*cycle == BillingCycle::Monthly).then(|| "active"))}
                        onclick={set_cycle(BillingCycle::Monthly)}
                    >
                        {"Monthly"}
                    </button>
                    <button
                        class={classes!("cycle-option", (*cycle == BillingCycle::Annual).then(|| "active"))}
                        onclick={set_cycle(BillingCycle::Annual)}
                    >
                        {format!("Annual (save {}%)", ANNUAL_DISCOUNT_PCT)}
                    </button>
                </div>
            </section>

            <div class="pricing-grid">
                { for (0..PLANS.len()).map(|index| html! { <PlanCard {index} cycle={*cycle} /> }) }
            </div>

            <style>
                {r#"
                .pricing-page {
                    padding-top: 74px;
                    color: #fff;
                }
                .pricing-hero {
                    text-align: center;
                    padding: 5rem 2rem 3rem;
                }
                .cycle-toggle {
                    display: inline-flex;
                    border: 1px solid rgba(30, 144, 255, 0.3);
                    border-radius: 999px;
                    margin-top: 1.5rem;
                    overflow: hidden;
                }
                .cycle-option {
                    background: transparent;
                    border: none;
                    color: #ccc;
                    padding: 0.6rem 1.4rem;
                    cursor: pointer;
                }
                .cycle-option.active {
                    background: linear-gradient(45deg, #1E90FF, #4169E1);
                    color: #fff;
                }
                .pricing-grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
                    gap: 2rem;
                    max-width: 1100px;
                    margin: 0 auto;
                    padding: 0 2rem 5rem;
                }
                .pricing-card {
                    position: relative;
                    background: rgba(30, 30, 30, 0.8);
                    border: 1px solid rgba(30, 144, 255, 0.1);
                    border-radius: 16px;
                    padding: 2rem;
                    display: flex;
                    flex-direction: column;
                    gap: 1rem;
                }
                .pricing-card.highlighted {
                    border-color: rgba(30, 144, 255, 0.5);
                    box-shadow: 0 8px 32px rgba(30, 144, 255, 0.15);
                }
                .popular-tag {
                    position: absolute;
                    top: -12px;
                    right: 24px;
                    background: #1E90FF;
                    padding: 0.25rem 0.75rem;
                    border-radius: 999px;
                    font-size: 0.8rem;
                }
                .price .amount {
                    font-size: 2.5rem;
                    font-weight: 700;
                }
                .price .period {
                    color: #999;
                    margin-left: 0.25rem;
                }
                .tagline {
                    color: #999;
                }
                .pricing-card ul {
                    flex: 1;
                    padding-left: 1.2rem;
                }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annual_discount() {
        assert_eq!(annual_monthly_price(1490, 20), 1192);
        assert_eq!(annual_monthly_price(490, 20), 392);
        assert_eq!(annual_monthly_price(99, 15), 84);
        assert_eq!(annual_monthly_price(100, 150), 0);
    }

    #[test]
    fn labels() {
        assert_eq!(price_label(Some(1490), BillingCycle::Monthly), "$1,490");
        assert_eq!(price_label(Some(1490), BillingCycle::Annual), "$1,192");
        assert_eq!(price_label(None, BillingCycle::Annual), "Custom");
    }
}
