use yew::prelude::*;
use yew_hooks::use_title;
use web_sys::MouseEvent;

use crate::components::search_filter::{matches_query, SearchFilter};
use crate::config;

pub struct FaqEntry {
    pub section: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQ: &[FaqEntry] = &[
    FaqEntry {
        section: "Data",
        question: "Where does Marketlens get its data?",
        answer: "We combine public filings, job boards, pricing pages, news wires and patent offices with licensed datasets from financial data partners.",
    },
    FaqEntry {
        section: "Data",
        question: "How often is the data refreshed?",
        answer: "Pricing and hiring signals refresh every fifteen minutes. Filings and patents are ingested within an hour of publication.",
    },
    FaqEntry {
        section: "Data",
        question: "Can I bring my own sources?",
        answer: "Professional and Enterprise plans can connect internal CRM exports and RSS feeds so they show up next to public signals.",
    },
    FaqEntry {
        section: "Plans & billing",
        question: "Is there a free trial?",
        answer: "Every self-serve plan starts with a 14 day trial. No credit card is needed until you decide to continue.",
    },
    FaqEntry {
        section: "Plans & billing",
        question: "Can I switch between monthly and annual billing?",
        answer: "Yes. Switching to annual billing applies the discount from your next invoice and is prorated automatically.",
    },
    FaqEntry {
        section: "Security",
        question: "Do you support single sign-on?",
        answer: "Enterprise includes SAML and OIDC single sign-on, SCIM provisioning and exportable audit logs.",
    },
    FaqEntry {
        section: "Security",
        question: "Where is my data stored?",
        answer: "Customer workspaces are hosted in the EU or the US depending on your contract, with encryption at rest and in transit.",
    },
];

#[derive(Properties, PartialEq)]
struct FaqItemProps {
    question: AttrValue,
    children: Children,
}

#[function_component(FaqItem)]
fn faq_item(props: &FaqItemProps) -> Html {
    let is_open = use_state(|| false);

    let toggle = {
        let is_open = is_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            is_open.set(!*is_open);
        })
    };

    html! {
        <div class={classes!("faq-item", if *is_open { "open" } else { "" })}>
            <button class="faq-question" onclick={toggle}>
                <span class="question-text">{props.question.clone()}</span>
                <span class="toggle-icon">{if *is_open { "−" } else { "+" }}</span>
            </button>
            <div class="faq-answer">
                { for props.children.iter() }
            </div>
        </div>
    }
}

/// Entries matching `query`, grouped by section in declaration order.
pub fn filter_faq<'a>(entries: &'a [FaqEntry], query: &str) -> Vec<(&'static str, Vec<&'a FaqEntry>)> {
    let mut sections: Vec<(&'static str, Vec<&'a FaqEntry>)> = Vec::new();
    for entry in entries
        .iter()
        .filter(|e| matches_query(&[e.question, e.answer], query))
    {
        match sections.iter_mut().find(|(name, _)| *name == entry.section) {
            Some((_, items)) => items.push(entry),
            None => sections.push((entry.section, vec![entry])),
        }
    }
    sections
}

#[function_component(Faq)]
pub fn faq() -> Html {
    use_title(format!("FAQ | {}", config::SITE_NAME));
    let query = use_state(String::new);

    let on_search = {
        let query = query.clone();
        Callback::from(move |q: String| query.set(q))
    };

    let sections = filter_faq(FAQ, &query);

    html! {
        <div class="faq-page">
            <section class="faq-hero">
                <h1>{"Frequently Asked Questions"}</h1>
                <p>{"Everything you need to know about data, plans and security"}</p>
                <SearchFilter {on_search} placeholder="Search questions" />
            </section>

            <section class="faq-section">
                {
                    if sections.is_empty() {
                        html! { <p class="faq-empty">{format!("No questions match \"{}\".", *query)}</p> }
                    } else {
                        html! {
                            { for sections.iter().map(|(section, items)| html! {
                                <>
                                    <h2>{*section}</h2>
                                    { for items.iter().map(|entry| html! {
                                        <FaqItem question={entry.question}>
                                            <p>{entry.answer}</p>
                                        </FaqItem>
                                    }) }
                                </>
                            }) }
                        }
                    }
                }
            </section>

            <style>
                {r#"
                .faq-page {
                    padding-top: 74px;
                    min-height: 100vh;
                    color: #ffffff;
                }
                .faq-hero {
                    text-align: center;
                    padding: 5rem 2rem 3rem;
                }
                .faq-hero h1 {
                    font-size: 3rem;
                    margin-bottom: 1rem;
                    background: linear-gradient(45deg, #fff, #7EB2FF);
                    -webkit-background-clip: text;
                    -webkit-text-fill-color: transparent;
                }
                .search-filter {
                    display: inline-flex;
                    margin-top: 2rem;
                    position: relative;
                }
                .search-input {
                    width: min(480px, 80vw);
                    padding: 0.8rem 2.5rem 0.8rem 1rem;
                    border-radius: 8px;
                    border: 1px solid rgba(30, 144, 255, 0.3);
                    background: rgba(0, 0, 0, 0.3);
                    color: #fff;
                }
                .search-clear {
                    position: absolute;
                    right: 0.5rem;
                    top: 50%;
                    transform: translateY(-50%);
                    background: none;
                    border: none;
                    color: #999;
                    cursor: pointer;
                    font-size: 1.2rem;
                }
                .faq-section {
                    max-width: 800px;
                    margin: 0 auto;
                    padding: 2rem;
                }
                .faq-item {
                    border-bottom: 1px solid rgba(30, 144, 255, 0.1);
                }
                .faq-question {
                    width: 100%;
                    display: flex;
                    justify-content: space-between;
                    background: none;
                    border: none;
                    color: #fff;
                    padding: 1.2rem 0;
                    font-size: 1.1rem;
                    cursor: pointer;
                    text-align: left;
                }
                .faq-answer {
                    display: none;
                    color: #bbb;
                    padding-bottom: 1rem;
                }
                .faq-item.open .faq-answer {
                    display: block;
                }
                .faq-empty {
                    color: #999;
                    text-align: center;
                }
                "#}
            </style>
        </div>
    }
}
