use yew::prelude::*;
use yew_hooks::use_title;

use crate::config;
use crate::prefs;

fn yes_no(on: bool) -> &'static str {
    if on {
        "allowed"
    } else {
        "declined"
    }
}

#[function_component(PrivacyPolicy)]
pub fn privacy_policy() -> Html {
    use_title(format!("Privacy | {}", config::SITE_NAME));
    let consent = prefs::cookie_consent();

    html! {
        <div class="legal-page">
            <h1>{"Privacy Policy"}</h1>
            <p>{"This website does not create accounts or collect form submissions. Contact and newsletter forms are demonstrations and nothing you type leaves your browser."}</p>

            <h2>{"Cookies and local storage"}</h2>
            <p>{"We store two small items in your browser's local storage: your colour theme and your cookie choices. Clearing site data removes both."}</p>
            <ul>
                <li><b>{"Necessary: "}</b>{"always on, remembers your cookie choice."}</li>
                <li><b>{"Analytics: "}</b>{"anonymous usage statistics."}</li>
                <li><b>{"Marketing: "}</b>{"campaign measurement."}</li>
                <li><b>{"Functional: "}</b>{"remembers layout preferences."}</li>
            </ul>

            <h2>{"Your current choices"}</h2>
            {
                match consent {
                    Some(c) => html! {
                        <p class="consent-summary">
                            {format!(
                                "Saved {}: analytics {}, marketing {}, functional {}.",
                                c.consented_at.format("%Y-%m-%d %H:%M UTC"),
                                yes_no(c.analytics),
                                yes_no(c.marketing),
                                yes_no(c.functional),
                            )}
                        </p>
                    },
                    None => html! { <p class="consent-summary">{"You have not made a cookie choice yet."}</p> },
                }
            }

            <style>
                {r#"
                .legal-page {
                    padding: 8rem 2rem 4rem;
                    max-width: 800px;
                    margin: 0 auto;
                    color: #ddd;
                    line-height: 1.6;
                }
                .legal-page h1, .legal-page h2 {
                    color: #fff;
                }
                .consent-summary {
                    color: #7EB2FF;
                }
                "#}
            </style>
        </div>
    }
}
