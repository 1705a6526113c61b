use chrono::Utc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::prefs::{self, CookiePreferences};

#[derive(Clone, Copy, PartialEq)]
enum Category {
    Analytics,
    Marketing,
    Functional,
}

const OPTIONAL: &[(Category, &str, &str)] = &[
    (Category::Analytics, "Analytics", "Anonymous usage statistics that help us improve the site."),
    (Category::Marketing, "Marketing", "Measure campaign performance and show relevant offers."),
    (Category::Functional, "Functional", "Remember choices such as region and dashboard layout."),
];

#[derive(Clone, Copy, Default, PartialEq)]
struct Choices {
    analytics: bool,
    marketing: bool,
    functional: bool,
}

impl Choices {
    fn get(&self, category: Category) -> bool {
        match category {
            Category::Analytics => self.analytics,
            Category::Marketing => self.marketing,
            Category::Functional => self.functional,
        }
    }

    fn with(mut self, category: Category, on: bool) -> Self {
        match category {
            Category::Analytics => self.analytics = on,
            Category::Marketing => self.marketing = on,
            Category::Functional => self.functional = on,
        }
        self
    }
}

#[function_component(CookieBanner)]
pub fn cookie_banner() -> Html {
    let visible = use_state(|| prefs::cookie_consent().is_none());
    let customizing = use_state(|| false);
    let choices = use_state(Choices::default);

    let save = {
        let visible = visible.clone();
        Callback::from(move |prefs: CookiePreferences| {
            prefs::set_cookie_consent(prefs);
            visible.set(false);
        })
    };

    if !*visible {
        return html! {};
    }

    let accept_all = {
        let save = save.clone();
        Callback::from(move |_: MouseEvent| save.emit(CookiePreferences::accept_all(Utc::now())))
    };
    let reject = {
        let save = save.clone();
        Callback::from(move |_: MouseEvent| save.emit(CookiePreferences::reject_optional(Utc::now())))
    };
    let save_custom = {
        let save = save.clone();
        let choices = choices.clone();
        Callback::from(move |_: MouseEvent| {
            save.emit(CookiePreferences::custom(
                choices.analytics,
                choices.marketing,
                choices.functional,
                Utc::now(),
            ))
        })
    };
    let toggle_customize = {
        let customizing = customizing.clone();
        Callback::from(move |_: MouseEvent| customizing.set(!*customizing))
    };

    html! {
        <div class="cookie-banner" role="dialog" aria-label="Cookie preferences">
            <p>
                {"We use cookies to keep the site working and, with your permission, to understand how it is used."}
            </p>
            {
                if *customizing {
                    html! {
                        <div class="cookie-categories">
                            <label class="cookie-category">
                                <input type="checkbox" checked=true disabled=true />
                                <span><b>{"Necessary"}</b>{" Required for the site to function."}</span>
                            </label>
                            { for OPTIONAL.iter().map(|(category, name, description)| {
                                let category = *category;
                                let onchange = {
                                    let choices = choices.clone();
                                    Callback::from(move |e: Event| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        choices.set(choices.with(category, input.checked()));
                                    })
                                };
                                html! {
                                    <label class="cookie-category">
                                        <input type="checkbox" checked={choices.get(category)} {onchange} />
                                        <span><b>{*name}</b>{" "}{*description}</span>
                                    </label>
                                }
                            }) }
                            <button class="cookie-button primary" onclick={save_custom}>{"Save preferences"}</button>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            <div class="cookie-actions">
                <button class="cookie-button" onclick={reject}>{"Reject optional"}</button>
                <button class="cookie-button" onclick={toggle_customize}>
                    { if *customizing { "Hide options" } else { "Customize" } }
                </button>
                <button class="cookie-button primary" onclick={accept_all}>{"Accept all"}</button>
            </div>
            <style>
                {r#"
                .cookie-banner {
                    position: fixed;
                    bottom: 1.5rem;
                    left: 50%;
                    transform: translateX(-50%);
                    width: min(640px, calc(100% - 2rem));
                    background: rgba(22, 26, 38, 0.97);
                    border: 1px solid rgba(30, 144, 255, 0.25);
                    border-radius: 12px;
                    padding: 1.25rem 1.5rem;
                    color: #ddd;
                    z-index: 1000;
                    box-shadow: 0 12px 32px rgba(0, 0, 0, 0.4);
                }
                .cookie-actions {
                    display: flex;
                    gap: 0.75rem;
                    justify-content: flex-end;
                    flex-wrap: wrap;
                }
                .cookie-categories {
                    display: flex;
                    flex-direction: column;
                    gap: 0.6rem;
                    margin: 1rem 0;
                }
                .cookie-category {
                    display: flex;
                    gap: 0.6rem;
                    align-items: flex-start;
                    font-size: 0.9rem;
                }
                .cookie-button {
                    background: transparent;
                    border: 1px solid rgba(255, 255, 255, 0.2);
                    color: #fff;
                    padding: 0.5rem 1rem;
                    border-radius: 6px;
                    cursor: pointer;
                }
                .cookie-button.primary {
                    background: linear-gradient(45deg, #1E90FF, #4169E1);
                    border: none;
                }
                "#}
            </style>
        </div>
    }
}
