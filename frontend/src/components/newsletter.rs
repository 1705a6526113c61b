use web_sys::HtmlInputElement;
use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::config;
use crate::forms::{simulate_submission, validate_email, FormStatus};

#[function_component(NewsletterSignup)]
pub fn newsletter_signup() -> Html {
    let email = use_state(String::new);
    let status = use_state(|| FormStatus::Idle);

    let oninput = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let onsubmit = {
        let email = email.clone();
        let status = status.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *status == FormStatus::Submitting {
                return;
            }
            if let Err(err) = validate_email(&email) {
                status.set(FormStatus::Failed(err));
                return;
            }
            status.set(FormStatus::Submitting);
            let status = status.clone();
            let email = email.clone();
            spawn_local(async move {
                match simulate_submission(config::SUBMIT_DELAY_MS, config::submit_failure_rate()).await {
                    Ok(()) => {
                        email.set(String::new());
                        status.set(FormStatus::Success);
                    }
                    Err(err) => status.set(FormStatus::Failed(err)),
                }
            });
        })
    };

    let submitting = *status == FormStatus::Submitting;

    html! {
        <section class="newsletter">
            <h2>{"Market briefings, weekly"}</h2>
            <p>{"One email every Monday with the signals our analysts are watching."}</p>
            {
                if *status == FormStatus::Success {
                    html! { <p class="form-success">{"You're subscribed. Watch your inbox on Monday."}</p> }
                } else {
                    html! {
                        <form class="newsletter-form" {onsubmit}>
                            <input
                                type="email"
                                placeholder="you@company.com"
                                value={(*email).clone()}
                                disabled={submitting}
                                {oninput}
                            />
                            <button type="submit" class="cta-button" disabled={submitting}>
                                { if submitting { "Subscribing..." } else { "Subscribe" } }
                            </button>
                        </form>
                    }
                }
            }
            {
                if let FormStatus::Failed(err) = &*status {
                    html! { <p class="form-error">{err.to_string()}</p> }
                } else {
                    html! {}
                }
            }
        </section>
    }
}
