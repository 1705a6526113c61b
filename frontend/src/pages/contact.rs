use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_hooks::use_title;
use wasm_bindgen_futures::spawn_local;

use crate::config;
use crate::forms::{simulate_submission, ContactForm, FormStatus};

#[derive(Clone, Copy)]
enum Field {
    Name,
    Email,
    Company,
}

#[function_component(Contact)]
pub fn contact() -> Html {
    use_title(format!("Contact | {}", config::SITE_NAME));
    let form = use_state(ContactForm::default);
    let status = use_state(|| FormStatus::Idle);

    let on_field = |field: Field| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            match field {
                Field::Name => next.name = input.value(),
                Field::Email => next.email = input.value(),
                Field::Company => next.company = input.value(),
            }
            form.set(next);
        })
    };

    let on_message = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.message = input.value();
            form.set(next);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let status = status.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *status == FormStatus::Submitting {
                return;
            }
            if let Err(err) = form.validate() {
                status.set(FormStatus::Failed(err));
                return;
            }
            log::info!("Submitting contact request for {}", form.email.trim());
            status.set(FormStatus::Submitting);
            let form = form.clone();
            let status = status.clone();
            spawn_local(async move {
                match simulate_submission(config::SUBMIT_DELAY_MS, config::submit_failure_rate()).await {
                    Ok(()) => {
                        form.set(ContactForm::default());
                        status.set(FormStatus::Success);
                    }
                    Err(err) => status.set(FormStatus::Failed(err)),
                }
            });
        })
    };

    let submitting = *status == FormStatus::Submitting;

    html! {
        <div class="contact-page">
            <section class="contact-hero">
                <h1>{"Talk to our team"}</h1>
                <p>{"Tell us about your market and we will set up a tailored demo within one business day."}</p>
            </section>
            {
                if *status == FormStatus::Success {
                    html! {
                        <div class="contact-success">
                            <h2>{"Thanks, we got your message"}</h2>
                            <p>{"Someone from our solutions team will reach out shortly."}</p>
                        </div>
                    }
                } else {
                    html! {
                        <form class="contact-form" {onsubmit}>
                            <label>
                                {"Name"}
                                <input type="text" value={form.name.clone()} disabled={submitting} oninput={on_field(Field::Name)} />
                            </label>
                            <label>
                                {"Work email"}
                                <input type="email" value={form.email.clone()} disabled={submitting} oninput={on_field(Field::Email)} />
                            </label>
                            <label>
                                {"Company (optional)"}
                                <input type="text" value={form.company.clone()} disabled={submitting} oninput={on_field(Field::Company)} />
                            </label>
                            <label>
                                {"How can we help?"}
                                <textarea rows="6" value={form.message.clone()} disabled={submitting} oninput={on_message} />
                            </label>
                            {
                                if let FormStatus::Failed(err) = &*status {
                                    html! { <p class="form-error">{err.to_string()}</p> }
                                } else {
                                    html! {}
                                }
                            }
                            <button type="submit" class="cta-button" disabled={submitting}>
                                { if submitting { "Sending..." } else { "Send message" } }
                            </button>
                        </form>
                    }
                }
            }
            <style>
                {r#"
                .contact-page {
                    padding-top: 74px;
                    color: #fff;
                    max-width: 720px;
                    margin: 0 auto;
                    padding-left: 2rem;
                    padding-right: 2rem;
                }
                .contact-hero {
                    text-align: center;
                    padding: 4rem 0 2rem;
                }
                .contact-form {
                    display: flex;
                    flex-direction: column;
                    gap: 1.25rem;
                    padding-bottom: 4rem;
                }
                .contact-form label {
                    display: flex;
                    flex-direction: column;
                    gap: 0.4rem;
                    color: #bbb;
                }
                .contact-form input, .contact-form textarea {
                    padding: 0.8rem 1rem;
                    border-radius: 8px;
                    border: 1px solid rgba(255, 255, 255, 0.2);
                    background: rgba(0, 0, 0, 0.3);
                    color: #fff;
                    font: inherit;
                }
                .form-error {
                    color: #ff6b6b;
                }
                .form-success, .contact-success {
                    color: #4caf50;
                    text-align: center;
                }
                "#}
            </style>
        </div>
    }
}
