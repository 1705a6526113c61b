use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config;

/// Every whitespace-separated term of `query` must appear, ignoring case, in
/// at least one of `fields`. An empty query matches everything.
pub fn matches_query(fields: &[&str], query: &str) -> bool {
    let haystack: Vec<String> = fields.iter().map(|f| f.to_lowercase()).collect();
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .all(|term| haystack.iter().any(|field| field.contains(&term)))
}

#[derive(Properties, PartialEq)]
pub struct SearchFilterProps {
    pub on_search: Callback<String>,
    #[prop_or(AttrValue::from("Search..."))]
    pub placeholder: AttrValue,
}

#[function_component(SearchFilter)]
pub fn search_filter(props: &SearchFilterProps) -> Html {
    let value = use_state(String::new);
    let pending = use_mut_ref(|| None::<Timeout>);

    let oninput = {
        let value = value.clone();
        let pending: Rc<RefCell<Option<Timeout>>> = pending.clone();
        let on_search = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let query = input.value();
            value.set(query.clone());

            let on_search = on_search.clone();
            // Replacing the old timeout drops and cancels it.
            *pending.borrow_mut() = Some(Timeout::new(config::SEARCH_DEBOUNCE_MS, move || {
                log::debug!("Searching for {:?}", query);
                on_search.emit(query);
            }));
        })
    };

    let onclear = {
        let value = value.clone();
        let pending = pending.clone();
        let on_search = props.on_search.clone();
        Callback::from(move |_: MouseEvent| {
            pending.borrow_mut().take();
            value.set(String::new());
            on_search.emit(String::new());
        })
    };

    html! {
        <div class="search-filter">
            <input
                type="search"
                class="search-input"
                placeholder={props.placeholder.clone()}
                value={(*value).clone()}
                {oninput}
            />
            {
                if !value.is_empty() {
                    html! { <button class="search-clear" onclick={onclear}>{"×"}</button> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: [&str; 2] = [
        "How often is the data refreshed?",
        "Market indices update every fifteen minutes during trading hours.",
    ];

    #[test]
    fn empty_query_matches() {
        assert!(matches_query(&ENTRY, ""));
        assert!(matches_query(&ENTRY, "   "));
    }

    #[test]
    fn terms_are_case_insensitive_and_all_required() {
        assert!(matches_query(&ENTRY, "DATA"));
        assert!(matches_query(&ENTRY, "refreshed trading"));
        assert!(!matches_query(&ENTRY, "refreshed pricing"));
    }

    #[test]
    fn terms_may_come_from_different_fields() {
        assert!(matches_query(&ENTRY, "often minutes"));
    }
}
