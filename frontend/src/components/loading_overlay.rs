use yew::prelude::*;

/// Covers the surrounding panel while a remote call is outstanding.
pub fn loading_overlay(message: &str) -> Html {
    html! {
        <div class="loading-overlay" aria-busy="true">
            <div class="spin"></div>
            <div class="loading-message">{ message.to_string() }</div>
        </div>
    }
}
