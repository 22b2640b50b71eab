//! Gated route wrapper.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders one fixed template per gate decision and only builds the route
//! body once the decision is `Authorized`. The login redirect is dispatched
//! from an effect, never from the render path.

use leptos::prelude::*;

use crate::state::auth::AuthHandle;
use crate::util::auth::install_gate_redirect;
use crate::util::gate::GateDecision;

pub const NOT_AUTHORIZED_MESSAGE: &str = "You are not authorized to view this page.";

#[component]
pub fn RouteGate(
    auth: AuthHandle,
    decision: Memo<GateDecision>,
    /// Heading shown above the not-authorized message.
    title: &'static str,
    children: ChildrenFn,
) -> impl IntoView {
    install_gate_redirect(auth, decision);

    move || match decision.get() {
        GateDecision::Loading => view! { <div class="route-gate__loading">"Loading..."</div> }.into_any(),
        GateDecision::NeedsLogin => ().into_any(),
        GateDecision::Unauthorized => view! {
            <div class="route-gate__denied">
                <h1>{title}</h1>
                <p>{NOT_AUTHORIZED_MESSAGE}</p>
            </div>
        }
        .into_any(),
        GateDecision::Authorized => children().into_any(),
    }
}
