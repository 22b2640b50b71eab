//! User listing table for the admin page.

use leptos::prelude::*;

use crate::net::types::UserRecord;

/// Table of admin API user records. While `pending`, a single interim row
/// is shown instead of the records.
#[component]
pub fn UserTable(rows: Vec<UserRecord>, pending: bool) -> impl IntoView {
    let body = if pending {
        view! {
            <tr>
                <td colspan="3" class="user-table__pending">"Loading users..."</td>
            </tr>
        }
        .into_any()
    } else {
        rows.into_iter()
            .map(|record| {
                view! {
                    <tr>
                        <td class="user-table__mono">{record.id.to_string()}</td>
                        <td>{record.username}</td>
                        <td>{record.email.unwrap_or_default()}</td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <table class="user-table">
            <thead>
                <tr>
                    <th>"ID"</th>
                    <th>"Username"</th>
                    <th>"Email"</th>
                </tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}
