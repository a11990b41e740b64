//! One-shot listing: fetch, filter, print.

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use roster_core::api::UsersClient;
use roster_core::config::Config;
use roster_core::{Field, FilterCriteria, User, UsersState};

pub async fn run(config: &Config, criteria: FilterCriteria, json: bool) -> Result<()> {
    let client = UsersClient::from_config(config).context("Invalid users endpoint")?;

    // Criteria go in first; a successful fetch re-applies them.
    let mut store = UsersState::new();
    for field in Field::ALL {
        store.update_filter(field, criteria.get(field));
    }

    store.begin_fetch();
    match client.fetch_users().await {
        Ok(users) => store.fetch_succeeded(users),
        Err(err) => store.fetch_failed(err.to_string()),
    }
    if let Some(error) = store.error() {
        anyhow::bail!("Could not load users: {error}");
    }

    let users = store.filtered_users();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(users).context("serialize users")?
        );
    } else if users.is_empty() {
        println!("No users found");
    } else {
        println!("{}", users_table(users));
    }
    Ok(())
}

fn users_table(users: &[User]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(std::iter::once("#").chain(Field::ALL.iter().map(|field| field.title())));
    for user in users {
        table.add_row(
            std::iter::once(user.id.to_string())
                .chain(Field::ALL.iter().map(|&field| user.field(field).to_string())),
        );
    }
    table
}
