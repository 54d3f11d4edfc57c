//! Table formatting for capacity listings.

use realloc_rs_planner::ReallocationCapacity;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Tabled)]
struct CapacityRow {
    #[tabled(rename = "Vault")]
    vault: String,
    #[tabled(rename = "Source Markets")]
    source_markets: usize,
    #[tabled(rename = "Target Max In")]
    target_max_in: String,
    #[tabled(rename = "Pullable Total")]
    total: String,
}

fn truncate_address(addr: &str) -> String {
    if addr.len() > 10 {
        format!("{}...{}", &addr[..6], &addr[addr.len() - 4..])
    } else {
        addr.to_string()
    }
}

pub fn format_capacity_table(capacities: &[ReallocationCapacity]) -> String {
    if capacities.is_empty() {
        return "No vaults hold the target market.".to_string();
    }

    let rows: Vec<CapacityRow> = capacities
        .iter()
        .map(|c| CapacityRow {
            vault: truncate_address(&c.vault.to_string()),
            source_markets: c.sources.len(),
            target_max_in: c.target_max_in.to_string(),
            total: c.total.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()));

    table.to_string()
}
