//! Detailed output formatting for a reallocation plan.

use alloy_primitives::U256;
use colored::Colorize;

use realloc_rs_contracts::ReallocationPlan;

pub fn format_plan_detail(plan: &ReallocationPlan, requested: U256) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "=".repeat(60)));
    output.push_str(&format!("{}\n", "Reallocation Plan".bold()));
    output.push_str(&format!("{}\n\n", "=".repeat(60)));

    output.push_str(&format!("{}\n", "Transaction".cyan().bold()));
    output.push_str(&format!("  To:            {}\n", plan.to));
    output.push_str(&format!("  Value (fee):   {} wei\n", plan.value()));
    output.push_str(&format!("  Source vault:  {}\n", plan.vault));
    output.push_str(&format!(
        "  Target market: {}\n\n",
        plan.target_market_params.id()
    ));

    output.push_str(&format!("{}\n", "Withdrawals".cyan().bold()));
    for withdrawal in &plan.withdrawals {
        output.push_str(&format!(
            "  {}  {}\n",
            withdrawal.market_params.id(),
            withdrawal.amount
        ));
    }

    let total = plan.total_withdrawn();
    output.push_str(&format!("\n  Requested: {}\n", requested));
    output.push_str(&format!("  Delivered: {}\n", total));
    if total < requested {
        output.push_str(&format!(
            "\n{}\n",
            format!(
                "Partial fill: only {} of {} can be sourced from a single vault.",
                total, requested
            )
            .yellow()
        ));
    }

    output.push_str(&format!("\n{}\n", "Calldata".cyan().bold()));
    output.push_str(&format!("  {}\n", plan.calldata));

    output
}
