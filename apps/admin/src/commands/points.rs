//! Points configuration screen: loyalty tiers by order value.

use tiffin_core::points::{award_for, find_overlap, sorted_ranges};
use tiffin_core::validation::validate_points_range;
use tiffin_core::{CoreError, Money, NewPointsRange, PointsRange};
use tracing::{info, warn};

use super::Ctx;
use crate::cli::PointsCommand;
use crate::error::AppResult;
use crate::output::Table;

pub async fn run(ctx: &Ctx, cmd: PointsCommand) -> AppResult<()> {
    match cmd {
        PointsCommand::List => {
            let ranges = sorted_ranges(&ctx.client.list_points_ranges().await?);
            ctx.out
                .emit(&ranges, || range_table(&ranges).print_or("No points ranges."))
        }
        PointsCommand::Add {
            lower,
            upper,
            points,
            strict,
        } => {
            validate_points_range(lower, upper, points)?;
            let candidate = NewPointsRange {
                lower,
                upper,
                loyalty_points: points,
            };

            let existing = ctx.client.list_points_ranges().await?;
            check_overlap(&existing, &candidate, strict)?;

            let message = ctx.client.create_points_range(&candidate).await?;
            info!(lower, upper, points, "Points range saved");
            ctx.out
                .message(message.as_deref().unwrap_or("Points range saved!"))
        }
        PointsCommand::Delete { id } => {
            ctx.out.confirm("Delete this points range?")?;
            let message = ctx.client.delete_points_range(&id).await?;
            ctx.out
                .message(message.as_deref().unwrap_or("Points range deleted."))
        }
        PointsCommand::Quote { amount } => {
            let ranges = ctx.client.list_points_ranges().await?;
            let value = Money::from_rupees(amount);
            let points = award_for(&ranges, value);
            ctx.out.emit(
                &serde_json::json!({ "orderValue": value, "points": points }),
                || println!("{}", quote_line(value, points)),
            )
        }
    }
}

/// Warns about an overlapping tier, or refuses it when `strict`.
fn check_overlap(existing: &[PointsRange], candidate: &NewPointsRange, strict: bool) -> AppResult<()> {
    let Some(clash) = find_overlap(existing, candidate) else {
        return Ok(());
    };
    if strict {
        return Err(CoreError::OverlappingRange {
            lower: clash.lower,
            upper: clash.upper,
        }
        .into());
    }
    warn!(lower = clash.lower, upper = clash.upper, "New range overlaps an existing tier");
    eprintln!(
        "warning: overlaps existing tier ₹{}-₹{} ({} pts)",
        clash.lower, clash.upper, clash.loyalty_points
    );
    Ok(())
}

fn quote_line(value: Money, points: Option<i64>) -> String {
    match points {
        Some(p) => format!("An order of {} earns {} points.", value, p),
        None => format!("No tier covers an order of {}.", value),
    }
}

fn range_table(ranges: &[PointsRange]) -> Table {
    let mut table = Table::new(["ID", "From (₹)", "To (₹)", "Points"]);
    for r in ranges {
        table.row([
            r.id.clone(),
            r.lower.to_string(),
            r.upper.to_string(),
            r.loyalty_points.to_string(),
        ]);
    }
    table
}
