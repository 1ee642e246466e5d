//! List command - the car listing, optionally filtered

use anyhow::Result;
use cars_core::FilterCriteria;
use cars_gateway::CatalogGateway;

use crate::output::{CarRow, OutputContext};

/// List cars matching `criteria`, each with its manufacturer name
pub async fn list(
    gateway: &CatalogGateway,
    criteria: &FilterCriteria,
    ctx: &OutputContext,
) -> Result<()> {
    let listing = gateway.listing(criteria).await?;

    let rows: Vec<CarRow> = listing.entries().into_iter().map(CarRow::from).collect();

    ctx.print(&rows);
    Ok(())
}
