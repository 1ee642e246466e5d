//! Cars command - batch fetch by ID

use anyhow::Result;
use cars_core::CarId;
use cars_gateway::CatalogGateway;

use crate::output::{ModelRow, OutputContext};

/// Fetch several cars at once; any missing ID fails the whole command
pub async fn cars(gateway: &CatalogGateway, ids: &[CarId], ctx: &OutputContext) -> Result<()> {
    let cars = gateway.cars(ids).await?;

    let rows: Vec<ModelRow> = cars.into_iter().map(ModelRow::from).collect();

    ctx.print(&rows);
    Ok(())
}
