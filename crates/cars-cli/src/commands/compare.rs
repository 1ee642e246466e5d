//! Compare command - several cars side by side

use anyhow::Result;
use cars_core::CarId;
use cars_gateway::CatalogGateway;

use crate::output::{CompareRow, OutputContext};

/// Compare cars in the order given
pub async fn compare(gateway: &CatalogGateway, ids: &[CarId], ctx: &OutputContext) -> Result<()> {
    let details = gateway.compare(ids).await?;

    let rows: Vec<CompareRow> = details.into_iter().map(CompareRow::from).collect();

    ctx.print(&rows);
    Ok(())
}
