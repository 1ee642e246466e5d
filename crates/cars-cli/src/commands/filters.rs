//! Filters command - values available to the listing filters

use anyhow::Result;
use cars_gateway::CatalogGateway;

use crate::output::{CategoryRow, ManufacturerRow, OutputContext};

/// Show manufacturers and categories usable with `list --manufacturer/--category`
pub async fn filters(gateway: &CatalogGateway, ctx: &OutputContext) -> Result<()> {
    let options = gateway.filter_options().await?;

    let manufacturers: Vec<ManufacturerRow> = options
        .manufacturers
        .into_iter()
        .map(ManufacturerRow::from)
        .collect();
    let categories: Vec<CategoryRow> = options
        .categories
        .into_iter()
        .map(CategoryRow::from)
        .collect();

    ctx.heading("Manufacturers");
    ctx.print(&manufacturers);
    ctx.heading("Categories");
    ctx.print(&categories);
    Ok(())
}
