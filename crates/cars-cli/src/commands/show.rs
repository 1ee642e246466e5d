//! Show command - one car with its manufacturer

use anyhow::Result;
use cars_core::CarId;
use cars_gateway::CatalogGateway;

use crate::output::OutputContext;

/// Show detailed information about a car
pub async fn show(gateway: &CatalogGateway, id: CarId, ctx: &OutputContext) -> Result<()> {
    let detail = gateway.detail(id).await?;
    let car = detail.car;
    let maker = detail.manufacturer;

    let pairs = vec![
        ("ID", car.id.to_string()),
        ("Name", car.name),
        ("Year", car.year.to_string()),
        ("Manufacturer", maker.name),
        ("Country", maker.country),
        ("Founded", maker.founding_year.to_string()),
        ("Category ID", car.category_id.to_string()),
        ("Engine", car.specifications.engine),
        ("Horsepower", car.specifications.horsepower.to_string()),
        ("Transmission", car.specifications.transmission),
        ("Drivetrain", car.specifications.drivetrain),
        ("Image", car.image),
    ];

    ctx.print_kv(&pairs);
    Ok(())
}
