use anyhow::Result;
use chrono::NaiveDate;

extern crate landsat_query;
use landsat_query::{CatalogClient, Query, Sensor};

#[tokio::main]
async fn main() -> Result<()> {
    let start = NaiveDate::from_ymd_opt(2015, 2, 25).ok_or(anyhow::anyhow!("Invalid date"))?;
    let end = NaiveDate::from_ymd_opt(2015, 3, 7).ok_or(anyhow::anyhow!("Invalid date"))?;

    let query = Query::builder()
        .bounding_box(-71.0, -70.0, 41.0, 42.0)
        .date_range(start, end)
        .sensor(Sensor::Landsat8)
        .build();

    let client = CatalogClient::new();
    println!("{}", client.request_url(&query));

    let response = client.search(&query).await?;
    for scene in response.scenes.iter().filter(|s| s.cloud_cover < 1.0) {
        println!("{scene}\n");
    }

    Ok(())
}
