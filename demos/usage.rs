//! Walk through every SerpPro operation.
//!
//! ```sh
//! SERPPRO_API_KEY=... cargo run --example usage
//! ```

use chrono::NaiveDate;
use serppro_client::{
    DateRange, DeepItem, DeepRequest, Device, FinanceStatisticsRequest, FrequencyRequest, Grouping,
    HistoryRequest, RegionCheckRequest, RegionSearchType, SearchSystem, SerpProClient,
    ServiceType, Syntax, TaskType,
};
use tracing_subscriber::EnvFilter;

fn date(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
}

fn print_deep_item(item: &DeepItem) {
    println!(
        "  {:>10}  {}",
        item.frequency.as_deref().unwrap_or("-"),
        item.phrase.as_deref().unwrap_or("")
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = SerpProClient::from_env()?;

    let frequency = client
        .wordstat_frequency(
            FrequencyRequest::new("Король и Шут")
                .region("225")
                .device(Device::All)
                .task_type(TaskType::Regular)
                .syntax(Syntax::Ws),
        )
        .await?;
    println!(
        "frequency of '{}': {}",
        frequency.request.query, frequency.frequency
    );

    let deep = client
        .wordstat_deep(DeepRequest::new("КиШ").region("225"))
        .await?;
    println!("associations:");
    for item in deep.associations.iter().take(10) {
        print_deep_item(item);
    }
    println!("popular:");
    for item in deep.popular.iter().take(10) {
        print_deep_item(item);
    }

    let history = client
        .wordstat_history(
            HistoryRequest::new("Король и Шут")
                .region("225")
                .grouping(Grouping::Month)
                .dates(DateRange::new(date("2025-07-01")?, date("2025-09-30")?)),
        )
        .await?;
    for item in &history.items {
        println!(
            "  {}  {}",
            item.date.as_deref().unwrap_or("?"),
            item.frequency.map_or_else(|| "-".to_string(), |f| f.to_string())
        );
    }
    println!("total: {}", history.total_frequency());

    let yandex = client.region_yandex("Москва").await?;
    if let Some(first) = yandex.first() {
        println!(
            "yandex region: {} ({})",
            first.name.as_deref().unwrap_or("?"),
            first.code.as_deref().unwrap_or("?")
        );
    }

    let google = client.region_google("Moscow").await?;
    println!("google matches: {}", google.regions.len());

    let check = client
        .region_check(RegionCheckRequest::new(
            "225",
            SearchSystem::Yandex,
            RegionSearchType::Code,
        ))
        .await?;
    println!("region 225 recognized: {}", check.is_recognized());

    let total = client.finance_total(Some(ServiceType::WordstatFrequency)).await?;
    println!("wordstat frequency requests billed: {}", total.request_count);

    let stats = client
        .finance_statistics(
            FinanceStatisticsRequest::new()
                .service_type(ServiceType::WordstatFrequency)
                .dates(DateRange::new(date("2025-07-01")?, date("2025-10-06")?)),
        )
        .await?;
    println!(
        "requests between 2025-07-01 and 2025-10-06: {} over {} days",
        stats.request_count,
        stats.by_date.len()
    );

    Ok(())
}
