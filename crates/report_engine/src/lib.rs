use anyhow::{Context, Result};
use models::{MonthBucket, OrderStats, PopularItem, RevenueItem, SaleRecord, SalesReport};
use std::{collections::BTreeMap, fs, path::Path};

mod render;

pub use render::TextReport;

/// Builds the monthly sales report from a list of sale records.
///
/// Popular and revenue items keep the first-seen sku on ties. Order statistics are
/// computed over the individual record quantities of each month's popular sku.
pub fn generate_report(records: &[SaleRecord]) -> SalesReport {
    let mut total_sales = 0.0;
    let mut month_wise_sales: BTreeMap<String, MonthBucket> = BTreeMap::new();

    for sale in records {
        total_sales += sale.total_price;

        let bucket = month_wise_sales.entry(sale.month()).or_default();
        bucket.total_sales += sale.total_price;

        let item = bucket.items.entry(sale.sku.clone()).or_default();
        item.quantity += u64::from(sale.quantity);
        item.total_price += sale.total_price;
    }

    let mut popular_items_by_month = BTreeMap::new();
    let mut revenue_items_by_month = BTreeMap::new();
    for (month, bucket) in &month_wise_sales {
        let (popular, revenue) = top_items(bucket);
        if let Some(popular) = popular {
            popular_items_by_month.insert(month.clone(), popular);
        }
        if let Some(revenue) = revenue {
            revenue_items_by_month.insert(month.clone(), revenue);
        }
    }

    let mut stats_by_month = BTreeMap::new();
    for (month, popular) in &popular_items_by_month {
        let quantities: Vec<u32> = records
            .iter()
            .filter(|sale| sale.sku == popular.sku && sale.month() == *month)
            .map(|sale| sale.quantity)
            .collect();
        if let Some(stats) = order_stats(&popular.sku, &quantities) {
            stats_by_month.insert(month.clone(), stats);
        }
    }

    SalesReport {
        total_sales,
        month_wise_sales,
        popular_items_by_month,
        revenue_items_by_month,
        stats_by_month,
    }
}

/// Single scan over a month's items for the highest quantity and highest revenue sku.
fn top_items(bucket: &MonthBucket) -> (Option<PopularItem>, Option<RevenueItem>) {
    let mut popular: Option<PopularItem> = None;
    let mut revenue: Option<RevenueItem> = None;

    for (sku, item) in &bucket.items {
        if popular
            .as_ref()
            .map_or(true, |best| item.quantity > best.quantity)
        {
            popular = Some(PopularItem {
                sku: sku.clone(),
                quantity: item.quantity,
            });
        }
        if revenue
            .as_ref()
            .map_or(true, |best| item.total_price > best.revenue)
        {
            revenue = Some(RevenueItem {
                sku: sku.clone(),
                revenue: item.total_price,
            });
        }
    }

    (popular, revenue)
}

fn order_stats(sku: &str, quantities: &[u32]) -> Option<OrderStats> {
    let min_orders = u64::from(*quantities.iter().min()?);
    let max_orders = u64::from(*quantities.iter().max()?);
    let total: u64 = quantities.iter().map(|&q| u64::from(q)).sum();
    let avg_orders = total as f64 / quantities.len() as f64;

    Some(OrderStats {
        sku: sku.to_string(),
        min_orders,
        max_orders,
        avg_orders,
    })
}

/// Reads a sales export from disk and aggregates it.
pub fn generate_report_from_file(data_path: &Path) -> Result<SalesReport> {
    let records = data_import::read_sales_file(data_path)
        .with_context(|| format!("Reading sales data from {}", data_path.display()))?;
    let report = generate_report(&records);
    tracing::info!(
        records = records.len(),
        months = report.month_wise_sales.len(),
        "generated sales report"
    );
    Ok(report)
}

pub fn write_report_json(report: &SalesReport, out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(out_path, json)?;
    Ok(())
}
