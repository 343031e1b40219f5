use models::SalesReport;
use std::fmt::{self, Display};

/// Plain-text rendering of a [`SalesReport`], one section per report field.
pub struct TextReport<'a>(pub &'a SalesReport);

impl Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "Sales Report")?;
        writeln!(f, "Total Sales: {}", report.total_sales)?;

        writeln!(f)?;
        writeln!(f, "Month-wise Sales Totals")?;
        for (month, bucket) in &report.month_wise_sales {
            writeln!(f, "  {month}: {}", bucket.total_sales)?;
        }

        writeln!(f)?;
        writeln!(f, "Most Popular Items by Month")?;
        for (month, item) in &report.popular_items_by_month {
            writeln!(f, "  {month}: {} (Quantity: {})", item.sku, item.quantity)?;
        }

        writeln!(f)?;
        writeln!(f, "Items Generating Most Revenue by Month")?;
        for (month, item) in &report.revenue_items_by_month {
            writeln!(f, "  {month}: {} (Revenue: {})", item.sku, item.revenue)?;
        }

        writeln!(f)?;
        writeln!(f, "Min, Max, and Average Orders of Most Popular Items")?;
        for (month, stats) in &report.stats_by_month {
            writeln!(
                f,
                "  {month}: {} - Min: {}, Max: {}, Avg: {}",
                stats.sku, stats.min_orders, stats.max_orders, stats.avg_orders
            )?;
        }
        Ok(())
    }
}
