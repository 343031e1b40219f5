use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// Service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceSettings {
	pub host: String,
	pub port: u16,
	pub data_path: PathBuf,
}

impl Default for ServiceSettings {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 5000,
			data_path: PathBuf::from("data/sales.csv"),
		}
	}
}

// Raw input records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
	pub date: NaiveDate,
	pub sku: String,
	pub unit_price: f64,
	/// Units in a single order. Monthly sums are widened to `u64`.
	pub quantity: u32,
	pub total_price: f64,
}

impl SaleRecord {
	/// Calendar month of the sale as `YYYY-MM`.
	pub fn month(&self) -> String {
		month_key(self.date)
	}
}

pub fn month_key(date: NaiveDate) -> String {
	date.format("%Y-%m").to_string()
}

// Output models
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemTotals {
	pub quantity: u64,
	pub total_price: f64,
}

/// Per-month aggregation scope. `items` keeps skus in first-seen order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthBucket {
	pub total_sales: f64,
	pub items: IndexMap<String, ItemTotals>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopularItem {
	pub sku: String,
	pub quantity: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueItem {
	pub sku: String,
	pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
	pub sku: String,
	pub min_orders: u64,
	pub max_orders: u64,
	pub avg_orders: f64,
}

/// Full monthly sales report. Month keys are `YYYY-MM` and serialize in chronological order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
	pub total_sales: f64,
	pub month_wise_sales: BTreeMap<String, MonthBucket>,
	pub popular_items_by_month: BTreeMap<String, PopularItem>,
	pub revenue_items_by_month: BTreeMap<String, RevenueItem>,
	pub stats_by_month: BTreeMap<String, OrderStats>,
}

fn round2(v: f64) -> f64 {
	(v * 100.0).round() / 100.0
}
fn round4(v: f64) -> f64 {
	(v * 10000.0).round() / 10000.0
}

impl SalesReport {
	/// Rounds money values to 2 decimals and average order counts to 4.
	pub fn rounded(mut self) -> Self {
		self.total_sales = round2(self.total_sales);
		for bucket in self.month_wise_sales.values_mut() {
			bucket.total_sales = round2(bucket.total_sales);
			for item in bucket.items.values_mut() {
				item.total_price = round2(item.total_price);
			}
		}
		for item in self.revenue_items_by_month.values_mut() {
			item.revenue = round2(item.revenue);
		}
		for stats in self.stats_by_month.values_mut() {
			stats.avg_orders = round4(stats.avg_orders);
		}
		self
	}

	pub fn is_empty(&self) -> bool {
		self.month_wise_sales.is_empty()
	}
}
