/// Dashboard render model
///
/// [`DashboardView`] is a plain value describing everything the dashboard
/// shows. Building it is pure; [`DashboardView::render_text`] turns it into
/// the terminal layout printed by the CLI.

use catalog_shared::models::product::Product;
use chrono::NaiveDate;
use std::fmt;

/// Side navigation entries, in display order
pub const NAV_ITEMS: [&str; 10] = [
    "Dashboard",
    "Orders",
    "Rides",
    "Clients",
    "Drivers",
    "Live map",
    "Car classes",
    "Branches",
    "Moderators",
    "Settings",
];

pub const GREETING: &str = "Good morning, Krishna!";

pub const TABLE_HEADERS: [&str; 6] = [
    "User",
    "Car Comfort",
    "Order Timed",
    "Start Location",
    "Finish Location",
    "Income",
];

pub const EMPTY_TABLE_MESSAGE: &str = "No products found.";

const SUMMARY_TILES: [(&str, &str); 3] = [
    ("Total Orders", "1,234"),
    ("Total Earnings", "$56,789"),
    ("Portfolio", "45"),
];

const TOP_DRIVERS: [(&str, u32, &str); 3] = [
    ("Sachin", 5, "$98"),
    ("Rahul", 5, "$15"),
    ("Saurav", 5, "$23"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTile {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriverEntry {
    pub name: String,
    pub orders: u32,
    pub income: String,
}

/// One rendered products table row
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub user: String,
    pub car_comfort: String,
    pub order_timed: String,
    pub start_location: String,
    pub finish_location: String,
    pub income: String,
}

impl ProductRow {
    /// Builds the row for `product`, stamping it with `today`
    pub fn from_product(product: &Product, today: NaiveDate) -> Self {
        let car_comfort = product
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("N/A")
            .to_string();

        Self {
            user: product.name.clone(),
            car_comfort,
            order_timed: format_date(today),
            start_location: "Start Location".to_string(),
            finish_location: "Finish Location".to_string(),
            income: format!("${}", product.price),
        }
    }

    fn cells(&self) -> [&str; 6] {
        [
            &self.user,
            &self.car_comfort,
            &self.order_timed,
            &self.start_location,
            &self.finish_location,
            &self.income,
        ]
    }
}

/// Products table body
#[derive(Debug, Clone, PartialEq)]
pub enum ProductTable {
    Rows(Vec<ProductRow>),

    /// Single placeholder row spanning all columns
    Empty,
}

/// Everything the dashboard displays
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub nav_items: Vec<String>,
    pub greeting: String,
    pub tiles: Vec<SummaryTile>,
    pub error: Option<String>,
    pub top_drivers: Vec<DriverEntry>,
    pub products: ProductTable,
}

impl DashboardView {
    pub fn build(products: &[Product], error: Option<&str>, today: NaiveDate) -> Self {
        let products = if products.is_empty() {
            ProductTable::Empty
        } else {
            ProductTable::Rows(
                products
                    .iter()
                    .map(|p| ProductRow::from_product(p, today))
                    .collect(),
            )
        };

        Self {
            nav_items: NAV_ITEMS.iter().map(|s| s.to_string()).collect(),
            greeting: GREETING.to_string(),
            tiles: SUMMARY_TILES
                .iter()
                .map(|(label, value)| SummaryTile {
                    label: label.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            error: error.map(str::to_string),
            top_drivers: TOP_DRIVERS
                .iter()
                .map(|(name, orders, income)| DriverEntry {
                    name: name.to_string(),
                    orders: *orders,
                    income: income.to_string(),
                })
                .collect(),
            products,
        }
    }

    /// Renders the dashboard as plain text
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    fn write_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[&str; 6]> = match &self.products {
            ProductTable::Rows(rows) => rows.iter().map(ProductRow::cells).collect(),
            ProductTable::Empty => Vec::new(),
        };

        let mut widths = TABLE_HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        writeln!(f, "  {}", join_padded(&TABLE_HEADERS, &widths))?;

        if rows.is_empty() {
            writeln!(f, "  {}", EMPTY_TABLE_MESSAGE)?;
        }
        for row in &rows {
            writeln!(f, "  {}", join_padded(row, &widths))?;
        }

        Ok(())
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Main Menu: {} | Logout", self.nav_items.join(" | "))?;
        writeln!(f)?;
        writeln!(f, "{}", self.greeting)?;
        writeln!(f)?;

        for tile in &self.tiles {
            writeln!(f, "  {:<16}{}", tile.label, tile.value)?;
        }
        writeln!(f)?;

        if let Some(error) = &self.error {
            writeln!(f, "! {}", error)?;
            writeln!(f)?;
        }

        writeln!(f, "Progress Score")?;
        writeln!(f, "  [graph placeholder]")?;
        writeln!(f)?;

        writeln!(f, "Top Drivers")?;
        for driver in &self.top_drivers {
            writeln!(
                f,
                "  {:<10}Orders: {:<4}{}",
                driver.name, driver.orders, driver.income
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Products")?;
        self.write_table(f)
    }
}

fn join_padded(cells: &[&str; 6], widths: &[usize; 6]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// `M/D/YYYY`, no zero padding
fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}
