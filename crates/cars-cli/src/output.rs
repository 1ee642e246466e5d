//! Output formatting for cars-cli (table, json, csv)

use cars_core::{Car, CarDetail, CarWithManufacturer, Category, Manufacturer};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a section heading (table output only, unless in quiet mode)
    pub fn heading(&self, msg: &str) {
        if !self.quiet && self.format == OutputFormat::Table {
            println!("{}", msg.bold());
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print data in the configured format
    pub fn print<T: Tabled + Serialize>(&self, data: &[T]) {
        match self.format {
            OutputFormat::Table => {
                if data.is_empty() {
                    if !self.quiet {
                        println!("No results");
                    }
                } else {
                    let table = Table::new(data).to_string();
                    println!("{}", table);
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| "[]".to_string())
                );
            }
            OutputFormat::Csv => {
                print!("{}", to_csv(data));
            }
        }
    }

    /// Print key-value pairs (for the show command)
    pub fn print_kv(&self, pairs: &[(&str, String)]) {
        match self.format {
            OutputFormat::Table => {
                for (key, value) in pairs {
                    println!("{}: {}", key.bold(), value);
                }
            }
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&map).unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputFormat::Csv => {
                let keys: Vec<String> = pairs.iter().map(|(k, _)| escape_csv(k)).collect();
                println!("{}", keys.join(","));
                let values: Vec<String> = pairs.iter().map(|(_, v)| escape_csv(v)).collect();
                println!("{}", values.join(","));
            }
        }
    }
}

/// Render rows as CSV, header taken from the first row
fn to_csv<T: Serialize>(data: &[T]) -> String {
    let Some(first) = data.first() else {
        return String::new();
    };
    let serde_json::Value::Object(map) = serde_json::to_value(first).unwrap_or_default() else {
        return String::new();
    };

    let headers: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    let mut out = headers.join(",");
    out.push('\n');

    for item in data {
        if let Ok(serde_json::Value::Object(row)) = serde_json::to_value(item) {
            let values: Vec<String> = headers
                .iter()
                .map(|h| {
                    row.get(*h)
                        .map(|v| match v {
                            serde_json::Value::String(s) => escape_csv(s),
                            other => escape_csv(&other.to_string()),
                        })
                        .unwrap_or_default()
                })
                .collect();
            out.push_str(&values.join(","));
            out.push('\n');
        }
    }
    out
}

/// Escape a value for CSV output
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// =============================================================================
// Display types for the commands
// =============================================================================

/// Listing row: a car with its manufacturer name
#[derive(Debug, Tabled, Serialize)]
pub struct CarRow {
    #[tabled(rename = "ID")]
    pub id: u32,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Manufacturer")]
    pub manufacturer: String,
    #[tabled(rename = "Year")]
    pub year: u16,
    #[tabled(rename = "Engine")]
    pub engine: String,
    #[tabled(rename = "HP")]
    pub horsepower: u32,
}

impl From<CarWithManufacturer> for CarRow {
    fn from(entry: CarWithManufacturer) -> Self {
        let car = entry.car;
        Self {
            id: car.id,
            name: car.name,
            manufacturer: entry.manufacturer_name.unwrap_or_else(|| "-".to_string()),
            year: car.year,
            engine: car.specifications.engine,
            horsepower: car.specifications.horsepower,
        }
    }
}

/// Batch row: a car as returned by the API, IDs unresolved
#[derive(Debug, Tabled, Serialize)]
pub struct ModelRow {
    #[tabled(rename = "ID")]
    pub id: u32,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Manufacturer ID")]
    pub manufacturer_id: u32,
    #[tabled(rename = "Category ID")]
    pub category_id: u32,
    #[tabled(rename = "Year")]
    pub year: u16,
}

impl From<Car> for ModelRow {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            name: car.name,
            manufacturer_id: car.manufacturer_id,
            category_id: car.category_id,
            year: car.year,
        }
    }
}

/// Comparison row: full specifications next to each other
#[derive(Debug, Tabled, Serialize)]
pub struct CompareRow {
    #[tabled(rename = "ID")]
    pub id: u32,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Manufacturer")]
    pub manufacturer: String,
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "Year")]
    pub year: u16,
    #[tabled(rename = "Engine")]
    pub engine: String,
    #[tabled(rename = "HP")]
    pub horsepower: u32,
    #[tabled(rename = "Transmission")]
    pub transmission: String,
    #[tabled(rename = "Drivetrain")]
    pub drivetrain: String,
}

impl From<CarDetail> for CompareRow {
    fn from(detail: CarDetail) -> Self {
        let CarDetail { car, manufacturer } = detail;
        Self {
            id: car.id,
            name: car.name,
            manufacturer: manufacturer.name,
            country: manufacturer.country,
            year: car.year,
            engine: car.specifications.engine,
            horsepower: car.specifications.horsepower,
            transmission: car.specifications.transmission,
            drivetrain: car.specifications.drivetrain,
        }
    }
}

/// Manufacturer display for the filters command
#[derive(Debug, Tabled, Serialize)]
pub struct ManufacturerRow {
    #[tabled(rename = "ID")]
    pub id: u32,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "Founded")]
    pub founding_year: u16,
}

impl From<Manufacturer> for ManufacturerRow {
    fn from(m: Manufacturer) -> Self {
        Self {
            id: m.id,
            name: m.name,
            country: m.country,
            founding_year: m.founding_year,
        }
    }
}

/// Category display for the filters command
#[derive(Debug, Tabled, Serialize)]
pub struct CategoryRow {
    #[tabled(rename = "ID")]
    pub id: u32,
    #[tabled(rename = "Name")]
    pub name: String,
}

impl From<Category> for CategoryRow {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("Camry"), "Camry");
        assert_eq!(escape_csv("2.0L, I4"), "\"2.0L, I4\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_rows() {
        let rows = vec![
            CategoryRow {
                id: 1,
                name: "Sedan".to_string(),
            },
            CategoryRow {
                id: 2,
                name: "Hatch, back".to_string(),
            },
        ];
        assert_eq!(to_csv(&rows), "id,name\n1,Sedan\n2,\"Hatch, back\"\n");
    }

    #[test]
    fn test_csv_empty() {
        assert_eq!(to_csv::<CategoryRow>(&[]), "");
    }
}
