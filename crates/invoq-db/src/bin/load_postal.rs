//! # Postal Dataset Loader
//!
//! Imports the Thai postal-code reference dataset into the database.
//!
//! ## Usage
//! ```bash
//! # Import from the default dataset file
//! cargo run -p invoq-db --bin load-postal
//!
//! # Specify dataset and database paths
//! cargo run -p invoq-db --bin load-postal -- --file ./data/postal.json --db ./invoq.db
//! ```
//!
//! ## Dataset Format
//! A JSON array of rows, one per (postal code, sub-district) pair:
//! ```json
//! [
//!   {
//!     "postal_code": "11120",
//!     "sub_district": "บางพูด",
//!     "district": "ปากเกร็ด",
//!     "province": "นนทบุรี"
//!   }
//! ]
//! ```
//!
//! The dataset is public reference data; re-running the loader against a
//! populated database is refused to avoid duplicate rows.

use std::env;
use std::fs;

use invoq_core::PostalEntry;
use invoq_db::{Database, DbConfig};

const BATCH_SIZE: usize = 500;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut file_path = String::from("./data/postal.json");
    let mut db_path = String::from("./invoq.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--file" | "-f" => {
                if i + 1 < args.len() {
                    file_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Invoq Postal Dataset Loader");
                println!();
                println!("Usage: load-postal [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --file <PATH>  Dataset JSON file (default: ./data/postal.json)");
                println!("  -d, --db <PATH>    Database file path (default: ./invoq.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("📮 Invoq Postal Dataset Loader");
    println!("==============================");
    println!("Dataset:  {}", file_path);
    println!("Database: {}", db_path);
    println!();

    // Read and parse the dataset
    let raw = fs::read_to_string(&file_path)?;
    let entries: Vec<PostalEntry> = serde_json::from_str(&raw)?;
    println!("✓ Parsed {} dataset rows", entries.len());

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to double-import
    let existing = db.postal().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} postal rows", existing);
        println!("  Skipping import to avoid duplicates.");
        println!("  Delete the postal_codes rows to re-import.");
        return Ok(());
    }

    // Import in batches
    println!();
    println!("Importing...");

    let start = std::time::Instant::now();
    let mut imported = 0;

    for batch in entries.chunks(BATCH_SIZE) {
        db.postal().append_batch(batch).await?;
        imported += batch.len();

        if imported % 2500 == 0 {
            println!("  Imported {} rows...", imported);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Imported {} rows in {:?}", imported, elapsed);

    // Spot-check a lookup
    let total = db.postal().count().await?;
    println!("  Rows in store: {}", total);

    println!();
    println!("✓ Import complete!");

    Ok(())
}
