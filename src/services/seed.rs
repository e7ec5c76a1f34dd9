//! One-shot catalog import used to populate an empty store at startup.
//!
//! Two formats are understood: a JSON array of product records (each with an
//! `id`) and a CSV export with `title`, `description`, `brand` and `price`
//! columns, whose rows are numbered `1..n`.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::domain::product::NewProduct;
use crate::domain::types::{Price, ProductId, ProductTitle};
use crate::forms::products::PriceInput;
use crate::repository::errors::RepositoryError;
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

const UNKNOWN_TITLE: &str = "Unknown Product";

/// A single row of the seed file, before validation.
#[derive(Debug, Deserialize)]
pub struct SeedRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<PriceInput>,
}

/// Outcome of [`seed_if_empty`].
#[derive(Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held this many products; nothing was imported.
    Skipped(usize),
    /// This many products were inserted.
    Imported(usize),
}

fn import_error(err: impl std::fmt::Display) -> ServiceError {
    ServiceError::from(RepositoryError::ImportError(err.to_string()))
}

/// Parses a JSON array of seed records.
pub fn parse_json<R: Read>(reader: R) -> ServiceResult<Vec<SeedRecord>> {
    serde_json::from_reader(reader).map_err(import_error)
}

/// Parses a CSV export; unknown columns are ignored and ids are assigned by
/// row position.
pub fn parse_csv<R: Read>(reader: R) -> ServiceResult<Vec<SeedRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in rdr.deserialize::<SeedRecord>().enumerate() {
        let mut record = row.map_err(import_error)?;
        record.id = Some((index + 1).to_string());
        records.push(record);
    }

    Ok(records)
}

/// Converts raw records into insertable products, skipping rows that cannot be
/// stored (missing or repeated id, negative price).
pub fn prepare_records(records: Vec<SeedRecord>) -> Vec<(ProductId, NewProduct)> {
    let mut seen = HashSet::new();
    let mut prepared = Vec::with_capacity(records.len());

    for record in records {
        let Some(id) = record.id.and_then(|id| ProductId::new(id).ok()) else {
            log::warn!("Skipping seed record without id");
            continue;
        };
        if !seen.insert(id.clone()) {
            log::warn!("Skipping duplicate seed record {id}");
            continue;
        }

        let title = record
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        let Ok(title) = ProductTitle::new(title) else {
            continue;
        };
        let price = record
            .price
            .as_ref()
            .map(PriceInput::lenient_value)
            .unwrap_or_default();
        let price = match Price::new(price) {
            Ok(price) => price,
            Err(err) => {
                log::warn!("Skipping seed record {id}: {err}");
                continue;
            }
        };

        let product = NewProduct::new(
            title,
            record.description.unwrap_or_default(),
            record.brand.unwrap_or_default(),
            price,
        );
        prepared.push((id, product));
    }

    prepared
}

/// Loads `path` into the store unless it already contains products.
pub fn seed_if_empty<R>(repo: &R, path: &Path) -> ServiceResult<SeedOutcome>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let existing = repo.count_products()?;
    if existing > 0 {
        log::info!("Found {existing} products in database, skipping data load.");
        return Ok(SeedOutcome::Skipped(existing));
    }

    log::info!("Loading products from {}", path.display());
    let file = File::open(path).map_err(import_error)?;

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let records = if is_csv {
        parse_csv(file)?
    } else {
        parse_json(file)?
    };

    let prepared = prepare_records(records);
    let imported = repo.import_products(&prepared)?;
    log::info!("{imported} products loaded successfully");

    Ok(SeedOutcome::Imported(imported))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::repository::mock::MockRepository;

    #[test]
    fn json_records_keep_their_ids() {
        let json = r#"[
            {"id": "1", "title": "Hammer", "description": "Claw", "brand": "Husky", "price": 15},
            {"id": "2", "title": "Nails", "price": "4.50"}
        ]"#;

        let prepared = prepare_records(parse_json(json.as_bytes()).expect("valid json"));

        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared[0].0.as_str(), "1");
        assert_eq!(prepared[0].1.brand, "Husky");
        assert_eq!(prepared[1].1.price.get(), 4.5);
        assert_eq!(prepared[1].1.description, "");
    }

    #[test]
    fn csv_rows_are_numbered_and_defaulted() {
        let csv = "url,title,description,brand,price\n\
                   http://a,Drill,Cordless,DeWalt,99.00\n\
                   http://b,,,,n/a\n";

        let prepared = prepare_records(parse_csv(csv.as_bytes()).expect("valid csv"));

        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared[0].0.as_str(), "1");
        assert_eq!(prepared[0].1.title.as_str(), "Drill");
        assert_eq!(prepared[0].1.price.get(), 99.0);
        assert_eq!(prepared[1].0.as_str(), "2");
        assert_eq!(prepared[1].1.title.as_str(), UNKNOWN_TITLE);
        assert_eq!(prepared[1].1.price.get(), 0.0);
    }

    #[test]
    fn invalid_records_are_skipped() {
        let json = r#"[
            {"title": "No id", "price": 1},
            {"id": "1", "title": "Kept", "price": 1},
            {"id": "1", "title": "Duplicate", "price": 2},
            {"id": "2", "title": "Negative", "price": -3}
        ]"#;

        let prepared = prepare_records(parse_json(json.as_bytes()).expect("valid json"));

        assert_eq!(prepared.len(), 1);
        assert_eq!(prepared[0].1.title.as_str(), "Kept");
    }

    #[test]
    fn non_empty_store_is_left_alone() {
        let mut repo = MockRepository::new();
        repo.expect_count_products().times(1).returning(|| Ok(3));
        repo.expect_import_products().times(0);

        let outcome = seed_if_empty(&repo, Path::new("missing.json")).expect("should skip");

        assert_eq!(outcome, SeedOutcome::Skipped(3));
    }

    #[test]
    fn empty_store_imports_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        write!(file, r#"[{{"id": "7", "title": "Saw", "price": 20}}]"#).expect("write seed");

        let mut repo = MockRepository::new();
        repo.expect_count_products().times(1).returning(|| Ok(0));
        repo.expect_import_products()
            .withf(|products| products.len() == 1 && products[0].0.as_str() == "7")
            .times(1)
            .returning(|products| Ok(products.len()));

        let outcome = seed_if_empty(&repo, file.path()).expect("should import");

        assert_eq!(outcome, SeedOutcome::Imported(1));
    }
}
