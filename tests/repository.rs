use std::collections::HashSet;
use std::thread;

use product_catalog::domain::product::{NewProduct, UpdateProduct};
use product_catalog::domain::query::{ProductQuery, SortOrder};
use product_catalog::domain::types::{Price, ProductId, ProductTitle};
use product_catalog::repository::errors::RepositoryError;
use product_catalog::repository::{ProductReader, ProductWriter};

mod common;

fn new_product(title: &str, brand: &str, price: f64) -> NewProduct {
    NewProduct::new(
        ProductTitle::new(title).unwrap(),
        format!("{title} description"),
        brand.to_string(),
        Price::new(price).unwrap(),
    )
}

#[test]
fn test_product_repository_crud() {
    let test_db = common::TestDb::new("test_product_repository_crud.db");
    let repo = test_db.repository();

    let mug = repo
        .create_product(&new_product("Mug", "Acme", 9.99))
        .unwrap();
    assert_eq!(mug.id.as_str(), "1");
    assert_eq!(mug.brand, "Acme");

    let fetched = repo.get_product_by_id(&mug.id).unwrap().unwrap();
    assert_eq!(fetched, mug);

    let updates = UpdateProduct {
        title: Some(ProductTitle::new("Big Mug").unwrap()),
        ..UpdateProduct::default()
    };
    let updated = repo.update_product(&mug.id, &updates).unwrap();
    assert_eq!(updated.title.as_str(), "Big Mug");
    assert_eq!(updated.price, mug.price);
    assert_eq!(updated.created_at, mug.created_at);

    repo.delete_product(&mug.id).unwrap();
    assert!(repo.get_product_by_id(&mug.id).unwrap().is_none());
    assert_eq!(repo.count_products().unwrap(), 0);
}

#[test]
fn test_create_assigns_sequential_ids() {
    let test_db = common::TestDb::new("test_create_assigns_sequential_ids.db");
    let repo = test_db.repository();

    let ids: Vec<String> = (0..3)
        .map(|i| {
            repo.create_product(&new_product(&format!("P{i}"), "", 1.0))
                .unwrap()
                .id
                .into_inner()
        })
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    // Ids that are not integers do not take part in the sequence.
    let imported = [(
        ProductId::new("abc").unwrap(),
        new_product("Imported", "", 1.0),
    )];
    assert_eq!(repo.import_products(&imported).unwrap(), 1);

    let next = repo.create_product(&new_product("P3", "", 1.0)).unwrap();
    assert_eq!(next.id.as_str(), "4");
}

#[test]
fn test_create_falls_back_to_timestamp_id() {
    let test_db = common::TestDb::new("test_create_falls_back_to_timestamp_id.db");
    let repo = test_db.repository();

    let max_id = i64::MAX.to_string();
    let imported = [(
        ProductId::new(max_id.as_str()).unwrap(),
        new_product("Last", "", 1.0),
    )];
    repo.import_products(&imported).unwrap();

    // max + 1 overflows, so the id comes from the clock.
    let created = repo.create_product(&new_product("Next", "", 2.0)).unwrap();
    let id = created.id.as_str();
    assert_ne!(id, max_id);
    assert!(!id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()));
    let nanos: i64 = id.parse().unwrap();
    assert!(nanos > 1_700_000_000_000_000_000);

    assert_eq!(repo.count_products().unwrap(), 2);
    let fetched = repo.get_product_by_id(&created.id).unwrap().unwrap();
    assert_eq!(fetched.title.as_str(), "Next");
}

#[test]
fn test_concurrent_creates_get_unique_ids() {
    let test_db = common::TestDb::new("test_concurrent_creates_get_unique_ids.db");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repo = test_db.repository();
            thread::spawn(move || {
                (0..5)
                    .map(|j| {
                        repo.create_product(&new_product(&format!("T{i}-{j}"), "", 1.0))
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<ProductId> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    let unique: HashSet<_> = ids.iter().collect();

    assert_eq!(ids.len(), 40);
    assert_eq!(unique.len(), 40);
    assert_eq!(test_db.repository().count_products().unwrap(), 40);
}

#[test]
fn test_delete_missing_product_is_not_found() {
    let test_db = common::TestDb::new("test_delete_missing_product_is_not_found.db");
    let repo = test_db.repository();
    repo.create_product(&new_product("Mug", "", 1.0)).unwrap();

    let missing = ProductId::new("42").unwrap();
    assert!(matches!(
        repo.delete_product(&missing),
        Err(RepositoryError::NotFound)
    ));
    assert_eq!(repo.count_products().unwrap(), 1);

    assert!(matches!(
        repo.update_product(&missing, &UpdateProduct::default()),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_list_filters_and_sorts() {
    let test_db = common::TestDb::new("test_list_filters_and_sorts.db");
    let repo = test_db.repository();

    let imported: Vec<_> = [
        ("1", "Red Mug", "Acme", 10.0),
        ("2", "Blue Mug", "Zeta", 20.0),
        ("3", "Plate", "acme corp", 30.0),
        ("10", "50% Off Bowl", "", 20.0),
        ("4", "Éclair Pan", "Über", 5.0),
    ]
    .into_iter()
    .map(|(id, title, brand, price)| {
        (
            ProductId::new(id).unwrap(),
            new_product(title, brand, price),
        )
    })
    .collect();
    repo.import_products(&imported).unwrap();

    let ids = |query: &ProductQuery| -> Vec<String> {
        repo.list_products(query)
            .unwrap()
            .into_iter()
            .map(|p| p.id.into_inner())
            .collect()
    };

    // Default order compares ids as strings.
    assert_eq!(ids(&ProductQuery::new()), vec!["1", "10", "2", "3", "4"]);

    let in_range = ProductQuery::new().min_price(20.0).max_price(30.0);
    assert_eq!(ids(&in_range), vec!["10", "2", "3"]);

    let by_price_desc = repo
        .list_products(&ProductQuery::new().sort(SortOrder::PriceDesc))
        .unwrap();
    assert!(by_price_desc.windows(2).all(|w| w[0].price >= w[1].price));
    assert_eq!(
        by_price_desc
            .iter()
            .map(|p| p.id.as_str())
            .collect::<Vec<_>>(),
        vec!["3", "10", "2", "1", "4"]
    );

    assert_eq!(ids(&ProductQuery::new().term("MUG")), vec!["1", "2"]);
    assert_eq!(ids(&ProductQuery::new().term("50%")), vec!["10"]);
    assert_eq!(ids(&ProductQuery::new().term("%")), vec!["10"]);
    assert_eq!(ids(&ProductQuery::new().brand("ACME")), vec!["1", "3"]);
    assert_eq!(
        ids(&ProductQuery::new()
            .brand("acme")
            .sort(SortOrder::PriceAsc)
            .max_price(15.0)),
        vec!["1"]
    );

    // Case folding covers non-ASCII letters in both the needle and the column.
    assert_eq!(ids(&ProductQuery::new().term("éclair")), vec!["4"]);
    assert_eq!(ids(&ProductQuery::new().term("ÉCLAIR PAN")), vec!["4"]);
    assert_eq!(ids(&ProductQuery::new().brand("über")), vec!["4"]);
    assert_eq!(ids(&ProductQuery::new().brand("ÜBER")), vec!["4"]);
}

#[test]
fn test_list_brands_distinct_and_sorted() {
    let test_db = common::TestDb::new("test_list_brands_distinct_and_sorted.db");
    let repo = test_db.repository();

    for (title, brand) in [("A", "Zeta"), ("B", "Acme"), ("C", ""), ("D", "Acme")] {
        repo.create_product(&new_product(title, brand, 1.0)).unwrap();
    }

    assert_eq!(repo.list_brands().unwrap(), vec!["Acme", "Zeta"]);
}
