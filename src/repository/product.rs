//! Repository implementation for catalog products.

use std::collections::BTreeSet;

use chrono::Utc;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    db::unicode_lower,
    domain::{
        product::{NewProduct, Product, UpdateProduct},
        query::{ProductQuery, SortOrder},
        types::ProductId,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, ProductChanges as DbProductChanges,
    },
    repository::{
        DieselRepository, ProductReader, ProductWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// Wraps a user string into a `LIKE` pattern that matches it literally.
fn like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn into_domain(rows: Vec<DbProduct>) -> RepositoryResult<Vec<Product>> {
    rows.into_iter()
        .map(|row| Product::try_from(row).map_err(RepositoryError::from))
        .collect()
}

fn product_exists(conn: &mut SqliteConnection, id: &ProductId) -> QueryResult<bool> {
    use crate::schema::products;

    diesel::select(exists(products::table.find(id.as_str()))).get_result(conn)
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .find(id.as_str())
            .select(DbProduct::as_select())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        product
            .map(|p| Product::try_from(p).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_products(&self, query: &ProductQuery) -> RepositoryResult<Vec<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let mut items = products::table
            .select(DbProduct::as_select())
            .into_boxed();

        if let Some(term) = &query.term {
            let pattern = like_pattern(&term.to_lowercase());
            items = items.filter(
                unicode_lower(products::title)
                    .like(pattern.clone())
                    .escape('\\')
                    .or(unicode_lower(products::description)
                        .like(pattern)
                        .escape('\\')),
            );
        }

        if let Some(brand) = &query.brand {
            let pattern = like_pattern(&brand.to_lowercase());
            items = items.filter(unicode_lower(products::brand).like(pattern).escape('\\'));
        }

        if let Some(min_price) = query.min_price {
            items = items.filter(products::price.ge(min_price));
        }

        if let Some(max_price) = query.max_price {
            items = items.filter(products::price.le(max_price));
        }

        items = match query.sort {
            SortOrder::PriceAsc => items.order((products::price.asc(), products::id.asc())),
            SortOrder::PriceDesc => items.order((products::price.desc(), products::id.asc())),
            SortOrder::Id => items.order(products::id.asc()),
        };

        let rows = items.load::<DbProduct>(&mut conn)?;
        into_domain(rows)
    }

    fn list_brands(&self) -> RepositoryResult<Vec<String>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let brands = products::table
            .select(products::brand)
            .distinct()
            .load::<String>(&mut conn)?;

        let unique = brands
            .iter()
            .map(|brand| brand.trim())
            .filter(|brand| !brand.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<String>>();

        Ok(unique.into_iter().collect())
    }

    fn count_products(&self) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let total: i64 = products::table.count().get_result(&mut conn)?;
        Ok(total as usize)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;

        // BEGIN IMMEDIATE takes the write lock up front, so concurrent creates
        // observe each other's ids.
        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let ids = products::table
                .select(products::id)
                .load::<String>(conn)?;

            let id = match ProductId::next_after(ids.iter().map(String::as_str)) {
                Some(candidate) if !product_exists(conn, &candidate)? => candidate,
                _ => {
                    let fallback = ProductId::from_timestamp(Utc::now());
                    log::warn!("Sequential product id unavailable, using timestamp {fallback}");
                    fallback
                }
            };

            let db_new_product = DbNewProduct::from_domain(&id, new_product, Utc::now().naive_utc());
            let inserted = diesel::insert_into(products::table)
                .values(&db_new_product)
                .returning(DbProduct::as_returning())
                .get_result::<DbProduct>(conn)?;

            Product::try_from(inserted).map_err(RepositoryError::from)
        })
    }

    fn import_products(&self, products: &[(ProductId, NewProduct)]) -> RepositoryResult<usize> {
        use crate::schema::products as products_table;

        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;
        let now = Utc::now().naive_utc();

        let insertables = products
            .iter()
            .map(|(id, product)| DbNewProduct::from_domain(id, product, now))
            .collect::<Vec<_>>();

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let mut inserted = 0;
            // SQLite caps bound parameters per statement.
            for chunk in insertables.chunks(500) {
                inserted += diesel::insert_into(products_table::table)
                    .values(chunk)
                    .execute(conn)?;
            }
            Ok(inserted)
        })
    }

    fn update_product(
        &self,
        id: &ProductId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let current = products::table
                .find(id.as_str())
                .select(DbProduct::as_select())
                .first::<DbProduct>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let mut product = Product::try_from(current).map_err(RepositoryError::from)?;
            if updates.is_empty() {
                return Ok(product);
            }
            updates.apply_to(&mut product);

            let changes = DbProductChanges::from(&product);
            let updated = diesel::update(products::table.find(id.as_str()))
                .set(&changes)
                .returning(DbProduct::as_returning())
                .get_result::<DbProduct>(conn)?;

            Product::try_from(updated).map_err(RepositoryError::from)
        })
    }

    fn delete_product(&self, id: &ProductId) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let affected = diesel::delete(products::table.find(id.as_str())).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
