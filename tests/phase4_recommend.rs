//! Phase 4 tests: Recommendation ranking, diversity + catalog reload.

use std::io::Write;

use product_lens::catalog::Catalog;
use product_lens::engine::{Recommender, SharedRecommender};
use product_lens::types::{CatalogRow, LensError, DEFAULT_TOP_N};
use tempfile::NamedTempFile;

fn product(name: &str, brand: &str, description: &str, category: &str, price: f64, rating: f64) -> CatalogRow {
    CatalogRow {
        name: name.to_string(),
        brand: brand.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        price,
        rating,
        image_url: format!("http://img/{}.png", name.to_lowercase().replace(' ', "-")),
    }
}

fn sample_rows() -> Vec<CatalogRow> {
    vec![
        product("Galaxy S21 (Black, 128GB)", "Samsung", "5G smartphone with AMOLED display", "Mobiles", 69999.0, 4.4),
        product("Galaxy S21 (White, 128GB)", "Samsung", "5G smartphone with AMOLED display", "Mobiles", 69999.0, 4.4),
        product("Galaxy S21 (Violet, 256GB)", "Samsung", "5G smartphone with AMOLED display", "Mobiles", 73999.0, 4.4),
        product("Redmi Note 12 (Aqua)", "Xiaomi", "Budget 5G smartphone with AMOLED display", "Mobiles", 16999.0, 4.1),
        product("Redmi Note 12 (Azure)", "Xiaomi", "Budget 5G smartphone with AMOLED display", "Mobiles", 16999.0, 4.1),
        product("Nord CE 3", "OnePlus", "5G smartphone with fluid AMOLED display", "Mobiles", 24999.0, 4.3),
        product("Bravia 55", "Sony", "4K LED television with Dolby audio", "Televisions", 89990.0, 4.6),
        product("Inspiron 15", "Dell", "Laptop with SSD storage and backlit keyboard", "Laptops", 55990.0, 3.9),
        product("Rockerz 450", "boAt", "Wireless headphone with deep bass", "Audio", 1499.0, 4.0),
    ]
}

fn sample_recommender() -> Recommender {
    Recommender::build(Catalog::new(sample_rows()).unwrap()).unwrap()
}

fn write_csv(rows: &[CatalogRow]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).unwrap();
    }
    file.write_all(&writer.into_inner().unwrap()).unwrap();
    file.flush().unwrap();
    file
}

// ==================== Diversity Tests ====================

#[test]
fn test_query_variants_excluded() {
    let recommender = sample_recommender();
    let results = recommender.recommend("Galaxy S21 (Black, 128GB)", DEFAULT_TOP_N);
    assert!(!results.is_empty());
    for rec in &results {
        assert!(!rec.name.starts_with("Galaxy S21"), "variant {} returned", rec.name);
    }
}

#[test]
fn test_one_result_per_base_model() {
    let recommender = sample_recommender();
    let results = recommender.recommend("Nord CE 3", 10);
    let redmi: Vec<_> = results
        .iter()
        .filter(|r| r.name.starts_with("Redmi Note 12"))
        .collect();
    assert_eq!(redmi.len(), 1);
    // Identical variants tie; the earlier catalog row wins.
    assert_eq!(redmi[0].name, "Redmi Note 12 (Aqua)");

    let galaxy = results
        .iter()
        .filter(|r| r.name.starts_with("Galaxy S21"))
        .count();
    assert_eq!(galaxy, 1);
}

#[test]
fn test_exhausts_distinct_base_models() {
    let recommender = sample_recommender();
    // Other base models: Redmi Note 12, Nord CE 3, Bravia 55, Inspiron 15, Rockerz 450.
    let results = recommender.recommend("Galaxy S21 (White, 128GB)", 50);
    assert_eq!(results.len(), 5);
}

// ==================== Ranking Tests ====================

#[test]
fn test_scores_non_increasing() {
    let recommender = sample_recommender();
    let scored = recommender.recommend_scored("Galaxy S21 (Black, 128GB)", DEFAULT_TOP_N);
    for pair in scored.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
    assert_eq!(scored.len(), 5);
    // No shared terms and the lowest price: least similar.
    let last = recommender.catalog().get(scored[4].index).unwrap();
    assert_eq!(last.name, "Rockerz 450");
}

#[test]
fn test_top_n_limits_results() {
    let recommender = sample_recommender();
    assert_eq!(recommender.recommend("Bravia 55", 2).len(), 2);
    assert!(recommender.recommend("Bravia 55", 0).is_empty());
}

#[test]
fn test_ties_keep_catalog_order() {
    // Single-character names produce no tokens, so these rows are identical.
    let rows = vec![
        product("Q", "Acme", "steel kettle", "Kitchen", 10.0, 4.0),
        product("A", "Acme", "steel kettle", "Kitchen", 10.0, 4.0),
        product("B", "Acme", "steel kettle", "Kitchen", 10.0, 4.0),
        product("C", "Acme", "steel kettle", "Kitchen", 10.0, 4.0),
    ];
    let forward = Recommender::build(Catalog::new(rows.clone()).unwrap()).unwrap();
    let names: Vec<String> = forward.recommend("Q", 5).into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["A", "B", "C"]);

    let mut reversed = rows;
    reversed[1..].reverse();
    let backward = Recommender::build(Catalog::new(reversed).unwrap()).unwrap();
    let names: Vec<String> = backward.recommend("Q", 5).into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["C", "B", "A"]);
}

#[test]
fn test_recommendations_are_deterministic() {
    let recommender = sample_recommender();
    let first = recommender.recommend("Inspiron 15", DEFAULT_TOP_N);
    for _ in 0..5 {
        assert_eq!(recommender.recommend("Inspiron 15", DEFAULT_TOP_N), first);
    }
    assert_eq!(sample_recommender().recommend("Inspiron 15", DEFAULT_TOP_N), first);
}

#[test]
fn test_recommendation_projection() {
    let recommender = sample_recommender();
    let results = recommender.recommend("Rockerz 450", DEFAULT_TOP_N);
    for rec in &results {
        let index = recommender.catalog().position(&rec.name).unwrap();
        let row = recommender.catalog().get(index).unwrap();
        assert_eq!(rec.price, row.price);
        assert_eq!(rec.image_url, row.image_url);
    }
    let json = serde_json::to_value(&results[0]).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 3);
    assert!(json.get("image_url").is_some());
}

// ==================== Unknown Product Tests ====================

#[test]
fn test_unknown_product_is_empty() {
    let recommender = sample_recommender();
    assert!(recommender.recommend("nonexistent-xyz", DEFAULT_TOP_N).is_empty());
    assert!(recommender.recommend("", DEFAULT_TOP_N).is_empty());
    // Lookup is exact.
    assert!(recommender.recommend("bravia 55", DEFAULT_TOP_N).is_empty());
}

#[test]
fn test_single_product_catalog() {
    let rows = vec![product("Solo", "Acme", "lonely gadget", "Misc", 5.0, 3.0)];
    let recommender = Recommender::build(Catalog::new(rows).unwrap()).unwrap();
    assert!(recommender.recommend("Solo", DEFAULT_TOP_N).is_empty());
}

// ==================== Reload Tests ====================

#[test]
fn test_from_csv() {
    let file = write_csv(&sample_rows());
    let recommender = Recommender::from_csv(file.path()).unwrap();
    assert_eq!(recommender.catalog().len(), 9);
    assert_eq!(recommender.similarity().size(), 9);
    assert_eq!(
        recommender.recommend("Bravia 55", 3),
        sample_recommender().recommend("Bravia 55", 3)
    );
}

#[test]
fn test_reload_swaps_snapshot() {
    let rows = sample_rows();
    let file = write_csv(&rows[..4]);
    let shared = SharedRecommender::new(Recommender::from_csv(file.path()).unwrap());
    let before = shared.current();
    assert_eq!(before.catalog().len(), 4);

    let bigger = write_csv(&rows);
    let after = shared.reload(bigger.path()).unwrap();
    assert_eq!(after.catalog().len(), 9);
    assert_eq!(shared.current().catalog().len(), 9);
    // Readers holding the old snapshot are unaffected.
    assert_eq!(before.catalog().len(), 4);
    assert!(before.recommend("Bravia 55", 3).is_empty());
}

#[test]
fn test_failed_reload_keeps_current() {
    let file = write_csv(&sample_rows());
    let shared = SharedRecommender::new(Recommender::from_csv(file.path()).unwrap());

    let mut broken = NamedTempFile::new().unwrap();
    writeln!(broken, "name,brand,description,category,price,rating,image_url").unwrap();
    writeln!(broken, "Widget,Acme,thing,Misc,free,3,u").unwrap();
    broken.flush().unwrap();

    let err = shared.reload(broken.path()).unwrap_err();
    assert!(matches!(err, LensError::InvalidRow { row: 1, .. }));
    assert_eq!(shared.current().catalog().len(), 9);

    let missing = shared.reload(std::path::Path::new("/nonexistent/catalog.csv"));
    assert!(matches!(missing, Err(LensError::Io(_))));
    assert_eq!(shared.current().catalog().len(), 9);
}

#[test]
fn test_swap_replaces_current() {
    let shared = SharedRecommender::new(sample_recommender());
    let rows = vec![product("Solo", "Acme", "lonely gadget", "Misc", 5.0, 3.0)];
    shared.swap(Recommender::build(Catalog::new(rows).unwrap()).unwrap());
    assert_eq!(shared.current().catalog().len(), 1);
}
