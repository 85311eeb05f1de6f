//! Phase 1 tests: Lexicon construction + catalog ingestion.

use product_lens::catalog::{load_catalog, load_catalog_from_reader, Catalog};
use product_lens::lexicon::seeds::{SEED_BRANDS, SEED_PRODUCT_TYPES, SEED_SPECIFICATIONS};
use product_lens::lexicon::{
    Lexicon, LexiconBuilder, NoSynonyms, StaticThesaurus, SynonymSource, TermRole,
    TransliterationMap,
};
use product_lens::types::{CatalogRow, LensError, LensResult};

use std::io::Write;
use tempfile::NamedTempFile;

fn stub_thesaurus() -> StaticThesaurus {
    let mut thesaurus = StaticThesaurus::new();
    thesaurus.insert("laptop", ["laptop_computer", "Notebook"]);
    thesaurus.insert("television", ["tv", "telly"]);
    thesaurus
}

// ==================== Lexicon Tests ====================

#[test]
fn test_seeds_always_included() {
    let lexicon = Lexicon::standard(None).unwrap();
    for seed in SEED_PRODUCT_TYPES {
        assert!(lexicon.is_product_type(seed), "missing product type {seed}");
    }
    for seed in SEED_BRANDS {
        assert!(lexicon.is_brand(seed), "missing brand {seed}");
    }
    for seed in SEED_SPECIFICATIONS {
        assert!(lexicon.is_specification(seed), "missing spec {seed}");
    }
}

#[test]
fn test_seeds_included_without_synonyms() {
    let lexicon = Lexicon::build(
        SEED_PRODUCT_TYPES.iter().copied(),
        SEED_BRANDS.iter().copied(),
        SEED_SPECIFICATIONS.iter().copied(),
        &NoSynonyms,
    );
    let (product_types, brands, specifications) = lexicon.counts();
    assert_eq!(product_types, SEED_PRODUCT_TYPES.len());
    assert_eq!(brands, SEED_BRANDS.len());
    assert_eq!(specifications, SEED_SPECIFICATIONS.len());
}

#[test]
fn test_synonyms_are_normalized() {
    let lexicon = Lexicon::build(["laptop", "phone"], ["Apple"], ["GB"], &stub_thesaurus());

    assert_eq!(
        lexicon.terms(TermRole::ProductType),
        vec!["laptop", "laptop computer", "notebook", "phone"]
    );
    assert!(lexicon.is_brand("apple"));
    assert!(!lexicon.is_brand("Apple"));
    assert!(lexicon.is_specification("gb"));
}

#[test]
fn test_brands_and_specs_are_not_expanded() {
    let mut thesaurus = stub_thesaurus();
    thesaurus.insert("apple", ["malus_pumila"]);
    let lexicon = Lexicon::build(Vec::<&str>::new(), ["apple"], ["laptop"], &thesaurus);

    assert_eq!(lexicon.terms(TermRole::Brand), vec!["apple"]);
    assert_eq!(lexicon.terms(TermRole::Specification), vec!["laptop"]);
    assert!(lexicon.terms(TermRole::ProductType).is_empty());
}

#[test]
fn test_failing_source_keeps_seed() {
    let flaky = |word: &str| -> LensResult<Vec<String>> {
        if word == "phone" {
            Err(LensError::Config("thesaurus offline".into()))
        } else {
            Ok(vec![format!("{word}_set")])
        }
    };
    let lexicon = Lexicon::build(["phone", "tv"], ["sony"], ["gb"], &flaky);

    assert!(lexicon.is_product_type("phone"));
    assert!(lexicon.is_product_type("tv"));
    assert!(lexicon.is_product_type("tv set"));
    assert!(!lexicon.is_product_type("phone set"));
}

#[test]
fn test_builder_fluent_api() {
    let mut builder = LexiconBuilder::new();
    builder
        .product_types(["Speaker", "  "])
        .brands(["JBL"])
        .specifications(["watt"]);
    let lexicon = builder.build(&NoSynonyms);

    assert_eq!(lexicon.counts(), (1, 1, 1));
    assert!(lexicon.is_product_type("speaker"));
    assert!(lexicon.is_brand("jbl"));
}

#[test]
fn test_terms_are_sorted() {
    let lexicon = Lexicon::standard(None).unwrap();
    for role in [TermRole::ProductType, TermRole::Brand, TermRole::Specification] {
        let terms = lexicon.terms(role);
        let mut sorted = terms.clone();
        sorted.sort();
        assert_eq!(terms, sorted, "{} terms out of order", role.name());
    }
}

#[test]
fn test_term_role_names() {
    assert_eq!(TermRole::from_name("brand"), Some(TermRole::Brand));
    assert_eq!(TermRole::from_name("SPEC"), Some(TermRole::Specification));
    assert_eq!(
        TermRole::from_name("product_type"),
        Some(TermRole::ProductType)
    );
    assert_eq!(TermRole::from_name("color"), None);
    assert_eq!(TermRole::ProductType.name(), "product_type");
}

// ==================== Thesaurus Tests ====================

#[test]
fn test_builtin_thesaurus_expands_television() {
    let lexicon = Lexicon::standard(None).unwrap();
    assert!(lexicon.is_product_type("television set"));
    assert!(lexicon.is_product_type("tv"));
    assert!(lexicon.is_product_type("laptop computer"));
}

#[test]
fn test_thesaurus_file_extends_builtin() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"smartwatch": ["smart_watch"], "laptop": ["ultrabook"]}}"#).unwrap();

    let lexicon = Lexicon::standard(Some(file.path())).unwrap();
    assert!(lexicon.is_product_type("smart watch"));
    assert!(lexicon.is_product_type("ultrabook"));
    assert!(lexicon.is_product_type("laptop computer"));
}

#[test]
fn test_thesaurus_file_errors() {
    let missing = Lexicon::standard(Some(std::path::Path::new("/nonexistent/thesaurus.json")));
    assert!(matches!(missing, Err(LensError::Config(_))));

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[1, 2, 3]").unwrap();
    assert!(matches!(
        Lexicon::standard(Some(file.path())),
        Err(LensError::Json(_))
    ));
}

#[test]
fn test_static_thesaurus_lookup_is_case_insensitive() {
    let thesaurus = stub_thesaurus();
    assert_eq!(thesaurus.len(), 2);
    assert_eq!(
        thesaurus.synonyms(" Television ").unwrap(),
        vec!["tv".to_string(), "telly".to_string()]
    );
    assert!(thesaurus.synonyms("radio").unwrap().is_empty());
}

// ==================== Transliteration Tests ====================

#[test]
fn test_default_transliteration_pairs() {
    let map = TransliterationMap::default();
    assert_eq!(map.len(), 12);
    assert_eq!(map.canonical("leptop"), Some("laptop"));
    assert_eq!(map.canonical("chahiye"), Some("need"));
    assert_eq!(map.canonical("tivi"), Some("tv"));
    assert_eq!(map.canonical("laptop"), None);
}

#[test]
fn test_custom_transliteration_is_lowercased() {
    let map = TransliterationMap::from_pairs([("Kampyutar", "Computer")]);
    assert_eq!(map.canonical("kampyutar"), Some("computer"));
    assert!(!map.is_empty());
}

// ==================== Catalog Ingestion Tests ====================

const CATALOG: &str = "\
name,brand,description,category,price,rating,image_url
Galaxy S21 (Black),Samsung,\"5G phone, 8GB RAM\",Mobiles,69999,4.4,http://img/s21-black.png
Galaxy S21 (White),Samsung,\"5G phone, 8GB RAM\",Mobiles,69999,4.4,http://img/s21-white.png
Bravia 55,Sony,4K LED television,Televisions,89990,4.6,http://img/bravia.png
";

#[test]
fn test_load_catalog_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();

    let catalog = load_catalog(file.path()).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.position("Bravia 55"), Some(2));
    assert_eq!(catalog.position("bravia 55"), None);

    let row = catalog.get(0).unwrap();
    assert_eq!(row.description, "5G phone, 8GB RAM");
    assert_eq!(row.base_model(), "Galaxy S21");
    assert_eq!(catalog.get(1).unwrap().base_model(), "Galaxy S21");
}

#[test]
fn test_load_catalog_missing_file() {
    let err = load_catalog(std::path::Path::new("/nonexistent/products.csv")).unwrap_err();
    assert!(matches!(err, LensError::Io(_)));
}

#[test]
fn test_negative_price_rejected() {
    let csv = "name,brand,description,category,price,rating,image_url\n\
               Widget,Acme,thing,Misc,-1,3,u\n";
    match load_catalog_from_reader(csv.as_bytes()) {
        Err(LensError::InvalidRow { row, .. }) => assert_eq!(row, 1),
        other => panic!("expected InvalidRow, got {other:?}"),
    }
}

#[test]
fn test_empty_name_rejected() {
    let csv = "name,brand,description,category,price,rating,image_url\n\
               Widget,Acme,thing,Misc,1,3,u\n\
               ,Acme,thing,Misc,1,3,u\n";
    match load_catalog_from_reader(csv.as_bytes()) {
        Err(LensError::InvalidRow { row, reason }) => {
            assert_eq!(row, 2);
            assert!(reason.contains("name"));
        }
        other => panic!("expected InvalidRow, got {other:?}"),
    }
}

#[test]
fn test_duplicate_names_first_wins() {
    let row = |name: &str, price: f64| CatalogRow {
        name: name.to_string(),
        brand: "Acme".to_string(),
        description: "gadget".to_string(),
        category: "Misc".to_string(),
        price,
        rating: 4.0,
        image_url: String::new(),
    };
    let catalog = Catalog::new(vec![row("Gizmo", 1.0), row("Other", 2.0), row("Gizmo", 3.0)])
        .unwrap();
    assert_eq!(catalog.position("Gizmo"), Some(0));
    assert_eq!(catalog.len(), 3);
}

#[test]
fn test_empty_catalog_rejected() {
    assert!(matches!(Catalog::new(Vec::new()), Err(LensError::EmptyCatalog)));
}
