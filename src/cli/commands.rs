//! CLI command implementations.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::engine::{KeywordExtractor, MatchStage, Recommender};
use crate::lexicon::{Lexicon, TermRole, TransliterationMap};
use crate::types::{LensError, LensResult};

fn build_extractor(thesaurus: Option<&Path>, keyword_cap: usize) -> LensResult<KeywordExtractor> {
    let lexicon = Lexicon::standard(thesaurus)?;
    Ok(
        KeywordExtractor::new(Arc::new(lexicon), Arc::new(TransliterationMap::default()))
            .with_cap(keyword_cap),
    )
}

fn stage_name(stage: MatchStage) -> &'static str {
    match stage {
        MatchStage::Strict => "strict",
        MatchStage::Fallback => "fallback",
        MatchStage::Empty => "none",
    }
}

/// Extract product-intent keywords from text.
pub fn cmd_extract(
    text: &str,
    thesaurus: Option<&Path>,
    keyword_cap: usize,
    json: bool,
) -> LensResult<()> {
    let extractor = build_extractor(thesaurus, keyword_cap)?;
    let extraction = extractor.extract_detailed(text);

    if json {
        let out = serde_json::json!({
            "description": text,
            "keywords": extraction.keywords,
            "stage": stage_name(extraction.stage),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if extraction.keywords.is_empty() {
        println!("No keywords found");
    } else {
        println!("Keywords ({}):", stage_name(extraction.stage));
        for kw in &extraction.keywords {
            println!("  {}", kw);
        }
    }
    Ok(())
}

/// Recommend products similar to a catalog entry.
pub fn cmd_recommend(
    catalog_path: &Path,
    product_name: &str,
    top_n: usize,
    json: bool,
) -> LensResult<()> {
    let recommender = Recommender::from_csv(catalog_path)?;
    let catalog = recommender.catalog();
    if catalog.position(product_name).is_none() {
        return Err(LensError::ProductNotFound(product_name.to_string()));
    }
    let matches = recommender.recommend_scored(product_name, top_n);

    if json {
        let out: Vec<serde_json::Value> = matches
            .iter()
            .filter_map(|m| {
                catalog.get(m.index).map(|row| {
                    serde_json::json!({
                        "name": row.name,
                        "price": row.price,
                        "image_url": row.image_url,
                        "similarity": m.similarity,
                    })
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if matches.is_empty() {
        println!("No diverse matches for {:?}", product_name);
    } else {
        println!("Recommendations for {:?}:", product_name);
        for (rank, m) in matches.iter().enumerate() {
            if let Some(row) = catalog.get(m.index) {
                println!(
                    "  {}. {} ({:.2}, similarity {:.3})",
                    rank + 1,
                    row.name,
                    row.price,
                    m.similarity
                );
            }
        }
    }
    Ok(())
}

/// Print the lexicon, optionally restricted to one role.
pub fn cmd_lexicon(thesaurus: Option<&Path>, role: Option<&str>, json: bool) -> LensResult<()> {
    let lexicon = Lexicon::standard(thesaurus)?;
    let roles: Vec<TermRole> = match role {
        Some(name) => vec![TermRole::from_name(name)
            .ok_or_else(|| LensError::Config(format!("Unknown lexicon role: {name}")))?],
        None => vec![
            TermRole::ProductType,
            TermRole::Brand,
            TermRole::Specification,
        ],
    };

    if json {
        let mut out = serde_json::Map::new();
        for r in &roles {
            out.insert(r.name().to_string(), serde_json::json!(lexicon.terms(*r)));
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for r in &roles {
            let terms = lexicon.terms(*r);
            println!("{} ({}):", r.name(), terms.len());
            for t in terms {
                println!("  {}", t);
            }
        }
    }
    Ok(())
}

/// Statistics about a catalog and its feature space.
pub fn cmd_stats(catalog_path: &Path, json: bool) -> LensResult<()> {
    let recommender = Recommender::from_csv(catalog_path)?;
    let catalog = recommender.catalog();
    let features = recommender.features();
    let base_models: HashSet<&str> = catalog.rows().iter().map(|r| r.base_model()).collect();
    let nnz: usize = features.rows().iter().map(|r| r.lexical.nnz()).sum();
    let avg_terms = nnz as f64 / features.len().max(1) as f64;

    if json {
        let out = serde_json::json!({
            "catalog": catalog_path.display().to_string(),
            "products": catalog.len(),
            "base_models": base_models.len(),
            "vocabulary": features.vectorizer().vocabulary_size(),
            "columns": features.column_count(),
            "avg_terms_per_product": avg_terms,
            "price": {"min": features.price_scaler().min(), "max": features.price_scaler().max()},
            "rating": {"min": features.rating_scaler().min(), "max": features.rating_scaler().max()},
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Catalog: {}", catalog_path.display());
        println!("Products: {}", catalog.len());
        println!("Base models: {}", base_models.len());
        println!("Vocabulary: {}", features.vectorizer().vocabulary_size());
        println!("Feature columns: {}", features.column_count());
        println!("Avg terms per product: {:.1}", avg_terms);
        println!(
            "Price range: {:.2} to {:.2}",
            features.price_scaler().min(),
            features.price_scaler().max()
        );
        println!(
            "Rating range: {:.2} to {:.2}",
            features.rating_scaler().min(),
            features.rating_scaler().max()
        );
    }
    Ok(())
}
