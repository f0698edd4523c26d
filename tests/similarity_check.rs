use title_similarity::{
    compute_idf, compute_tf, compute_tfidf, cosine_similarity, rank, tokenize, CheckConfig, SimilarityChecker,
    SimilarityLevel, StopWords, TitleRecord, DEFAULT_TOP_K,
};

fn tokens(text: &str) -> Vec<String> {
    tokenize(text, &StopWords::empty())
}

#[test]
fn tokenizes_punctuated_title() {
    assert_eq!(
        tokenize("Sistem Pakar, Diagnosa-Penyakit!", &StopWords::empty()),
        vec!["sistem", "pakar", "diagnosa", "penyakit"]
    );
}

#[test]
fn overlapping_title_ranks_above_unrelated_one() {
    let candidates = vec![
        ("first", tokens("sistem pakar diagnosa penyakit anjing")),
        ("second", tokens("metode forward chaining")),
    ];
    let report = rank(&tokens("sistem pakar anjing"), &candidates, DEFAULT_TOP_K);
    assert_eq!(report.list[0].key, "first");
    assert!(report.list[0].similarity > 0.0);
    assert_eq!(report.list[1].key, "second");
    assert_eq!(report.list[1].similarity, 0.0);
}

#[test]
fn identical_title_scores_one_hundred() {
    let checker = SimilarityChecker::default();
    let records = vec![
        TitleRecord::new("Metode Forward Chaining untuk Diagnosa", "a"),
        TitleRecord::new("Sistem Informasi Akademik Berbasis Web", "b"),
        TitleRecord::new("Jaringan Syaraf Tiruan", "c"),
    ];
    let report = checker.check("sistem informasi akademik, berbasis WEB", &records);
    assert_eq!(*report.list[0].key, "b");
    assert!((report.list[0].percent() - 100.0).abs() < 1e-6);
}

#[test]
fn single_identical_candidate_has_no_distinguishing_terms() {
    // with the query and one candidate every term occurs in both documents,
    // so idf is ln(2/2) = 0 for all of them and the score is 0, not 100.
    // This is intended, do not special-case it: an identical title only
    // reaches 100 when other titles give its terms idf weight
    // (see identical_title_scores_one_hundred).
    let candidates = vec![(0, tokens("sistem pakar"))];
    let report = rank(&tokens("Sistem Pakar"), &candidates, DEFAULT_TOP_K);
    assert_eq!(report.len(), 1);
    assert_eq!(report.list[0].similarity, 0.0);
    assert_eq!(report.list[0].matching_terms.len(), 2);
}

#[test]
fn empty_query_scores_every_candidate_zero() {
    let candidates: Vec<(usize, Vec<String>)> = ["sistem pakar", "metode forward chaining", "web"]
        .iter()
        .enumerate()
        .map(|(i, t)| (i, tokens(t)))
        .collect();
    let query = tokens("...");
    assert!(query.is_empty());
    let report = rank(&query, &candidates, DEFAULT_TOP_K);
    assert_eq!(report.len(), 3);
    assert!(report.iter().all(|r| r.similarity == 0.0));
}

#[test]
fn empty_corpus_gives_empty_report() {
    let checker = SimilarityChecker::default();
    let records: Vec<TitleRecord<()>> = Vec::new();
    assert!(checker.check("sistem pakar", &records).is_empty());
}

#[test]
fn pipeline_pieces_compose_like_rank() {
    let query = tokens("sistem pakar anjing");
    let titles = [tokens("sistem pakar diagnosa penyakit anjing"), tokens("metode forward chaining")];

    let mut corpus = vec![query.clone()];
    corpus.extend(titles.iter().cloned());
    let idf = compute_idf(&corpus);
    let query_vec = compute_tfidf(&compute_tf(&query), &idf);
    let manual: Vec<f64> = titles
        .iter()
        .map(|t| cosine_similarity(&query_vec, &compute_tfidf(&compute_tf(t), &idf)))
        .collect();

    let candidates: Vec<(usize, Vec<String>)> = titles.iter().cloned().enumerate().collect();
    let report = rank(&query, &candidates, DEFAULT_TOP_K);
    for r in &report {
        assert_eq!(r.similarity, manual[r.index]);
    }
}

#[test]
fn report_serializes_for_presentation() {
    let candidates = vec![("T-01".to_string(), tokens("sistem pakar anjing")), ("T-02".to_string(), tokens("web"))];
    let report = rank(&tokens("sistem pakar"), &candidates, DEFAULT_TOP_K);
    let json = serde_json::to_value(&report).unwrap();
    let first = &json["list"][0];
    assert_eq!(first["key"], "T-01");
    assert_eq!(first["index"], 0);
    assert_eq!(first["matching_terms"], serde_json::json!(["sistem", "pakar"]));
    assert!(first["similarity"].as_f64().unwrap() > 0.0);
    assert_eq!(serde_json::to_value(SimilarityLevel::High).unwrap(), "high");
}

#[test]
fn config_drives_checker() {
    let config = CheckConfig::from_toml_str("top_k = 2\nword_chars = \"unicode\"").unwrap();
    let checker = SimilarityChecker::new(config, StopWords::parse("dan")).unwrap();
    let records = vec![
        TitleRecord::new("Análisis de Datos dan Estadística", 1),
        TitleRecord::new("Analisis Data", 2),
        TitleRecord::new("Estadística Aplicada", 3),
    ];
    let report = checker.check("análisis estadística", &records);
    assert_eq!(report.len(), 2);
    assert_eq!(*report.list[0].key, 1);
    let shared: Vec<&str> = report.list[0].matching_terms.iter().map(String::as_str).collect();
    assert_eq!(shared, vec!["análisis", "estadística"]);
}
