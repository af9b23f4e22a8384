use chat_core::matcher::{best_match, scores};
use chat_core::{build, match_query, respond, BuildConfig, CoreError, Document, Index, MatchConfig, StopWords, TokenizerConfig, DEFAULT_FALLBACK};

fn two_doc_corpus() -> Vec<Document> {
    vec![Document::new("hello hi hey greeting", "R1"), Document::new("contact email address", "R2")]
}

fn club_corpus() -> Vec<Document> {
    vec![
        Document::new("hello hi hey greeting", "greet"),
        Document::new("what is orbitx about mission", "about"),
        Document::new("teams departments groups", "teams"),
        Document::new("how to join become member", "join"),
        Document::new("contact email address location", "contact"),
        Document::new("projects activities events", "projects"),
        Document::new("space astronomy rocket satellite", "space"),
    ]
}

fn index_of(corpus: &[Document]) -> Index {
    build(corpus, &BuildConfig::default()).unwrap()
}

#[test]
fn scenario_hi_there_matches_greeting() {
    let index = index_of(&two_doc_corpus());
    assert_eq!(respond(&index, "hi there", &MatchConfig::default()).text, "R1");
}

#[test]
fn scenario_unrelated_query_falls_back() {
    let index = index_of(&two_doc_corpus());
    let reply = respond(&index, "xyz unrelated", &MatchConfig::default());
    assert_eq!(reply.text, DEFAULT_FALLBACK);
    assert_eq!(reply.matched, None);
    assert!(scores(&index, "xyz unrelated").iter().all(|&s| s == 0.0));
}

#[test]
fn scenario_mixed_query_is_stable() {
    let index = index_of(&two_doc_corpus());
    let config = MatchConfig::default();
    let first = respond(&index, "hello contact", &config);
    // The shorter question has the larger share of its weight on the shared term.
    assert_eq!(first.text, "R2");
    for _ in 0..10 {
        assert_eq!(respond(&index, "hello contact", &config), first);
    }
}

#[test]
fn empty_query_returns_fallback() {
    let index = index_of(&club_corpus());
    let config = MatchConfig::default();
    assert_eq!(respond(&index, "", &config).text, DEFAULT_FALLBACK);
    assert_eq!(respond(&index, "   \n", &config).text, DEFAULT_FALLBACK);
    assert_eq!(best_match(&index, ""), None);
}

#[test]
fn self_similarity_is_one() {
    let corpus = club_corpus();
    let index = index_of(&corpus);
    for (i, doc) in corpus.iter().enumerate() {
        let best = best_match(&index, &doc.question).unwrap();
        assert_eq!(best.doc, i);
        assert!((best.score - 1.0).abs() < 1e-5, "doc {i} scored {}", best.score);
    }
}

#[test]
fn ties_go_to_lowest_ordinal() {
    let corpus = vec![
        Document::new("rocket launch", "first"),
        Document::new("rocket launch", "second"),
        Document::new("satellite orbit", "third"),
    ];
    let index = index_of(&corpus);
    let best = best_match(&index, "rocket").unwrap();
    assert_eq!(best.doc, 0);
    assert_eq!(respond(&index, "rocket launch", &MatchConfig::default()).text, "first");
}

#[test]
fn threshold_comparison_is_strict() {
    let index = index_of(&two_doc_corpus());
    let best = best_match(&index, "hello contact").unwrap();
    let at_score = MatchConfig::new(best.score, "fallback").unwrap();
    assert_eq!(respond(&index, "hello contact", &at_score).text, "fallback");
    let below = MatchConfig::new(best.score - 0.01, "fallback").unwrap();
    assert_eq!(respond(&index, "hello contact", &below).text, "R2");
}

#[test]
fn raising_threshold_only_turns_matches_into_fallbacks() {
    let index = index_of(&club_corpus());
    let queries = ["hi", "join the club", "rocket science events", "email", "nothing here", "space mission"];
    for q in queries {
        let mut previous: Option<usize> = None;
        let mut fell_back = false;
        for step in 0..=20 {
            let config = MatchConfig::new(step as f32 * 0.05, "fallback").unwrap();
            let reply = respond(&index, q, &config);
            match reply.matched {
                Some(m) => {
                    assert!(!fell_back, "{q}: matched again after falling back");
                    if let Some(p) = previous {
                        assert_eq!(p, m.doc, "{q}: winner changed with threshold");
                    }
                    previous = Some(m.doc);
                }
                None => fell_back = true,
            }
        }
    }
}

#[test]
fn uniform_corpus_is_valid() {
    let corpus = vec![Document::new("space rocket", "a"), Document::new("rocket space", "b")];
    let index = index_of(&corpus);
    assert_eq!(index.vectors[0], index.vectors[1]);
    assert_eq!(respond(&index, "rocket", &MatchConfig::default()).text, "a");
}

#[test]
fn single_document_corpus_is_valid() {
    let index = index_of(&[Document::new("satellite", "only")]);
    assert_eq!(respond(&index, "satellite please", &MatchConfig::default()).text, "only");
}

#[test]
fn build_is_deterministic() {
    let corpus = club_corpus();
    assert_eq!(index_of(&corpus), index_of(&corpus));
}

#[test]
fn index_is_aligned_with_corpus() {
    let corpus = club_corpus();
    let index = index_of(&corpus);
    assert_eq!(index.vectors.len(), corpus.len());
    assert_eq!(index.responses.len(), corpus.len());
    assert!(index.vectors.iter().all(|v| v.len() == index.num_terms()));
    assert!(index.validate().is_ok());
}

#[test]
fn empty_corpus_is_rejected() {
    assert_eq!(build(&[], &BuildConfig::default()), Err(CoreError::EmptyCorpus));
}

#[test]
fn missing_index_is_unavailable() {
    let config = MatchConfig::default();
    assert_eq!(match_query(None, "hello", &config), Err(CoreError::ModelUnavailable));
    let index = index_of(&two_doc_corpus());
    assert_eq!(match_query(Some(&index), "hey", &config), Ok("R1".to_string()));
}

#[test]
fn stemmed_index_matches_inflections() {
    let config = BuildConfig { tokenizer: TokenizerConfig { stem: true, ..Default::default() }, ..Default::default() };
    let index = build(&[Document::new("joining members", "join"), Document::new("rocket", "rocket")], &config).unwrap();
    assert_eq!(respond(&index, "join as a member", &MatchConfig::default()).text, "join");
}

#[test]
fn threshold_one_never_matches_even_on_self_match() {
    for n in 1..60 {
        let question: Vec<String> = (0..n).map(|i| format!("term{i}")).collect();
        let question = question.join(" ");
        let corpus = vec![Document::new(question.clone(), "hit"), Document::new("unrelated words", "other")];
        let index = index_of(&corpus);
        let config = MatchConfig::new(1.0, "fallback").unwrap();
        let reply = respond(&index, &question, &config);
        assert_eq!(reply.text, "fallback", "{n} terms");
        assert!(best_match(&index, &question).unwrap().score <= 1.0);
    }
}

#[test]
fn custom_stop_words_change_the_vocabulary() {
    let corpus = vec![Document::new("how to join become member", "join"), Document::new("rocket launch", "rocket")];
    let english = index_of(&corpus);
    assert_eq!(english.term_id("become"), None);
    assert_eq!(english.term_id("how"), None);

    let config = BuildConfig {
        tokenizer: TokenizerConfig { stop_words: StopWords::custom(["member", "launch"]), ..Default::default() },
        ..Default::default()
    };
    let custom = build(&corpus, &config).unwrap();
    assert!(custom.term_id("become").is_some());
    assert!(custom.term_id("how").is_some());
    assert_eq!(custom.term_id("member"), None);
    assert_eq!(custom.term_id("launch"), None);
    // Queries go through the index's own list.
    assert_eq!(respond(&custom, "member launch", &MatchConfig::default()).text, DEFAULT_FALLBACK);
    assert_eq!(respond(&custom, "how do I join", &MatchConfig::default()).text, "join");
}
