use chat_core::persist::{from_bytes, load_index, load_meta, save_index, to_bytes, IndexPaths, FORMAT_VERSION};
use chat_core::{build, respond, BuildConfig, Document, IdfScheme, MatchConfig, StopWords, TfScheme, TokenizerConfig, WeightingConfig};
use chat_core::matcher::scores;
use tempfile::tempdir;

fn corpus() -> Vec<Document> {
    vec![
        Document::new("hello hi hey greeting", "R1"),
        Document::new("contact email address location", "R2"),
        Document::new("space astronomy rocket satellite", "R3"),
    ]
}

#[test]
fn blob_round_trip_preserves_matching() {
    let config = BuildConfig {
        weighting: WeightingConfig { idf: IdfScheme::Raw, tf: TfScheme::Sublinear },
        ..Default::default()
    };
    let index = build(&corpus(), &config).unwrap();
    let restored = from_bytes(&to_bytes(&index).unwrap()).unwrap();
    assert_eq!(restored, index);

    let match_config = MatchConfig::default();
    for q in ["hi", "email me", "rocket satellite", "", "unknown words"] {
        assert_eq!(respond(&restored, q, &match_config), respond(&index, q, &match_config));
        assert_eq!(scores(&restored, q), scores(&index, q));
    }
}

#[test]
fn directory_round_trip_writes_meta() {
    let dir = tempdir().unwrap();
    let paths = IndexPaths::new(dir.path().join("index"));
    let index = build(&corpus(), &BuildConfig::default()).unwrap();
    save_index(&paths, &index).unwrap();

    let loaded = load_index(&paths).unwrap().unwrap();
    assert_eq!(loaded, index);
    let meta = load_meta(&paths).unwrap();
    assert_eq!(meta.num_docs, 3);
    assert_eq!(meta.num_terms as usize, index.num_terms());
    assert_eq!(meta.version, FORMAT_VERSION);
}

#[test]
fn missing_index_loads_as_none() {
    let dir = tempdir().unwrap();
    assert!(load_index(&IndexPaths::new(dir.path())).unwrap().is_none());
}

#[test]
fn corrupt_blob_is_an_error() {
    assert!(from_bytes(b"not an index").is_err());

    let mut index = build(&corpus(), &BuildConfig::default()).unwrap();
    index.responses.pop();
    assert!(from_bytes(&to_bytes(&index).unwrap()).is_err());
}

#[test]
fn tokenizer_settings_survive_persistence() {
    let dir = tempdir().unwrap();
    let paths = IndexPaths::new(dir.path());
    let config = BuildConfig {
        tokenizer: TokenizerConfig { stop_words: StopWords::custom(["hello", "email"]), stem: true },
        ..Default::default()
    };
    let index = build(&corpus(), &config).unwrap();
    save_index(&paths, &index).unwrap();

    let loaded = load_index(&paths).unwrap().unwrap();
    assert_eq!(loaded.tokenizer, config.tokenizer);
    assert_eq!(loaded.term_id("hello"), None);
    let match_config = MatchConfig::default();
    assert_eq!(respond(&loaded, "hello email", &match_config).text, match_config.fallback());
    assert_eq!(respond(&loaded, "rockets", &match_config).text, "R3");
}
