use super::*;
use crate::constants::{MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN};
use crate::embedding::DeviceRequest;
use crate::similarity::cosine_similarity;
use std::path::PathBuf;
use tempfile::TempDir;

mod config_tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_minilm_config_default() {
        let config = MiniLmConfig::default();
        assert_eq!(config.embedding_dim, MINILM_EMBEDDING_DIM);
        assert_eq!(config.max_seq_len, MINILM_MAX_SEQ_LEN);
        assert!(!config.testing_stub);
        assert!(config.model_dir.as_os_str().is_empty());
        assert_eq!(config.device, DeviceRequest::Auto);
    }

    #[test]
    fn test_minilm_config_file_layout() {
        let config = MiniLmConfig::new("/models/all-MiniLM-L6-v2");
        assert_eq!(
            config.config_file(),
            PathBuf::from("/models/all-MiniLM-L6-v2/config.json")
        );
        assert_eq!(
            config.weights_file(),
            PathBuf::from("/models/all-MiniLM-L6-v2/model.safetensors")
        );
        assert_eq!(
            config.tokenizer_file(),
            PathBuf::from("/models/all-MiniLM-L6-v2/tokenizer.json")
        );
    }

    #[test]
    fn test_minilm_config_stub_validates() {
        assert!(MiniLmConfig::stub().validate().is_ok());
    }

    #[test]
    fn test_minilm_config_empty_dir_without_stub() {
        let result = MiniLmConfig::default().validate();
        assert!(matches!(result, Err(EmbeddingError::InvalidConfig { .. })));
    }

    #[test]
    fn test_minilm_config_zero_dims_rejected() {
        let config = MiniLmConfig {
            embedding_dim: 0,
            ..MiniLmConfig::stub()
        };
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_minilm_config_missing_dir() {
        let config = MiniLmConfig::new("/nonexistent/minilm");
        match config.validate() {
            Err(EmbeddingError::ModelNotFound { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/minilm"))
            }
            other => panic!("expected ModelNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_minilm_config_missing_weights() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.json"), b"{}").unwrap();
        std::fs::write(temp.path().join("tokenizer.json"), b"{}").unwrap();

        let config = MiniLmConfig::new(temp.path());
        match config.validate() {
            Err(EmbeddingError::ModelNotFound { path }) => {
                assert_eq!(path, temp.path().join("model.safetensors"))
            }
            other => panic!("expected ModelNotFound, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_minilm_config_from_env() {
        // SAFETY: Test code only, we accept the thread-safety risk in tests.
        unsafe { env::remove_var(MiniLmConfig::ENV_MODEL_PATH) };
        assert!(MiniLmConfig::from_env().testing_stub);

        // SAFETY: Test code only, we accept the thread-safety risk in tests.
        unsafe { env::set_var(MiniLmConfig::ENV_MODEL_PATH, " /models/minilm ") };
        let config = MiniLmConfig::from_env();
        // SAFETY: Test code only, we accept the thread-safety risk in tests.
        unsafe { env::remove_var(MiniLmConfig::ENV_MODEL_PATH) };

        assert!(!config.testing_stub);
        assert_eq!(config.model_dir, PathBuf::from("/models/minilm"));
    }
}

mod stub_tests {
    use super::*;

    fn stub() -> MiniLmEmbedder {
        MiniLmEmbedder::load(MiniLmConfig::stub()).expect("stub always loads")
    }

    #[test]
    fn test_stub_mode_flags() {
        let embedder = stub();
        assert!(embedder.is_stub());
        assert!(!embedder.has_model());
        assert_eq!(embedder.embedding_dim(), MINILM_EMBEDDING_DIM);
        assert!(format!("{:?}", embedder).contains("Stub"));
    }

    #[test]
    fn test_stub_embedding_is_normalized() {
        let embedding = stub()
            .embed("Plants convert sunlight into chemical energy")
            .unwrap();
        assert_eq!(embedding.len(), MINILM_EMBEDDING_DIM);

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stub_embedding_is_deterministic() {
        let embedder = stub();
        let a = embedder.embed("the water cycle").unwrap();
        let b = embedder.embed("the water cycle").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stub_ignores_case_and_punctuation() {
        let embedder = stub();
        let a = embedder.embed("Plants, make food!").unwrap();
        let b = embedder.embed("plants make food").unwrap();
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stub_shared_words_score_higher() {
        let embedder = stub();
        let (reference, related) = embedder
            .embed_pair("plants make food", "plants make food from sunlight")
            .unwrap();
        let unrelated = embedder.embed("quantum chromodynamics lecture").unwrap();

        let related_score = cosine_similarity(&reference, &related);
        let unrelated_score = cosine_similarity(&reference, &unrelated);

        assert!(related_score > 0.5, "related score {}", related_score);
        assert!(unrelated_score < 0.5, "unrelated score {}", unrelated_score);
        assert!(related_score > unrelated_score);
    }

    #[test]
    fn test_stub_empty_text_is_zero_vector() {
        let embedding = stub().embed("   ").unwrap();
        assert_eq!(embedding.len(), MINILM_EMBEDDING_DIM);
        assert!(embedding.iter().all(|&x| x == 0.0));
    }
}

mod load_tests {
    use super::*;

    #[test]
    fn test_load_rejects_missing_model_dir() {
        let result = MiniLmEmbedder::load(MiniLmConfig::new("/nonexistent/minilm"));
        assert!(matches!(result, Err(EmbeddingError::ModelNotFound { .. })));
    }

    #[test]
    fn test_load_rejects_corrupt_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.json"), b"not json").unwrap();
        std::fs::write(temp.path().join("model.safetensors"), b"").unwrap();
        std::fs::write(temp.path().join("tokenizer.json"), b"{}").unwrap();

        let result = MiniLmEmbedder::load(MiniLmConfig::new(temp.path()));
        assert!(matches!(result, Err(EmbeddingError::ModelLoadFailed { .. })));
    }
}

mod model_tests {
    use super::*;
    use candle_core::{DType, Device};
    use candle_nn::{VarBuilder, VarMap};
    use candle_transformers::models::bert::{BertModel, Config as BertConfig};
    use std::path::Path;

    const TINY_HIDDEN_SIZE: usize = 8;

    const TINY_BERT_CONFIG: &str = r#"{
        "vocab_size": 16,
        "hidden_size": 8,
        "num_hidden_layers": 1,
        "num_attention_heads": 2,
        "intermediate_size": 16,
        "hidden_act": "gelu",
        "hidden_dropout_prob": 0.0,
        "max_position_embeddings": 32,
        "type_vocab_size": 2,
        "initializer_range": 0.02,
        "layer_norm_eps": 1e-12,
        "pad_token_id": 0,
        "position_embedding_type": "absolute",
        "use_cache": true,
        "classifier_dropout": null,
        "model_type": "bert"
    }"#;

    const WORD_LEVEL_TOKENIZER: &str = r#"{
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": {"type": "Whitespace"},
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": {
                "[UNK]": 0,
                "plants": 1,
                "make": 2,
                "food": 3,
                "from": 4,
                "sunlight": 5,
                "water": 6,
                "cycle": 7,
                "oxygen": 8,
                "glucose": 9
            },
            "unk_token": "[UNK]"
        }
    }"#;

    /// Writes a randomly initialised BERT checkpoint plus tokenizer into `dir`.
    fn write_tiny_model(dir: &Path, weight_prefix: Option<&str>) {
        std::fs::write(dir.join("config.json"), TINY_BERT_CONFIG).unwrap();
        std::fs::write(dir.join("tokenizer.json"), WORD_LEVEL_TOKENIZER).unwrap();

        let bert_config: BertConfig = serde_json::from_str(TINY_BERT_CONFIG).unwrap();
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
        let vb = match weight_prefix {
            Some(prefix) => vb.pp(prefix),
            None => vb,
        };
        BertModel::load(vb, &bert_config).unwrap();
        varmap.save(dir.join("model.safetensors")).unwrap();
    }

    fn load_tiny(weight_prefix: Option<&str>) -> (MiniLmEmbedder, TempDir) {
        let temp = TempDir::new().unwrap();
        write_tiny_model(temp.path(), weight_prefix);

        let config = MiniLmConfig::new(temp.path()).with_device(DeviceRequest::Cpu);
        let embedder = MiniLmEmbedder::load(config).expect("tiny model should load");
        (embedder, temp)
    }

    fn norm(v: &[f32]) -> f32 {
        v.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    #[test]
    fn test_model_hidden_size_replaces_configured_dim() {
        let (embedder, _temp) = load_tiny(None);

        assert!(embedder.has_model());
        assert!(!embedder.is_stub());
        assert_eq!(embedder.config().embedding_dim, TINY_HIDDEN_SIZE);
        assert_eq!(embedder.embedding_dim(), TINY_HIDDEN_SIZE);
        assert!(format!("{:?}", embedder).contains("Model"));
    }

    #[test]
    fn test_model_embedding_is_normalized_and_deterministic() {
        let (embedder, _temp) = load_tiny(None);

        let a = embedder.embed("plants make food from sunlight").unwrap();
        let b = embedder.embed("plants make food from sunlight").unwrap();

        assert_eq!(a.len(), TINY_HIDDEN_SIZE);
        assert!((norm(&a) - 1.0).abs() < 1e-4, "norm {}", norm(&a));
        assert_eq!(a, b);
    }

    #[test]
    fn test_model_unknown_words_still_embed() {
        let (embedder, _temp) = load_tiny(None);

        let embedding = embedder.embed("quantum chromodynamics").unwrap();
        assert_eq!(embedding.len(), TINY_HIDDEN_SIZE);
        assert!((norm(&embedding) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_model_empty_text_is_zero_vector() {
        let (embedder, _temp) = load_tiny(None);

        let embedding = embedder.embed("").unwrap();
        assert_eq!(embedding.len(), TINY_HIDDEN_SIZE);
        assert!(embedding.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_model_embed_pair_matches_single_embeds() {
        let (embedder, _temp) = load_tiny(None);

        let (first, second) = embedder.embed_pair("water cycle", "oxygen glucose").unwrap();
        assert_eq!(first, embedder.embed("water cycle").unwrap());
        assert_eq!(second, embedder.embed("oxygen glucose").unwrap());
    }

    #[test]
    fn test_model_loads_bert_prefixed_checkpoint() {
        let (prefixed, _prefixed_dir) = load_tiny(Some("bert"));
        let embedding = prefixed.embed("plants make food").unwrap();

        assert_eq!(embedding.len(), TINY_HIDDEN_SIZE);
        assert!((norm(&embedding) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_model_loads_roberta_prefixed_checkpoint() {
        let (prefixed, _prefixed_dir) = load_tiny(Some("roberta"));
        assert_eq!(prefixed.embed("water").unwrap().len(), TINY_HIDDEN_SIZE);
    }

    #[cfg(not(feature = "cuda"))]
    #[test]
    fn test_model_load_fails_on_unavailable_device() {
        let temp = TempDir::new().unwrap();
        write_tiny_model(temp.path(), None);

        let config = MiniLmConfig::new(temp.path()).with_device(DeviceRequest::Cuda);
        assert!(matches!(
            MiniLmEmbedder::load(config),
            Err(EmbeddingError::DeviceUnavailable { .. })
        ));
    }
}
