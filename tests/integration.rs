//! Integration tests for the FOMC Naive Bayes pipeline

use fomc_naive_bayes::{
    classifier::UNK_TOKEN, tokenize_doc, DataLoader, Experiment, ExperimentConfig, Label,
    NaiveBayes,
};
use std::io::Write;

fn corpus() -> (Vec<Vec<String>>, Vec<Label>) {
    let raw = [
        ("inflation pressures elevated rate increase warranted", Label::Positive),
        ("labor market strong inflation elevated", Label::Positive),
        ("rate increase inflation inflation", Label::Positive),
        ("growth slowed rate reduction appropriate", Label::Negative),
        ("downside risks rate reduction", Label::Negative),
        ("economic activity moderate outlook stable", Label::Neutral),
        ("committee maintain target range", Label::Neutral),
        ("outlook stable committee patient", Label::Neutral),
    ];
    raw.iter()
        .map(|(text, label)| {
            (
                text.split_whitespace().map(str::to_string).collect(),
                *label,
            )
        })
        .unzip()
}

mod estimator_invariants {
    use super::*;

    #[test]
    fn test_document_count_invariant() {
        let (docs, labels) = corpus();
        let model = NaiveBayes::fit(&docs, &labels, 1.0).unwrap();

        let total: usize = Label::ALL
            .iter()
            .map(|&l| model.statistics(l).doc_count)
            .sum();
        assert_eq!(total, docs.len());
        assert_eq!(model.total_documents(), docs.len());
    }

    #[test]
    fn test_word_count_invariant() {
        let (docs, labels) = corpus();
        let model = NaiveBayes::fit(&docs, &labels, 1.0).unwrap();

        let total: f64 = Label::ALL
            .iter()
            .map(|&l| model.statistics(l).word_total)
            .sum();
        let expected: usize = docs.iter().map(|d| d.len()).sum();
        assert_eq!(total, expected as f64);

        for label in Label::ALL {
            let per_label: usize = docs
                .iter()
                .zip(&labels)
                .filter(|(_, l)| **l == label)
                .map(|(d, _)| d.len())
                .sum();
            let stats = model.statistics(label);
            assert_eq!(stats.word_total, per_label as f64);
            assert_eq!(stats.word_counts.values().sum::<f64>(), stats.word_total);
        }
    }

    #[test]
    fn test_smoothed_probability_bounds_and_normalization() {
        let (docs, labels) = corpus();
        for alpha in [0.01, 1.0, 5.0] {
            let model = NaiveBayes::fit(&docs, &labels, alpha).unwrap();
            for label in Label::ALL {
                let mut total = 0.0;
                for word in model.vocabulary().iter() {
                    let p = model.p_word_given_label_and_pseudocount(word, label);
                    assert!(p > 0.0 && p <= 1.0, "p({}|{}) = {}", word, label, p);
                    total += p;
                }
                assert!((total - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_training_order_does_not_matter() {
        let (docs, labels) = corpus();
        let forward = NaiveBayes::fit(&docs, &labels, 1.0).unwrap();

        let rev_docs: Vec<Vec<String>> = docs.iter().rev().cloned().collect();
        let rev_labels: Vec<Label> = labels.iter().rev().copied().collect();
        // Seed the vocabulary with the same corpus so the sizes match
        let mut reversed = NaiveBayes::new(&docs, 1.0);
        reversed.train_model(&rev_docs, &rev_labels).unwrap();

        for label in Label::ALL {
            assert_eq!(forward.statistics(label), reversed.statistics(label));
        }
        assert_eq!(forward.vocab_size(), reversed.vocab_size());

        for doc in &docs {
            let bow = tokenize_doc(doc);
            assert_eq!(forward.classify(&bow), reversed.classify(&bow));
        }
    }

    #[test]
    fn test_unknown_tokens_get_floor_probability() {
        let (docs, labels) = corpus();
        let model = NaiveBayes::fit(&docs, &labels, 1.0).unwrap();

        let unseen = model.p_word_given_label_and_pseudocount("quantitative", Label::Positive);
        let sentinel = model.p_word_given_label_and_pseudocount(UNK_TOKEN, Label::Positive);
        assert_eq!(unseen, sentinel);
        assert!(unseen > 0.0);

        let bow = tokenize_doc(&["quantitative", "easing"]);
        let label = model.classify(&bow);
        assert!(Label::ALL.contains(&label));
    }
}

mod classification {
    use super::*;

    #[test]
    fn test_training_set_is_mostly_recovered() {
        let (docs, labels) = corpus();
        let model = NaiveBayes::fit(&docs, &labels, 1.0).unwrap();

        let accuracy = model.evaluate_classifier_accuracy(&docs, &labels).unwrap();
        assert!(accuracy >= 0.75, "training accuracy {}", accuracy);
    }

    #[test]
    fn test_discriminative_words_rank_first() {
        let (docs, labels) = corpus();
        let model = NaiveBayes::fit(&docs, &labels, 1.0).unwrap();

        assert!(
            model.likelihood_log_ratio("inflation", Label::Positive)
                > model.likelihood_log_ratio("inflation", Label::Neutral)
        );
        assert!(
            model.likelihood_log_ratio("reduction", Label::Negative)
                > model.likelihood_log_ratio("reduction", Label::Positive)
        );
        assert_eq!(model.top_n(Label::Positive, 1)[0].0, "inflation");
    }
}

mod pipeline {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_csv_to_report() {
        let dir = tempdir().unwrap();
        let data_path = dir.path().join("statements.csv");
        let mut file = std::fs::File::create(&data_path).unwrap();
        writeln!(file, "statement,vix_buckets_1d,tnx_buckets_5d").unwrap();
        for _ in 0..5 {
            writeln!(file, "Inflation elevated rate increase,1,1").unwrap();
            writeln!(file, "growth slowed rate reduction,-1,0").unwrap();
            writeln!(file, "outlook stable patient,0,-1").unwrap();
        }
        drop(file);

        let mut dataset = DataLoader::load(&data_path).unwrap();
        dataset.lowercase();
        assert_eq!(dataset.len(), 15);

        let config = ExperimentConfig {
            targets: vec!["vix_buckets_1d".to_string(), "tnx_buckets_5d".to_string()],
            epochs: 2,
            seed: Some(5),
            top_n: 3,
            ..Default::default()
        };
        let report = Experiment::new(config).unwrap().run(&dataset).unwrap();

        // The three statement kinds are perfectly separable
        assert_eq!(report.mean_accuracy["vix_buckets_1d"], 1.0);
        assert_eq!(report.mean_accuracy["tnx_buckets_5d"], 1.0);
        assert!(report.top_words["vix_buckets_1d"]
            .positive
            .iter()
            .any(|w| w == "inflation" || w == "elevated" || w == "increase"));

        let report_path = dir.path().join("report.json");
        report.save_json(&report_path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
        assert_eq!(json["epochs"].as_array().unwrap().len(), 2);

        let text = report.to_string();
        assert!(text.contains("vix_buckets_1d"));
    }
}
