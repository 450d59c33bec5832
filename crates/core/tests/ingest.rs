mod common;

use common::{BagOfWords, PickyExtractor, ShiftingDimension, DIM};
use lawbot_core::extractor::DocumentExtractor;
use lawbot_core::pipeline::build_index_with;
use std::sync::Arc;
use storage::{KnowledgeBase, MetadataStore};
use tempfile::tempdir;

#[tokio::test]
async fn build_writes_aligned_artifacts() {
    let temp = tempdir().unwrap();
    let cfg = common::standard_corpus(temp.path());

    let summary = build_index_with(&cfg, Arc::new(DocumentExtractor), &BagOfWords)
        .await
        .unwrap();
    assert!(summary.written);
    assert_eq!(summary.sources, 3);
    assert_eq!(summary.skipped_sources, 0);
    assert_eq!(summary.dimension, Some(DIM));

    let (index_path, meta_path) = common::index_paths(&cfg);
    let kb = KnowledgeBase::load(&index_path, &meta_path).unwrap();
    assert_eq!(kb.index().len(), kb.metadata().len());
    assert_eq!(kb.len(), summary.chunks);

    let records = kb.metadata().records();
    for (i, chunk) in records.iter().enumerate() {
        assert_eq!(chunk.global_id, i as u64);
        assert!(!chunk.text.trim().is_empty());
    }
    // Sources are processed in locator order: bail, cyber, tenancy.
    let order: Vec<&str> = records.iter().map(|c| c.source_name()).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
    assert_eq!(order[0], "bail.txt");

    // Local positions restart for every source.
    let tenancy: Vec<usize> = records
        .iter()
        .filter(|c| c.source_name() == "tenancy.txt")
        .map(|c| c.local_index)
        .collect();
    assert_eq!(tenancy, (0..tenancy.len()).collect::<Vec<_>>());
    assert!(tenancy.len() > 1);
}

#[tokio::test]
async fn rebuild_of_unchanged_corpus_is_identical() {
    let temp = tempdir().unwrap();
    let cfg = common::standard_corpus(temp.path());
    let (_, meta_path) = common::index_paths(&cfg);

    build_index_with(&cfg, Arc::new(DocumentExtractor), &BagOfWords)
        .await
        .unwrap();
    let first = MetadataStore::load(&meta_path).unwrap();
    build_index_with(&cfg, Arc::new(DocumentExtractor), &BagOfWords)
        .await
        .unwrap();
    let second = MetadataStore::load(&meta_path).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn parallel_workers_match_serial_numbering() {
    let temp = tempdir().unwrap();
    let mut cfg = common::standard_corpus(temp.path());
    let (_, meta_path) = common::index_paths(&cfg);

    build_index_with(&cfg, Arc::new(DocumentExtractor), &BagOfWords)
        .await
        .unwrap();
    let serial = MetadataStore::load(&meta_path).unwrap();

    cfg.chunking.workers = 4;
    build_index_with(&cfg, Arc::new(DocumentExtractor), &BagOfWords)
        .await
        .unwrap();
    let parallel = MetadataStore::load(&meta_path).unwrap();
    assert_eq!(serial, parallel);
}

#[tokio::test]
async fn empty_corpus_writes_nothing() {
    let temp = tempdir().unwrap();
    let cfg = common::corpus(temp.path(), &[]);

    let summary = build_index_with(&cfg, Arc::new(DocumentExtractor), &BagOfWords)
        .await
        .unwrap();
    assert!(!summary.written);
    assert_eq!(summary.sources, 0);
    let (index_path, meta_path) = common::index_paths(&cfg);
    assert!(!index_path.exists());
    assert!(!meta_path.exists());
}

#[tokio::test]
async fn failing_documents_are_skipped() {
    let temp = tempdir().unwrap();
    let cfg = common::corpus(
        temp.path(),
        &[
            ("a_corrupt.txt", common::BAIL),
            ("b_blank.txt", "   \n  "),
            ("c_tenancy.txt", common::TENANCY),
        ],
    );

    let summary = build_index_with(&cfg, Arc::new(PickyExtractor), &BagOfWords)
        .await
        .unwrap();
    assert_eq!(summary.sources, 3);
    assert_eq!(summary.skipped_sources, 2);
    assert!(summary.written);

    let (_, meta_path) = common::index_paths(&cfg);
    let meta = MetadataStore::load(&meta_path).unwrap();
    assert!(meta.iter().all(|c| c.source_name() == "c_tenancy.txt"));
    assert_eq!(meta.get(0).unwrap().global_id, 0);
}

#[tokio::test]
async fn dimension_change_aborts_build() {
    let temp = tempdir().unwrap();
    let cfg = common::standard_corpus(temp.path());

    let err = build_index_with(&cfg, Arc::new(DocumentExtractor), &ShiftingDimension::default())
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("dimension mismatch"));
    let (index_path, _) = common::index_paths(&cfg);
    assert!(!index_path.exists());
}

#[tokio::test]
async fn invalid_overlap_is_rejected_up_front() {
    let temp = tempdir().unwrap();
    let mut cfg = common::standard_corpus(temp.path());
    cfg.chunking.overlap = cfg.chunking.chunk_size;

    let err = build_index_with(&cfg, Arc::new(DocumentExtractor), &BagOfWords)
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("overlap"));
}
