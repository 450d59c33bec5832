use storage::{Chunk, FlatIndex, KnowledgeBase, MetadataStore, StorageError};
use tempfile::tempdir;

fn chunk(global_id: u64, local_index: usize, text: &str) -> Chunk {
    Chunk {
        global_id,
        source_locator: "data/pdfs/tenancy.pdf".to_string(),
        local_index,
        text: text.to_string(),
    }
}

#[test]
fn metadata_uses_artifact_field_names() {
    let store: MetadataStore = vec![chunk(0, 0, "Rent agreements")].into_iter().collect();
    let dir = tempdir().unwrap();
    let path = dir.path().join("chunks_metadata.json");
    store.save(&path).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let first = &raw.as_array().unwrap()[0];
    assert_eq!(first["global_id"], 0);
    assert_eq!(first["pdf_path"], "data/pdfs/tenancy.pdf");
    assert_eq!(first["chunk_id"], 0);
    assert_eq!(first["text"], "Rent agreements");
}

#[test]
fn pair_round_trips_through_disk() {
    let dir = tempdir().unwrap();
    let index_path = dir.path().join("index").join("faiss_index.bin");
    let meta_path = dir.path().join("index").join("chunks_metadata.json");

    let mut index = FlatIndex::new(3).unwrap();
    index
        .add(&[vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]])
        .unwrap();
    let metadata: MetadataStore = vec![chunk(0, 0, "first"), chunk(1, 1, "second")]
        .into_iter()
        .collect();
    KnowledgeBase::new(index, metadata)
        .unwrap()
        .save(&index_path, &meta_path)
        .unwrap();

    let kb = KnowledgeBase::load(&index_path, &meta_path).unwrap();
    assert_eq!(kb.len(), 2);
    assert_eq!(kb.index().len(), kb.metadata().len());
    assert_eq!(kb.metadata().get(1).unwrap().text, "second");
    assert_eq!(kb.metadata().get(1).unwrap().source_name(), "tenancy.pdf");
}

#[test]
fn misaligned_pair_is_rejected() {
    let index = FlatIndex::new(2).unwrap();
    let metadata: MetadataStore = vec![chunk(0, 0, "orphan")].into_iter().collect();
    assert!(matches!(
        KnowledgeBase::new(index, metadata),
        Err(StorageError::Misaligned {
            index: 0,
            metadata: 1
        })
    ));
}

#[test]
fn missing_metadata_is_fatal() {
    let dir = tempdir().unwrap();
    let index_path = dir.path().join("faiss_index.bin");
    let meta_path = dir.path().join("chunks_metadata.json");
    FlatIndex::new(2).unwrap().save(&index_path).unwrap();

    match KnowledgeBase::load(&index_path, &meta_path) {
        Err(StorageError::MissingArtifact(p)) => assert_eq!(p, meta_path),
        other => panic!("expected missing artifact, got {:?}", other.map(|kb| kb.len())),
    }
}
