fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use chunkup_protocol::{ChunkAck, ErrorDetail, MergeResponse, UploadEvent, UploadStatus};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent comparison).
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  Rust:    {reserialized}"
        );
        parsed
    }

    // --- Receiver responses ---

    #[test]
    fn fixture_chunk_ack() {
        let ack: ChunkAck = roundtrip_test("chunk_ack.json");
        assert_eq!(ack.index, 4);
    }

    #[test]
    fn fixture_merge_response() {
        let resp: MergeResponse = roundtrip_test("merge_response.json");
        assert!(resp.video_url.starts_with("/content/"));
        assert!(resp.video_url.contains("?token="));
    }

    #[test]
    fn fixture_error_detail() {
        let err: ErrorDetail = roundtrip_test("error_detail.json");
        assert_eq!(err.detail, "No chunks folder");
    }

    // --- Event stream ---

    #[test]
    fn fixture_upload_events() {
        let events: Vec<UploadEvent> = roundtrip_test("upload_events.json");
        assert_eq!(events.len(), 5);
        assert_eq!(events[3].status(), UploadStatus::AwaitingMerge);
        assert!(events[..4].iter().all(|e| !e.is_terminal()));
        assert!(events[4].is_terminal());
    }

    #[test]
    fn fixture_upload_failed() {
        let event: UploadEvent = roundtrip_test("upload_failed.json");
        match event {
            UploadEvent::Failed { error } => {
                assert!(error.contains(r#"{"detail":"Missing metadata"}"#))
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
