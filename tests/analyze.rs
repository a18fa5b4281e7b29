//! Integration tests for the scan pipeline.
//!
//! These use a mock [`AnalysisProvider`] that captures the built request and
//! returns canned JSON, so the whole path — ingestion, normalization,
//! request building, response shaping — is exercised without touching the
//! network. Live-API coverage lives in `tests/live.rs`.

use async_trait::async_trait;
use docwise::{
    analyze, ingest_files, normalize_files, normalize_text, AnalysisConfig, AnalysisMode,
    AnalysisProvider, ContentPart, DocwiseError, InputItem, ModelRequest, ModelVariant, Persona,
    ScanOutcome,
};
use std::sync::{Arc, Mutex};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Provider stub: records every request, answers with a fixed payload.
struct MockProvider {
    response: String,
    seen: Mutex<Vec<ModelRequest>>,
}

impl MockProvider {
    fn new(response: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            response: response.into(),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn last_request(&self) -> ModelRequest {
        self.seen
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("provider was never called")
    }
}

#[async_trait]
impl AnalysisProvider for MockProvider {
    async fn generate(&self, request: &ModelRequest) -> Result<String, DocwiseError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(self.response.clone())
    }
}

fn config_with(provider: Arc<MockProvider>) -> AnalysisConfig {
    AnalysisConfig::builder()
        .provider(provider)
        .build()
        .expect("valid config")
}

fn file_input(name: &str, mime: &str) -> InputItem {
    InputItem::File {
        data: "QUJD".into(),
        mime_type: mime.into(),
        display_name: name.into(),
    }
}

const SINGLE_BODY: &str = r#"{
    "summary": "A standard lease with two unusual clauses.",
    "onePageSummary": "Mostly fine; watch the auto-renewal.",
    "riskScore": 45,
    "riskLevel": "Caution",
    "verdict": "Needs attention",
    "verdictReason": "Auto-renewal and late fees stack.",
    "redFlags": [
        {"title": "Auto-renewal", "description": "Renews silently.", "severity": "High"}
    ],
    "scamRiskScore": 5,
    "questionsToAsk": ["Can the renewal clause be removed?"]
}"#;

fn comparison_body(doc_count: usize) -> String {
    let docs = (0..doc_count)
        .map(|i| format!(r#"{{"summary":"doc {i}","riskScore":{}}}"#, 10 * (i + 1)))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        r#"{{
            "docs": [{docs}],
            "comparisonSummary": "Offer A is cheaper overall.",
            "winner": "Document 1",
            "winnerReason": "Lower total cost.",
            "comparisonTable": [
                {{"feature": "Monthly cost", "values": ["$40"]}},
                {{"feature": "Cancellation", "values": ["30 days", "60 days", "stray"]}}
            ]
        }}"#
    )
}

// ── Scenario: one PDF, Student persona, Spanish output ───────────────────────

#[tokio::test]
async fn single_pdf_student_spanish() {
    let provider = MockProvider::new(SINGLE_BODY);
    let config = AnalysisConfig::builder()
        .provider(provider.clone())
        .persona(Persona::Student)
        .target_language("Spanish")
        .build()
        .unwrap();

    let inputs = [file_input("lease.pdf", "application/pdf")];
    let outcome = analyze(&inputs, &config).await.unwrap();

    let req = provider.last_request();
    assert_eq!(req.mode, AnalysisMode::Single);
    assert_eq!(req.variant, ModelVariant::Flash);
    assert_eq!(req.model, "gemini-3-flash-preview");
    assert!(!req.enable_search);

    match req.parts.first() {
        Some(ContentPart::Text(instructions)) => {
            assert!(instructions.contains("User Context: Student."));
            assert!(instructions.contains("Target Language: Spanish."));
        }
        other => panic!("expected instruction text first, got {other:?}"),
    }

    match outcome {
        ScanOutcome::Single(doc) => {
            assert_eq!(doc.file_name.as_deref(), Some("lease.pdf"));
            assert_eq!(doc.risk_score, 45);
            assert_eq!(doc.red_flags.len(), 1);
            // list fields the payload omitted are present and empty
            assert!(doc.clauses.is_empty());
            assert!(doc.personalized_warnings.is_empty());
        }
        _ => panic!("expected single outcome"),
    }
}

// ── Scenario: two images → comparison, higher-capability variant ─────────────

#[tokio::test]
async fn two_images_compare_with_aligned_table() {
    let provider = MockProvider::new(comparison_body(2));
    let config = config_with(provider.clone());

    let inputs = [
        file_input("scan_a.png", "image/png"),
        file_input("scan_b.jpg", "image/jpeg"),
    ];
    let outcome = analyze(&inputs, &config).await.unwrap();

    let req = provider.last_request();
    assert_eq!(req.mode, AnalysisMode::Comparison);
    assert_eq!(req.variant, ModelVariant::Pro);
    assert_eq!(req.model, "gemini-3-pro-preview");

    match outcome {
        ScanOutcome::Comparison(cmp) => {
            assert_eq!(cmp.docs.len(), 2);
            assert_eq!(cmp.docs[0].file_name.as_deref(), Some("scan_a.png"));
            assert_eq!(cmp.docs[1].file_name.as_deref(), Some("scan_b.jpg"));
            assert_eq!(cmp.winner, "Document 1");
            // every row carries exactly one value per document
            for row in &cmp.comparison_table {
                assert_eq!(row.values.len(), 2, "row {:?}", row.feature);
            }
            assert_eq!(cmp.comparison_table[0].values[1], "—");
            assert_eq!(cmp.comparison_table[1].values, vec!["30 days", "60 days"]);
        }
        _ => panic!("expected comparison outcome"),
    }
}

// ── Scenario: a lone URL forces the pro variant and live retrieval ───────────

#[tokio::test]
async fn lone_url_single_mode_pro_variant() {
    let provider = MockProvider::new(SINGLE_BODY);
    let config = config_with(provider.clone());

    let inputs = [normalize_text("https://example.com/terms")];
    assert!(inputs[0].is_url());

    let outcome = analyze(&inputs, &config).await.unwrap();

    let req = provider.last_request();
    assert_eq!(req.mode, AnalysisMode::Single);
    assert_eq!(req.variant, ModelVariant::Pro);
    assert!(req.enable_search);

    // non-file single input gets the literal fallback name
    assert_eq!(
        outcome.docs()[0].file_name.as_deref(),
        Some("Pasted Content")
    );
}

// ── Contract violations ───────────────────────────────────────────────────────

#[tokio::test]
async fn comparison_without_docs_fails_whole_scan() {
    let provider = MockProvider::new(r#"{"comparisonSummary": "looks fine"}"#);
    let config = config_with(provider);

    let inputs = [
        file_input("a.pdf", "application/pdf"),
        file_input("b.pdf", "application/pdf"),
    ];
    let err = analyze(&inputs, &config).await.unwrap_err();
    assert!(
        matches!(err, DocwiseError::SchemaViolation(_)),
        "got {err:?}"
    );
}

#[tokio::test]
async fn blank_payload_is_empty_response() {
    let provider = MockProvider::new("");
    let config = config_with(provider);
    let err = analyze(&[file_input("a.pdf", "application/pdf")], &config)
        .await
        .unwrap_err();
    assert!(matches!(err, DocwiseError::EmptyResponse));
}

#[tokio::test]
async fn prose_payload_is_malformed_response() {
    let provider = MockProvider::new("I am unable to analyse this document.");
    let config = config_with(provider);
    let err = analyze(&[file_input("a.pdf", "application/pdf")], &config)
        .await
        .unwrap_err();
    assert!(matches!(err, DocwiseError::MalformedResponse { .. }));
}

// ── Placeholder naming for unnamed comparison inputs ─────────────────────────

#[tokio::test]
async fn unnamed_inputs_get_one_indexed_placeholders() {
    let provider = MockProvider::new(comparison_body(2));
    let config = config_with(provider);

    let inputs = [
        normalize_text("first pasted clause"),
        normalize_text("second pasted clause"),
    ];
    let outcome = analyze(&inputs, &config).await.unwrap();

    let docs = outcome.docs();
    assert_eq!(docs[0].file_name.as_deref(), Some("Document 1"));
    assert_eq!(docs[1].file_name.as_deref(), Some("Document 2"));
}

// ── End-to-end through ingestion: rejected files never reach the request ─────

#[tokio::test]
async fn rejected_files_never_reach_the_request() {
    use std::io::Write;
    let dir = tempfile::TempDir::new().unwrap();

    let write = |name: &str, contents: &[u8]| {
        let path = dir.path().join(name);
        std::fs::File::create(&path)
            .unwrap()
            .write_all(contents)
            .unwrap();
        path
    };

    let good_a = write("a.pdf", b"%PDF-1.7 alpha");
    let bad = write("evil.zip", b"PK\x03\x04");
    let good_b = write("b.pdf", b"%PDF-1.7 beta");

    let set = ingest_files([&good_a, &bad, &good_b]).await;
    assert_eq!(set.accepted().len(), 2);
    assert_eq!(set.rejections().len(), 1);

    let provider = MockProvider::new(comparison_body(2));
    let config = config_with(provider.clone());
    let inputs = normalize_files(set.into_accepted());

    analyze(&inputs, &config).await.unwrap();

    let req = provider.last_request();
    let attachments: Vec<_> = req
        .parts
        .iter()
        .filter(|p| matches!(p, ContentPart::Inline { .. }))
        .collect();
    // exactly the files that passed validation, in submission order
    assert_eq!(attachments.len(), 2);
    let texts: Vec<_> = req
        .parts
        .iter()
        .filter_map(|p| match p {
            ContentPart::Text(t) => Some(t.as_str()),
            _ => None,
        })
        .collect();
    assert!(texts.contains(&"--- START OF DOCUMENT 1 (a.pdf) ---"));
    assert!(texts.contains(&"--- START OF DOCUMENT 2 (b.pdf) ---"));
    assert!(!texts.iter().any(|t| t.contains("evil.zip")));
}
