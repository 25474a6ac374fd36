//! A metadata provider backed by a JSON schema document.

#![cfg(feature = "serde")]

use bracketed_core::{
    CancellationToken, MemberKind, MetadataProvider, Pipeline, RawType, RedactionConfig,
    TypeDescriptor,
};

struct JsonSchema(Vec<RawType>);

impl JsonSchema {
    fn parse(document: &str) -> serde_json::Result<Self> {
        serde_json::from_str(document).map(Self)
    }
}

impl MetadataProvider for JsonSchema {
    fn raw_types(&self) -> Vec<RawType> {
        self.0.clone()
    }
}

const DOCUMENT: &str = r#"[
    {
        "qualified_name": "billing::Invoice",
        "accessibility": "Public",
        "options": { "include_private": false },
        "members": [
            {
                "name": "number",
                "declared_type": { "name": "u64", "shape": "Opaque", "nullability": "NotNullable" },
                "visibility": "Public"
            },
            {
                "name": "lines",
                "declared_type": { "name": "Vec<Line>", "shape": "Sequence", "nullability": "Optional" },
                "visibility": "Public"
            },
            {
                "name": "iban",
                "declared_type": { "name": "String", "shape": "Text", "nullability": "NotNullable" },
                "visibility": "Public",
                "annotations": [ { "path": "attrs::sensitive", "argument": { "Literal": "IBAN-***" } } ]
            },
            {
                "name": "ghost",
                "declared_type": null,
                "visibility": "Public"
            }
        ]
    },
    { "qualified_name": "billing::Draft" }
]"#;

#[test]
fn schema_document_drives_the_pipeline() {
    let schema = JsonSchema::parse(DOCUMENT).unwrap();
    let pipeline = Pipeline::new(RedactionConfig::default());
    let outcomes = pipeline.run(&schema, &CancellationToken::new());

    assert_eq!(outcomes.len(), 1);
    let outcome = &outcomes[0];
    assert_eq!(outcome.qualified_name, "billing::Invoice");
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.diagnostics[0].member, "ghost");

    let source = outcome.result.as_ref().unwrap();
    assert_eq!(source.file_name, "Invoice.bracketed.rs");
    assert!(source.source.contains("\"IBAN-***\""));
}

#[test]
fn descriptors_serialize_for_inspection() {
    let schema = JsonSchema::parse(DOCUMENT).unwrap();
    let pipeline = Pipeline::default();
    let described = pipeline
        .describe(&schema.0[0], &CancellationToken::new())
        .unwrap()
        .unwrap();

    let lines = described.descriptor.member("lines").unwrap();
    assert_eq!(lines.kind(), MemberKind::Enumerable);
    assert!(lines.is_nullable());

    let json = serde_json::to_value(&described.descriptor).unwrap();
    assert_eq!(json["qualified_name"], "billing::Invoice");
    assert_eq!(json["members"][2]["name"], "iban");

    let back: TypeDescriptor = serde_json::from_value(json).unwrap();
    assert_eq!(back, described.descriptor);
}
