use degreeplan_core::identifier::Id;
use degreeplan_core::prerequisite::PrerequisiteExpr;
use degreeplan_core::rule::RuleSpec;
use degreeplan_parser::error::{ErrorCode, Severity};
use degreeplan_parser::{merge_catalogs, parse_catalog, parse_degrees, parse_session};

const WINTER: &str = r#"[
    {
        "_id": "01040012",
        "name": "Calculus 1M",
        "credits": 5.5,
        "semester": ["חורף"]
    },
    {
        "_id": "02340114",
        "name": "Introduction to Computer Science M",
        "credits": 4,
        "semester": ["חורף"],
        "prerequisites": "01040012 או 01040031"
    }
]"#;

const SPRING: &str = r#"{
    "01040012": { "name": "Calculus 1M", "credits": 5.5, "semester": ["אביב"] },
    "02340124": {
        "name": "Introduction to Systems Programming",
        "credits": 4,
        "prereqTree": { "and": ["02340114", { "or": ["01040012", "01040031"] }] }
    }
}"#;

#[test]
fn test_load_and_merge_two_terms() {
    let winter = parse_catalog(WINTER).expect("Failed to parse winter catalog");
    let spring = parse_catalog(SPRING).expect("Failed to parse spring catalog");
    assert!(winter.warnings().is_empty());
    assert!(spring.warnings().is_empty());

    let catalog = merge_catalogs(winter.into_value(), spring.into_value());
    assert_eq!(catalog.len(), 3);

    let calculus = catalog.get(Id::new("01040012")).unwrap();
    assert_eq!(calculus.offered(), ["חורף", "אביב"]);

    // Text prerequisites and stored trees produce the same shape.
    let intro = catalog.get(Id::new("02340114")).unwrap();
    assert_eq!(
        intro.prerequisites(),
        Some(&PrerequisiteExpr::OneOf(vec![
            PrerequisiteExpr::course("01040012"),
            PrerequisiteExpr::course("01040031"),
        ]))
    );
    let systems = catalog.get(Id::new("02340124")).unwrap();
    assert_eq!(
        systems.prerequisites().map(ToString::to_string),
        Some("(02340114 and (01040012 or 01040031))".to_string())
    );
}

#[test]
fn test_syntax_error_points_at_offending_character() {
    let source = "{\n  \"A\": { \"credits\": 3 },\n  \"B\": { \"credits\": 3 }\n  \"C\": {}\n}";

    let err = parse_catalog(source).expect_err("missing comma must fail");
    let diagnostic = &err.diagnostics()[0];

    assert_eq!(diagnostic.severity(), Severity::Error);
    assert_eq!(diagnostic.code(), Some(ErrorCode::E100));
    let span = diagnostic.labels()[0].span();
    assert_eq!(&source[span.start()..span.end()], "\"");
    assert!(source[..span.start()].ends_with("}\n  "));
}

#[test]
fn test_degrees_with_global_rules_and_session_template() {
    let degrees = parse_degrees(
        r#"{
            "globalRules": [
                { "id": "english", "type": "classification_courses",
                  "courses": [{ "id": "01130013", "name": "English exemption" }] }
            ],
            "ds": {
                "name": "Data Science",
                "semesters": { "1": ["01040012"], "2": ["02340114"] },
                "rules": [{ "id": "total", "type": "total_credits", "required_credits": 155 }]
            },
            "ie": {
                "name": "Industrial Engineering",
                "semesters": { "1": ["01040012"] }
            }
        }"#,
    )
    .expect("Failed to parse degrees");

    assert_eq!(degrees.value().len(), 2);
    for template in degrees.value().iter() {
        assert_eq!(template.rules().last().unwrap().id(), "english");
    }
    assert_eq!(
        degrees.value().get("ds").unwrap().rules()[0].spec(),
        &RuleSpec::TotalCredits {
            required: Some(155.0)
        }
    );

    let session = parse_session(
        r#"{
            "template": {
                "id": "ds",
                "name": "Data Science",
                "semesters": { "1": ["01040012", "02340114"] }
            },
            "grades": { "01040012": "91" },
            "binaryStates": {},
            "classificationChecked": { "01130013": true },
            "classificationCredits": {}
        }"#,
    )
    .expect("Failed to parse session");

    let stored = session.into_value();
    let template = stored.template.expect("session carries its template");
    assert_eq!(template.plan().semesters()[0].courses().len(), 2);
    assert!(stored.state.completions.is_done(Id::new("01040012")));
    assert!(stored.state.classification.is_checked(Id::new("01130013")));
}
