use refdiff_core::{
    decode_blueprint_plan, decode_comparison_options, decode_refdiff_options, Error, PlanEntry,
    RefCommitPair, RefPair, RefPairList, RefdiffBlueprintPlan, RefdiffOptions, REFDIFF_PLUGIN,
};
use serde_json::{json, Value};

fn reencode<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap()
}

// --- Blueprint plan ---

#[test]
fn plan_roundtrip_is_json_equivalent() {
    let input = json!([
        [
            {
                "plugin": "refdiff",
                "options": {
                    "repoId": "github:GithubRepo:1:384111310",
                    "pairs": [
                        {"newRef": "refs/tags/v0.6.0", "oldRef": "refs/tags/v0.5.0"},
                        {"newRef": "refs/tags/v0.5.0", "oldRef": "refs/tags/v0.4.0"}
                    ]
                }
            },
            {
                "plugin": "refdiff",
                "options": {"repoId": "gitlab:GitlabProject:2:7", "pairs": []}
            }
        ],
        [
            {
                "plugin": "refdiff",
                "options": {
                    "repoId": "github:GithubRepo:1:384111310",
                    "pairs": [{"newRef": "main", "oldRef": "release-1"}],
                    "tasks": ["calculateCommitsDiff", "calculateIssuesDiff"]
                }
            }
        ]
    ]);

    let plan = decode_blueprint_plan(&input.to_string()).unwrap();
    assert_eq!(plan.stage_count(), 2);
    assert_eq!(plan.task_count(), 3);
    assert_eq!(plan.pair_count(), 3);
    assert_eq!(reencode(&plan), input);
}

#[test]
fn route_example_body() {
    let plan =
        decode_blueprint_plan(r#"[[{"plugin":"refdiff","options":{"repoId":"r1","pairs":[]}}]]"#)
            .unwrap();
    let summary = plan.summary();
    assert_eq!(summary.stages, 1);
    assert_eq!(summary.tasks, 1);
    assert_eq!(summary.pairs, 0);
    assert_eq!(summary.repo_ids, vec!["r1"]);
}

#[test]
fn built_plan_encodes_to_route_shape() {
    let mut plan = RefdiffBlueprintPlan::new();
    let mut options = RefdiffOptions::new("r1");
    options.add_pair("v2.0", "v1.0").unwrap();
    plan.push_stage(vec![PlanEntry::new(REFDIFF_PLUGIN, options.comparison())]);

    assert_eq!(
        reencode(&plan),
        json!([[{
            "plugin": "refdiff",
            "options": {"repoId": "r1", "pairs": [{"newRef": "v2.0", "oldRef": "v1.0"}]}
        }]])
    );
}

#[test]
fn shape_errors_share_one_kind() {
    let bad_inputs = [
        "{}",
        "not json",
        r#"[[{"plugin":"refdiff","options":{"pairs":[]}}]]"#,
        r#"[[{"plugin":"refdiff","options":{"repoId":"r1","pairs":[{"newRef":"v2"}]}}]]"#,
        r#"[[{"plugin":"refdiff","options":{"repoId":"r1","pairs":{}}}]]"#,
        r#"[[{"plugin":"dora","options":{"repoId":"r1"}}]]"#,
    ];
    for input in bad_inputs {
        match decode_blueprint_plan(input) {
            Err(Error::InvalidConfiguration(_)) => {}
            other => panic!("{input}: expected invalid configuration, got {other:?}"),
        }
    }
}

// --- Options ---

#[test]
fn comparison_options_example() {
    let input = r#"{"repoId":"r1","pairs":[{"newRef":"v2.0","oldRef":"v1.0"}]}"#;
    let options = decode_comparison_options(input).unwrap();
    assert_eq!(options.repo_id, "r1");
    assert_eq!(options.pairs, vec![RefPair::new("v2.0", "v1.0")]);
    assert_eq!(
        reencode(&options),
        serde_json::from_str::<Value>(input).unwrap()
    );
}

#[test]
fn refdiff_options_without_tasks_have_no_tasks_key() {
    let options = decode_refdiff_options(r#"{"repoId":"r1","pairs":[]}"#).unwrap();
    assert!(options.tasks.is_none());
    let encoded = serde_json::to_string(&options).unwrap();
    assert!(!encoded.contains("\"tasks\""), "{encoded}");
}

#[test]
fn refdiff_options_with_empty_tasks_keep_the_key() {
    let options = decode_refdiff_options(r#"{"repoId":"r1","tasks":[]}"#).unwrap();
    assert_eq!(options.tasks, Some(Vec::new()));
    assert_eq!(reencode(&options)["tasks"], json!([]));
}

#[test]
fn all_pairs_arity_is_enforced() {
    for bad in [
        r#"{"repoId":"r1","allPairs":[["a","b"]]}"#,
        r#"{"repoId":"r1","allPairs":[["a","b","c","d","e"]]}"#,
    ] {
        assert!(matches!(
            decode_refdiff_options(bad),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    let options =
        decode_refdiff_options(r#"{"repoId":"r1","allPairs":[["a","b","c","d"]]}"#).unwrap();
    assert_eq!(
        options.all_pairs,
        vec![RefCommitPair::from(["a", "b", "c", "d"])]
    );
}

#[test]
fn engine_marshalled_options_decode() {
    let engine = r#"{"RepoId":"r1","tasks":null,"Pairs":null,"TagsPattern":"","TagsLimit":0,"TagsOrder":"","AllPairs":null,"ProjectName":""}"#;
    let options = decode_refdiff_options(engine).unwrap();
    assert_eq!(options.repo_id, "r1");
    assert!(options.tasks.is_none());
    assert!(options.pairs.is_empty());
    assert!(options.all_pairs.is_empty());
    assert_eq!(options.tags_limit, Some(0));

    let comparison = decode_comparison_options(r#"{"repoId":"r1","pairs":null}"#).unwrap();
    assert!(comparison.pairs.is_empty());
}

// --- Fixed tuples ---

#[test]
fn fixed_tuples_keep_their_arity() {
    let commit_pair: RefCommitPair = serde_json::from_str(r#"["1","2","3","4"]"#).unwrap();
    assert_eq!(commit_pair.as_slice().len(), 4);
    assert_eq!(reencode(&commit_pair), json!(["1", "2", "3", "4"]));

    let list: RefPairList = serde_json::from_str(r#"["old","new"]"#).unwrap();
    assert_eq!(list.into_inner(), ["old".to_string(), "new".to_string()]);

    assert!(serde_json::from_str::<RefPairList>("[]").is_err());
    assert!(serde_json::from_str::<RefCommitPair>(r#"["1","2"]"#).is_err());
}
