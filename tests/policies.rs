//! Policy decoding through the full document path.

use apigee_hcl::dsl::policies::message::Payload;
use apigee_hcl::dsl::{ErrorKind, Policy, PolicyRegistry};

mod common;

#[test]
fn test_statistics_collector_reports_every_failure() {
    let err = common::decode(
        r#"
        policy "statistics_collector" "sc" {
          statistic "flag" {
            ref  = "request.header.flag"
            type = "bool"
          }
          statistic "unreferenced" {
            type = "integer"
          }
        }
        "#,
    )
    .unwrap_err();

    assert_eq!(err.len(), 2);
    assert_eq!(
        common::messages(&err),
        vec![
            "statistic requires a valid type value [string, integer, float, long, double]",
            "statistic requires a ref value",
        ]
    );
}

#[test]
fn test_quota_nesting_is_preserved() {
    let config = common::decode(
        r#"
        policy "quota" "tiered" {
          allow { count = 5000 }
          allow {
            class {
              ref = "request.header.plan"
              class_allow {
                class = "platinum"
                count = 1000
              }
              class_allow {
                class = "silver"
                count = 100
              }
            }
          }
        }
        "#,
    )
    .unwrap();

    let Some(Policy::Quota(quota)) = config.policy("tiered") else {
        panic!("expected quota");
    };
    assert_eq!(quota.allows.len(), 2);
    assert_eq!(quota.allows[0].count, Some(5000));
    assert_eq!(quota.allows[1].classes.len(), 1);

    let allows: Vec<_> = quota.allows[1].classes[0]
        .allows
        .iter()
        .map(|a| (a.class.as_deref(), a.count))
        .collect();
    assert_eq!(
        allows,
        vec![(Some("platinum"), Some(1000)), (Some("silver"), Some(100))]
    );
}

#[test]
fn test_extract_variables_header_label() {
    let unlabeled = r#"
policy "extract_variables" "ev" {
  header {
    pattern { value = "Bearer {token}" }
  }
}
"#;
    let err = common::decode(unlabeled).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err.errors()[0].kind, ErrorKind::MissingLabel("header"));
    assert_eq!(err.errors()[0].pos.line, 3);
    assert_eq!(err.errors()[0].pos.column, 10);

    let labeled = unlabeled.replace("header {", "header \"Authorization\" {");
    let config = common::decode(&labeled).unwrap();
    let Some(Policy::ExtractVariables(ev)) = config.policy("ev") else {
        panic!("expected extract variables");
    };
    assert_eq!(ev.headers[0].name, "Authorization");
    assert_eq!(ev.headers[0].patterns[0].value, "Bearer {token}");
}

#[test]
fn test_every_builtin_kind_decodes() {
    let mut document = String::new();
    for kind in PolicyRegistry::builtin().kinds() {
        document.push_str(&format!("policy \"{}\" \"{}-policy\" {{}}\n", kind, kind));
    }

    let config = common::decode(&document).unwrap();
    assert_eq!(config.policies.len(), 12);
    for (policy, kind) in config.policies.iter().zip(PolicyRegistry::builtin().kinds()) {
        assert_eq!(policy.kind(), kind);
        assert_eq!(policy.name(), format!("{}-policy", kind));
        assert!(policy.base().enabled);
    }
    assert!(config.resources.is_empty());
}

#[test]
fn test_message_policies_share_operations() {
    let config = common::decode(
        r#"
        policy "assign_message" "am" {
          remove {
            header "Authorization" {}
            payload = true
          }
        }
        policy "raise_fault" "rf" {
          fault_response {
            remove { payload = true }
          }
        }
        policy "service_callout" "sc" {
          request {
            remove { header {} }
          }
        }
        "#,
    );

    let err = config.unwrap_err();
    assert_eq!(common::messages(&err), vec!["header requires a name"]);
    assert_eq!(err.errors()[0].pos.line, 15);

    let config = common::decode(
        r#"
        policy "assign_message" "am" {
          remove {
            header "Authorization" {}
            payload = true
          }
        }
        "#,
    )
    .unwrap();
    let Some(Policy::AssignMessage(am)) = config.policy("am") else {
        panic!("expected assign message");
    };
    let remove = am.ops.remove.as_ref().unwrap();
    assert_eq!(remove.headers[0].name, "Authorization");
    assert_eq!(remove.payload, Some(Payload::Flag(true)));
}

#[test]
fn test_wrong_attribute_type_is_positioned() {
    let err = common::decode(
        r#"
        policy "javascript" "js" {
          time_limit = "soon"
        }
        "#,
    )
    .unwrap_err();

    assert_eq!(err.len(), 1);
    let first = &err.errors()[0];
    assert_eq!(first.pos.line, 3);
    assert!(matches!(
        &first.kind,
        ErrorKind::AttributeType { key, .. } if key == "time_limit"
    ));
}
