//! Architecture contract tests.

mod support;

use support::architecture::{find_production_lines_containing, path_exists};

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_production_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::application",
            "crate::infrastructure",
            "crate::port",
            "tokio::",
            "reqwest::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_depend_only_on_domain() {
    let hits = find_production_lines_containing(
        "src/port",
        &[
            "crate::adapter",
            "crate::application",
            "crate::infrastructure",
            "reqwest::",
        ],
    );

    assert!(hits.is_empty(), "found outer-layer imports in ports: {hits:#?}");
}

#[test]
fn application_reaches_adapters_only_through_ports() {
    let hits = find_production_lines_containing(
        "src/application",
        &["crate::adapter", "crate::infrastructure", "reqwest::"],
    );

    assert!(
        hits.is_empty(),
        "found concrete adapter imports in application layer: {hits:#?}"
    );
}

#[test]
fn kraken_wire_types_stay_inside_the_kraken_adapter() {
    let hits = find_production_lines_containing(
        "src/application",
        &["KrakenOrder", "AddOrderRequest", "KrakenApi"],
    );

    assert!(
        hits.is_empty(),
        "found Kraken wire types outside the adapter: {hits:#?}"
    );
}

#[test]
fn both_pipeline_stages_exist() {
    assert!(path_exists("src/application/executor.rs"));
    assert!(path_exists("src/application/reconciler.rs"));
}
