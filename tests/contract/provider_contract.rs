#[path = "../fixtures/mod.rs"]
mod fixtures;

use std::sync::Arc;

use fixtures::{
    listing_url, provider_http, registry_adapter, statement_adapter, summary_url, PTT_ID, REGISTRY,
    STATEMENTS,
};
use thaifin_core::{
    HttpError, HttpResponse, Language, ProviderId, RegistrySource, SourceErrorKind,
    StatementKeySpace, StatementSource, StaticHttpClient, ThaiSecuritiesAdapter,
    YearlyMarkerPolicy,
};

#[derive(Clone)]
struct StatementCase {
    id: ProviderId,
    source: Arc<dyn StatementSource>,
    key: &'static str,
    key_space: StatementKeySpace,
    policy: YearlyMarkerPolicy,
}

fn legacy_financials() -> StaticHttpClient {
    StaticHttpClient::new().with_json(
        format!("{REGISTRY}/stocks/PTT/financials"),
        r#"[
            {"fiscal_year": 2023, "quarter": 1, "revenue": "780,000"},
            {"fiscal_year": 2023, "quarter": 0, "revenue": "3,144,000"},
            {"fiscal_year": 2022, "revenue": "3,367,203"}
        ]"#,
    )
}

fn statement_cases() -> Vec<StatementCase> {
    vec![
        StatementCase {
            id: ProviderId::Finnomena,
            source: Arc::new(statement_adapter(provider_http())),
            key: PTT_ID,
            key_space: StatementKeySpace::SecurityId,
            policy: YearlyMarkerPolicy::Nine,
        },
        StatementCase {
            id: ProviderId::ThaiSecurities,
            source: Arc::new(registry_adapter(legacy_financials())),
            key: "PTT",
            key_space: StatementKeySpace::Ticker,
            policy: YearlyMarkerPolicy::ZeroOrAbsent,
        },
    ]
}

#[tokio::test]
async fn statement_sources_declare_their_key_space_and_sentinel() {
    for case in statement_cases() {
        assert_eq!(case.source.id(), case.id);
        assert_eq!(case.source.key_space(), case.key_space, "provider '{}'", case.id);
        assert_eq!(case.source.yearly_policy(), case.policy, "provider '{}'", case.id);
    }
}

#[tokio::test]
async fn statements_return_records_with_both_period_kinds() {
    for case in statement_cases() {
        let records = case
            .source
            .statements(case.key)
            .await
            .unwrap_or_else(|error| panic!("provider '{}' statements failed: {error}", case.id));

        assert!(!records.is_empty(), "provider '{}': records", case.id);
        let yearly = records
            .iter()
            .filter(|record| case.policy.is_yearly(record.period_marker))
            .count();
        assert!(yearly > 0, "provider '{}': yearly rows", case.id);
        assert!(yearly < records.len(), "provider '{}': quarterly rows", case.id);
        assert!(
            records.iter().all(|record| record.metrics.revenue.is_some()),
            "provider '{}': revenue decoded",
            case.id
        );
    }
}

#[tokio::test]
async fn statements_for_unknown_keys_are_not_found() {
    let cases = [
        (
            Arc::new(statement_adapter(StaticHttpClient::new())) as Arc<dyn StatementSource>,
            "00000000-0000-4000-8000-000000000000",
        ),
        (
            Arc::new(registry_adapter(StaticHttpClient::new())) as Arc<dyn StatementSource>,
            "NOPE",
        ),
    ];

    for (source, key) in cases {
        let error = source.statements(key).await.expect_err("unknown key");
        assert_eq!(error.kind(), SourceErrorKind::NotFound, "provider '{}'", source.id());
    }
}

#[tokio::test]
async fn registry_snapshots_decode_in_both_languages() {
    let adapter = registry_adapter(provider_http());

    for language in Language::ALL {
        let entries = adapter
            .snapshot(language)
            .await
            .unwrap_or_else(|error| panic!("{language} snapshot failed: {error}"));

        assert_eq!(entries.len(), 5, "{language}");
        assert!(entries.iter().all(|entry| entry.language == language));
        let ptt = entries
            .iter()
            .find(|entry| entry.symbol.as_str() == "PTT")
            .expect("PTT listed");
        assert!(ptt.name_in(language).is_some(), "{language}: PTT name");
    }
}

#[tokio::test]
async fn registry_snapshot_accepts_wrapped_arrays() {
    let http = StaticHttpClient::new().with_json(
        format!("{REGISTRY}/thai_securities_all.json"),
        r#"{"securities": [{"symbol": "2S", "name": "2S Metal", "website": "www.2s.co.th"}]}"#,
    );

    let entries = registry_adapter(http)
        .snapshot(Language::En)
        .await
        .expect("wrapped snapshot");

    assert_eq!(entries[0].symbol.as_str(), "2S");
    assert_eq!(entries[0].website.as_deref(), Some("www.2s.co.th"));
}

#[tokio::test]
async fn registry_snapshot_skips_unusable_symbols() {
    let http = StaticHttpClient::new().with_json(
        format!("{REGISTRY}/thai_securities_all.json"),
        r#"[{"symbol": "PTT"}, {"symbol": "BAD SYMBOL"}, {"name": "no symbol"}]"#,
    );

    let entries = registry_adapter(http)
        .snapshot(Language::En)
        .await
        .expect("snapshot");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].symbol.as_str(), "PTT");
}

#[tokio::test]
async fn statement_listing_maps_symbols_to_security_ids() {
    let listing = statement_adapter(provider_http())
        .listing()
        .await
        .expect("listing");

    let ptt = listing
        .iter()
        .find(|entry| entry.symbol == "PTT")
        .expect("PTT listed");
    assert_eq!(ptt.statement_id, PTT_ID);
    assert_eq!(ptt.exchange.as_deref(), Some("SET"));

    let legacy =
        ThaiSecuritiesAdapter::with_http_client(Arc::new(StaticHttpClient::new()), REGISTRY);
    assert!(legacy.listing().await.expect("legacy listing").is_empty());
}

#[tokio::test]
async fn transport_failures_keep_their_classification() {
    let cases = [
        (Err(HttpError::new("connection reset")), SourceErrorKind::Unavailable, true),
        (Ok(HttpResponse::with_status(429, "")), SourceErrorKind::RateLimited, true),
        (Ok(HttpResponse::with_status(502, "")), SourceErrorKind::Unavailable, true),
        (Ok(HttpResponse::ok_json("<html>")), SourceErrorKind::Schema, false),
    ];

    for (response, kind, retryable) in cases {
        let http = StaticHttpClient::new().with_response(listing_url(), response);
        let adapter = statement_adapter(http);
        let error = adapter.listing().await.expect_err("listing must fail");
        assert_eq!(error.kind(), kind, "{error}");
        assert_eq!(error.retryable(), retryable, "{error}");
    }
}

#[tokio::test]
async fn summary_urls_are_built_from_the_configured_base() {
    let adapter = statement_adapter(StaticHttpClient::new());
    assert_eq!(adapter.summary_url(PTT_ID), summary_url(PTT_ID));
    assert!(adapter.listing_request().full_url().starts_with(STATEMENTS));
}
