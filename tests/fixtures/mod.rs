//! Offline provider fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use thaifin_core::{
    CacheStore, FinnomenaAdapter, HttpClient, HttpError, HttpResponse, RetryConfig,
    StaticHttpClient, ThaiSecuritiesAdapter, ThaifinClient, ThaifinConfig,
};

pub const REGISTRY: &str = "https://registry.test";
pub const STATEMENTS: &str = "https://statements.test/api";

pub const PTT_ID: &str = "3f2504e0-4f89-11d3-9a0c-0305e82c3301";
pub const PTTEP_ID: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";
pub const AOT_ID: &str = "6ba7b811-9dad-11d1-80b4-00c04fd430c8";
pub const SCC_ID: &str = "6ba7b812-9dad-11d1-80b4-00c04fd430c8";

const REGISTRY_EN: &str = r#"{
    "PTT": {"symbol": "PTT", "name": "PTT Public Company Limited", "market": "SET",
            "industry": "Resources", "sector": "Energy & Utilities",
            "address": "555 Vibhavadi Rangsit Road, Bangkok", "web": "www.pttplc.com"},
    "PTTEP": {"symbol": "PTTEP", "name": "PTT Exploration and Production Public Company Limited",
              "market": "SET", "industry": "Resources", "sector": "Energy & Utilities"},
    "AOT": {"symbol": "AOT", "name": "Airports of Thailand Public Company Limited",
            "market": "SET", "industry": "Services", "sector": "Transportation & Logistics",
            "web": ""},
    "SCC": {"symbol": "SCC", "name": "The Siam Cement Public Company Limited", "market": "SET"},
    "GONE": {"symbol": "GONE", "name": "Delisted Holdings Public Company Limited"}
}"#;

const REGISTRY_TH: &str = r#"[
    {"symbol": "PTT", "name": "บริษัท ปตท. จำกัด (มหาชน)", "market": "SET",
     "industry": "ทรัพยากร", "sector": "พลังงานและสาธารณูปโภค"},
    {"symbol": "PTTEP", "name": "บริษัท ปตท. สำรวจและผลิตปิโตรเลียม จำกัด (มหาชน)", "market": "SET"},
    {"symbol": "AOT", "name": "บริษัท ท่าอากาศยานไทย จำกัด (มหาชน)", "market": "SET"},
    {"symbol": "SCC", "name": "บริษัท ปูนซิเมนต์ไทย จำกัด (มหาชน)", "market": "SET"},
    {"symbol": "GONE", "name": null}
]"#;

const METADATA: &str = r#"{
    "last_updated": "2025-06-01T00:00:00Z",
    "total_securities": 5,
    "markets": {"SET": 5},
    "sectors": {"Energy & Utilities": 2}
}"#;

fn listing() -> String {
    format!(
        r#"{{"status": true, "statusCode": 200, "data": [
            {{"name": "PTT", "th_name": "ปตท.", "en_name": "PTT", "security_id": "{PTT_ID}", "exchange": "SET"}},
            {{"name": "PTTEP", "th_name": "ปตท.สผ.", "en_name": "PTTEP", "security_id": "{PTTEP_ID}", "exchange": "SET"}},
            {{"name": "AOT", "th_name": "ท่าอากาศยานไทย", "en_name": "AOT", "security_id": "{AOT_ID}", "exchange": "SET"}},
            {{"name": "SCC", "th_name": "ปูนซิเมนต์ไทย", "en_name": "SCC", "security_id": "{SCC_ID}", "exchange": "SET"}}
        ]}}"#
    )
}

/// PTT: quarters 2023Q1, Q2 and Q4 plus yearly rows for 2021..=2023.
fn ptt_summary() -> String {
    let rows = [
        (2023, 4, "\"880,000\""),
        (2021, 9, "\"2,258,818\""),
        (2023, 1, "\"780,000\""),
        (2022, 9, "\"3,367,203\""),
        (2023, 2, "\"750,000\""),
        (2023, 9, "\"3,144,000\""),
    ]
    .iter()
    .map(|(fiscal, quarter, revenue)| {
        format!(
            r#"{{"security_id": "{PTT_ID}", "fiscal": {fiscal}, "quarter": {quarter},
                "revenue": {revenue}, "net_profit": "25000", "roe": "7.5", "end_of_year_date": "{fiscal}-12-31"}}"#
        )
    })
    .collect::<Vec<_>>()
    .join(",");
    format!(r#"{{"status": true, "statusCode": 200, "data": [{rows}]}}"#)
}

fn single_quarter_summary(security_id: &str) -> String {
    format!(
        r#"{{"status": true, "statusCode": 200, "data": [
            {{"security_id": "{security_id}", "fiscal": 2024, "quarter": 1, "revenue": 100, "net_profit": null}}
        ]}}"#
    )
}

pub fn registry_en_url() -> String {
    format!("{REGISTRY}/thai_securities_all.json")
}

pub fn registry_th_url() -> String {
    format!("{REGISTRY}/thai_securities_all_th.json")
}

pub fn listing_url() -> String {
    format!("{STATEMENTS}/stock/list?exchange=TH")
}

pub fn summary_url(security_id: &str) -> String {
    format!("{STATEMENTS}/stock/summary/{security_id}")
}

fn default_routes() -> Vec<(String, String)> {
    vec![
        (registry_en_url(), String::from(REGISTRY_EN)),
        (registry_th_url(), String::from(REGISTRY_TH)),
        (format!("{REGISTRY}/metadata.json"), String::from(METADATA)),
        (listing_url(), listing()),
        (summary_url(PTT_ID), ptt_summary()),
        (summary_url(PTTEP_ID), single_quarter_summary(PTTEP_ID)),
        (summary_url(AOT_ID), single_quarter_summary(AOT_ID)),
        (
            summary_url(SCC_ID),
            String::from(r#"{"status": true, "statusCode": 200, "data": []}"#),
        ),
    ]
}

/// Both providers answering with a small SET universe. SCC's statement feed
/// is empty and GONE has no statement listing.
pub fn provider_http() -> StaticHttpClient {
    default_routes()
        .into_iter()
        .fold(StaticHttpClient::new(), |http, (url, body)| http.with_json(url, body))
}

/// [`provider_http`] with `url` answering `response` instead.
pub fn provider_http_overriding(
    url: &str,
    response: Result<HttpResponse, HttpError>,
) -> StaticHttpClient {
    default_routes()
        .into_iter()
        .filter(|(route, _)| route != url)
        .fold(
            StaticHttpClient::new().with_response(url, response),
            |http, (route, body)| http.with_json(route, body),
        )
}

pub fn config() -> ThaifinConfig {
    ThaifinConfig::default()
        .with_registry_base_url(REGISTRY)
        .with_statement_base_url(STATEMENTS)
        .with_retry(RetryConfig::no_retry())
}

pub fn client_with(http: Arc<StaticHttpClient>) -> ThaifinClient {
    ThaifinClient::with_transport(
        http as Arc<dyn HttpClient>,
        Arc::new(CacheStore::daily()),
        &config(),
    )
}

pub fn client() -> ThaifinClient {
    client_with(Arc::new(provider_http()))
}

pub fn registry_adapter(http: StaticHttpClient) -> ThaiSecuritiesAdapter {
    ThaiSecuritiesAdapter::with_http_client(Arc::new(http), REGISTRY)
}

pub fn statement_adapter(http: StaticHttpClient) -> FinnomenaAdapter {
    FinnomenaAdapter::with_http_client(Arc::new(http), STATEMENTS)
}
