use std::io::Write;

use layers::{Layer, LayerId};
use scene::MapConfig;
use serde_json::json;
use streaming::{DataLoader, FetchError, HttpFetcher, LoadError, LoaderConfig, Source};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn plates_file(doc: &serde_json::Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(doc.to_string().as_bytes()).expect("write plates");
    file
}

#[tokio::test]
async fn single_quake_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all_day.geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "mag": 6.2, "title": "Test Quake", "time": 1700000000000i64 },
                "geometry": { "type": "Point", "coordinates": [20.0, 10.0] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let plates = plates_file(&json!({ "type": "FeatureCollection", "features": [] }));
    let loader = DataLoader::new(
        LoaderConfig {
            feed: Source::parse(&format!("{}/all_day.geojson", server.uri())),
            plates: Source::Local(plates.path().to_path_buf()),
        },
        HttpFetcher::default(),
    );

    let map = loader.render(&MapConfig::default()).await.expect("render");

    let quakes = map.earthquakes();
    assert_eq!(quakes.feature_count(), 1);
    let marker = &quakes.markers()[0];
    assert_eq!(marker.position.lat, 10.0);
    assert_eq!(marker.position.lng, 20.0);
    assert_eq!(marker.style.fill_color.to_string(), "#ff0000");
    assert!((marker.style.radius - 31.0).abs() < 1e-9);
    assert!(marker.popup.starts_with("<h5>Test Quake</h5><hr><p>"));

    assert_eq!(map.fault_lines().feature_count(), 0);
    assert_eq!(map.legend().entries.len(), 6);
    assert_eq!(map.top_overlay(), Some(LayerId::EARTHQUAKES));
}

#[tokio::test]
async fn feed_count_and_order_survive_the_pipeline() {
    let magnitudes = [1.5, 0.2, 4.8, 3.3, 2.7, 5.5, 0.9];
    let features: Vec<_> = magnitudes
        .iter()
        .enumerate()
        .map(|(i, m)| {
            json!({
                "type": "Feature",
                "properties": { "mag": m, "title": format!("q{i}"), "time": 0 },
                "geometry": { "type": "Point", "coordinates": [i as f64, 0.0] }
            })
        })
        .collect();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "FeatureCollection",
            "features": features
        })))
        .mount(&server)
        .await;

    let plates = plates_file(&json!({ "type": "FeatureCollection", "features": [] }));
    let loader = DataLoader::new(
        LoaderConfig {
            feed: Source::parse(&server.uri()),
            plates: Source::Local(plates.path().to_path_buf()),
        },
        HttpFetcher::default(),
    );

    let map = loader.render(&MapConfig::default()).await.expect("render");
    let lngs: Vec<f64> = map
        .earthquakes()
        .markers()
        .iter()
        .map(|m| m.position.lng)
        .collect();
    assert_eq!(lngs, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[tokio::test]
async fn http_error_status_stops_the_pass() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let loader = DataLoader::new(
        LoaderConfig {
            feed: Source::parse(&server.uri()),
            plates: Source::parse("/definitely/not/here.json"),
        },
        HttpFetcher::default(),
    );

    match loader.load().await {
        Err(LoadError::FeedFetch(FetchError::Status { status, .. })) => assert_eq!(status, 503),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn missing_plates_file_is_an_io_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "type": "FeatureCollection", "features": [] })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let loader = DataLoader::new(
        LoaderConfig {
            feed: Source::parse(&server.uri()),
            plates: Source::Local(dir.path().join("PB2002_plates.json")),
        },
        HttpFetcher::default(),
    );

    let err = loader.load().await.unwrap_err();
    assert!(matches!(err, LoadError::PlatesFetch(FetchError::Io { .. })));
}
