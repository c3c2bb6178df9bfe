//! End-to-end loads against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then loads the feed through
//! `RemoteFeedLoader` + `UreqHttpClient` over real HTTP. Completions arrive on
//! the transport's thread, so each load is awaited through a channel.

use std::net::SocketAddr;
use std::sync::mpsc;
use std::time::Duration;

use feed_core::{
    FeedItem, LoadError, LoadFeedResult, RemoteFeedLoader, UreqHttpClient, Url, Uuid,
};
use mock_server::Item;
use pretty_assertions::assert_eq;

fn start_server(items: Vec<Item>) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with_items(listener, items).await
        })
        .unwrap();
    });

    addr
}

fn load(url: &str) -> LoadFeedResult {
    let loader = RemoteFeedLoader::new(Url::parse(url).unwrap(), UreqHttpClient::new());
    let (tx, rx) = mpsc::channel();
    loader.load(move |result| {
        tx.send(result).unwrap();
    });
    rx.recv_timeout(Duration::from_secs(10))
        .expect("load did not complete")
}

#[test]
fn loads_feed_from_live_server() {
    let seeded = vec![
        Item {
            id: Uuid::new_v4(),
            description: None,
            location: None,
            image: "https://a-url.com/1.png".to_string(),
        },
        Item {
            id: Uuid::new_v4(),
            description: Some("a description".to_string()),
            location: Some("a location".to_string()),
            image: "https://a-url.com/2.png".to_string(),
        },
    ];
    let addr = start_server(seeded.clone());

    let expected: Vec<FeedItem> = seeded
        .iter()
        .map(|item| FeedItem {
            id: item.id,
            description: item.description.clone(),
            location: item.location.clone(),
            image_url: Url::parse(&item.image).unwrap(),
        })
        .collect();

    assert_eq!(load(&format!("http://{addr}/feed")), Ok(expected));
}

#[test]
fn empty_feed_from_live_server() {
    let addr = start_server(Vec::new());
    assert_eq!(load(&format!("http://{addr}/feed")), Ok(Vec::new()));
}

#[test]
fn non_200_from_live_server_is_invalid_data() {
    let addr = start_server(Vec::new());
    for code in [201, 400, 404, 500] {
        assert_eq!(
            load(&format!("http://{addr}/status/{code}")),
            Err(LoadError::InvalidData),
            "status {code}"
        );
    }
}

#[test]
fn malformed_body_from_live_server_is_invalid_data() {
    let addr = start_server(Vec::new());
    assert_eq!(
        load(&format!("http://{addr}/malformed")),
        Err(LoadError::InvalidData)
    );
}

#[test]
fn refused_connection_is_connectivity_error() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    assert_eq!(
        load(&format!("http://{addr}/feed")),
        Err(LoadError::Connectivity)
    );
}

fn large_feed(count: usize) -> Vec<Item> {
    let description = "x".repeat(10_000);
    (0..count)
        .map(|i| Item {
            id: Uuid::new_v4(),
            description: Some(description.clone()),
            location: None,
            image: format!("https://a-url.com/{i}.png"),
        })
        .collect()
}

#[test]
fn feed_larger_than_ten_megabytes_loads() {
    let seeded = large_feed(1_200);
    let addr = start_server(seeded.clone());

    let items = load(&format!("http://{addr}/feed")).expect("large feed should load");
    assert_eq!(items.len(), seeded.len());
    assert_eq!(items[0].id, seeded[0].id);
}

#[test]
fn body_over_configured_limit_is_connectivity_error() {
    let addr = start_server(large_feed(10));
    let client = UreqHttpClient::new().with_max_body_size(1_024);
    let loader = RemoteFeedLoader::new(
        Url::parse(&format!("http://{addr}/feed")).unwrap(),
        client,
    );

    let (tx, rx) = mpsc::channel();
    loader.load(move |result| {
        tx.send(result).unwrap();
    });
    let result = rx.recv_timeout(Duration::from_secs(10)).unwrap();
    assert_eq!(result, Err(LoadError::Connectivity));
}
