use reqwest::header::HeaderMap;
use reqwest::Method;
use unb_api::http::encode_path_segment;
use unb_api::http::ratelimit::{route_key, RateLimitTracker, REMAINING_HEADER, RESET_HEADER};

const NOW: i64 = 1_700_000_000;

#[test]
fn unseen_route_gets_fresh_bucket() {
    let tracker = RateLimitTracker::new();
    let key = route_key(&Method::GET, "guilds/1/users/2");
    let record = tracker.acquire(&key, NOW);
    assert_eq!(record.remaining, None);
    assert!(record.expires_at <= NOW);
}

#[test]
fn remaining_header_is_taken_verbatim() {
    let tracker = RateLimitTracker::new();
    let mut h = HeaderMap::new();
    h.insert(REMAINING_HEADER, "5".parse().unwrap());
    tracker.update("GET/guilds/1/users/2", &h, NOW);
    tracker.update("GET/guilds/1/users/2", &h, NOW);
    assert_eq!(tracker.acquire("GET/guilds/1/users/2", NOW).remaining, Some(5));
}

#[test]
fn expiry_prefers_retry_after_over_reset() {
    let tracker = RateLimitTracker::new();
    let mut h = HeaderMap::new();
    h.insert("retry-after", "2".parse().unwrap());
    h.insert(RESET_HEADER, (NOW + 600).to_string().parse().unwrap());
    tracker.update("GET/leaderboard", &h, NOW);
    assert_eq!(tracker.acquire("GET/leaderboard", NOW).expires_at, NOW + 2);
}

#[test]
fn buckets_are_keyed_by_method_and_route() {
    let tracker = RateLimitTracker::new();
    let mut h = HeaderMap::new();
    h.insert(REMAINING_HEADER, "0".parse().unwrap());
    tracker.update(&route_key(&Method::PATCH, "guilds/1/users/2"), &h, NOW);
    // The GET bucket for the same route is untouched.
    let get = tracker.acquire(&route_key(&Method::GET, "guilds/1/users/2"), NOW);
    assert_eq!(get.remaining, None);
}

#[test]
fn path_segment_encoding() {
    assert_eq!(encode_path_segment("123 456/789"), "123%20456%2F789");
    assert_eq!(encode_path_segment("903002607584428056"), "903002607584428056");
}
