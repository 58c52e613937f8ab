#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn test_system_clock_is_monotonic() {
    let clock = SystemClock::new();
    let a = clock.now_micros();
    let b = clock.now_micros();
    assert!(b >= a);
}

#[test]
fn test_fake_clock_starts_where_told() {
    let clock = FakeClock::new(1_000);
    assert_eq!(clock.now_micros(), 1_000);
    assert_eq!(FakeClock::at_origin().now_micros(), 0);
}

#[test]
fn test_fake_clock_advance() {
    let clock = FakeClock::at_origin();
    clock.advance(Duration::from_millis(250));
    assert_eq!(clock.now_micros(), 250_000);
    clock.advance_ms(750);
    assert_eq!(clock.now(), Duration::from_secs(1));
}

#[test]
fn test_fake_clock_set() {
    let clock = FakeClock::new(5);
    clock.set(42);
    assert_eq!(clock.now_micros(), 42);
}

#[tokio::test]
async fn test_fake_clock_sleep_auto_advances() {
    let clock = FakeClock::at_origin();
    clock.sleep(Duration::from_secs(2)).await;
    assert_eq!(clock.now(), Duration::from_secs(2));
}

#[tokio::test]
async fn test_fake_clock_without_auto_advance_shares_time() {
    let clock = FakeClock::at_origin();
    let frozen = clock.without_auto_advance();
    frozen.sleep(Duration::from_secs(2)).await;
    assert_eq!(clock.now_micros(), 0);
    clock.advance_ms(10);
    assert_eq!(frozen.now_micros(), 10_000);
}
