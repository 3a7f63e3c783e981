use assert_json_diff::assert_json_eq;
use pretty_assertions::assert_eq;

use crate::chat::{derive_chat_id, Streak, StreakState};
use crate::config::datatype::DayStamp;

fn day(text: &str) -> DayStamp {
    return text.parse().unwrap();
}

fn sample(count: u32, last_date: Option<DayStamp>) -> Streak {
    return Streak {
        count,
        last_date,
        participants: ("a".to_string(), "b".to_string()),
    };
}

pub fn test_for_derive_chat_id_commutative() -> Result<(), ()> {
    assert_eq!(
        derive_chat_id("alice", "bob"),
        derive_chat_id("bob", "alice")
    );
    assert_eq!(derive_chat_id("alice", "bob"), "alice:bob");
    assert_eq!(derive_chat_id("bob", "alice"), "alice:bob");
    return Ok(());
}

pub fn test_for_classify() -> Result<(), ()> {
    assert_eq!(
        StreakState::classify(None, day("2023-04-01")),
        StreakState::Never
    );
    assert_eq!(
        StreakState::classify(Some(day("2023-04-01")), day("2023-04-01")),
        StreakState::SameDay
    );
    assert_eq!(
        StreakState::classify(Some(day("2023-04-01")), day("2023-04-02")),
        StreakState::Consecutive
    );
    assert_eq!(
        StreakState::classify(Some(day("2023-04-01")), day("2023-04-03")),
        StreakState::Gap
    );
    // 跨月与跨年也按日历日差一天算连续
    assert_eq!(
        StreakState::classify(Some(day("2023-04-30")), day("2023-05-01")),
        StreakState::Consecutive
    );
    assert_eq!(
        StreakState::classify(Some(day("2023-12-31")), day("2024-01-01")),
        StreakState::Consecutive
    );
    // 时钟回拨使today早于记录,按Gap处理
    assert_eq!(
        StreakState::classify(Some(day("2023-04-02")), day("2023-04-01")),
        StreakState::Gap
    );
    return Ok(());
}

pub fn test_for_first_message() -> Result<(), ()> {
    let streak = sample(0, None);
    let next = streak.advance(day("2023-04-01"));
    assert_eq!(next.count, 1);
    assert_eq!(next.last_date, Some(day("2023-04-01")));
    return Ok(());
}

pub fn test_for_same_day_idempotent() -> Result<(), ()> {
    let streak = sample(0, None);
    let once = streak.advance(day("2023-04-01"));
    let twice = once.advance(day("2023-04-01"));
    assert_eq!(once, twice);
    assert_eq!(twice.count, 1);
    return Ok(());
}

pub fn test_for_consecutive_day() -> Result<(), ()> {
    let streak = sample(1, Some(day("2023-04-01")));
    let next = streak.advance(day("2023-04-02"));
    assert_eq!(next.count, 2);
    assert_eq!(next.last_date, Some(day("2023-04-02")));
    return Ok(());
}

pub fn test_for_gap_resets_to_one() -> Result<(), ()> {
    let streak = sample(7, Some(day("2023-04-01")));
    let next = streak.advance(day("2023-04-04"));
    assert_eq!(next.count, 1);
    assert_eq!(next.last_date, Some(day("2023-04-04")));
    return Ok(());
}

pub fn test_for_clock_skew_resets_to_one() -> Result<(), ()> {
    let streak = sample(7, Some(day("2023-04-05")));
    let next = streak.advance(day("2023-04-04"));
    assert_eq!(next.count, 1);
    assert_eq!(next.last_date, Some(day("2023-04-04")));
    return Ok(());
}

pub fn test_for_monotonic_or_reset() -> Result<(), ()> {
    let starts = [
        sample(0, None),
        sample(1, Some(day("2023-04-01"))),
        sample(5, Some(day("2023-04-01"))),
        sample(30, Some(day("2023-03-01"))),
    ];
    let todays = [
        day("2023-03-01"),
        day("2023-04-01"),
        day("2023-04-02"),
        day("2023-04-20"),
    ];

    for streak in &starts {
        for today in &todays {
            let next = streak.advance(*today);
            let allowed =
                next.count == streak.count || next.count == streak.count + 1 || next.count == 1;
            if !allowed {
                panic!("monotonic_or_reset: {} -> {}", streak.count, next.count);
            }
        }
    }
    return Ok(());
}

pub fn test_for_no_message_invariant() -> Result<(), ()> {
    // count为0当且仅当lastDate缺失
    let never = sample(0, None);
    assert_eq!(never.count, 0);
    assert!(never.last_date.is_none());

    let todays = [day("2023-04-01"), day("2023-04-02"), day("2024-01-01")];
    for today in &todays {
        let next = never.advance(*today);
        assert!(next.count >= 1);
        assert!(next.last_date.is_some());
    }
    return Ok(());
}

pub fn test_for_streak_wire_format() -> Result<(), ()> {
    let streak = sample(2, Some(day("2023-04-02")));
    assert_json_eq!(
        serde_json::to_value(&streak).unwrap(),
        serde_json::json!({
            "count": 2,
            "lastDate": "2023-04-02",
            "participants": ["a", "b"]
        })
    );

    let parsed: Streak =
        serde_json::from_str(r#"{"count":2,"lastDate":"2023-04-02","participants":["a","b"]}"#)
            .unwrap();
    assert_eq!(parsed, streak);
    return Ok(());
}
