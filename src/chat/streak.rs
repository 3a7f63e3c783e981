/*!
 聊天连续天数（streak）状态机。

 日期一律取UTC日历日（从时间戳截断），绝不读取本机时区，
 否则不同部署区域会对同一次发送得出不同的streak。
*/

use serde::{Deserialize, Serialize};

use crate::config::datatype::{DayStamp, UserId};

/** `Streak` 一个聊天的连续天数记录。
 count为0当且仅当lastDate缺失（从未有过消息）。
 streak是聊天的对称属性，哪一方发的消息不影响计数。
*/
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub count: u32,
    pub last_date: Option<DayStamp>,
    pub participants: (UserId, UserId),
}

/** `StreakState` 当天日期与上次记录日期的关系，
 四个分支就是streak推进的全部情形
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakState {
    /// 从未有过消息
    Never,
    /// 今天已经记录过
    SameDay,
    /// 上次记录是昨天
    Consecutive,
    /// 隔了不止一天，或时钟回拨使today早于上次记录
    Gap,
}

impl StreakState {
    /** `classify` 判定today与上次记录日期的关系。
     差值按整日历日计算，与一天内的时刻无关。
    */
    pub fn classify(last_date: Option<DayStamp>, today: DayStamp) -> StreakState {
        return match last_date {
            None => StreakState::Never,
            Some(last) if last == today => StreakState::SameDay,
            Some(last) if today.signed_duration_since(last).num_days() == 1 => {
                StreakState::Consecutive
            }
            Some(_) => StreakState::Gap,
        };
    }
}

impl Streak {
    /** `never` 尚无任何消息的初始记录
    */
    pub fn never(participants: (UserId, UserId)) -> Streak {
        return Streak {
            count: 0,
            last_date: None,
            participants,
        };
    }

    /** `advance` 按当天日期推进streak。纯函数，不做IO。
     同一天内重复推进是幂等的；出现间隔时重置为1而不是0，
     因为今天确实发了消息。
    */
    pub fn advance(&self, today: DayStamp) -> Streak {
        return match StreakState::classify(self.last_date, today) {
            StreakState::Never => Streak {
                count: 1,
                last_date: Some(today),
                participants: self.participants.clone(),
            },
            StreakState::SameDay => self.clone(),
            StreakState::Consecutive => Streak {
                count: self.count + 1,
                last_date: Some(today),
                participants: self.participants.clone(),
            },
            StreakState::Gap => Streak {
                count: 1,
                last_date: Some(today),
                participants: self.participants.clone(),
            },
        };
    }
}

/** `today_utc` 当前的UTC日历日
*/
pub fn today_utc() -> DayStamp {
    return chrono::Utc::now().date_naive();
}
