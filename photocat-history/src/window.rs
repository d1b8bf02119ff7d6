//! Time-window selection over stored readings

use photocat_core::{Channel, Reading, Timestamp};

/// Readings with `start <= timestamp < end`, optionally restricted to one
/// channel, in their original order
pub fn within_window<'a, I>(
    records: I,
    start: Timestamp,
    end: Timestamp,
    channel: Option<Channel>,
) -> Vec<Reading>
where
    I: IntoIterator<Item = &'a Reading>,
{
    records
        .into_iter()
        .filter(|r| r.timestamp >= start && r.timestamp < end)
        .filter(|r| channel.map_or(true, |c| r.channel == c))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    #[test]
    fn window_is_half_open() {
        let records = vec![
            Reading::new(Channel::Flow, 1.0, "cm/s", 90, at(1)),
            Reading::new(Channel::Flow, 2.0, "cm/s", 90, at(2)),
            Reading::new(Channel::Flow, 3.0, "cm/s", 90, at(3)),
        ];
        let kept = within_window(&records, at(1), at(3), None);
        let values: Vec<_> = kept.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![1.0, 2.0]);
    }

    #[test]
    fn channel_filter_keeps_order() {
        let records = vec![
            Reading::new(Channel::Ph, 7.1, "", 90, at(4)),
            Reading::new(Channel::Flow, 25.0, "cm/s", 90, at(2)),
            Reading::new(Channel::Ph, 7.0, "", 90, at(2)),
        ];
        let kept = within_window(&records, at(0), at(23), Some(Channel::Ph));
        let values: Vec<_> = kept.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![7.1, 7.0]);
    }
}
