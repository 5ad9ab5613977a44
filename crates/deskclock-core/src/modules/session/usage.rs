use deskclock_proto::ports::session::UsageRecord;

/// Share of allocated credits still remaining, as a percentage in `0.0..=100.0`.
///
/// Absent usage and an allocation of zero both render as an empty bar. Negative
/// remaining credits render empty, and more remaining than allocated renders full.
pub fn fill_percent(usage: Option<&UsageRecord>) -> f32 {
    let Some(usage) = usage else {
        return 0.0;
    };

    if usage.allocated_credits == 0.0 {
        return 0.0;
    }

    let ratio = usage.remaining_credits / usage.allocated_credits * 100.0;

    if ratio.is_finite() {
        ratio.clamp(0.0, 100.0) as f32
    } else {
        0.0
    }
}

/// Numbers shown on the usage card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsagePanel {
    pub remaining_credits: f64,
    pub allocated_credits: f64,
    pub fill_percent:      f32,
}

impl UsagePanel {
    pub fn from_usage(usage: Option<&UsageRecord>) -> Self {
        Self {
            remaining_credits: usage.map_or(0.0, |u| u.remaining_credits),
            allocated_credits: usage.map_or(0.0, |u| u.allocated_credits),
            fill_percent:      fill_percent(usage),
        }
    }

    /// `"50 / 100 credits"`.
    pub fn credits_label(&self) -> String {
        format!(
            "{} / {} credits",
            self.remaining_credits, self.allocated_credits
        )
    }
}
