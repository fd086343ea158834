use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// Pickup and delivery dates derived from request time and transit days.
/// Requests at or after the cutoff hour miss same-day pickup, so the
/// pickup date shifts to the next calendar day before transit is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryWindow {
    pub pickup: NaiveDate,
    pub delivery: NaiveDate,
}

impl DeliveryWindow {
    pub fn compute(now: NaiveDateTime, transit_days: u32, cutoff_hour: u32) -> Self {
        let pickup = if now.hour() >= cutoff_hour {
            now.date() + Duration::days(1)
        } else {
            now.date()
        };
        // Calendar days: the carrier figure already reflects its own
        // business-day semantics.
        let delivery = pickup + Duration::days(i64::from(transit_days));
        Self { pickup, delivery }
    }

    pub fn iso_date(&self) -> String {
        self.delivery.format("%Y-%m-%d").to_string()
    }

    /// Short display label, e.g. "Delivers by Wed, 3 Sep".
    pub fn label(&self) -> String {
        format!("Delivers by {}", self.delivery.format("%a, %-d %b"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, hour: u32) -> NaiveDateTime {
        date.parse::<NaiveDate>()
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_before_cutoff_ships_same_day() {
        // Monday 10:00, 3 transit days -> Thursday
        let window = DeliveryWindow::compute(at("2026-08-31", 10), 3, 15);
        assert_eq!(window.pickup, "2026-08-31".parse::<NaiveDate>().unwrap());
        assert_eq!(window.iso_date(), "2026-09-03");
    }

    #[test]
    fn test_at_cutoff_shifts_pickup() {
        let window = DeliveryWindow::compute(at("2026-08-31", 15), 3, 15);
        assert_eq!(window.pickup, "2026-09-01".parse::<NaiveDate>().unwrap());
        assert_eq!(window.iso_date(), "2026-09-04");
    }

    #[test]
    fn test_after_cutoff_shifts_pickup() {
        let window = DeliveryWindow::compute(at("2026-08-31", 20), 3, 15);
        assert_eq!(window.iso_date(), "2026-09-04");
    }

    #[test]
    fn test_zero_transit_days() {
        let window = DeliveryWindow::compute(at("2026-08-31", 10), 0, 15);
        assert_eq!(window.iso_date(), "2026-08-31");
    }

    #[test]
    fn test_rolls_over_month_boundary() {
        let window = DeliveryWindow::compute(at("2026-08-30", 16), 2, 15);
        assert_eq!(window.iso_date(), "2026-09-02");
    }

    #[test]
    fn test_label_format() {
        // 2026-09-02 is a Wednesday
        let window = DeliveryWindow::compute(at("2026-08-31", 10), 2, 15);
        assert_eq!(window.label(), "Delivers by Wed, 2 Sep");
    }
}
