use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// A named lookback offset, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Window {
    RealTime,
    OneDay,
    ThreeDays,
    SevenDays,
    ThirtyDays,
    SixtyDays,
    NinetyDays,
    OneYear,
}

impl Window {
    pub const ALL: [Window; 8] = [
        Window::RealTime,
        Window::OneDay,
        Window::ThreeDays,
        Window::SevenDays,
        Window::ThirtyDays,
        Window::SixtyDays,
        Window::NinetyDays,
        Window::OneYear,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Window::RealTime => "Real-Time",
            Window::OneDay => "24 hours",
            Window::ThreeDays => "3 days",
            Window::SevenDays => "7 days",
            Window::ThirtyDays => "30 days",
            Window::SixtyDays => "60 days",
            Window::NinetyDays => "90 days",
            Window::OneYear => "1 year",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Window::RealTime => "real_time",
            Window::OneDay => "1d",
            Window::ThreeDays => "3d",
            Window::SevenDays => "7d",
            Window::ThirtyDays => "30d",
            Window::SixtyDays => "60d",
            Window::NinetyDays => "90d",
            Window::OneYear => "1y",
        }
    }

    /// Day offset from today, `None` for the live spot price.
    pub fn days_back(self) -> Option<i64> {
        match self {
            Window::RealTime => None,
            Window::OneDay => Some(1),
            Window::ThreeDays => Some(3),
            Window::SevenDays => Some(7),
            Window::ThirtyDays => Some(30),
            Window::SixtyDays => Some(60),
            Window::NinetyDays => Some(90),
            Window::OneYear => Some(365),
        }
    }

    /// Every window except `RealTime`.
    pub fn historical() -> impl Iterator<Item = Window> {
        Window::ALL.into_iter().filter(|w| w.days_back().is_some())
    }
}

/// Target calendar dates for the historical windows of one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookbackDates {
    today: NaiveDate,
    dates: Vec<(Window, NaiveDate)>,
}

impl LookbackDates {
    pub fn from_today(today: NaiveDate) -> Self {
        let dates = Window::historical()
            .filter_map(|w| w.days_back().map(|d| (w, today - Duration::days(d))))
            .collect();

        Self { today, dates }
    }

    /// Dates relative to the current calendar day in `tz`.
    pub fn now_in(tz: Tz) -> Self {
        Self::from_today(Utc::now().with_timezone(&tz).date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn get(&self, window: Window) -> Option<NaiveDate> {
        self.dates
            .iter()
            .find(|(w, _)| *w == window)
            .map(|(_, date)| *date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Window, NaiveDate)> + '_ {
        self.dates.iter().copied()
    }
}
