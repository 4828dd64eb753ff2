use serde::{Deserialize, Serialize};

/// Language used when rendering user-facing messages and dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    English,
    #[default]
    Spanish,
}

impl Locale {
    pub fn from_tag(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Some(Self::English),
            "es" | "es-es" | "spanish" | "espanol" | "español" => Some(Self::Spanish),
            _ => None,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
        }
    }

    /// Day name for a day-of-week counted from Sunday (0) to Saturday (6).
    pub fn weekday_name(self, days_from_sunday: u32) -> &'static str {
        const EN: [&str; 7] = [
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ];
        const ES: [&str; 7] = [
            "domingo",
            "lunes",
            "martes",
            "miércoles",
            "jueves",
            "viernes",
            "sábado",
        ];
        let index = (days_from_sunday % 7) as usize;
        match self {
            Self::English => EN[index],
            Self::Spanish => ES[index],
        }
    }

    /// Month name for a 1-based month number.
    pub fn month_name(self, month: u32) -> &'static str {
        const EN: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        const ES: [&str; 12] = [
            "enero",
            "febrero",
            "marzo",
            "abril",
            "mayo",
            "junio",
            "julio",
            "agosto",
            "septiembre",
            "octubre",
            "noviembre",
            "diciembre",
        ];
        let index = (month.clamp(1, 12) - 1) as usize;
        match self {
            Self::English => EN[index],
            Self::Spanish => ES[index],
        }
    }
}
