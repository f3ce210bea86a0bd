//! Closed option sets accepted by the SerpPro API.
//!
//! Every set serializes to the PascalCase wire value the service expects
//! (`"All"`, `"Ws"`, `"WordstatFrequency"`, ...). Parsing from free text is
//! lenient about case and separators, strict about membership: anything outside
//! the set is a validation error naming the field.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shared behavior of the closed option sets.
pub trait OptionSet: Sized + Copy + 'static {
    /// Request field the set is used for, reported in validation errors.
    const FIELD: &'static str;

    fn variants() -> &'static [Self];

    /// Wire value sent to the service.
    fn as_str(&self) -> &'static str;

    /// Parse `raw` for request field `field`.
    ///
    /// `"QuotesSquareBrackets"`, `"quotes_square_brackets"` and
    /// `"quotes-square-brackets"` all resolve to the same variant.
    fn parse_field(raw: &str, field: &str) -> Result<Self> {
        let wanted = normalize(raw);
        Self::variants()
            .iter()
            .copied()
            .find(|v| normalize(v.as_str()) == wanted)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::variants().iter().map(|v| v.as_str()).collect();
                Error::invalid_field(
                    field,
                    format!(
                        "unknown value '{}', expected one of: {}",
                        raw.trim(),
                        allowed.join(", ")
                    ),
                )
            })
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! option_set {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl OptionSet for $name {
            const FIELD: &'static str = $field;

            fn variants() -> &'static [Self] {
                &[$( Self::$variant ),+]
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant) ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_field(s, Self::FIELD)
            }
        }
    };
}

option_set! {
    /// Device the frequency is counted for.
    Device, field = "device" {
        All,
        Desktop,
        Phone,
        Tablet,
    }
}

option_set! {
    /// Upstream data source for Wordstat numbers.
    TaskType, field = "task_type" {
        /// Regular Wordstat
        Regular,
        /// Yandex.Direct forecast data
        Direct,
    }
}

option_set! {
    /// Query syntax mode: plain words or Wordstat operators.
    Syntax, field = "syntax" {
        None,
        Ws,
        Quotes,
        QuotesExclamationMark,
        QuotesSquareBrackets,
        QuotesExclamationMarkSquareBrackets,
    }
}

option_set! {
    /// Time bucket size for history data.
    Grouping, field = "grouping" {
        Day,
        Week,
        Month,
    }
}

option_set! {
    SearchSystem, field = "search_system" {
        Yandex,
        Google,
    }
}

option_set! {
    /// Whether a region check matches by region name or by region code.
    RegionSearchType, field = "search_type" {
        Name,
        Code,
    }
}

option_set! {
    /// Billed API surface a usage query is scoped to.
    ServiceType, field = "service_type" {
        WordstatFrequency,
        WordstatDirectFrequency,
        WordstatDeep,
        WordstatDirectDeep,
        WordstatHistory,
        YandexSerpPosition,
        GoogleSerpPosition,
        YandexIndexation,
        GoogleIndexation,
        YandexSerpUrls,
        GoogleSerpUrls,
    }
}

impl Default for Device {
    fn default() -> Self {
        Device::All
    }
}

impl Default for TaskType {
    fn default() -> Self {
        TaskType::Regular
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Syntax::Ws
    }
}

impl Default for Grouping {
    fn default() -> Self {
        Grouping::Month
    }
}
