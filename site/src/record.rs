//! Shape of the provider records delivered by the stream.
//!
//! Required fields (`id` and `meta`) fail deserialization when missing, which rejects the record at load time.
//! Everything else is either an `Option` or defaulted: a `null` or malformed value falls back to the default so that
//! the page still renders without it.
use log::warn;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

fn invalid_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }

    match T::deserialize(&value) {
        Ok(parsed) => Ok(parsed),
        Err(error) => {
            warn!(target: "stream", "Ignoring invalid value {}: {}", value, error);
            Ok(T::default())
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub meta: RecordMeta,
    #[serde(default, deserialize_with = "invalid_as_default")]
    pub uid: Option<String>,
    #[serde(rename = "_site", default, deserialize_with = "invalid_as_default")]
    pub site: Option<SiteReference>,
    #[serde(default, deserialize_with = "invalid_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "invalid_as_default")]
    pub address: Address,
    #[serde(default, deserialize_with = "invalid_as_default")]
    pub main_phone: Option<String>,
    #[serde(rename = "c_providerBio", default, deserialize_with = "invalid_as_default")]
    pub bio: Option<String>,
    #[serde(rename = "c_specialtyPages", default, deserialize_with = "invalid_as_default")]
    pub specialty_pages: Vec<EntityReference>,
    #[serde(default, deserialize_with = "invalid_as_default")]
    pub hours: Option<Hours>,
    #[serde(rename = "geocodedCoordinate", default, deserialize_with = "invalid_as_default")]
    pub coordinate: Option<Coordinate>,
    #[serde(default, deserialize_with = "invalid_as_default")]
    pub services: Vec<String>,
    #[serde(default, deserialize_with = "invalid_as_default")]
    pub headshot: Option<Image>,
    #[serde(default, deserialize_with = "invalid_as_default")]
    pub accepting_new_patients: bool,
    #[serde(default, deserialize_with = "invalid_as_default")]
    pub insurance_accepted: Option<InsuranceAccepted>,
    #[serde(rename = "c_status", default, deserialize_with = "invalid_as_default")]
    pub status: Option<ProviderStatus>,
    #[serde(rename = "c_rating", default, deserialize_with = "invalid_as_default")]
    pub rating: Option<f32>,
    #[serde(rename = "c_reviewCount", default, deserialize_with = "invalid_as_default")]
    pub review_count: Option<u32>,
    #[serde(rename = "c_slot1", default, deserialize_with = "invalid_as_default")]
    pub first_slot: Option<String>,
    #[serde(rename = "c_slot2", default, deserialize_with = "invalid_as_default")]
    pub second_slot: Option<String>,
    #[serde(default, deserialize_with = "invalid_as_default")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "invalid_as_default")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "invalid_as_default")]
    pub description: Option<String>,
}

impl Provider {
    /// The pre-computed slug, if there is a non-empty one.
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|slug| !slug.is_empty())
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    pub locale: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SiteReference {
    pub name: Option<String>,
    pub logo: Option<Image>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country_code: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityReference {
    pub entity_id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alternate_text: Option<String>,
}

/// Either a plain yes/no, or how broad the accepted coverage is.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum InsuranceAccepted {
    Flag(bool),
    Coverage(InsuranceCoverage),
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsuranceCoverage {
    AllMajorPlans,
    SelectPlans,
    SelfPayOnly,
}

impl InsuranceAccepted {
    pub fn label(&self) -> &'static str {
        match self {
            InsuranceAccepted::Flag(true) => "Insurance accepted",
            InsuranceAccepted::Flag(false) => "Insurance not accepted",
            InsuranceAccepted::Coverage(InsuranceCoverage::AllMajorPlans) => {
                "Most major insurance plans accepted"
            }
            InsuranceAccepted::Coverage(InsuranceCoverage::SelectPlans) => {
                "Select insurance plans accepted"
            }
            InsuranceAccepted::Coverage(InsuranceCoverage::SelfPayOnly) => "Self-pay only",
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderStatus {
    Active,
    OnLeave,
    Inactive,
}

impl ProviderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProviderStatus::Active => "Active",
            ProviderStatus::OnLeave => "On leave",
            ProviderStatus::Inactive => "Inactive",
        }
    }
}

/// Weekly opening hours.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Hours {
    pub monday: Option<DayHours>,
    pub tuesday: Option<DayHours>,
    pub wednesday: Option<DayHours>,
    pub thursday: Option<DayHours>,
    pub friday: Option<DayHours>,
    pub saturday: Option<DayHours>,
    pub sunday: Option<DayHours>,
    pub holiday_hours: Vec<HolidayHours>,
    pub reopen_date: Option<String>,
}

impl Hours {
    /// Every day of the week, starting on Monday.
    pub fn days(&self) -> [(&'static str, Option<&DayHours>); 7] {
        [
            ("Monday", self.monday.as_ref()),
            ("Tuesday", self.tuesday.as_ref()),
            ("Wednesday", self.wednesday.as_ref()),
            ("Thursday", self.thursday.as_ref()),
            ("Friday", self.friday.as_ref()),
            ("Saturday", self.saturday.as_ref()),
            ("Sunday", self.sunday.as_ref()),
        ]
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DayHours {
    pub is_closed: bool,
    pub open_intervals: Vec<Interval>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Interval {
    pub start: String,
    pub end: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HolidayHours {
    pub date: String,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub open_intervals: Vec<Interval>,
}
