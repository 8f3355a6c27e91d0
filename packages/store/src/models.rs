//! # Domain models for vehicles and users
//!
//! Defines the records exchanged with the fleet REST API. Every type is
//! `Serialize + Deserialize` and decodes leniently: missing fields become
//! `None` or a default, numbers and strings are accepted interchangeably for
//! values the backend is inconsistent about, and unknown fields are ignored.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`VehicleRecord`] | A vehicle with its specification data, optional notes and MOT history. Identity key: `_id`. |
//! | [`MotTest`] / [`MotDefect`] | One MOT test result and the defects recorded against it. |
//! | [`UserRecord`] | A staff account as listed on the users page. |
//! | [`NewUser`] | The payload for creating a staff account. |
//! | [`VehicleIdentifier`] | Registration number or VIN used to add a vehicle. |
//! | [`VehicleCapabilities`] | Which removal actions a vehicle card offers. |

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Minimum password length accepted by the user forms.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A vehicle as returned by `/api/vehicle/listall` and `/api/vehicle/deletedvehicles`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub registration: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vin: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub make: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub model: Option<String>,
    /// "YYYY-MM-DD" in practice; only the leading year token is relied upon.
    #[serde(default, deserialize_with = "lenient_string")]
    pub manufacture_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_deleted: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub fuel_type: Option<String>,
    #[serde(default, alias = "color", deserialize_with = "lenient_string")]
    pub primary_colour: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub engine_size: Option<String>,
    #[serde(default)]
    pub engine_power: Option<EnginePower>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub custom_notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mot_tests: Vec<MotTest>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnginePower {
    #[serde(default, deserialize_with = "lenient_string")]
    pub cc: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bhp: Option<String>,
}

/// One entry of a vehicle's MOT history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotTest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub completed_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub test_result: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub expiry_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub odometer_value: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub odometer_unit: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mot_test_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub data_source: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub defects: Vec<MotDefect>,
}

impl MotTest {
    pub fn passed(&self) -> bool {
        self.test_result.as_deref() == Some("PASSED")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotDefect {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dangerous: bool,
}

impl VehicleRecord {
    /// Leading year token of `manufacture_date`, or 0 when absent or unparseable.
    pub fn year(&self) -> i32 {
        self.manufacture_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.trim().parse().ok())
            .unwrap_or(0)
    }

    /// `created_at` as epoch milliseconds, or 0 when absent or unparseable.
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.as_deref().and_then(parse_timestamp).unwrap_or(0)
    }

    /// "Make Model", skipping whichever part is missing.
    pub fn title(&self) -> String {
        [self.make.as_deref(), self.model.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn registration_or_default(&self) -> &str {
        self.registration.as_deref().unwrap_or("")
    }
}

/// Parse an ISO-8601 timestamp or plain date into epoch milliseconds.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Card-style date: "15 Jan 2024".
pub fn format_day_month_year(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%-d %b %Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Details-style date: "Jan 15, 2024".
pub fn format_month_day_year(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Account status as reported by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Enabled,
    Disabled,
    #[serde(other)]
    Unknown,
}

impl UserStatus {
    pub fn is_disabled(self) -> bool {
        self == UserStatus::Disabled
    }

    /// Status after a successful `toggle-disable` call.
    pub fn toggled(self) -> Self {
        if self.is_disabled() {
            UserStatus::Enabled
        } else {
            UserStatus::Disabled
        }
    }

    /// Toast text after toggling an account currently in this status.
    pub fn toggle_success_message(self) -> &'static str {
        if self.is_disabled() {
            "User enabled successfully"
        } else {
            "User disabled successfully"
        }
    }

    pub fn toggle_failure_message(self) -> &'static str {
        if self.is_disabled() {
            "Error enabling user"
        } else {
            "Error disabling user"
        }
    }
}

/// A staff account as returned by `/api/user/listall`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_admin: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: UserStatus,
}

impl UserRecord {
    /// Display name with each word capitalised, e.g. "jane doe" → "Jane Doe".
    pub fn title_name(&self) -> String {
        capitalize_words(&self.display_name)
    }
}

pub fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validate a replacement password.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}

/// Payload for `POST /api/user/create`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub display_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

impl NewUser {
    /// Every text field must be non-blank.
    pub fn validate(&self) -> Result<(), String> {
        let blank = [&self.display_name, &self.username, &self.email, &self.password]
            .iter()
            .any(|f| f.trim().is_empty());
        if blank {
            return Err("Please fill in all required fields".to_string());
        }
        Ok(())
    }

    /// Trimmed copy with display name, username and email lower-cased.
    pub fn normalized(&self) -> Self {
        Self {
            display_name: self.display_name.trim().to_lowercase(),
            username: self.username.trim().to_lowercase(),
            email: self.email.trim().to_lowercase(),
            password: self.password.trim().to_string(),
            is_admin: self.is_admin,
        }
    }
}

/// How a vehicle is looked up when it is added.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleIdentifier {
    Registration(String),
    Vin(String),
}

impl VehicleIdentifier {
    pub fn value(&self) -> &str {
        match self {
            VehicleIdentifier::Registration(v) | VehicleIdentifier::Vin(v) => v,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VehicleIdentifier::Registration(_) => "Registration Number",
            VehicleIdentifier::Vin(_) => "VIN Number",
        }
    }
}

/// Removal actions a vehicle card exposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VehicleCapabilities {
    pub delete: bool,
    pub hard_delete: bool,
    pub restore: bool,
}

impl VehicleCapabilities {
    /// Cards on the main vehicle list.
    pub fn active() -> Self {
        Self {
            delete: true,
            hard_delete: true,
            restore: false,
        }
    }

    /// Cards on the deleted-vehicles list.
    pub fn deleted() -> Self {
        Self {
            delete: false,
            hard_delete: true,
            restore: true,
        }
    }
}

/// A removal the user confirmed on a vehicle card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalAction {
    SoftDelete,
    HardDelete,
    Restore,
}

impl RemovalAction {
    pub fn success_message(self) -> &'static str {
        match self {
            RemovalAction::SoftDelete => "Vehicle deleted successfully",
            RemovalAction::HardDelete => "Vehicle permanently deleted successfully",
            RemovalAction::Restore => "Vehicle restored successfully",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            RemovalAction::SoftDelete | RemovalAction::HardDelete => "Error deleting vehicle details",
            RemovalAction::Restore => "Error restoring vehicle details",
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// `null` decodes the same as a missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_decodes_leniently() {
        let json = r#"{
            "_id": "v1",
            "registration": "AB12 CDE",
            "make": "Ford",
            "manufactureDate": "2019-03-01",
            "engineSize": 1998,
            "enginePower": { "cc": 1998, "bhp": "150" },
            "color": "Blue",
            "motTests": [
                { "completedDate": "2023-05-01T10:00:00.000Z", "testResult": "PASSED",
                  "defects": [{ "type": "ADVISORY", "text": "Tyre worn", "dangerous": false }] }
            ],
            "somethingElse": [1, 2, 3]
        }"#;
        let v: VehicleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(v.id, "v1");
        assert_eq!(v.engine_size.as_deref(), Some("1998"));
        assert_eq!(v.engine_power.as_ref().unwrap().bhp.as_deref(), Some("150"));
        assert_eq!(v.primary_colour.as_deref(), Some("Blue"));
        assert_eq!(v.year(), 2019);
        assert!(v.vin.is_none());
        assert!(v.mot_tests[0].passed());
        assert_eq!(v.mot_tests[0].defects[0].kind.as_deref(), Some("ADVISORY"));
    }

    #[test]
    fn test_null_collections_and_flags_decode_as_empty() {
        let json = r#"[
            { "_id": "v1", "make": "Ford", "motTests": null },
            { "_id": "v2", "motTests": [
                { "testResult": "FAILED", "defects": null },
                { "testResult": "PASSED", "defects": [{ "text": "Rust", "dangerous": null }] }
            ] },
            { "_id": null }
        ]"#;
        let batch: Vec<VehicleRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(batch.len(), 3);
        assert!(batch[0].mot_tests.is_empty());
        assert!(batch[1].mot_tests[0].defects.is_empty());
        assert!(!batch[1].mot_tests[1].defects[0].dangerous);
        assert_eq!(batch[2].id, "");

        let user: UserRecord = serde_json::from_str(
            r#"{ "_id": "u1", "email": null, "username": null, "displayName": null,
                 "isAdmin": null, "isActive": null }"#,
        )
        .unwrap();
        assert_eq!(user.email, "");
        assert_eq!(user.title_name(), "");
        assert!(!user.is_admin);
        assert_eq!(user.is_active, UserStatus::Enabled);
    }

    #[test]
    fn test_missing_fields_degrade_to_defaults() {
        let v: VehicleRecord = serde_json::from_str(r#"{ "_id": "x", "manufactureDate": null }"#).unwrap();
        assert_eq!(v.year(), 0);
        assert_eq!(v.created_at_millis(), 0);
        assert_eq!(v.title(), "");

        let garbled = VehicleRecord {
            manufacture_date: Some("unknown".into()),
            created_at: Some("not a date".into()),
            ..Default::default()
        };
        assert_eq!(garbled.year(), 0);
        assert_eq!(garbled.created_at_millis(), 0);
    }

    #[test]
    fn test_timestamp_formats() {
        let a = parse_timestamp("2024-01-01").unwrap();
        let b = parse_timestamp("2024-01-01T00:00:00.000Z").unwrap();
        let c = parse_timestamp("2024-01-01T00:00:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(parse_timestamp("2024-02-01").unwrap() > a);
    }

    #[test]
    fn test_date_display() {
        assert_eq!(format_day_month_year(Some("2024-01-15T09:30:00Z")), "15 Jan 2024");
        assert_eq!(format_month_day_year(Some("2024-01-15")), "Jan 15, 2024");
        assert_eq!(format_month_day_year(None), "N/A");
    }

    #[test]
    fn test_user_status_toggle_and_decode() {
        let u: UserRecord = serde_json::from_str(
            r#"{ "_id": "u1", "email": "a@b.c", "displayName": "jane DOE", "isActive": "disabled" }"#,
        )
        .unwrap();
        assert!(u.is_active.is_disabled());
        assert_eq!(u.is_active.toggled(), UserStatus::Enabled);
        assert_eq!(u.title_name(), "Jane Doe");
        assert!(!u.is_admin);

        let odd: UserRecord = serde_json::from_str(r#"{ "_id": "u2", "isActive": "pending" }"#).unwrap();
        assert_eq!(odd.is_active, UserStatus::Unknown);
        assert_eq!(odd.is_active.toggled(), UserStatus::Disabled);
    }

    #[test]
    fn test_toggle_messages_follow_direction() {
        assert_eq!(UserStatus::Disabled.toggle_success_message(), "User enabled successfully");
        assert_eq!(UserStatus::Disabled.toggle_failure_message(), "Error enabling user");
        assert_eq!(UserStatus::Enabled.toggle_success_message(), "User disabled successfully");
        assert_eq!(UserStatus::Enabled.toggle_failure_message(), "Error disabling user");
    }

    #[test]
    fn test_new_user_normalization() {
        let user = NewUser {
            display_name: "  Jane Doe ".into(),
            username: "JDoe".into(),
            email: " Jane@Example.COM".into(),
            password: " Secret123 ".into(),
            is_admin: true,
        };
        assert!(user.validate().is_ok());
        let n = user.normalized();
        assert_eq!(n.display_name, "jane doe");
        assert_eq!(n.username, "jdoe");
        assert_eq!(n.email, "jane@example.com");
        assert_eq!(n.password, "Secret123");

        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["displayName"], "jane doe");
        assert_eq!(json["isAdmin"], true);

        let blank = NewUser { username: "   ".into(), ..user };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_password_rule() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn test_identifier_payload() {
        let reg = serde_json::to_value(VehicleIdentifier::Registration("AB21 XYZ".into())).unwrap();
        assert_eq!(reg, serde_json::json!({ "registration": "AB21 XYZ" }));
        let vin = serde_json::to_value(VehicleIdentifier::Vin("WVWZZZ".into())).unwrap();
        assert_eq!(vin, serde_json::json!({ "vin": "WVWZZZ" }));
    }

    #[test]
    fn test_capability_sets() {
        let active = VehicleCapabilities::active();
        assert!(active.delete && active.hard_delete && !active.restore);
        let deleted = VehicleCapabilities::deleted();
        assert!(!deleted.delete && deleted.hard_delete && deleted.restore);
    }
}
