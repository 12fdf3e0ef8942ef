// ── Model type tags ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Closed set of Protect model tags, as carried in a record's
/// `modelKey` field.
///
/// Wire literals are case-sensitive. Parsing an unknown literal fails;
/// there is no catch-all variant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ModelType {
    Event,
    Group,
    UserLocation,
    CloudIdentity,
    User,
    Nvr,
    Light,
    Camera,
    Liveview,
    #[serde(rename = "viewer")]
    #[strum(serialize = "viewer")]
    Viewport,
    Bridge,
    Sensor,
    Doorlock,
}

impl ModelType {
    /// The literal used on the wire (`"userLocation"`, `"viewer"`, ...).
    pub fn as_wire(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn wire_literals() {
        assert_eq!(ModelType::UserLocation.as_wire(), "userLocation");
        assert_eq!(ModelType::CloudIdentity.as_wire(), "cloudIdentity");
        assert_eq!(ModelType::Nvr.as_wire(), "nvr");
        assert_eq!(ModelType::Viewport.as_wire(), "viewer");
        assert_eq!(ModelType::Doorlock.to_string(), "doorlock");
    }

    #[test]
    fn parse_matches_serde() {
        for model in ModelType::iter() {
            let parsed: ModelType = model.as_wire().parse().unwrap();
            assert_eq!(parsed, model);

            let json = serde_json::to_value(model).unwrap();
            assert_eq!(json, serde_json::Value::from(model.as_wire()));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("Camera".parse::<ModelType>().is_err());
        assert!("userlocation".parse::<ModelType>().is_err());
        assert!("viewport".parse::<ModelType>().is_err());
    }
}
