// ── User, group and permission domain types ──

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

use super::model_type::ModelType;
use crate::client::ProtectClient;
use crate::error::DecodeError;
use crate::model::{FromUnifiDict, RawRecord, decode_fields};
use crate::registry::EntityKind;

// ── Permissions ─────────────────────────────────────────────────────

/// Action a permission grants on a model.
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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PermissionNode {
    Create,
    Read,
    Write,
    Delete,
    ReadMedia,
    DeleteMedia,
}

/// Which objects of the model a permission applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionScope {
    /// Every object (`*` or no third segment).
    All,
    /// Only the user's own object (`$`).
    Own,
    /// An explicit list of object ids.
    Objects(Vec<String>),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PermissionError {
    #[error("invalid permission '{raw}': expected <model>:<nodes>[:<ids>]")]
    Malformed { raw: String },

    #[error("invalid permission '{raw}': unknown model '{model}'")]
    UnknownModel { raw: String, model: String },

    #[error("invalid permission '{raw}': unknown node '{node}'")]
    UnknownNode { raw: String, node: String },
}

/// A parsed permission string such as `camera:read,readmedia:*`.
///
/// Serializes back to the raw string it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permission {
    raw: String,
    model: ModelType,
    nodes: BTreeSet<PermissionNode>,
    scope: PermissionScope,
}

impl Permission {
    pub fn parse(raw: &str) -> Result<Self, PermissionError> {
        let parts: Vec<&str> = raw.split(':').collect();
        let [model, nodes, rest @ ..] = parts.as_slice() else {
            return Err(PermissionError::Malformed { raw: raw.into() });
        };

        let model = model
            .parse::<ModelType>()
            .map_err(|_| PermissionError::UnknownModel {
                raw: raw.into(),
                model: (*model).into(),
            })?;

        let nodes = if *nodes == "*" {
            PermissionNode::iter().collect()
        } else {
            nodes
                .split(',')
                .map(|node| {
                    node.parse::<PermissionNode>()
                        .map_err(|_| PermissionError::UnknownNode {
                            raw: raw.into(),
                            node: node.into(),
                        })
                })
                .collect::<Result<BTreeSet<_>, _>>()?
        };

        let scope = match rest {
            ["$"] => PermissionScope::Own,
            [ids] if *ids != "*" => {
                PermissionScope::Objects(ids.split(',').map(str::to_owned).collect())
            }
            _ => PermissionScope::All,
        };

        Ok(Self {
            raw: raw.into(),
            model,
            nodes,
            scope,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn model(&self) -> ModelType {
        self.model
    }

    pub fn nodes(&self) -> &BTreeSet<PermissionNode> {
        &self.nodes
    }

    pub fn scope(&self) -> &PermissionScope {
        &self.scope
    }

    fn covers(&self, model: ModelType, node: PermissionNode) -> bool {
        self.model == model && self.nodes.contains(&node)
    }

    /// Whether this permission grants `node` on `model` for object `obj_id`.
    ///
    /// A `$` scope never matches here: it needs to know who is asking, see
    /// [`User::can`].
    pub fn allows(&self, model: ModelType, node: PermissionNode, obj_id: Option<&str>) -> bool {
        if !self.covers(model, node) {
            return false;
        }
        match (&self.scope, obj_id) {
            (PermissionScope::All, _) => true,
            (PermissionScope::Objects(ids), Some(id)) => ids.iter().any(|i| i == id),
            (PermissionScope::Objects(_) | PermissionScope::Own, _) => false,
        }
    }

    /// Whether this is a `$` permission granting `node` on `model`.
    fn allows_own(&self, model: ModelType, node: PermissionNode) -> bool {
        self.scope == PermissionScope::Own && self.covers(model, node)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for Permission {
    type Error = PermissionError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<Permission> for String {
    fn from(p: Permission) -> Self {
        p.raw
    }
}

// ── Group ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default, rename = "type")]
    pub group_type: Option<String>,
    #[serde(default)]
    pub is_default: bool,

    #[serde(skip)]
    pub(crate) api: Option<ProtectClient>,
}

// ── Location / cloud account ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLocation {
    #[serde(default)]
    pub is_away: bool,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(skip)]
    pub(crate) api: Option<ProtectClient>,
}

/// Ubiquiti cloud (SSO) identity linked to a local user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudAccount {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    /// Id of the local user this identity belongs to.
    #[serde(rename = "user")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: Option<UserLocation>,
    #[serde(default)]
    pub profile_img: Option<String>,

    #[serde(skip)]
    pub(crate) api: Option<ProtectClient>,
}

// Wire form repeats `id` as `cloudId` and leaves out an empty location.
impl Serialize for CloudAccount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CloudAccount", 9)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("cloudId", &self.id)?;
        state.serialize_field("firstName", &self.first_name)?;
        state.serialize_field("lastName", &self.last_name)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("user", &self.user_id)?;
        state.serialize_field("name", &self.name)?;
        match &self.location {
            Some(location) => state.serialize_field("location", location)?,
            None => state.skip_field("location")?,
        }
        state.serialize_field("profileImg", &self.profile_img)?;
        state.end()
    }
}

impl_from_unifi_dict! {
    Group => Group,
    UserLocation => UserLocation,
    CloudAccount => CloudAccount,
}

// ── User ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFeatureFlags {
    #[serde(default)]
    pub notifications_v2: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub all_permissions: Vec<Permission>,
    #[serde(default)]
    pub last_login_ip: Option<String>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_login_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub enable_notifications: bool,
    #[serde(default)]
    pub has_accepted_invite: bool,
    #[serde(default)]
    pub scopes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<UserLocation>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub local_username: String,
    #[serde(default, rename = "groups")]
    pub group_ids: Vec<String>,
    #[serde(default)]
    pub cloud_account: Option<CloudAccount>,
    #[serde(default)]
    pub feature_flags: UserFeatureFlags,

    #[serde(skip)]
    pub(crate) api: Option<ProtectClient>,
}

impl User {
    pub fn api(&self) -> Option<&ProtectClient> {
        self.api.as_ref()
    }

    /// Whether any of the user's effective permissions grants `node` on
    /// `model` (optionally for a specific object id).
    ///
    /// `$` permissions only grant access to this user's own record.
    pub fn can(&self, model: ModelType, node: PermissionNode, obj_id: Option<&str>) -> bool {
        let is_self = model == ModelType::User && obj_id == Some(self.id.as_str());
        self.all_permissions
            .iter()
            .any(|p| p.allows(model, node, obj_id) || (is_self && p.allows_own(model, node)))
    }
}

impl FromUnifiDict for User {
    const KIND: EntityKind = EntityKind::User;

    // Nested objects get the same session handle as the user.
    fn from_unifi_dict(record: RawRecord, api: Option<ProtectClient>) -> Result<Self, DecodeError> {
        let mut user: Self = decode_fields(Self::KIND, record)?;
        if let Some(location) = user.location.as_mut() {
            location.api.clone_from(&api);
        }
        if let Some(account) = user.cloud_account.as_mut() {
            account.api.clone_from(&api);
            if let Some(location) = account.location.as_mut() {
                location.api.clone_from(&api);
            }
        }
        user.api = api;
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wildcard_nodes_expand_to_all() {
        let perm = Permission::parse("camera:*:*").unwrap();
        assert_eq!(perm.model(), ModelType::Camera);
        assert_eq!(perm.nodes().len(), 6);
        assert_eq!(perm.scope(), &PermissionScope::All);
    }

    #[test]
    fn node_list_and_object_ids() {
        let perm = Permission::parse("light:read,write:abc,def").unwrap();
        assert!(perm.nodes().contains(&PermissionNode::Read));
        assert!(perm.nodes().contains(&PermissionNode::Write));
        assert!(!perm.nodes().contains(&PermissionNode::Delete));
        assert_eq!(
            perm.scope(),
            &PermissionScope::Objects(vec!["abc".into(), "def".into()])
        );
        assert!(perm.allows(ModelType::Light, PermissionNode::Read, Some("def")));
        assert!(!perm.allows(ModelType::Light, PermissionNode::Read, Some("xyz")));
        assert!(!perm.allows(ModelType::Camera, PermissionNode::Read, Some("abc")));
    }

    #[test]
    fn dollar_scope_means_own_object() {
        let perm = Permission::parse("user:read,write:$").unwrap();
        assert_eq!(perm.scope(), &PermissionScope::Own);
        assert!(!perm.allows(ModelType::User, PermissionNode::Write, Some("other")));
        assert!(!perm.allows(ModelType::User, PermissionNode::Write, None));
    }

    fn self_scoped_user() -> User {
        let record = match json!({
            "modelKey": "user",
            "id": "me",
            "allPermissions": ["user:read,write:$", "camera:read:cam1"]
        }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        User::from_unifi_dict(record, None).unwrap()
    }

    #[test]
    fn own_scope_only_grants_on_own_record() {
        let user = self_scoped_user();
        assert!(user.can(ModelType::User, PermissionNode::Write, Some("me")));
        assert!(user.can(ModelType::User, PermissionNode::Read, Some("me")));
        assert!(!user.can(ModelType::User, PermissionNode::Delete, Some("me")));
        assert!(!user.can(ModelType::User, PermissionNode::Write, Some("someone_else")));
        assert!(!user.can(ModelType::User, PermissionNode::Write, None));
    }

    #[test]
    fn object_scope_needs_matching_id() {
        let user = self_scoped_user();
        assert!(user.can(ModelType::Camera, PermissionNode::Read, Some("cam1")));
        assert!(!user.can(ModelType::Camera, PermissionNode::Read, Some("cam2")));
        assert!(!user.can(ModelType::Camera, PermissionNode::Read, None));
    }

    #[test]
    fn two_part_permission_is_unrestricted() {
        let perm = Permission::parse("nvr:readmedia").unwrap();
        assert_eq!(perm.scope(), &PermissionScope::All);
        assert!(perm.nodes().contains(&PermissionNode::ReadMedia));
    }

    #[test]
    fn malformed_permissions() {
        assert_eq!(
            Permission::parse("camera"),
            Err(PermissionError::Malformed {
                raw: "camera".into()
            })
        );
        assert!(matches!(
            Permission::parse("toaster:read"),
            Err(PermissionError::UnknownModel { .. })
        ));
        assert!(matches!(
            Permission::parse("camera:fly"),
            Err(PermissionError::UnknownNode { .. })
        ));
    }

    #[test]
    fn permission_serializes_to_raw_string() {
        let perm = Permission::parse("camera:read:*").unwrap();
        assert_eq!(serde_json::to_value(&perm).unwrap(), json!("camera:read:*"));
    }

    #[test]
    fn cloud_account_serializes_cloud_id_and_drops_empty_location() {
        let record = match json!({
            "modelKey": "cloudIdentity",
            "id": "c1",
            "user": "u1",
            "name": "Jordan",
            "location": null
        }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let account = CloudAccount::from_unifi_dict(record, None).unwrap();
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["cloudId"], "c1");
        assert_eq!(value["id"], "c1");
        assert_eq!(value["user"], "u1");
        assert!(value.get("location").is_none());
    }

    #[test]
    fn user_without_location_omits_it() {
        let value = serde_json::to_value(self_scoped_user()).unwrap();
        assert!(value.get("location").is_none());
        assert_eq!(value["allPermissions"][0], "user:read,write:$");
    }

    #[test]
    fn bad_group_permission_fails_the_group() {
        let record = match json!({ "id": "g1", "name": "Admins", "permissions": ["bogus"] }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let err = Group::from_unifi_dict(record, None).unwrap_err();
        assert!(matches!(err, DecodeError::Field { kind: EntityKind::Group, .. }));
        assert!(err.to_string().contains("bogus"));
    }
}
