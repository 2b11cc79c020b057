//! Brand-scoped permissions and the authorization rules built on them.
//!
//! A permission string has the form `<resource>.<action>`, e.g. `pages.write`.
//! Each user holds a brand-access list and a map of brand id to the
//! permission strings granted on that brand. The same data travels inside
//! access tokens as a comma-joined brand list and one `"<brand>:<permission>"`
//! entry per granted pair.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

/// Brand id -> granted permission strings.
pub type PermissionMap = BTreeMap<DbId, BTreeSet<String>>;

/// Separator between brand id and permission in a token claim entry.
const CLAIM_SEPARATOR: char = ':';

// ---------------------------------------------------------------------------
// Resources and actions
// ---------------------------------------------------------------------------

/// A brand-scoped content resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Pages,
    Announcements,
    Partnerships,
    Media,
    Stations,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Pages,
        Resource::Announcements,
        Resource::Partnerships,
        Resource::Media,
        Resource::Stations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Announcements => "announcements",
            Self::Partnerships => "partnerships",
            Self::Media => "media",
            Self::Stations => "stations",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Write,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

/// Build the permission string for a resource/action pair.
pub fn permission_string(resource: Resource, action: Action) -> String {
    format!("{}.{}", resource.as_str(), action.as_str())
}

/// Whether `permission` names a known resource/action pair.
pub fn is_valid_permission(permission: &str) -> bool {
    let Some((resource, action)) = permission.split_once('.') else {
        return false;
    };
    Resource::ALL.iter().any(|r| r.as_str() == resource)
        && (action == Action::Read.as_str() || action == Action::Write.as_str())
}

/// Validate a permission map against a brand-access list.
///
/// Every brand key must appear in `brand_access` and every permission
/// string must be known.
pub fn validate_permission_map(
    brand_access: &[DbId],
    permissions: &PermissionMap,
) -> Result<(), CoreError> {
    for (brand_id, perms) in permissions {
        if !brand_access.contains(brand_id) {
            return Err(CoreError::Validation(format!(
                "Permissions granted for brand {brand_id} which is not in the brand access list"
            )));
        }
        if let Some(bad) = perms.iter().find(|p| !is_valid_permission(p)) {
            return Err(CoreError::Validation(format!(
                "Unknown permission '{bad}'"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Claim encoding
// ---------------------------------------------------------------------------

/// Join brand ids into the comma-separated brand-access claim.
pub fn encode_brand_access(brand_access: &[DbId]) -> String {
    brand_access
        .iter()
        .map(DbId::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse the comma-separated brand-access claim. Empty string yields no brands.
pub fn parse_brand_access(claim: &str) -> Result<BTreeSet<DbId>, CoreError> {
    claim
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<DbId>()
                .map_err(|_| CoreError::Validation(format!("Invalid brand id '{s}' in claim")))
        })
        .collect()
}

/// Flatten a permission map into one `"<brand>:<permission>"` entry per pair.
pub fn encode_permission_claims(permissions: &PermissionMap) -> Vec<String> {
    permissions
        .iter()
        .flat_map(|(brand_id, perms)| {
            perms
                .iter()
                .map(move |p| format!("{brand_id}{CLAIM_SEPARATOR}{p}"))
        })
        .collect()
}

/// Rebuild a permission map from token claim entries.
pub fn parse_permission_claims(entries: &[String]) -> Result<PermissionMap, CoreError> {
    let mut map = PermissionMap::new();
    for entry in entries {
        let (brand, perm) = entry.split_once(CLAIM_SEPARATOR).ok_or_else(|| {
            CoreError::Validation(format!("Malformed permission claim '{entry}'"))
        })?;
        let brand_id: DbId = brand
            .parse()
            .map_err(|_| CoreError::Validation(format!("Malformed permission claim '{entry}'")))?;
        map.entry(brand_id).or_default().insert(perm.to_string());
    }
    Ok(map)
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

/// Everything needed to answer "may this user do X on brand Y".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessScope {
    pub role: Role,
    pub brand_access: BTreeSet<DbId>,
    pub permissions: PermissionMap,
}

impl AccessScope {
    /// Whether the user may see the brand at all.
    pub fn has_brand(&self, brand_id: DbId) -> bool {
        self.role == Role::SuperAdmin || self.brand_access.contains(&brand_id)
    }

    /// Brands the user may see, or `None` when unrestricted.
    pub fn visible_brands(&self) -> Option<Vec<DbId>> {
        if self.role == Role::SuperAdmin {
            None
        } else {
            Some(self.brand_access.iter().copied().collect())
        }
    }

    /// Whether every brand in `brands` is within this scope.
    ///
    /// A plain admin may only manage accounts whose whole brand list it holds.
    pub fn covers_brands(&self, brands: &[DbId]) -> bool {
        brands.iter().all(|b| self.has_brand(*b))
    }

    /// Whether an account holding `brands` shows up in this scope's user lists.
    ///
    /// Matches the `users` list filter: any shared brand, or no brands at all.
    pub fn can_see_account(&self, brands: &[DbId]) -> bool {
        self.role == Role::SuperAdmin
            || brands.is_empty()
            || brands.iter().any(|b| self.brand_access.contains(b))
    }

    pub fn can_read(&self, brand_id: DbId, _resource: Resource) -> bool {
        self.has_brand(brand_id)
    }

    pub fn can_write(&self, brand_id: DbId, resource: Resource) -> bool {
        match self.role {
            Role::SuperAdmin => true,
            Role::Admin => self.has_brand(brand_id),
            Role::Editor => {
                self.has_brand(brand_id)
                    && self.permissions.get(&brand_id).is_some_and(|perms| {
                        perms.contains(&permission_string(resource, Action::Write))
                    })
            }
            Role::Viewer => false,
        }
    }

    /// Check an action, returning `Forbidden` when it is not allowed.
    pub fn require(
        &self,
        brand_id: DbId,
        resource: Resource,
        action: Action,
    ) -> Result<(), CoreError> {
        let allowed = match action {
            Action::Read => self.can_read(brand_id, resource),
            Action::Write => self.can_write(brand_id, resource),
        };
        if allowed {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "No {} access to {} for brand {brand_id}",
                action.as_str(),
                resource.as_str()
            )))
        }
    }
}
