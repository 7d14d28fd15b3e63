//! Resource policy table
//!
//! Maps each known backend resource to its criticality, fallback fixture, and
//! cache invalidation prefixes. Fallback and invalidation behavior is data
//! here, not conditionals scattered through the client.

/// Whether a resource may be substituted with fabricated data on failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Dashboard-critical data; a failed read may resolve to a mock fixture
    Critical,
    /// Operational data (admin lists, logs, statistics); a 404 resolves to an
    /// empty list rather than fabricated content
    NonCritical,
}

/// Policy record for one backend resource
#[derive(Debug, Clone, Copy)]
pub struct ResourcePolicy {
    /// Resource identifier, also the fixture lookup key
    pub name: &'static str,
    /// Route prefix used to match request paths against this policy
    pub prefix: &'static str,
    /// Fallback classification
    pub criticality: Criticality,
    /// Cache-key fragments purged after a successful write to this resource
    pub invalidates: &'static [&'static str],
}

/// The canonical policy table.
///
/// A write to a doctor or schedule route also purges the joined
/// doctor-schedule listings, since those embed data from both.
const POLICIES: &[ResourcePolicy] = &[
    ResourcePolicy {
        name: "doctors",
        prefix: "/doctors",
        criticality: Criticality::Critical,
        invalidates: &["/doctors", "/doctor-schedules"],
    },
    ResourcePolicy {
        name: "patients",
        prefix: "/patients",
        criticality: Criticality::Critical,
        invalidates: &["/patients"],
    },
    ResourcePolicy {
        name: "appointments",
        prefix: "/appointments",
        criticality: Criticality::Critical,
        invalidates: &["/appointments"],
    },
    ResourcePolicy {
        name: "doctor-schedules",
        prefix: "/doctor-schedules",
        criticality: Criticality::Critical,
        invalidates: &["/doctor-schedules", "/schedules"],
    },
    ResourcePolicy {
        name: "schedules",
        prefix: "/schedules",
        criticality: Criticality::Critical,
        invalidates: &["/schedules", "/doctor-schedules"],
    },
    ResourcePolicy {
        name: "lab-tests",
        prefix: "/lab-tests",
        criticality: Criticality::Critical,
        invalidates: &["/lab-tests"],
    },
    ResourcePolicy {
        name: "receptionists",
        prefix: "/receptionists",
        criticality: Criticality::NonCritical,
        invalidates: &["/receptionists"],
    },
    ResourcePolicy {
        name: "logs",
        prefix: "/logs",
        criticality: Criticality::NonCritical,
        invalidates: &["/logs"],
    },
    ResourcePolicy {
        name: "statistics",
        prefix: "/statistics",
        criticality: Criticality::NonCritical,
        invalidates: &["/statistics"],
    },
    // Role registration mutates whichever staff list the new account lands in.
    ResourcePolicy {
        name: "registration",
        prefix: "/admin/",
        criticality: Criticality::NonCritical,
        invalidates: &["/doctors", "/patients", "/receptionists"],
    },
];

/// Looks up the policy governing a request path, if any.
///
/// Matches on route prefix; query strings and trailing segments are ignored.
pub fn policy_for_path(path: &str) -> Option<&'static ResourcePolicy> {
    POLICIES.iter().find(|policy| path.starts_with(policy.prefix))
}

/// True for paths where fallback must never apply: silently "succeeding" on
/// login, logout, or the current-user probe would mask broken authentication.
pub fn is_auth_sensitive(path: &str) -> bool {
    path.starts_with("/login") || path.starts_with("/logout") || path.starts_with("/current-user")
}
