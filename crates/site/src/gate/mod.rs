//! Request-time access gate.
//!
//! Runs before every handler and decides whether the request continues or is
//! redirected. Rules, first applicable wins:
//!
//! 1. Public allowlist paths always continue.
//! 2. Restricted paths (admin-only, staff, back office) without a session
//!    token redirect to sign-in.
//! 3. A token whose role is not allowed on a role-restricted path redirects
//!    to the back-office home.
//! 4. While the site is deactivated, requests without a token redirect to the
//!    maintenance page. Any token bypasses maintenance, whatever its role.
//!
//! A failed activation read is logged and treated as "active".

mod middleware;
mod table;

pub use middleware::gate_middleware;
pub use table::{ACCESS_RULES, Access, classify, matches_prefix};

use tracing::warn;

use crate::models::SessionToken;
use crate::providers::SettingsProvider;

/// Sign-in page.
pub const SIGN_IN_PATH: &str = "/auth/signin";
/// Back-office home.
pub const ADMIN_HOME_PATH: &str = "/admin";
/// Maintenance page shown while the site is deactivated.
pub const MAINTENANCE_PATH: &str = "/maintenance";

/// Where a rejected request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Sign in, then come back to `next`.
    SignIn { next: String },
    /// Signed in but not allowed here.
    AdminHome,
    /// Site deactivated.
    Maintenance,
}

impl RedirectTarget {
    /// The `Location` header value.
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::SignIn { next } => {
                format!("{SIGN_IN_PATH}?next={}", urlencoding::encode(next))
            }
            Self::AdminHome => ADMIN_HOME_PATH.to_owned(),
            Self::Maintenance => MAINTENANCE_PATH.to_owned(),
        }
    }
}

/// Outcome of [`AccessGate::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    Redirect(RedirectTarget),
}

/// The access policy. Stateless; collaborators are passed per call.
pub struct AccessGate;

impl AccessGate {
    /// Decide what happens to a request for `path`.
    pub async fn evaluate<P>(
        path: &str,
        token: Option<&SessionToken>,
        settings: &P,
    ) -> GateDecision
    where
        P: SettingsProvider,
    {
        let access = classify(path);

        match (access, token) {
            (Access::Public, _) => return GateDecision::Continue,
            (Access::Authenticated | Access::Roles(_), None) => {
                return GateDecision::Redirect(RedirectTarget::SignIn {
                    next: path.to_owned(),
                });
            }
            (Access::Roles(allowed), Some(token)) if !token.has_any_role(allowed) => {
                return GateDecision::Redirect(RedirectTarget::AdminHome);
            }
            _ => {}
        }

        let active = match settings.site_active().await {
            Ok(active) => active,
            Err(e) => {
                warn!(error = %e, path, "Failed to read site activation, allowing request");
                true
            }
        };

        if !active && token.is_none() {
            return GateDecision::Redirect(RedirectTarget::Maintenance);
        }

        GateDecision::Continue
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wayfarer_core::{Email, Role, UserId};

    use super::*;
    use crate::models::settings::sample_settings;
    use crate::providers::fixtures::FakeSettings;

    fn token(role: Option<Role>) -> SessionToken {
        SessionToken {
            subject: UserId::new(7),
            email: Email::parse("staff@wayfarer.travel").unwrap(),
            role,
        }
    }

    fn active_site() -> FakeSettings {
        FakeSettings::with(Some(sample_settings()))
    }

    fn inactive_site() -> FakeSettings {
        let mut settings = sample_settings();
        settings.status = false;
        FakeSettings::with(Some(settings))
    }

    fn sign_in(next: &str) -> GateDecision {
        GateDecision::Redirect(RedirectTarget::SignIn {
            next: next.to_owned(),
        })
    }

    const ADMIN_HOME: GateDecision = GateDecision::Redirect(RedirectTarget::AdminHome);
    const MAINTENANCE: GateDecision = GateDecision::Redirect(RedirectTarget::Maintenance);

    #[tokio::test]
    async fn allowlist_continues_without_reading_settings() {
        let settings = inactive_site();
        let editor = token(Some(Role::Editor));

        for path in ["/static/app.js", "/auth/signin", "/maintenance", "/api/site-config"] {
            for t in [None, Some(&editor)] {
                assert_eq!(
                    AccessGate::evaluate(path, t, &settings).await,
                    GateDecision::Continue,
                    "{path}"
                );
            }
        }
        assert_eq!(settings.reads(), 0);
    }

    #[tokio::test]
    async fn admin_only_paths() {
        let settings = active_site();
        let path = "/admin/users";

        assert_eq!(AccessGate::evaluate(path, None, &settings).await, sign_in(path));
        assert_eq!(
            AccessGate::evaluate(path, Some(&token(Some(Role::Editor))), &settings).await,
            ADMIN_HOME
        );
        assert_eq!(
            AccessGate::evaluate(path, Some(&token(None)), &settings).await,
            ADMIN_HOME
        );
        assert_eq!(
            AccessGate::evaluate(path, Some(&token(Some(Role::Admin))), &settings).await,
            GateDecision::Continue
        );
    }

    #[tokio::test]
    async fn staff_paths() {
        let settings = active_site();

        for path in ["/admin/packages", "/api/packages/3/status"] {
            for role in [Role::Admin, Role::Editor] {
                assert_eq!(
                    AccessGate::evaluate(path, Some(&token(Some(role))), &settings).await,
                    GateDecision::Continue
                );
            }
            assert_eq!(
                AccessGate::evaluate(path, Some(&token(None)), &settings).await,
                ADMIN_HOME
            );
            assert_eq!(AccessGate::evaluate(path, None, &settings).await, sign_in(path));
        }
    }

    #[tokio::test]
    async fn back_office_home_accepts_any_token() {
        let settings = active_site();

        assert_eq!(
            AccessGate::evaluate("/admin", None, &settings).await,
            sign_in("/admin")
        );
        assert_eq!(
            AccessGate::evaluate("/admin", Some(&token(None)), &settings).await,
            GateDecision::Continue
        );
    }

    #[tokio::test]
    async fn inactive_site_sends_visitors_to_maintenance() {
        let settings = inactive_site();

        for path in ["/", "/packages/cruises", "/blog"] {
            assert_eq!(AccessGate::evaluate(path, None, &settings).await, MAINTENANCE);
        }
    }

    #[tokio::test]
    async fn any_token_bypasses_maintenance() {
        let settings = inactive_site();

        for role in [None, Some(Role::Editor), Some(Role::Admin)] {
            assert_eq!(
                AccessGate::evaluate("/packages", Some(&token(role)), &settings).await,
                GateDecision::Continue
            );
        }
    }

    #[tokio::test]
    async fn authentication_is_checked_before_activation() {
        let settings = inactive_site();

        assert_eq!(
            AccessGate::evaluate("/admin/slides", None, &settings).await,
            sign_in("/admin/slides")
        );
        assert_eq!(settings.reads(), 0);
    }

    #[tokio::test]
    async fn activation_read_failure_fails_open() {
        let settings = FakeSettings::failing();

        assert_eq!(
            AccessGate::evaluate("/packages", None, &settings).await,
            GateDecision::Continue
        );
        assert_eq!(settings.reads(), 1);
    }

    #[tokio::test]
    async fn missing_settings_row_counts_as_active() {
        let settings = FakeSettings::with(None);

        assert_eq!(
            AccessGate::evaluate("/", None, &settings).await,
            GateDecision::Continue
        );
    }

    #[test]
    fn sign_in_location_carries_encoded_next() {
        let target = RedirectTarget::SignIn {
            next: "/admin/packages/new".to_owned(),
        };
        assert_eq!(
            target.location(),
            "/auth/signin?next=%2Fadmin%2Fpackages%2Fnew"
        );
        assert_eq!(RedirectTarget::AdminHome.location(), "/admin");
        assert_eq!(RedirectTarget::Maintenance.location(), "/maintenance");
    }
}
