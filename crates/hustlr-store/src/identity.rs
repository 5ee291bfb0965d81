//! Identity store: the user roster and the active session.
//!
//! Login is deliberately weak (any non-empty password passes for a known
//! email) because this layer simulates a backend with mock data. The
//! active session survives restarts through the [`SessionFile`] snapshot.

use std::collections::HashMap;

use tracing::{info, warn};

use hustlr_shared::{UserId, UserRole};

use crate::error::{Result, StoreError};
use crate::models::{BusinessProfile, Subscription, User};
use crate::notify::{Notice, NoticeQueue};
use crate::session::SessionFile;

/// Fields a caller may supply at signup. Everything optional falls back to
/// a type-appropriate default.
#[derive(Debug, Clone)]
pub struct SignupData {
    pub role: UserRole,
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    /// Business users only.
    pub years_in_business: Option<u32>,
    /// Business users only.
    pub description: Option<String>,
}

/// Partial profile update merged into the active session's record.
/// Role, rating, and review count are not caller-writable.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub years_in_business: Option<u32>,
    pub description: Option<String>,
}

/// Roster arena plus the active session.
pub struct IdentityStore {
    users: HashMap<UserId, User>,
    session: Option<User>,
    session_file: SessionFile,
    notices: NoticeQueue,
}

impl IdentityStore {
    /// Create the store and restore any saved session snapshot.
    pub fn new(session_file: SessionFile) -> Result<Self> {
        let session = session_file.load()?;
        if let Some(ref user) = session {
            info!(user = %user.id, "Restored saved session");
        }

        Ok(Self {
            users: HashMap::new(),
            session,
            session_file,
            notices: NoticeQueue::default(),
        })
    }

    /// The currently logged-in user, if any.
    pub fn session(&self) -> Option<&User> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn user_by_id(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Roster entry with the given id and the business role, if any.
    pub fn get_service_provider_by_id(&self, id: UserId) -> Option<&User> {
        self.users
            .get(&id)
            .filter(|user| user.role == UserRole::Business)
    }

    /// Add a roster entry directly, bypassing signup. Used by seeding.
    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Case-insensitive email lookup; any non-empty password is accepted.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User> {
        let Some(user) = self.find_by_email(email).cloned() else {
            warn!(email, "Login failed: unknown email");
            self.notices.push(Notice::error("User not found"));
            return Err(StoreError::UserNotFound);
        };

        if password.is_empty() {
            warn!(user = %user.id, "Login failed: empty password");
            self.notices.push(Notice::error("Invalid password"));
            return Err(StoreError::InvalidPassword);
        }

        self.session_file.save(&user)?;
        self.session = Some(user.clone());

        info!(user = %user.id, role = user.role.as_str(), "Logged in");
        self.notices
            .push(Notice::success(format!("Welcome back, {}!", user.name)));
        Ok(user)
    }

    /// Clear the session and its durable snapshot. Always succeeds short
    /// of an I/O failure removing the snapshot.
    pub fn logout(&mut self) -> Result<()> {
        self.session_file.clear()?;
        self.session = None;

        info!("Logged out");
        self.notices.push(Notice::success("Logged out successfully"));
        Ok(())
    }

    /// Register a new user and log them in.
    pub fn signup(&mut self, data: SignupData) -> Result<User> {
        if data.email.trim().is_empty() {
            self.notices.push(Notice::error("Email is required"));
            return Err(StoreError::Validation("email is required".to_string()));
        }

        if self.find_by_email(&data.email).is_some() {
            warn!(email = %data.email, "Signup rejected: email already registered");
            self.notices.push(Notice::error("Email already registered"));
            return Err(StoreError::EmailAlreadyRegistered);
        }

        let business = match data.role {
            UserRole::Business => Some(BusinessProfile {
                years_in_business: data.years_in_business.unwrap_or(0),
                description: data.description.unwrap_or_default(),
            }),
            UserRole::Consumer => None,
        };

        let user = User {
            id: UserId::new(),
            name: data.name.unwrap_or_else(|| "New User".to_string()),
            email: data.email,
            password: data.password,
            role: data.role,
            phone: data.phone.unwrap_or_default(),
            location: data.location.unwrap_or_default(),
            average_rating: 0.0,
            review_count: 0,
            subscription: Subscription::free(),
            business,
        };

        self.users.insert(user.id, user.clone());
        self.session_file.save(&user)?;
        self.session = Some(user.clone());

        info!(user = %user.id, role = user.role.as_str(), "Account created");
        self.notices
            .push(Notice::success("Account created successfully!"));
        Ok(user)
    }

    /// Merge a partial update into the active session's record and the
    /// matching roster entry, then re-persist the snapshot.
    pub fn update_user(&mut self, update: UserUpdate) -> Result<User> {
        let Some(mut user) = self.session.clone() else {
            self.notices
                .push(Notice::error("You must be logged in to update your profile"));
            return Err(StoreError::NotAuthenticated);
        };

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(password) = update.password {
            user.password = password;
        }
        if let Some(phone) = update.phone {
            user.phone = phone;
        }
        if let Some(location) = update.location {
            user.location = location;
        }
        if let Some(ref mut business) = user.business {
            if let Some(years) = update.years_in_business {
                business.years_in_business = years;
            }
            if let Some(description) = update.description {
                business.description = description;
            }
        }

        self.commit_session_user(user.clone())?;

        info!(user = %user.id, "Profile updated");
        self.notices
            .push(Notice::success("Profile updated successfully"));
        Ok(user)
    }

    /// Replace the active session's subscription.
    pub fn update_subscription(&mut self, subscription: Subscription) -> Result<User> {
        let Some(mut user) = self.session.clone() else {
            self.notices.push(Notice::error(
                "You must be logged in to update your subscription",
            ));
            return Err(StoreError::NotAuthenticated);
        };

        user.subscription = subscription;
        self.commit_session_user(user.clone())?;

        info!(user = %user.id, plan = %user.subscription.plan, "Subscription updated");
        self.notices
            .push(Notice::success("Subscription updated successfully"));
        Ok(user)
    }

    /// Best-effort mock: only checks the email exists.
    pub fn request_password_reset(&mut self, email: &str) -> Result<()> {
        if self.find_by_email(email).is_none() {
            self.notices.push(Notice::error("Email not found"));
            return Err(StoreError::UserNotFound);
        }

        info!(email, "Password reset requested");
        self.notices
            .push(Notice::success("Password reset link sent to your email"));
        Ok(())
    }

    /// Acknowledged non-functional stub: verifies nothing, mutates nothing.
    pub fn reset_password(&mut self, _token: &str, _new_password: &str) -> Result<()> {
        self.notices
            .push(Notice::success("Password reset successfully"));
        Ok(())
    }

    /// Remove and return pending toast notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    fn find_by_email(&self, email: &str) -> Option<&User> {
        let needle = email.to_lowercase();
        self.users
            .values()
            .find(|user| user.email.to_lowercase() == needle)
    }

    /// Write `user` through to the session, the roster (when present), and
    /// the durable snapshot.
    fn commit_session_user(&mut self, user: User) -> Result<()> {
        self.session_file.save(&user)?;
        if let Some(entry) = self.users.get_mut(&user.id) {
            *entry = user.clone();
        }
        self.session = Some(user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeKind;

    fn store_in(dir: &tempfile::TempDir) -> IdentityStore {
        let file = SessionFile::open_at(&dir.path().join("session.json"));
        IdentityStore::new(file).unwrap()
    }

    fn signup_data(role: UserRole, email: &str) -> SignupData {
        SignupData {
            role,
            email: email.to_string(),
            password: "hunter2".to_string(),
            name: Some("Test User".to_string()),
            phone: None,
            location: None,
            years_in_business: None,
            description: None,
        }
    }

    #[test]
    fn login_is_case_insensitive_on_email() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.signup(signup_data(UserRole::Consumer, "user@example.com")).unwrap();
        store.logout().unwrap();

        let user = store.login("USER@Example.COM", "anything").unwrap();
        assert_eq!(user.email, "user@example.com");
    }

    #[test]
    fn login_rejects_unknown_email_and_empty_password() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.signup(signup_data(UserRole::Consumer, "user@example.com")).unwrap();
        store.logout().unwrap();
        store.drain_notices();

        assert!(matches!(
            store.login("nobody@example.com", "pw"),
            Err(StoreError::UserNotFound)
        ));
        assert!(matches!(
            store.login("user@example.com", ""),
            Err(StoreError::InvalidPassword)
        ));

        let notices = store.drain_notices();
        assert_eq!(notices.len(), 2);
        assert!(notices.iter().all(|n| n.kind == NoticeKind::Error));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn signup_rejects_duplicate_email_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.signup(signup_data(UserRole::Consumer, "user@example.com")).unwrap();

        let err = store
            .signup(signup_data(UserRole::Business, "USER@EXAMPLE.COM"))
            .unwrap_err();
        assert!(matches!(err, StoreError::EmailAlreadyRegistered));
    }

    #[test]
    fn signup_fills_defaults_and_logs_in() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        let user = store
            .signup(SignupData {
                role: UserRole::Business,
                email: "biz@x.com".to_string(),
                password: "pw".to_string(),
                name: None,
                phone: None,
                location: None,
                years_in_business: None,
                description: None,
            })
            .unwrap();

        assert_eq!(user.name, "New User");
        assert_eq!(user.average_rating, 0.0);
        assert!(!user.subscription.active);
        assert_eq!(user.business.as_ref().unwrap().years_in_business, 0);
        assert_eq!(store.session().unwrap().id, user.id);
    }

    #[test]
    fn update_user_requires_session_and_syncs_roster() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        assert!(matches!(
            store.update_user(UserUpdate::default()),
            Err(StoreError::NotAuthenticated)
        ));

        let user = store.signup(signup_data(UserRole::Consumer, "user@example.com")).unwrap();
        let updated = store
            .update_user(UserUpdate {
                phone: Some("555-000-1111".to_string()),
                ..UserUpdate::default()
            })
            .unwrap();

        assert_eq!(updated.phone, "555-000-1111");
        assert_eq!(store.user_by_id(user.id).unwrap().phone, "555-000-1111");
    }

    #[test]
    fn session_survives_restart_until_logout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = IdentityStore::new(SessionFile::open_at(&path)).unwrap();
        let user = store.signup(signup_data(UserRole::Consumer, "user@example.com")).unwrap();

        let reloaded = IdentityStore::new(SessionFile::open_at(&path)).unwrap();
        assert_eq!(reloaded.session().unwrap().id, user.id);

        let mut store = reloaded;
        store.logout().unwrap();

        let reloaded = IdentityStore::new(SessionFile::open_at(&path)).unwrap();
        assert!(reloaded.session().is_none());
    }

    #[test]
    fn provider_lookup_filters_on_role() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let consumer = store.signup(signup_data(UserRole::Consumer, "c@x.com")).unwrap();
        let business = store.signup(signup_data(UserRole::Business, "b@x.com")).unwrap();

        assert!(store.get_service_provider_by_id(consumer.id).is_none());
        assert_eq!(
            store.get_service_provider_by_id(business.id).unwrap().id,
            business.id
        );
    }
}
