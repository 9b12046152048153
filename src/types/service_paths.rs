/// # ServicePaths
/// The provider's fixed, non-discovered service paths, relative to the base
/// url. Constructed once per [crate::provider::Provider] and injected into
/// request building, so the path table lives in one place instead of being
/// scattered through the operations.
#[derive(Debug, Clone)]
pub struct ServicePaths {
    /// Discovery document
    pub well_known: &'static str,
    /// Request id generation
    pub request_id: &'static str,
    /// Credential login for SDKs
    pub login_sdk: &'static str,
    /// User registration
    pub register: &'static str,
    /// Registration field setup
    pub registration_setup: &'static str,
    /// Password change for a logged in user
    pub change_password: &'static str,
    /// Password reset, step 1: initiate
    pub reset_password_initiate: &'static str,
    /// Password reset, step 2: validate the emailed code
    pub reset_password_validate: &'static str,
    /// Password reset, step 3: accept the new password
    pub reset_password_accept: &'static str,
    /// Profile update, `/{sub}` appended per call
    pub update_profile: &'static str,
    /// Multi factor initiation, `/{type}` appended per call
    pub mfa_initiate: &'static str,
    /// Multi factor authentication, `/{type}` appended per call
    pub mfa_authenticate: &'static str,
}

impl Default for ServicePaths {
    fn default() -> Self {
        Self {
            well_known: "/.well-known/openid-configuration",
            request_id: "/authz-srv/authrequest/authz/generate",
            login_sdk: "/login-srv/login/sdk",
            register: "/users-srv/register",
            registration_setup: "/registration-setup-srv/public/list",
            change_password: "/users-srv/changepassword",
            reset_password_initiate: "/users-srv/resetpassword/initiate",
            reset_password_validate: "/users-srv/resetpassword/validatecode",
            reset_password_accept: "/users-srv/resetpassword/accept",
            update_profile: "/users-srv/user/profile",
            mfa_initiate: "/verification-srv/v2/authenticate/initiate",
            mfa_authenticate: "/verification-srv/v2/authenticate/authenticate",
        }
    }
}
