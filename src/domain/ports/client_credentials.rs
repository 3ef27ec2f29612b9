/// Source of the long-lived OAuth client identity.
///
/// Kept apart from the row table: client id and secret are application
/// configuration, never session state, and the store cannot change them.
pub trait ClientCredentialSource: Send + Sync {
    /// The OAuth client id, or `None` when not configured.
    fn client_id(&self) -> Option<String>;

    /// The OAuth client secret, or `None` when not configured.
    fn client_secret(&self) -> Option<String>;
}
