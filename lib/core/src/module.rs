use axum::Router;

/// A service module that contributes HTTP routes.
///
/// Each business module (session, cart, ...) implements this trait
/// to register its API endpoints. The binary entry point collects all
/// modules and merges their routes into a single Router.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes, already rooted at the module's own
    /// prefix and carrying the module's state.
    fn routes(&self) -> Router;
}
