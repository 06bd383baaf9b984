//! Small declarative macros shared by the HTTP apps.

#[cfg(feature = "actix")]
#[doc(hidden)]
pub mod __private {
    pub use actix_web::web::ServiceConfig;
}

/// Generate a `pub fn routes(cfg: &mut ServiceConfig)` for a route module.
///
/// `route name` registers an attribute-macro handler (`#[get(..)]` and
/// friends), `module name` delegates to `name::routes`.
///
/// ```ignore
/// macros_utils::routes! {
///     route health_route,
///     module service_status,
/// }
/// ```
#[cfg(feature = "actix")]
#[macro_export]
macro_rules! routes {
    (@register $cfg:ident, route $item:ident) => {
        $cfg.service($item);
    };
    (@register $cfg:ident, module $item:ident) => {
        $cfg.configure($item::routes);
    };
    ($($kind:ident $item:ident),* $(,)?) => {
        pub fn routes(cfg: &mut $crate::__private::ServiceConfig) {
            $( $crate::routes!(@register cfg, $kind $item); )*
        }
    };
}
