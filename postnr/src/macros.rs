//! Macros for reconciliation error handling.
//!
//! Convenience macros for creating and returning [`crate::error::PostnrError`]
//! instances with reduced boilerplate.

/// Creates a [`crate::error::PostnrError`] from an error kind and description.
///
/// Accepts an optional trailing detail expression (converted with
/// `to_string`) and an optional `source:` error.
#[macro_export]
macro_rules! postnr_error {
    ($kind:expr, $desc:expr) => {
        $crate::error::PostnrError::from(($kind, $desc))
    };
    ($kind:expr, $desc:expr, source: $source:expr) => {
        $crate::error::PostnrError::from(($kind, $desc)).with_source($source)
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        $crate::error::PostnrError::from(($kind, $desc, $detail.to_string()))
    };
    ($kind:expr, $desc:expr, $detail:expr, source: $source:expr) => {
        $crate::error::PostnrError::from(($kind, $desc, $detail.to_string())).with_source($source)
    };
}

/// Creates and returns a [`crate::error::PostnrError`] from the current
/// function.
///
/// Combines error creation with an early return for conditions that must
/// terminate the run immediately. Supports the same optional detail and
/// source arguments as [`postnr_error!`].
#[macro_export]
macro_rules! bail {
    ($kind:expr, $desc:expr) => {
        return ::core::result::Result::Err($crate::postnr_error!($kind, $desc))
    };
    ($kind:expr, $desc:expr, source: $source:expr) => {
        return ::core::result::Result::Err($crate::postnr_error!($kind, $desc, source: $source))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        return ::core::result::Result::Err($crate::postnr_error!($kind, $desc, $detail))
    };
    ($kind:expr, $desc:expr, $detail:expr, source: $source:expr) => {
        return ::core::result::Result::Err($crate::postnr_error!(
            $kind,
            $desc,
            $detail,
            source: $source
        ))
    };
}
