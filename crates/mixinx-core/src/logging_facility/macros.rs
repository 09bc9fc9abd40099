//! Canonical logging macros
//!
//! Every operation boundary emits exactly one `start` and one `end` (or
//! `end_error`) event carrying `component`, `op` and `event` fields. The
//! macros resolve schema constants and the error facility through `$crate`,
//! so callers only need `tracing` in scope.

#[doc(hidden)]
pub use mixinx_core_types::schema as __schema;

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use mixinx_core::log_op_start;
/// log_op_start!("apply_mixins");
/// log_op_start!("apply_mixins", mixin_count = 2_u64);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::__schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::__schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use mixinx_core::log_op_end;
/// log_op_end!("apply_mixins", duration_ms = 42);
/// log_op_end!("apply_mixins", duration_ms = 42, applied_count = 3_u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::__schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::__schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error is converted into the canonical `ExError` so the event carries
/// a stable kind and code.
///
/// # Example
///
/// ```
/// # use mixinx_core::{log_op_error, errors::MixinError};
/// let err = MixinError::NodeNotFound { node: "#7".to_string() };
/// log_op_error!("apply_mixins", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::__schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = %ex_err,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::macros::__schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = %ex_err,
            $($field)*
        );
    }};
}
