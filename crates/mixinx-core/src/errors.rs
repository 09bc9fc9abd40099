use thiserror::Error;

/// Result type alias using MixinError
pub type Result<T> = std::result::Result<T, MixinError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised by the engine and its domain crates. Each kind maps to a stable
/// error code that can be used for programmatic error handling and testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidNodeId,
    NotFound,
    DuplicateId,

    // Selection
    InvalidGlob,

    // Application
    SupportCheckFailed,
    ApplyFailed,
    MixinFailed,

    // Domain wiring
    UnresolvableSource,
    InvalidDestination,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidNodeId => "ERR_INVALID_NODE_ID",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::DuplicateId => "ERR_DUPLICATE_ID",
            ExErrorKind::InvalidGlob => "ERR_INVALID_GLOB",
            ExErrorKind::SupportCheckFailed => "ERR_SUPPORT_CHECK_FAILED",
            ExErrorKind::ApplyFailed => "ERR_APPLY_FAILED",
            ExErrorKind::MixinFailed => "ERR_MIXIN_FAILED",
            ExErrorKind::UnresolvableSource => "ERR_UNRESOLVABLE_SOURCE",
            ExErrorKind::InvalidDestination => "ERR_INVALID_DESTINATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    node_path: Option<String>,
    mixin: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node_path: None,
            mixin: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add node path context
    pub fn with_node_path(mut self, path: impl Into<String>) -> Self {
        self.node_path = Some(path.into());
        self
    }

    /// Add mixin identity context
    pub fn with_mixin(mut self, mixin: impl Into<String>) -> Self {
        self.mixin = Some(mixin.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the node path context, if any
    pub fn node_path(&self) -> Option<&str> {
        self.node_path.as_deref()
    }

    /// Get the mixin identity context, if any
    pub fn mixin(&self) -> Option<&str> {
        self.mixin.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.node_path {
            write!(f, " (node: {})", path)?;
        }
        if let Some(mixin) = &self.mixin {
            write!(f, " (mixin: {})", mixin)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for mixin selection and application
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MixinError {
    // ===== Tree Errors =====
    /// Node handle does not belong to this tree
    #[error("Node not found: {node}")]
    NodeNotFound { node: String },

    /// Node id is empty or contains the path separator
    #[error("Invalid node id '{id}': {reason}")]
    InvalidNodeId { id: String, reason: String },

    /// A sibling with the same id already exists
    #[error("Duplicate child id '{id}' under {parent_path}")]
    DuplicateChildId { parent_path: String, id: String },

    // ===== Selector Errors =====
    /// Glob pattern rejected at selector construction
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    // ===== Application Errors =====
    /// A mixin's support check failed; the whole apply call was aborted
    #[error("Support check of mixin {mixin} failed on {node_path}: {source}")]
    SupportCheckFailed {
        mixin: String,
        node_path: String,
        #[source]
        source: Box<MixinError>,
    },

    /// A mixin's apply step failed; earlier mutations are not rolled back
    #[error("Mixin {mixin} failed to apply to {node_path}: {source}")]
    ApplyFailed {
        mixin: String,
        node_path: String,
        #[source]
        source: Box<MixinError>,
    },

    /// Failure reported by mixin code itself
    #[error("Mixin failure: {message}")]
    Mixin { message: String },

    // ===== Domain Wiring Errors =====
    /// No delivery source could be located or created
    #[error("Cannot resolve delivery source for log type '{log_type}' on {scope_path}: {reason}")]
    UnresolvableSource {
        log_type: String,
        scope_path: String,
        reason: String,
    },

    /// Destination configuration is missing a required field
    #[error("Invalid {kind} delivery destination: {reason}")]
    InvalidDestination { kind: String, reason: String },

    // ===== Generic Errors =====
    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl MixinError {
    /// Convenience constructor for mixin-authored failures
    pub fn mixin(message: impl Into<String>) -> Self {
        MixinError::Mixin {
            message: message.into(),
        }
    }

    /// The innermost error, skipping support/apply context wrappers
    pub fn root_cause(&self) -> &MixinError {
        match self {
            MixinError::SupportCheckFailed { source, .. }
            | MixinError::ApplyFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Conversion from MixinError to ExError
impl From<MixinError> for ExError {
    fn from(err: MixinError) -> Self {
        match err {
            MixinError::NodeNotFound { node } => ExError::new(ExErrorKind::NotFound)
                .with_message(format!("Node {} does not belong to this tree", node)),

            MixinError::InvalidNodeId { id, reason } => ExError::new(ExErrorKind::InvalidNodeId)
                .with_message(format!("Invalid node id '{}': {}", id, reason)),

            MixinError::DuplicateChildId { parent_path, id } => {
                ExError::new(ExErrorKind::DuplicateId)
                    .with_node_path(parent_path)
                    .with_message(format!("Child id '{}' already exists", id))
            }

            MixinError::InvalidGlob { pattern, reason } => ExError::new(ExErrorKind::InvalidGlob)
                .with_op("select")
                .with_message(format!("'{}': {}", pattern, reason)),

            MixinError::SupportCheckFailed {
                mixin,
                node_path,
                source,
            } => ExError::new(ExErrorKind::SupportCheckFailed)
                .with_op("supports")
                .with_node_path(node_path)
                .with_mixin(mixin)
                .with_message("Support check failed")
                .with_source(ExError::from(*source)),

            MixinError::ApplyFailed {
                mixin,
                node_path,
                source,
            } => ExError::new(ExErrorKind::ApplyFailed)
                .with_op("apply_to")
                .with_node_path(node_path)
                .with_mixin(mixin)
                .with_message("Mixin application failed")
                .with_source(ExError::from(*source)),

            MixinError::Mixin { message } => {
                ExError::new(ExErrorKind::MixinFailed).with_message(message)
            }

            MixinError::UnresolvableSource {
                log_type,
                scope_path,
                reason,
            } => ExError::new(ExErrorKind::UnresolvableSource)
                .with_op("bind")
                .with_node_path(scope_path)
                .with_message(format!("log type '{}': {}", log_type, reason)),

            MixinError::InvalidDestination { kind, reason } => {
                ExError::new(ExErrorKind::InvalidDestination)
                    .with_op("bind")
                    .with_message(format!("{}: {}", kind, reason))
            }

            MixinError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
