use thiserror::Error;

/// Failures while loading or evaluating a model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model not found: {0}")]
    NotFound(String),

    #[error("failed to read model {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported artifact format version {0}")]
    UnsupportedVersion(u32),

    #[error("feature layout mismatch: artifact lists {0:?}")]
    LayoutMismatch(Vec<String>),

    #[error("model contains no trees")]
    NoTrees,

    #[error("tree {tree} has no nodes")]
    EmptyTree { tree: usize },

    #[error("tree {tree} node {node}: child {child} is out of range")]
    ChildOutOfRange { tree: usize, node: usize, child: usize },

    #[error("tree {tree} node {node}: child {child} must come after its parent")]
    ChildOrder { tree: usize, node: usize, child: usize },

    #[error("tree {tree} node {node}: child {child} already has a parent")]
    SharedChild { tree: usize, node: usize, child: usize },

    #[error("tree {tree} node {node} is not reachable from the root")]
    UnreachableNode { tree: usize, node: usize },

    #[error("tree {tree} node {node}: children covers sum to {children}, expected {cover}")]
    CoverMismatch {
        tree: usize,
        node: usize,
        cover: f64,
        children: f64,
    },

    #[error("tree {tree} node {node}: split feature {feature} is out of range")]
    FeatureOutOfRange { tree: usize, node: usize, feature: usize },

    #[error("tree {tree} node {node}: threshold is not finite")]
    InvalidThreshold { tree: usize, node: usize },

    #[error("tree {tree} node {node}: leaf holds {actual} values, expected {expected}")]
    LeafWidth {
        tree: usize,
        node: usize,
        expected: usize,
        actual: usize,
    },

    #[error("tree {tree} node {node}: leaf value is not finite")]
    InvalidLeaf { tree: usize, node: usize },

    #[error("tree {tree} node {node}: leaf is not a probability distribution")]
    InvalidProbability { tree: usize, node: usize },

    #[error("tree {tree} node {node}: cover must be positive")]
    InvalidCover { tree: usize, node: usize },

    #[error("base score is not finite")]
    InvalidBaseScore,

    #[error("model produced a non-finite output")]
    NonFiniteOutput,
}
