use thiserror::Error;

/// Browser capabilities the page needs while mounting a component.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no window object")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("missing #{0} mount point")]
    MountPointMissing(&'static str),
    #[error("2d drawing context unavailable")]
    ContextUnavailable,
    #[error("IntersectionObserver unavailable")]
    ObserverUnavailable,
    #[error("javascript error: {0}")]
    Js(String),
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("site content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate project id `{0}`")]
    DuplicateProjectId(String),
    #[error("project `{project}` uses the reserved category `all`")]
    ReservedCategory { project: String },
    #[error("section `{0}` has no entries")]
    Empty(&'static str),
}
