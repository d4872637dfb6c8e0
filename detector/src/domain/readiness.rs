use std::fmt;

/// Whether the inference capability can be invoked.
///
/// `Ready` and `Failed` are terminal for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelReadiness {
    #[default]
    NotLoaded,
    Loading,
    Ready,
    Failed,
}

impl ModelReadiness {
    /// Next state, or `None` if the move would go backwards
    pub fn advance(self, next: ModelReadiness) -> Option<ModelReadiness> {
        use ModelReadiness::*;
        match (self, next) {
            (NotLoaded, Loading) => Some(Loading),
            (Loading, Ready) | (Loading, Failed) => Some(next),
            _ => None,
        }
    }
}

impl fmt::Display for ModelReadiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModelReadiness::NotLoaded => "not-loaded",
            ModelReadiness::Loading => "loading",
            ModelReadiness::Ready => "ready",
            ModelReadiness::Failed => "failed",
        };
        f.write_str(s)
    }
}
