use tracing::debug;

/// Whether a third-party embed (e.g. an analytics dashboard) is initialized.
///
/// Owned by the component hosting the embed: initialized once at mount and torn down
/// at unmount, instead of a process-wide "already initialized" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedLifecycle {
    #[default]
    Unmounted,
    Mounted,
}

impl EmbedLifecycle {
    /// Initializes the embed. Returns `false` if it was already mounted.
    pub fn mount(&mut self) -> bool {
        match self {
            EmbedLifecycle::Mounted => false,
            EmbedLifecycle::Unmounted => {
                debug!("embed mounted");
                *self = EmbedLifecycle::Mounted;
                true
            }
        }
    }

    /// Tears the embed down. Returns `false` if it was not mounted.
    pub fn unmount(&mut self) -> bool {
        match self {
            EmbedLifecycle::Unmounted => false,
            EmbedLifecycle::Mounted => {
                debug!("embed unmounted");
                *self = EmbedLifecycle::Unmounted;
                true
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self, EmbedLifecycle::Mounted)
    }
}
