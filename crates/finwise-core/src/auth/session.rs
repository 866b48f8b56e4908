use std::sync::Arc;

use tracing::{info, warn};

use super::CredentialStore;

/// Ends the current session: clears stored credentials and sends the user
/// back to the login screen, abandoning whatever was on screen.
pub trait SessionTerminator: Send + Sync {
    fn terminate(&self);
}

type NavigateFn = Box<dyn Fn() + Send + Sync>;

/// Terminator that clears a credential store and then runs a navigation
/// action (for the CLI, a "please log in again" notice).
pub struct ClearingTerminator {
    store: Arc<dyn CredentialStore>,
    navigate: NavigateFn,
}

impl ClearingTerminator {
    pub fn new(store: Arc<dyn CredentialStore>, navigate: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            store,
            navigate: Box::new(navigate),
        }
    }
}

impl SessionTerminator for ClearingTerminator {
    fn terminate(&self) {
        if let Err(e) = self.store.clear_all() {
            warn!(error = %e, "Failed to clear credentials while ending session");
        }
        info!("Session terminated, returning to login");
        (self.navigate)();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::auth::{MemoryCredentialStore, TokenSlot};

    #[test]
    fn test_clearing_terminator_clears_and_navigates() {
        let store = Arc::new(MemoryCredentialStore::with_tokens(Some("A1"), Some("R1")));
        let navigations = Arc::new(AtomicUsize::new(0));
        let counter = navigations.clone();

        let terminator = ClearingTerminator::new(store.clone(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        terminator.terminate();

        assert_eq!(navigations.load(Ordering::SeqCst), 1);
        assert_eq!(store.get(TokenSlot::Access).unwrap(), None);
        assert_eq!(store.get(TokenSlot::Refresh).unwrap(), None);
    }
}
