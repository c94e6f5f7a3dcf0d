//! Access decision trait (port)

/// Permission check. Implementations must answer `false` when no session exists.
pub trait AccessDecision {
    fn is_granted(&self, role: &str) -> bool;
}

/// Access decision for requests without a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl AccessDecision for Anonymous {
    fn is_granted(&self, _role: &str) -> bool {
        false
    }
}
