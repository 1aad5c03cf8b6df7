/// Events produced inside the runtime rather than by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The success banner has been shown long enough.
    RevertToIdle,
}
