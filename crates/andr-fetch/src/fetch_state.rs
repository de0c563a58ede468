/// Lifecycle of one fetch. `Idle` is only ever the initial state and nothing
/// leaves `Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Running,
    Delivered { succeeded: bool },
}

impl FetchState {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}
